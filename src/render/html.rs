use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::{Chart, ChartOutput, ChartRenderer};
use crate::color;
use crate::config::RenderMode;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "svg"];

// ---------------------------------------------------------------------------
// Plotly payload
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Trace<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    mode: &'static str,
    name: &'a str,
    x: &'a [f64],
    y: &'a [f64],
    line: LineStyle,
}

#[derive(Serialize)]
struct LineStyle {
    color: String,
}

#[derive(Serialize)]
struct Font {
    size: u32,
    color: String,
}

#[derive(Serialize)]
struct Title<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    font: Option<Font>,
}

#[derive(Serialize)]
struct Axis<'a> {
    title: Title<'a>,
    gridcolor: String,
    griddash: &'static str,
    zerolinecolor: String,
}

#[derive(Serialize)]
struct Legend {
    x: f64,
    y: f64,
    xanchor: &'static str,
    yanchor: &'static str,
}

#[derive(Serialize)]
struct Layout<'a> {
    title: Title<'a>,
    xaxis: Axis<'a>,
    yaxis: Axis<'a>,
    showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    legend: Option<Legend>,
    plot_bgcolor: &'static str,
}

fn axis(text: &str) -> Axis<'_> {
    Axis {
        title: Title { text, font: None },
        gridcolor: color::to_hex(color::GRID),
        griddash: "dash",
        zerolinecolor: color::to_hex(color::GRID),
    }
}

fn traces(chart: &Chart) -> Vec<Trace<'_>> {
    let palette = color::generate_palette(chart.lines.len());
    chart
        .lines
        .iter()
        .zip(palette)
        .map(|(line, colour)| Trace {
            kind: "scatter",
            mode: "lines",
            name: &line.label,
            x: &line.series.x,
            y: &line.series.y,
            line: LineStyle {
                color: color::to_hex(colour),
            },
        })
        .collect()
}

fn layout(chart: &Chart) -> Layout<'_> {
    Layout {
        title: Title {
            text: &chart.title,
            font: Some(Font {
                size: 18,
                color: color::to_hex(color::TITLE),
            }),
        },
        xaxis: axis(chart.axes.x),
        yaxis: axis(chart.axes.y),
        showlegend: chart.has_legend(),
        legend: chart.has_legend().then_some(Legend {
            x: 1.0,
            y: 1.0,
            xanchor: "right",
            yanchor: "top",
        }),
        plot_bgcolor: "white",
    }
}

// ---------------------------------------------------------------------------
// Interactive HTML renderer
// ---------------------------------------------------------------------------

/// Writes a standalone plotly.js page per chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveRenderer;

impl InteractiveRenderer {
    /// The document path: the chart path without its image extension.
    pub fn document_path(output: &Path) -> PathBuf {
        let is_image = output
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)));
        if is_image {
            output.with_extension("")
        } else {
            output.to_path_buf()
        }
    }

    /// Build the full HTML page for a chart.
    pub fn document(chart: &Chart) -> Result<String> {
        let data = script_json(&traces(chart))?;
        let layout = script_json(&layout(chart))?;
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
Plotly.newPlot("chart", {data}, {layout}, {{"responsive": true}});
</script>
</body>
</html>
"#,
            title = escape_html(&chart.title),
        ))
    }
}

impl ChartRenderer for InteractiveRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Interactive
    }

    fn render(&self, chart: &Chart, output: &Path) -> Result<ChartOutput> {
        let path = Self::document_path(output);
        let html = Self::document(chart)?;
        std::fs::write(&path, html).with_context(|| format!("writing chart {}", path.display()))?;
        log::info!("Plot saved as {} with Plotly", path.display());
        Ok(ChartOutput::Document(path))
    }
}

/// JSON that is safe to inline in a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).context("serializing chart")?;
    Ok(json.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
