use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::{Chart, ChartImage, ChartOutput, ChartRenderer};
use crate::color;
use crate::config::{RenderMode, MAX_CANVAS_PIXELS};

/// Figure size in inches; pixels are `inches * dpi`.
const FIGURE_INCHES: (f64, f64) = (6.4, 4.8);
/// Tick count hint shared by axis labels and grid lines so they line up.
const TICKS: usize = 8;

/// Pixel count of a chart canvas at `dpi`.
pub fn canvas_pixels(dpi: u32) -> f64 {
    let (w, h) = FIGURE_INCHES;
    (w * dpi as f64) * (h * dpi as f64)
}

// ---------------------------------------------------------------------------
// Static PNG renderer
// ---------------------------------------------------------------------------

/// Renders charts to PNG through the plotters bitmap backend.
#[derive(Debug, Clone, Copy)]
pub struct StaticRenderer {
    dpi: u32,
}

impl StaticRenderer {
    pub fn new(dpi: u32) -> Self {
        StaticRenderer { dpi: dpi.max(1) }
    }

    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        let (w, h) = FIGURE_INCHES;
        (self.px(w * 100.0), self.px(h * 100.0))
    }

    /// Pixels for a length given at 100 dpi.
    fn px(&self, at_100_dpi: f64) -> u32 {
        ((at_100_dpi * self.dpi as f64 / 100.0).round() as u32).max(1)
    }

    /// Pixels for a font size in points.
    fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    fn draw(&self, chart: &Chart, output: &Path) -> Result<()> {
        anyhow::ensure!(
            canvas_pixels(self.dpi) <= MAX_CANVAS_PIXELS as f64,
            "dpi {} exceeds the {MAX_CANVAS_PIXELS} pixel canvas limit",
            self.dpi
        );
        let root = BitMapBackend::new(output, self.canvas_size()).into_drawing_area();
        root.fill(&WHITE)?;

        let ((x0, x1), (y0, y1)) = chart.ranges();
        let title_style = ("sans-serif", self.pt(18.0)).into_font().color(&color::TITLE);

        let mut plot = ChartBuilder::on(&root)
            .caption(&chart.title, title_style)
            .margin(self.px(12.0))
            .x_label_area_size(self.px(45.0))
            .y_label_area_size(self.px(60.0))
            .build_cartesian_2d(x0..x1, y0..y1)?;

        plot.configure_mesh()
            .disable_mesh()
            .x_labels(TICKS)
            .y_labels(TICKS)
            .x_desc(chart.axes.x)
            .y_desc(chart.axes.y)
            .label_style(("sans-serif", self.pt(9.0)))
            .axis_desc_style(("sans-serif", self.pt(10.0)))
            .draw()?;

        // Dashed grid under the data.
        let grid_style = color::GRID.stroke_width(self.px(1.0));
        let (dash, gap) = (self.px(4.0), self.px(3.0));
        for x in RangedCoordf64::from(x0..x1).key_points(TICKS) {
            plot.draw_series(DashedLineSeries::new(
                vec![(x, y0), (x, y1)],
                dash,
                gap,
                grid_style,
            ))?;
        }
        for y in RangedCoordf64::from(y0..y1).key_points(TICKS) {
            plot.draw_series(DashedLineSeries::new(
                vec![(x0, y), (x1, y)],
                dash,
                gap,
                grid_style,
            ))?;
        }

        let sample_len = self.px(20.0) as i32;
        let palette = color::generate_palette(chart.lines.len());
        for (line, colour) in chart.lines.iter().zip(palette) {
            let style = colour.stroke_width(self.px(1.5));
            // Only points beyond the representable axis range are moved.
            let points = line
                .series
                .points()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|(x, y)| (x.clamp(x0, x1), y.clamp(y0, y1)));
            plot.draw_series(LineSeries::new(points, style))?
                .label(line.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + sample_len, y)], style));
        }

        if chart.has_legend() {
            plot.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font(("sans-serif", self.pt(9.0)))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for StaticRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Static
    }

    fn render(&self, chart: &Chart, output: &Path) -> Result<ChartOutput> {
        self.draw(chart, output)
            .with_context(|| format!("writing chart {}", output.display()))?;
        log::info!("Plot saved as {} with DPI={}", output.display(), self.dpi);
        Ok(ChartOutput::Image(ChartImage::new(output.to_path_buf())))
    }
}
