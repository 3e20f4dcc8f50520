use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{Config, RenderMode};
use crate::data::filter::matching_files;
use crate::render::grid::compose_grid;
use crate::render::{renderer_for, Chart, ChartOutput, ChartRenderer};

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// What was produced for one data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSummary {
    pub data_type: String,
    pub output: ChartOutput,
    /// Number of series drawn (unreadable files excluded).
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub charts: Vec<ChartSummary>,
    /// The stacked grid, only in static mode.
    pub composite: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Drives one run: clean output → discover → render per type → compose.
pub struct TrendPipeline {
    config: Config,
    renderer: Box<dyn ChartRenderer>,
}

impl TrendPipeline {
    /// Validate the configuration and pick the renderer for its mode.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        let renderer = renderer_for(&config);
        Ok(TrendPipeline { config, renderer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self) -> Result<RunReport> {
        log_snapshot(&self.config);
        reset_output_dir(&self.config.output_dir)?;

        let files = discover_files(&self.config.input_dir);
        log::debug!("discovered {} input entries", files.len());

        let mut charts = Vec::with_capacity(self.config.data_types.len());
        for data_type in &self.config.data_types {
            let matched = matching_files(&files, data_type);
            let chart = Chart::assemble(&matched, data_type, &self.config);
            let output = self
                .renderer
                .render(&chart, &chart_path(&self.config.output_dir, data_type))?;
            charts.push(ChartSummary {
                data_type: data_type.clone(),
                output,
                lines: chart.lines.len(),
            });
        }

        let images: Vec<_> = charts
            .iter()
            .filter_map(|summary| match &summary.output {
                ChartOutput::Image(image) => Some(image.clone()),
                ChartOutput::Document(_) => None,
            })
            .collect();

        let composite = if self.renderer.mode() == RenderMode::Static {
            Some(compose_grid(
                &images,
                &self.config.output_dir,
                self.config.grid,
                self.config.stacked_dpi,
            )?)
        } else {
            log::info!("Skipping grid stacking - not available for interactive output");
            None
        };

        Ok(RunReport { charts, composite })
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Log every boolean option so the operator sees what is switched on.
pub fn log_snapshot(config: &Config) {
    log::info!("Options for this run:");
    for (name, value) in config.boolean_options() {
        log::info!("  {name} = {value}");
    }
}

/// Remove `path` recursively if it exists, then create it again.
///
/// A failed removal is only logged; a failed creation aborts the run.
pub fn reset_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        match std::fs::remove_dir_all(path) {
            Ok(()) => log::info!("Removed existing directory: {}", path.display()),
            Err(err) => log::error!("Error removing directory {}: {err}", path.display()),
        }
    } else {
        log::info!("Directory does not exist, creating new one: {}", path.display());
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("creating output directory {}", path.display()))
}

/// Entries directly under `dir`, hidden names excluded, sorted by full path.
///
/// An unreadable or missing directory yields an empty listing.
pub fn discover_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("cannot list input directory {}: {err}", dir.display());
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.path())
        .collect();
    files.sort();
    files
}

/// `<output_dir>/<data_type>_plot.png`
pub fn chart_path(output_dir: &Path, data_type: &str) -> PathBuf {
    output_dir.join(format!("{data_type}_plot.png"))
}
