//! Chart rendering: one overlay chart per data type, then the grid.
//!
//! ```text
//!   Chart (title, axes, labelled series)
//!        │
//!        ├── bitmap::StaticRenderer      → ChartOutput::Image(ChartImage)
//!        └── html::InteractiveRenderer   → ChartOutput::Document(path)
//!
//!   [ChartImage] ── grid::compose_grid ──► FinalTrends.png
//! ```
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{Config, RenderMode};

pub mod bitmap;
pub mod chart;
pub mod grid;
pub mod html;

pub use chart::Chart;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// A PNG chart written by [`bitmap::StaticRenderer`].  Only these can be
/// stacked into the composite grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    path: PathBuf,
}

impl ChartImage {
    pub(crate) fn new(path: PathBuf) -> Self {
        ChartImage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutput {
    Image(ChartImage),
    /// Interactive HTML document.
    Document(PathBuf),
}

impl ChartOutput {
    pub fn path(&self) -> &Path {
        match self {
            ChartOutput::Image(image) => image.path(),
            ChartOutput::Document(path) => path,
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer capability
// ---------------------------------------------------------------------------

/// Draws one [`Chart`] to disk.  `output` is always the `.png` path of the
/// chart; variants that write another format derive their path from it.
pub trait ChartRenderer {
    fn mode(&self) -> RenderMode;

    fn render(&self, chart: &Chart, output: &Path) -> Result<ChartOutput>;
}

/// The renderer selected by the run's configuration.
pub fn renderer_for(config: &Config) -> Box<dyn ChartRenderer> {
    match config.mode {
        RenderMode::Static => Box::new(bitmap::StaticRenderer::new(config.dpi)),
        RenderMode::Interactive => Box::new(html::InteractiveRenderer),
    }
}
