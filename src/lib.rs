//! Group time-series files by name pattern, overlay each group in one chart
//! and stack the charts into a grid image.
//!
//! ```text
//!  input dir ──► discover ──► match per data type ──► Chart ──► renderer
//!                                                               │
//!                                  static PNGs ──► grid::compose_grid
//! ```

pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod render;

pub use config::{Config, GridShape, RenderMode};
pub use pipeline::{ChartSummary, RunReport, TrendPipeline};
