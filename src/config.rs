use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{bitmap, grid};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "TREND_GRID_CONFIG";
/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "trends.toml";
/// Largest canvas, in pixels, a chart or the composite may have.
pub const MAX_CANVAS_PIXELS: u64 = 200_000_000;

// ---------------------------------------------------------------------------
// Render mode
// ---------------------------------------------------------------------------

/// Output flavour for every chart of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// PNG per data type plus the composite grid.
    #[default]
    Static,
    /// Plotly HTML document per data type, no composite.
    Interactive,
}

// ---------------------------------------------------------------------------
// Grid geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: u32,
    pub cols: u32,
}

impl GridShape {
    pub fn cells(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridShape {
    fn default() -> Self {
        GridShape { rows: 2, cols: 4 }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },
    #[error("{types} data types do not fit a {rows}x{cols} grid")]
    GridTooSmall { types: usize, rows: u32, cols: u32 },
    #[error("{name} must be positive")]
    ZeroDpi { name: &'static str },
    #[error("{name} = {dpi} needs a canvas above {max} pixels", max = MAX_CANVAS_PIXELS)]
    DpiTooLarge { name: &'static str, dpi: u32 },
}

/// Everything a run needs, fixed for its whole duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the input series files.
    pub input_dir: PathBuf,
    /// Directory that is wiped and refilled with charts on every run.
    pub output_dir: PathBuf,
    /// Filename tokens, one chart each, in grid order.
    pub data_types: Vec<String>,
    pub grid: GridShape,
    pub mode: RenderMode,
    /// Multiply y by 22 and divide x by 14 after parsing.
    pub scale_data: bool,
    /// Resolution of each per-type chart.
    pub dpi: u32,
    /// Resolution of the composite grid image.
    pub stacked_dpi: u32,
    /// Substrings removed from file stems when building legend labels, in order.
    pub label_boilerplate: Vec<String>,
    /// Data types containing this keyword get a day-count x axis.
    pub daily_keyword: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: PathBuf::from("bigDATA"),
            output_dir: PathBuf::from("NewTrends"),
            data_types: vec!["Income.Whole".to_string(), "Matrix.MarketCycle".to_string()],
            grid: GridShape::default(),
            mode: RenderMode::Static,
            scale_data: false,
            dpi: 300,
            stacked_dpi: 200,
            label_boilerplate: vec!["_eco_trendPO".to_string(), "_500val".to_string()],
            daily_keyword: "dada".to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML document; omitted keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing configuration TOML")
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Resolve the configuration for the binary: `$TREND_GRID_CONFIG`, then
    /// `trends.toml` in the working directory, then built-in defaults.
    pub fn discover() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }
        log::debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Check the invariants a run relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridShape { rows, cols } = self.grid;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        if self.data_types.len() > self.grid.cells() {
            return Err(ConfigError::GridTooSmall {
                types: self.data_types.len(),
                rows,
                cols,
            });
        }
        if self.dpi == 0 {
            return Err(ConfigError::ZeroDpi { name: "dpi" });
        }
        if self.stacked_dpi == 0 {
            return Err(ConfigError::ZeroDpi { name: "stacked_dpi" });
        }
        let limit = MAX_CANVAS_PIXELS as f64;
        if bitmap::canvas_pixels(self.dpi) > limit {
            return Err(ConfigError::DpiTooLarge {
                name: "dpi",
                dpi: self.dpi,
            });
        }
        if grid::canvas_pixels(self.grid, self.stacked_dpi) > limit {
            return Err(ConfigError::DpiTooLarge {
                name: "stacked_dpi",
                dpi: self.stacked_dpi,
            });
        }
        Ok(())
    }

    /// Every on/off option with its current value.
    pub fn boolean_options(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("static_images", self.mode == RenderMode::Static),
            ("scale_data", self.scale_data),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            data_types = ["Volatility.Index", "Distribution.Consumer", "Spread.dada"]
            mode = "interactive"
            scale_data = true

            [grid]
            rows = 1
            cols = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.data_types.len(), 3);
        assert_eq!(config.mode, RenderMode::Interactive);
        assert_eq!(config.grid, GridShape { rows: 1, cols: 3 });
        assert!(config.scale_data);
        assert_eq!(config.dpi, Config::default().dpi);
        assert_eq!(config.label_boilerplate, Config::default().label_boilerplate);
    }

    #[test]
    fn example_file_matches_defaults() {
        let config = Config::from_toml(include_str!("../trends.example.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Config::from_toml(r#"mode = "vector""#).is_err());
    }

    #[test]
    fn too_many_types_for_grid_is_rejected() {
        let config = Config {
            data_types: (0..5).map(|i| format!("T{i}")).collect(),
            grid: GridShape { rows: 2, cols: 2 },
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                types: 5,
                rows: 2,
                cols: 2
            })
        );
    }

    #[test]
    fn empty_grid_and_zero_dpi_are_rejected() {
        let empty = Config {
            grid: GridShape { rows: 0, cols: 4 },
            ..Config::default()
        };
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyGrid { .. })));

        let no_dpi = Config {
            stacked_dpi: 0,
            ..Config::default()
        };
        assert_eq!(
            no_dpi.validate(),
            Err(ConfigError::ZeroDpi { name: "stacked_dpi" })
        );
    }

    #[test]
    fn oversized_dpi_is_rejected() {
        let chart = Config {
            dpi: 1_000_000_000,
            ..Config::default()
        };
        assert_eq!(
            chart.validate(),
            Err(ConfigError::DpiTooLarge {
                name: "dpi",
                dpi: 1_000_000_000
            })
        );

        // 2x4 cells of 6in: 900 dpi is ~233M pixels, 800 dpi ~184M.
        let stacked = Config {
            stacked_dpi: 900,
            ..Config::default()
        };
        assert!(matches!(
            stacked.validate(),
            Err(ConfigError::DpiTooLarge { name: "stacked_dpi", .. })
        ));
        let original = Config {
            dpi: 500,
            stacked_dpi: 800,
            ..Config::default()
        };
        assert_eq!(original.validate(), Ok(()));
    }

    #[test]
    fn boolean_options_reflect_mode_and_scaling() {
        let config = Config {
            mode: RenderMode::Interactive,
            scale_data: true,
            ..Config::default()
        };
        assert_eq!(
            config.boolean_options(),
            vec![("static_images", false), ("scale_data", true)]
        );
    }
}
