use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use thiserror::Error;

use super::ChartImage;
use crate::config::{GridShape, MAX_CANVAS_PIXELS};

/// Name of the composite image inside the output directory.
pub const COMPOSITE_FILE: &str = "FinalTrends.png";
/// Each grid cell is a square of this many inches.
const CELL_INCHES: f64 = 6.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },
    #[error("{images} charts do not fit a {rows}x{cols} grid")]
    TooManyImages { images: usize, rows: u32, cols: u32 },
    #[error("a {rows}x{cols} grid at {dpi} dpi exceeds the {max} pixel canvas limit", max = MAX_CANVAS_PIXELS)]
    CanvasTooLarge { rows: u32, cols: u32, dpi: u32 },
}

/// Side of one grid cell in pixels.
pub fn cell_size(dpi: u32) -> u32 {
    ((CELL_INCHES * dpi as f64).round() as u32).max(1)
}

/// Pixel count of the composite for `grid` at `dpi`.
pub fn canvas_pixels(grid: GridShape, dpi: u32) -> f64 {
    let side = CELL_INCHES * dpi as f64;
    side * side * grid.cells() as f64
}

/// Stack chart images row-major into a `rows x cols` grid and save it as
/// [`COMPOSITE_FILE`] in `output_dir`.
///
/// Each image is scaled to fit its cell, keeping its aspect ratio, and
/// centred on a white background.  Cells past the last image stay blank.
pub fn compose_grid(
    images: &[ChartImage],
    output_dir: &Path,
    grid: GridShape,
    dpi: u32,
) -> Result<PathBuf> {
    let GridShape { rows, cols } = grid;
    if rows == 0 || cols == 0 {
        return Err(GridError::EmptyGrid { rows, cols }.into());
    }
    if images.len() > grid.cells() {
        return Err(GridError::TooManyImages {
            images: images.len(),
            rows,
            cols,
        }
        .into());
    }

    let cell = cell_size(dpi);
    let too_large = GridError::CanvasTooLarge { rows, cols, dpi };
    let (width, height) = match (cell.checked_mul(cols), cell.checked_mul(rows)) {
        (Some(w), Some(h)) if u64::from(w) * u64::from(h) <= MAX_CANVAS_PIXELS => (w, h),
        _ => return Err(too_large.into()),
    };
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    for (i, chart) in images.iter().enumerate() {
        let (row, col) = (i as u32 / cols, i as u32 % cols);
        let tile = image::open(chart.path())
            .with_context(|| format!("loading chart {}", chart.path().display()))?
            .resize(cell, cell, FilterType::Triangle)
            .to_rgb8();

        let x = col * cell + (cell - tile.width()) / 2;
        let y = row * cell + (cell - tile.height()) / 2;
        imageops::overlay(&mut canvas, &tile, i64::from(x), i64::from(y));
    }

    let output = output_dir.join(COMPOSITE_FILE);
    canvas
        .save(&output)
        .with_context(|| format!("writing composite {}", output.display()))?;
    log::info!("Stacked plots saved as {} with DPI={dpi}", output.display());
    Ok(output)
}
