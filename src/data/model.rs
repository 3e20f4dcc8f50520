// ---------------------------------------------------------------------------
// Series – the numeric content of one input file
// ---------------------------------------------------------------------------

/// Y-values are multiplied by this factor when rescaling is enabled.
pub const Y_SCALE: f64 = 22.0;
/// X-values are divided by this factor when rescaling is enabled.
pub const X_SCALE: f64 = 14.0;

/// Columns 0 and 1 of a data file, row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Column 0.
    pub x: Vec<f64>,
    /// Column 1 – same length as `x`.
    pub y: Vec<f64>,
}

impl Series {
    /// Build a series from parsed `(x, y)` rows.
    pub fn from_rows(rows: Vec<(f64, f64)>) -> Self {
        let (x, y) = rows.into_iter().unzip();
        Series { x, y }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Apply the fixed linear rescale (`y *= 22`, `x /= 14`), consuming `self`
    /// so a series can only be rescaled once.
    pub fn rescaled(self) -> Self {
        Series {
            x: self.x.into_iter().map(|v| v / X_SCALE).collect(),
            y: self.y.into_iter().map(|v| v * Y_SCALE).collect(),
        }
    }

    /// Iterate over `(x, y)` points.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Bounds over finite points as `((x_min, x_max), (y_min, y_max))`.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut finite = self.points().filter(|(x, y)| x.is_finite() && y.is_finite());
        let (x0, y0) = finite.next()?;
        Some(finite.fold(((x0, x0), (y0, y0)), |((xl, xh), (yl, yh)), (x, y)| {
            ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_divides_x_and_multiplies_y() {
        let series = Series::from_rows(vec![(14.0, 1.0)]).rescaled();
        assert_eq!(series.x, vec![1.0]);
        assert_eq!(series.y, vec![22.0]);
    }

    #[test]
    fn bounds_skip_non_finite_points() {
        let series = Series::from_rows(vec![(1.0, 5.0), (f64::NAN, 100.0), (3.0, -2.0)]);
        assert_eq!(series.bounds(), Some(((1.0, 3.0), (-2.0, 5.0))));
    }

    #[test]
    fn bounds_of_empty_series_is_none() {
        assert_eq!(Series::from_rows(Vec::new()).bounds(), None);
    }
}
