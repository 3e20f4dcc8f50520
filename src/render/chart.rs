use std::path::Path;

use crate::config::Config;
use crate::data::filter::legend_label_for;
use crate::data::loader::read_series;
use crate::data::model::Series;

// ---------------------------------------------------------------------------
// Axis labels
// ---------------------------------------------------------------------------

const MAGNITUDE: &str = "Trend Magnitude";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: &'static str,
    pub y: &'static str,
}

/// Pick axis labels from keywords in the data-type token; first match wins.
pub fn axis_labels(data_type: &str, daily_keyword: &str) -> AxisLabels {
    let x = if data_type.contains("Distribution") {
        "Operational Cycle"
    } else if !daily_keyword.is_empty() && data_type.contains(daily_keyword) {
        "Days"
    } else {
        "Quarters"
    };
    AxisLabels { x, y: MAGNITUDE }
}

// ---------------------------------------------------------------------------
// Chart – backend independent description of one overlay plot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ChartLine {
    pub label: String,
    pub series: Series,
}

#[derive(Debug, Clone)]
pub struct Chart {
    /// The data-type token.
    pub title: String,
    pub axes: AxisLabels,
    pub lines: Vec<ChartLine>,
}

impl Chart {
    /// Read every matched file and keep the ones that parse.
    ///
    /// Unreadable files are logged and left out; they never fail the chart.
    pub fn assemble(files: &[&Path], data_type: &str, config: &Config) -> Self {
        let mut lines = Vec::with_capacity(files.len());
        for path in files {
            match read_series(path, config.scale_data) {
                Ok(series) => lines.push(ChartLine {
                    label: legend_label_for(path, data_type, &config.label_boilerplate),
                    series,
                }),
                Err(err) => log::warn!("{err}"),
            }
        }
        Chart {
            title: data_type.to_string(),
            axes: axis_labels(data_type, &config.daily_keyword),
            lines,
        }
    }

    /// A legend is only drawn when there is something to label.
    pub fn has_legend(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Axis ranges covering every finite point plus a 5% margin.
    ///
    /// Falls back to `0..1` on an axis with no data.
    pub fn ranges(&self) -> ((f64, f64), (f64, f64)) {
        let bounds = self
            .lines
            .iter()
            .filter_map(|line| line.series.bounds())
            .reduce(|((axl, axh), (ayl, ayh)), ((bxl, bxh), (byl, byh))| {
                ((axl.min(bxl), axh.max(bxh)), (ayl.min(byl), ayh.max(byh)))
            });
        match bounds {
            Some((x, y)) => (padded(x), padded(y)),
            None => ((0.0, 1.0), (0.0, 1.0)),
        }
    }
}

/// Axis bounds stay within this magnitude so `hi - lo` is always finite.
const AXIS_LIMIT: f64 = f64::MAX / 4.0;

fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    // Scale before subtracting: `hi - lo` overflows for values near f64::MAX.
    let pad = if hi > lo {
        hi * 0.05 - lo * 0.05
    } else {
        (lo.abs() * 0.05).max(0.5)
    };
    let lo = (lo - pad).clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let hi = (hi + pad).clamp(-AXIS_LIMIT, AXIS_LIMIT);
    if hi > lo {
        (lo, hi)
    } else if lo > 0.0 {
        (AXIS_LIMIT / 2.0, AXIS_LIMIT)
    } else {
        (-AXIS_LIMIT, -AXIS_LIMIT / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn distribution_wins_over_daily_keyword() {
        let labels = axis_labels("Distribution.dada", "dada");
        assert_eq!(labels.x, "Operational Cycle");
        assert_eq!(labels.y, "Trend Magnitude");
    }

    #[test]
    fn daily_keyword_gives_days() {
        assert_eq!(axis_labels("Spread.dada", "dada").x, "Days");
    }

    #[test]
    fn default_axis_is_quarters() {
        assert_eq!(axis_labels("Income.Whole", "dada").x, "Quarters");
        assert_eq!(axis_labels("Income.Whole", "").x, "Quarters");
    }

    #[test]
    fn assemble_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("Income.Whole_eco_trendPO_500val_A.dat");
        let bad = dir.path().join("Income.Whole_B.dat");
        fs::write(&good, "q v\n1 2\n2 3\n").unwrap();
        fs::write(&bad, "q v\n1 n/a\n").unwrap();

        let files = [good.as_path(), bad.as_path()];
        let chart = Chart::assemble(&files, "Income.Whole", &Config::default());

        assert_eq!(chart.title, "Income.Whole");
        assert_eq!(chart.lines.len(), 1);
        assert_eq!(chart.lines[0].label, "A");
        assert!(chart.has_legend());
    }

    #[test]
    fn empty_chart_has_no_legend_and_unit_ranges() {
        let chart = Chart::assemble(&[], "Matrix.MarketCycle", &Config::default());
        assert!(!chart.has_legend());
        assert_eq!(chart.ranges(), ((0.0, 1.0), (0.0, 1.0)));
    }

    #[test]
    fn ranges_cover_all_lines_with_margin() {
        let chart = Chart {
            title: "T".into(),
            axes: axis_labels("T", "dada"),
            lines: vec![
                ChartLine {
                    label: "a".into(),
                    series: Series::from_rows(vec![(0.0, 0.0), (10.0, 5.0)]),
                },
                ChartLine {
                    label: "b".into(),
                    series: Series::from_rows(vec![(0.0, -5.0)]),
                },
            ],
        };
        let ((x0, x1), (y0, y1)) = chart.ranges();
        for (got, want) in [(x0, -0.5), (x1, 10.5), (y0, -5.5), (y1, 5.5)] {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn flat_series_gets_non_zero_range() {
        assert_eq!(padded((3.0, 3.0)), (2.5, 3.5));
    }

    #[test]
    fn extreme_values_keep_ranges_finite() {
        let chart = Chart {
            title: "T".into(),
            axes: axis_labels("T", "dada"),
            lines: vec![ChartLine {
                label: "a".into(),
                series: Series::from_rows(vec![(-1e308, -1e308), (1e308, 1e308)]),
            }],
        };
        let ((x0, x1), (y0, y1)) = chart.ranges();
        for (lo, hi) in [(x0, x1), (y0, y1)] {
            assert!(lo.is_finite() && hi.is_finite());
            assert!(hi > lo);
            assert!((hi - lo).is_finite());
        }
    }

    #[test]
    fn values_beyond_axis_limit_on_one_side_still_get_a_range() {
        let (lo, hi) = padded((f64::MAX, f64::MAX));
        assert!(hi > lo && (hi - lo).is_finite());
        let (lo, hi) = padded((-f64::MAX, -f64::MAX));
        assert!(hi > lo && lo < 0.0);
    }
}
