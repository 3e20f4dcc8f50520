use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::Series;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a file could not be turned into a [`Series`].
#[derive(Debug, Error)]
pub enum SeriesFault {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: '{token}' is not a number")]
    NotNumeric { line: usize, token: String },
    #[error("line {line}: expected at least 2 columns, found {found}")]
    MissingColumns { line: usize, found: usize },
    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("no data rows after the header")]
    NoRows,
}

/// The single "unreadable" outcome of [`read_series`].
#[derive(Debug, Error)]
#[error("error reading {}: {fault}", path.display())]
pub struct UnreadableSeries {
    pub path: PathBuf,
    #[source]
    pub fault: SeriesFault,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read columns 0 and 1 of a data file.  Dispatch by extension.
///
/// * `.csv` – comma separated, first record is the header
/// * anything else – whitespace separated, first line is the header
///
/// When `rescale` is set the parsed series goes through
/// [`Series::rescaled`] before being returned.
pub fn read_series(path: &Path, rescale: bool) -> Result<Series, UnreadableSeries> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let parsed = if is_csv {
        read_csv(path)
    } else {
        std::fs::read_to_string(path)
            .map_err(SeriesFault::from)
            .and_then(|text| parse_columns(&text))
    };

    match parsed {
        Ok(series) if rescale => Ok(series.rescaled()),
        Ok(series) => Ok(series),
        Err(fault) => Err(UnreadableSeries {
            path: path.to_path_buf(),
            fault,
        }),
    }
}

// ---------------------------------------------------------------------------
// Whitespace-delimited text
// ---------------------------------------------------------------------------

/// Parse whitespace separated columns, skipping the first line.
///
/// Blank lines and `#` comments are ignored.  Every data row must have the
/// column count of the first data row; only columns 0 and 1 are kept.
pub fn parse_columns(text: &str) -> Result<Series, SeriesFault> {
    let mut rows = Vec::new();
    let mut width = None;

    for (idx, raw) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let content = raw.split('#').next().unwrap_or("");
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let expected = *width.get_or_insert(tokens.len());
        if tokens.len() < 2 {
            return Err(SeriesFault::MissingColumns {
                line: line_no,
                found: tokens.len(),
            });
        }
        if tokens.len() != expected {
            return Err(SeriesFault::RaggedRow {
                line: line_no,
                expected,
                found: tokens.len(),
            });
        }

        rows.push((number(tokens[0], line_no)?, number(tokens[1], line_no)?));
    }

    if rows.is_empty() {
        return Err(SeriesFault::NoRows);
    }
    Ok(Series::from_rows(rows))
}

fn number(token: &str, line: usize) -> Result<f64, SeriesFault> {
    token.parse::<f64>().map_err(|_| SeriesFault::NotNumeric {
        line,
        token: token.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Series, SeriesFault> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        // Header is line 1.
        let line_no = record.position().map_or(0, |p| p.line() as usize);
        let (Some(x), Some(y)) = (record.get(0), record.get(1)) else {
            return Err(SeriesFault::MissingColumns {
                line: line_no,
                found: record.len(),
            });
        };
        rows.push((number(x, line_no)?, number(y, line_no)?));
    }

    if rows.is_empty() {
        return Err(SeriesFault::NoRows);
    }
    Ok(Series::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn skips_header_and_keeps_first_two_columns() {
        let series = parse_columns("time value extra\n1 2 9\n2 4 9\n3 6 9\n").unwrap();
        assert_eq!(series.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.y, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn header_is_never_validated() {
        let series = parse_columns("1 2 3 4 5 6\n0.5\t1.5\n").unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn row_count_is_line_count_minus_one() {
        let text = "header\n".to_string()
            + &(0..25).map(|i| format!("{i} {}\n", i * 2)).collect::<String>();
        let series = parse_columns(&text).unwrap();
        assert_eq!(series.len(), 25);
        assert_eq!(series.x.len(), series.y.len());
    }

    #[test]
    fn blank_lines_and_comments_are_ignored() {
        let series = parse_columns("h\n# note\n1 1\n\n2 2 # trailing\n").unwrap();
        assert_eq!(series.x, vec![1.0, 2.0]);
    }

    #[test]
    fn non_numeric_token_is_a_fault() {
        let err = parse_columns("h\n1 2\n3 abc\n").unwrap_err();
        assert!(matches!(err, SeriesFault::NotNumeric { line: 3, ref token } if token == "abc"));
    }

    #[test]
    fn single_column_is_a_fault() {
        let err = parse_columns("h\n1\n2\n").unwrap_err();
        assert!(matches!(err, SeriesFault::MissingColumns { line: 2, found: 1 }));
    }

    #[test]
    fn ragged_rows_are_a_fault() {
        let err = parse_columns("h\n1 2 3\n4 5\n").unwrap_err();
        assert!(matches!(
            err,
            SeriesFault::RaggedRow {
                line: 3,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn empty_and_header_only_files_are_faults() {
        assert!(matches!(parse_columns(""), Err(SeriesFault::NoRows)));
        assert!(matches!(parse_columns("x y\n"), Err(SeriesFault::NoRows)));
    }

    #[test]
    fn read_series_reports_path_of_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.dat");
        fs::write(&path, "x y\n1 two\n").unwrap();

        let err = read_series(&path, false).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().contains("broken.dat"));
    }

    #[test]
    fn read_series_missing_file_is_io_fault() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_series(&dir.path().join("nope.dat"), false).unwrap_err();
        assert!(matches!(err.fault, SeriesFault::Io(_)));
    }

    #[test]
    fn read_series_applies_rescale_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.dat");
        fs::write(&path, "x y\n14 1\n28 2\n").unwrap();

        let series = read_series(&path, true).unwrap();
        assert_eq!(series.x, vec![1.0, 2.0]);
        assert_eq!(series.y, vec![22.0, 44.0]);

        let plain = read_series(&path, false).unwrap();
        assert_eq!(plain.x, vec![14.0, 28.0]);
    }

    #[test]
    fn csv_files_use_comma_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.csv");
        fs::write(&path, "quarter,value,note\n1, 10.5,a\n2,11.0,b\n").unwrap();

        let series = read_series(&path, false).unwrap();
        assert_eq!(series.x, vec![1.0, 2.0]);
        assert_eq!(series.y, vec![10.5, 11.0]);
    }

    #[test]
    fn csv_with_non_numeric_cell_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.csv");
        fs::write(&path, "quarter,value\n1,high\n").unwrap();

        let err = read_series(&path, false).unwrap_err();
        assert!(matches!(err.fault, SeriesFault::NotNumeric { line: 2, .. }));
    }
}
