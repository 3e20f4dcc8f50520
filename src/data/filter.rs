use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Pattern matching: which files belong to a data type
// ---------------------------------------------------------------------------

/// Return the files whose basename contains `data_type` as a literal,
/// case-sensitive substring, in the order given.
///
/// Matching is not exclusive: a file whose name carries several tokens is
/// returned for each of them.
pub fn matching_files<'a>(files: &'a [PathBuf], data_type: &str) -> Vec<&'a Path> {
    files
        .iter()
        .filter(|path| basename(path).contains(data_type))
        .map(PathBuf::as_path)
        .collect()
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Legend labels
// ---------------------------------------------------------------------------

/// Derive a legend label from a file stem.
///
/// Removal order matters:
/// 1. every occurrence of the data-type token
/// 2. every occurrence of each boilerplate marker, in list order
/// 3. the first remaining underscore
/// 4. trailing underscores
pub fn legend_label<S: AsRef<str>>(stem: &str, data_type: &str, boilerplate: &[S]) -> String {
    let mut label = strip(stem, data_type);
    for marker in boilerplate {
        label = strip(&label, marker.as_ref());
    }
    label.replacen('_', "", 1).trim_end_matches('_').to_string()
}

fn strip(text: &str, pattern: &str) -> String {
    if pattern.is_empty() {
        text.to_string()
    } else {
        text.replace(pattern, "")
    }
}

/// Legend label for a path: the stem is the basename minus its last extension.
pub fn legend_label_for<S: AsRef<str>>(path: &Path, data_type: &str, boilerplate: &[S]) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    legend_label(&stem, data_type, boilerplate)
}
