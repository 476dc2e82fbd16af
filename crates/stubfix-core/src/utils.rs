//! Path and line helpers.

use std::path::Path;

/// Normalizes an extension to its dotted form (`"pyi"` and `".pyi"` both
/// become `".pyi"`).
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

/// Checks if the last extension of `path` is one of `extensions`.
///
/// Only the final suffix counts, so `stub.pyi.bak` has extension `.bak`.
/// Files without an extension never match.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use stubfix_core::utils::has_extension;
///
/// let exts = vec![".py".to_string(), "pyi".to_string()];
/// assert!(has_extension(Path::new("qgis/core.pyi"), &exts));
/// assert!(!has_extension(Path::new("qgis/core.pyi.bak"), &exts));
/// ```
#[must_use]
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|candidate| candidate.trim_start_matches('.') == ext)
}

/// Splits a line into its body and its terminator (`"\n"`, `"\r\n"` or `""`).
#[must_use]
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
