//! Context types for transform execution.

use std::path::{Path, PathBuf};

/// Context provided to per-file transforms.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// Current file contents. When several transforms run, each one sees the
    /// output of the previous one.
    pub content: &'a str,
    /// Path relative to the run root, used for reporting.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    ///
    /// When `path` is the root itself (a single-file run), the relative path
    /// falls back to the file name.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => path
                .file_name()
                .map_or_else(|| path.to_path_buf(), PathBuf::from),
        };

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Returns a context for the same file with different contents.
    #[must_use]
    pub fn with_content<'b>(&self, content: &'b str) -> FileContext<'b>
    where
        'a: 'b,
    {
        FileContext {
            path: self.path,
            content,
            relative_path: self.relative_path.clone(),
        }
    }
}
