//! Core types for rewrite changes and run results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Location of a rewritten line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the run root.
    pub file: PathBuf,
    /// Line number (1-indexed) in the input file.
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }
}

/// A single change made by a transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Transform code (e.g., "SF001").
    pub code: String,
    /// Transform name (e.g., "convert-enums").
    pub transform: String,
    /// Line that was rewritten.
    pub location: Location,
    /// Human-readable description of the change.
    pub message: String,
}

impl Change {
    /// Creates a new change.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        transform: impl Into<String>,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            transform: transform.into(),
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.code,
            self.message
        )
    }
}

/// Output of one transform applied to one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten file contents.
    pub content: String,
    /// Changes made, in line order.
    pub changes: Vec<Change>,
}

impl Rewrite {
    /// Creates a rewrite that leaves `content` untouched.
    #[must_use]
    pub fn unchanged(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            changes: Vec::new(),
        }
    }

    /// Returns true if the transform recorded any change.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Result of a run over a file or directory tree.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// All changes made (or that would be made, in dry-run mode).
    pub changes: Vec<Change>,
    /// Number of files read.
    pub files_scanned: usize,
    /// Files whose contents differ after the run, relative to the run root.
    pub changed_files: Vec<PathBuf>,
    /// Whether files were left untouched on disk.
    pub dry_run: bool,
}

impl RunReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Returns the number of changed files.
    #[must_use]
    pub fn files_changed(&self) -> usize {
        self.changed_files.len()
    }

    /// Returns true if any file changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changed_files.is_empty()
    }

    /// Counts changes per transform name.
    #[must_use]
    pub fn count_by_transform(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for change in &self.changes {
            *counts.entry(change.transform.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
