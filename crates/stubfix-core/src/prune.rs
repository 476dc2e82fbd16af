//! Removal of non-stub files from a generated tree.

use crate::utils::has_extension;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Errors that can occur while pruning.
#[derive(Debug, Error)]
pub enum PruneError {
    /// The prune root is not a directory.
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    /// Directory traversal failed.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Removing a file or directory failed.
    #[error("Failed to remove {path}: {source}")]
    Remove {
        /// Path that could not be removed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Result of pruning a directory tree.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PruneReport {
    /// Files removed (or that would be removed).
    pub removed_files: Vec<PathBuf>,
    /// Directories removed because nothing was kept inside them.
    pub removed_dirs: Vec<PathBuf>,
    /// Number of files kept.
    pub kept_files: usize,
    /// Whether the disk was left untouched.
    pub dry_run: bool,
}

/// Deletes every file under `dir` whose extension is not in `keep`, then
/// removes the sub-directories left without any kept file.
///
/// `dir` itself is never removed. With `dry_run`, the report lists what would
/// be removed and nothing is touched.
///
/// # Errors
///
/// Returns an error if `dir` is not a directory, if traversal fails, or if a
/// removal fails. Removals already done are not rolled back.
pub fn prune_tree(dir: &Path, keep: &[String], dry_run: bool) -> Result<PruneReport, PruneError> {
    if !dir.is_dir() {
        return Err(PruneError::NotADirectory(dir.to_path_buf()));
    }

    info!("Pruning {} (keeping {:?})", dir.display(), keep);

    let mut report = PruneReport {
        dry_run,
        ..PruneReport::default()
    };
    // Directories that still hold at least one kept entry.
    let mut occupied: HashSet<PathBuf> = HashSet::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .contents_first(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            if occupied.contains(path) {
                mark_parent(&mut occupied, path);
                continue;
            }
            debug!("Removing empty directory: {}", path.display());
            if !dry_run {
                fs::remove_dir(path).map_err(|source| PruneError::Remove {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
            report.removed_dirs.push(path.to_path_buf());
        } else if has_extension(path, keep) {
            report.kept_files += 1;
            mark_parent(&mut occupied, path);
        } else {
            debug!("Removing: {}", path.display());
            if !dry_run {
                fs::remove_file(path).map_err(|source| PruneError::Remove {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
            report.removed_files.push(path.to_path_buf());
        }
    }

    info!(
        "Prune complete: {} file(s) and {} director(ies) removed, {} file(s) kept",
        report.removed_files.len(),
        report.removed_dirs.len(),
        report.kept_files
    );

    Ok(report)
}

fn mark_parent(occupied: &mut HashSet<PathBuf>, path: &Path) {
    if let Some(parent) = path.parent() {
        occupied.insert(parent.to_path_buf());
    }
}
