//! Prune command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use stubfix_core::prune_tree;
use stubfix_core::utils::normalize_extension;

use crate::config_resolver::ConfigLookup;

/// Runs the prune command.
pub fn run(dir: &Path, extensions: Vec<String>, dry_run: bool, lookup: &ConfigLookup) -> Result<()> {
    let keep: Vec<String> = if extensions.is_empty() {
        lookup.load()?.prune.keep
    } else {
        extensions
    }
    .into_iter()
    .map(|e| normalize_extension(&e))
    .collect();

    let report = prune_tree(dir, &keep, dry_run)
        .with_context(|| format!("Failed to prune {}", dir.display()))?;

    super::output::print_prune(&report);
    Ok(())
}
