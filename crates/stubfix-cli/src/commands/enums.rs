//! Enums command implementation.

use anyhow::{Context, Result};
use std::io::{self, BufWriter};
use std::path::Path;
use stubfix_core::Runner;
use stubfix_transforms::{rewrite_stream, ConvertEnums};

use crate::config_resolver::ConfigLookup;
use crate::OutputFormat;

/// Options for the enums command.
pub struct Options {
    /// Leave files untouched.
    pub dry_run: bool,
    /// Exit with status 1 when a file would change.
    pub check: bool,
    /// Report format.
    pub format: OutputFormat,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
}

/// Runs the enums command.
///
/// Without a path the `[runner] root` from the config is used, falling back
/// to the working directory. A path of `-` rewrites stdin to stdout.
pub fn run(path: Option<&Path>, options: &Options, lookup: &ConfigLookup) -> Result<()> {
    if path == Some(Path::new("-")) {
        return run_stdio();
    }

    let mut builder = Runner::builder().config(lookup.load()?);
    if let Some(path) = path {
        builder = builder.root(path);
    }

    let runner = builder
        .excludes(options.exclude.iter().cloned())
        .transform(ConvertEnums::new())
        .dry_run(options.dry_run)
        .build()
        .context("Failed to set up enum conversion")?;

    tracing::info!("Converting enums under {}", runner.root().display());

    let report = runner.run().context("Enum conversion failed")?;

    super::output::print(&report, options.format)?;

    if options.check && report.has_changes() {
        std::process::exit(1);
    }

    Ok(())
}

/// Rewrites stdin to stdout.
fn run_stdio() -> Result<()> {
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    let stats = rewrite_stream(stdin, stdout).context("Failed to rewrite stdin")?;

    tracing::debug!(
        "Rewrote {} header(s) and {} field(s) in {} line(s)",
        stats.headers,
        stats.fields,
        stats.lines
    );
    Ok(())
}
