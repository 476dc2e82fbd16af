//! Shared output formatting for run reports.

use anyhow::Result;
use stubfix_core::{PruneReport, RunReport};

use crate::OutputFormat;

/// Print a run report in the specified format.
pub fn print(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &RunReport) {
    let mut current_file = None;

    for change in &report.changes {
        if current_file != Some(&change.location.file) {
            println!("{}", change.location.file.display());
            current_file = Some(&change.location.file);
        }
        println!(
            "  {:>5}  {} {}",
            change.location.line, change.code, change.message
        );
    }

    if !report.changes.is_empty() {
        println!();
    }

    let color = if report.has_changes() {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("{color}{}\x1b[0m", summary(report));
}

/// One-line totals, with rewritten lines broken down per transform.
fn summary(report: &RunReport) -> String {
    let verb = if report.dry_run {
        "would change"
    } else {
        "changed"
    };

    let per_transform = report
        .count_by_transform()
        .into_iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect::<Vec<_>>();
    let breakdown = if per_transform.is_empty() {
        String::new()
    } else {
        format!(" ({})", per_transform.join(", "))
    };

    format!(
        "{} file(s) {verb}, {} line(s) rewritten{breakdown}, {} file(s) scanned",
        report.files_changed(),
        report.changes.len(),
        report.files_scanned
    )
}

fn print_json(report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &RunReport) {
    for change in &report.changes {
        println!("{change}");
    }
}

/// Print a prune report.
pub fn print_prune(report: &PruneReport) {
    let verb = if report.dry_run {
        "would remove"
    } else {
        "removed"
    };

    for path in &report.removed_files {
        println!("{verb} {}", path.display());
    }
    for path in &report.removed_dirs {
        println!("{verb} {}/", path.display());
    }

    println!(
        "{} file(s) and {} director(ies) {verb}, {} file(s) kept",
        report.removed_files.len(),
        report.removed_dirs.len(),
        report.kept_files
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use stubfix_core::{Change, Location};

    fn change(code: &str, transform: &str, line: usize) -> Change {
        Change::new(
            code,
            transform,
            Location::new(PathBuf::from("core.pyi"), line),
            "rewritten",
        )
    }

    #[test]
    fn summary_breaks_lines_down_per_transform() {
        let mut report = RunReport::new(false);
        report.files_scanned = 4;
        report.changed_files.push(PathBuf::from("core.pyi"));
        report.changes.push(change("SF002", "search-replace", 7));
        report.changes.push(change("SF001", "convert-enums", 1));
        report.changes.push(change("SF001", "convert-enums", 2));

        assert_eq!(
            summary(&report),
            "1 file(s) changed, 3 line(s) rewritten (convert-enums: 2, search-replace: 1), 4 file(s) scanned"
        );
    }

    #[test]
    fn summary_of_clean_dry_run() {
        let mut report = RunReport::new(true);
        report.files_scanned = 2;

        assert_eq!(
            summary(&report),
            "0 file(s) would change, 0 line(s) rewritten, 2 file(s) scanned"
        );
    }
}
