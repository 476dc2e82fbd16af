//! stubfix CLI tool.
//!
//! Usage:
//! ```bash
//! stubfix enums [OPTIONS] [PATH]
//! stubfix replace [OPTIONS] PATH [OLD NEW]
//! stubfix prune [OPTIONS] DIR
//! stubfix list
//! stubfix init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Normalizer for generated Python type-stub files
#[derive(Parser)]
#[command(name = "stubfix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move enum members declared after `class X(int): ...` into the class body
    Enums {
        /// File or directory to rewrite, or `-` for stdin to stdout
        /// (default: `[runner] root` from the config, else the current directory)
        path: Option<PathBuf>,

        /// Report changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Like --dry-run, but exit with status 1 if any file would change
        #[arg(long)]
        check: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Replace a literal single-line string in a file or directory tree
    Replace {
        /// File or directory to rewrite
        path: PathBuf,

        /// String to replace (default: `old` from [transforms.search-replace])
        old: Option<String>,

        /// Replacement (default: `new` from [transforms.search-replace])
        new: Option<String>,

        /// Only touch files with these extensions (default: every file)
        #[arg(long = "ext")]
        extensions: Vec<String>,

        /// Report changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete every file whose extension is not kept, then remove empty directories
    Prune {
        /// Directory to prune
        dir: PathBuf,

        /// File extensions to keep (default: .py .pyi)
        #[arg(short, long, num_args = 1..)]
        extensions: Vec<String>,

        /// Report what would be removed without deleting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List available transforms
    List,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for run reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-change compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let lookup =
        config_resolver::ConfigLookup::new(std::env::current_dir()?, cli.config.as_deref());

    match cli.command {
        Commands::Enums {
            path,
            dry_run,
            check,
            format,
            exclude,
        } => commands::enums::run(
            path.as_deref(),
            &commands::enums::Options {
                dry_run: dry_run || check,
                check,
                format,
                exclude,
            },
            &lookup,
        ),
        Commands::Replace {
            path,
            old,
            new,
            extensions,
            dry_run,
            format,
        } => commands::replace::run(
            &path,
            &commands::replace::Options {
                old,
                new,
                extensions,
                dry_run,
                format,
            },
            &lookup,
        ),
        Commands::Prune {
            dir,
            extensions,
            dry_run,
        } => commands::prune::run(&dir, extensions, dry_run, &lookup),
        Commands::List => {
            commands::list::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
