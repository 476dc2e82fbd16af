//! Replace command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use stubfix_core::{Config, Runner};
use stubfix_transforms::search_replace::{self, SearchReplace};

use crate::config_resolver::ConfigLookup;
use crate::OutputFormat;

/// Options for the replace command.
pub struct Options {
    /// String to replace, if given on the command line.
    pub old: Option<String>,
    /// Replacement, if given on the command line.
    pub new: Option<String>,
    /// Extensions to select; empty selects every file.
    pub extensions: Vec<String>,
    /// Leave files untouched.
    pub dry_run: bool,
    /// Report format.
    pub format: OutputFormat,
}

/// Runs the replace command.
pub fn run(path: &Path, options: &Options, lookup: &ConfigLookup) -> Result<()> {
    if !path.exists() {
        bail!("{} does not exist", path.display());
    }

    let config = lookup.load()?;
    let transform = build_transform(options, &config)?;

    let runner = Runner::builder()
        .root(path)
        .config(config)
        .extensions(options.extensions.iter().cloned())
        .transform(transform)
        .dry_run(options.dry_run)
        .build()
        .context("Failed to set up replacement")?;

    let report = runner.run().context("Replacement failed")?;

    super::output::print(&report, options.format)
}

/// Builds the transform from the command line, falling back to the config.
fn build_transform(options: &Options, config: &Config) -> Result<SearchReplace> {
    match (&options.old, &options.new) {
        (Some(old), Some(new)) => Ok(SearchReplace::new(old.as_str(), new.as_str())?),
        (None, None) => {
            let Some(block) = config.transform(search_replace::NAME) else {
                bail!(
                    "No OLD/NEW given and no [transforms.{}] block in the config",
                    search_replace::NAME
                );
            };
            Ok(SearchReplace::from_config(block)?)
        }
        _ => bail!("OLD and NEW must be given together"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(old: Option<&str>, new: Option<&str>) -> Options {
        Options {
            old: old.map(String::from),
            new: new.map(String::from),
            extensions: Vec::new(),
            dry_run: true,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn command_line_pair_wins() {
        let config = Config::parse("[transforms.search-replace]\nold = \"a\"\nnew = \"b\"\n").unwrap();
        let t = build_transform(&options(Some("x"), Some("y")), &config).unwrap();
        assert_eq!(t, SearchReplace::new("x", "y").unwrap());
    }

    #[test]
    fn falls_back_to_config() {
        let config = Config::parse("[transforms.search-replace]\nold = \"a\"\nnew = \"b\"\n").unwrap();
        let t = build_transform(&options(None, None), &config).unwrap();
        assert_eq!(t, SearchReplace::new("a", "b").unwrap());
    }

    #[test]
    fn half_pair_is_rejected() {
        assert!(build_transform(&options(Some("x"), None), &Config::default()).is_err());
    }

    #[test]
    fn missing_config_block_is_rejected() {
        let err = build_transform(&options(None, None), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("[transforms.search-replace]"));
    }
}
