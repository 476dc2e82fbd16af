//! Locating and loading the stubfix configuration.
//!
//! The first file found wins:
//!
//! 1. the `--config` path
//! 2. `stubfix.toml`, then `.stubfix.toml`, in the working directory
//! 3. `config.toml` in `$STUBFIX_CONFIG_DIR` or `~/.stubfix/`
//!
//! Without any of them the built-in defaults apply.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use stubfix_core::Config;

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["stubfix.toml", ".stubfix.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where to look for a configuration file.
#[derive(Debug, Clone)]
pub struct ConfigLookup {
    cwd: PathBuf,
    explicit: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl ConfigLookup {
    /// Looks in `cwd`, honouring an explicit `--config` path.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>, explicit: Option<&Path>) -> Self {
        Self {
            cwd: cwd.into(),
            explicit: explicit.map(Path::to_path_buf),
            global_dir: global_config_dir(),
        }
    }

    /// Loads the configuration.
    ///
    /// A relative `[runner] root` is taken relative to the directory of the
    /// file that sets it, so a project config keeps pointing at its own stub
    /// tree wherever stubfix is started from.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing, or if the file found
    /// cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.locate() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };

        tracing::debug!("Using config: {}", path.display());
        let mut config = Config::from_file(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        if let Some(root) = config.runner.root.as_mut() {
            if root.is_relative() {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                *root = base.join(&*root);
            }
        }

        Ok(config)
    }

    fn locate(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit.clone());
        }

        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| self.cwd.join(name))
            .chain(
                self.global_dir
                    .as_ref()
                    .map(|dir| dir.join(GLOBAL_CONFIG_NAME)),
            )
            .find(|candidate| candidate.is_file())
    }
}

/// Returns the global config directory: `$STUBFIX_CONFIG_DIR`, else `~/.stubfix/`.
fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("STUBFIX_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".stubfix"))
}
