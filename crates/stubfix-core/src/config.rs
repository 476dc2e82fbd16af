//! Configuration types for stubfix.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for stubfix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Runner configuration.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Per-transform configurations.
    #[serde(default)]
    pub transforms: HashMap<String, TransformConfig>,

    /// Prune configuration.
    #[serde(default)]
    pub prune: PruneConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a transform is enabled.
    #[must_use]
    pub fn is_transform_enabled(&self, name: &str) -> bool {
        self.transforms
            .get(name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the configuration block for a transform, if any.
    #[must_use]
    pub fn transform(&self, name: &str) -> Option<&TransformConfig> {
        self.transforms.get(name)
    }
}

/// Runner-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Root file or directory to process (default: current directory).
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// File extensions to process when walking a directory.
    /// An empty list selects every file.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Suffix appended to a file while it is being replaced.
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            root: None,
            extensions: default_extensions(),
            exclude: Vec::new(),
            backup_suffix: default_backup_suffix(),
        }
    }
}

/// Prune configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneConfig {
    /// File extensions to keep; everything else is deleted.
    #[serde(default = "default_extensions")]
    pub keep: Vec<String>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            keep: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec![".py".to_string(), ".pyi".to_string()]
}

fn default_backup_suffix() -> String {
    crate::backup::DEFAULT_BACKUP_SUFFIX.to_string()
}

/// Per-transform configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Whether this transform is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Transform-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl TransformConfig {
    /// Gets a string option.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(toml::Value::as_str)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.runner.extensions, vec![".py", ".pyi"]);
        assert_eq!(config.runner.backup_suffix, ".bak");
        assert!(config.runner.root.is_none());
        assert_eq!(config.prune.keep, vec![".py", ".pyi"]);
        assert!(config.transforms.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[runner]
root = "./stubs"
exclude = ["**/generated/**"]

[transforms.convert-enums]
enabled = false

[transforms.search-replace]
old = "QtCore.pyqtSignal"
new = "QtCore.pyqtBoundSignal"

[prune]
keep = ["pyi"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.runner.root, Some(PathBuf::from("./stubs")));
        assert_eq!(config.runner.extensions, vec![".py", ".pyi"]);
        assert!(!config.is_transform_enabled("convert-enums"));
        assert!(config.is_transform_enabled("search-replace"));
        assert!(config.is_transform_enabled("unknown"));

        let replace = config.transform("search-replace").unwrap();
        assert_eq!(replace.get_str("old"), Some("QtCore.pyqtSignal"));
        assert_eq!(replace.get_str("missing"), None);
        assert_eq!(config.prune.keep, vec!["pyi"]);
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = Config::parse("[runner\nroot = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
