//! Runner for applying transforms to a file or directory tree.

use crate::backup::{replace_with_backup, BackupError};
use crate::config::Config;
use crate::context::FileContext;
use crate::transform::{Transform, TransformBox};
use crate::types::RunReport;
use crate::utils::has_extension;

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Errors that can occur during a run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// IO error resolving the root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The root path does not exist.
    #[error("{0} does not exist")]
    NotFound(PathBuf),

    /// Reading a file failed (including invalid UTF-8).
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// An exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },

    /// Directory traversal failed.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Replacing a file on disk failed.
    #[error(transparent)]
    Replace(#[from] BackupError),
}

/// Builder for configuring a [`Runner`].
#[derive(Default)]
pub struct RunnerBuilder {
    root: Option<PathBuf>,
    transforms: Vec<TransformBox>,
    exclude_patterns: Vec<String>,
    extensions: Option<Vec<String>>,
    backup_suffix: Option<String>,
    config: Option<Config>,
    dry_run: bool,
}

impl RunnerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root file or directory to process.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a transform. Transforms run in the order they are added.
    #[must_use]
    pub fn transform<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Adds a boxed transform.
    #[must_use]
    pub fn transform_box(mut self, transform: TransformBox) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the file extensions to process, overriding the configuration.
    /// An empty list selects every file.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the backup suffix, overriding the configuration.
    #[must_use]
    pub fn backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = Some(suffix.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to leave files untouched (default: false).
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builds the runner.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or an exclude pattern
    /// does not parse.
    pub fn build(self) -> Result<Runner, RunnerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .or_else(|| config.runner.root.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        if !root.exists() {
            return Err(RunnerError::NotFound(root));
        }

        let exclude_patterns = self
            .exclude_patterns
            .iter()
            .chain(&config.runner.exclude)
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| RunnerError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let extensions = self
            .extensions
            .unwrap_or_else(|| config.runner.extensions.clone());
        let backup_suffix = self
            .backup_suffix
            .unwrap_or_else(|| config.runner.backup_suffix.clone());

        Ok(Runner {
            root,
            transforms: self.transforms,
            exclude_patterns,
            extensions,
            backup_suffix,
            config,
            dry_run: self.dry_run,
        })
    }
}

/// Applies transforms to every selected file under a root.
///
/// Use [`Runner::builder()`] to construct an instance.
pub struct Runner {
    root: PathBuf,
    transforms: Vec<TransformBox>,
    exclude_patterns: Vec<Pattern>,
    extensions: Vec<String>,
    backup_suffix: String,
    config: Config,
    dry_run: bool,
}

impl Runner {
    /// Creates a new builder for configuring a runner.
    #[must_use]
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::new()
    }

    /// Returns the root being processed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered transforms.
    #[must_use]
    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    /// Processes all selected files and returns the results.
    ///
    /// Files whose contents do not change are never rewritten.
    ///
    /// # Errors
    ///
    /// Returns the first discovery, read, or replace error. Files processed
    /// before the error keep their new contents.
    pub fn run(&self) -> Result<RunReport, RunnerError> {
        info!("Starting run at {:?}", self.root);

        let mut report = RunReport::new(self.dry_run);
        let files = self.discover_files()?;

        info!("Found {} files to process", files.len());

        for file_path in &files {
            self.process_file(file_path, &mut report)?;
        }

        info!(
            "Run complete: {} changes in {} of {} files{}",
            report.changes.len(),
            report.files_changed(),
            report.files_scanned,
            if self.dry_run { " (dry run)" } else { "" }
        );

        Ok(report)
    }

    /// Applies every enabled transform to one file.
    fn process_file(&self, path: &Path, report: &mut RunReport) -> Result<(), RunnerError> {
        debug!("Processing: {}", path.display());

        let original = std::fs::read_to_string(path).map_err(|source| RunnerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        report.files_scanned += 1;

        let ctx = FileContext::new(path, &original, &self.root);
        let mut current = original.clone();

        for transform in &self.transforms {
            if !self.config.is_transform_enabled(transform.name()) {
                debug!("Skipping disabled transform: {}", transform.name());
                continue;
            }

            let rewrite = transform.apply(&ctx.with_content(&current));
            report.changes.extend(rewrite.changes);
            current = rewrite.content;
        }

        if current == original {
            return Ok(());
        }

        report.changed_files.push(ctx.relative_path.clone());
        if !self.dry_run {
            replace_with_backup(path, &current, &self.backup_suffix)?;
        }

        Ok(())
    }

    /// Discovers all files to process, in a stable order.
    fn discover_files(&self) -> Result<Vec<PathBuf>, RunnerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.is_selected(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    /// Checks the extension filter and skips leftover backups.
    fn is_selected(&self, path: &Path) -> bool {
        let is_backup = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(&self.backup_suffix));
        if is_backup {
            return false;
        }

        self.extensions.is_empty() || has_extension(path, &self.extensions)
    }

    /// Checks a path, taken relative to the root, against the exclude globs.
    ///
    /// Directories above the root never take part in the match.
    fn should_exclude(&self, path: &Path) -> bool {
        const OPTIONS: MatchOptions = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path_with(relative, OPTIONS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let runner = Runner::builder()
            .root(".")
            .exclude("**/build/**")
            .build()
            .expect("Failed to build runner");

        assert!(runner.root().exists());
        assert_eq!(runner.transform_count(), 0);
        assert_eq!(runner.extensions, vec![".py", ".pyi"]);
        assert_eq!(runner.backup_suffix, ".bak");
    }

    #[test]
    fn test_missing_root() {
        let result = Runner::builder()
            .root("/definitely/not/a/real/path")
            .build();
        assert!(matches!(result, Err(RunnerError::NotFound(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let runner = Runner::builder()
            .root(".")
            .exclude("**/build/**")
            .exclude("**/.git/**")
            .build()
            .expect("Failed to build runner");

        let root = runner.root().to_path_buf();
        assert!(runner.should_exclude(&root.join("build/lib/qgis.pyi")));
        assert!(runner.should_exclude(&root.join("qgis/build/gen.pyi")));
        assert!(runner.should_exclude(&root.join(".git/hooks/x.py")));
        assert!(!runner.should_exclude(&root.join("qgis/core.pyi")));
        assert!(!runner.should_exclude(&root.join("qgis/builder.pyi")));
    }

    #[test]
    fn test_exclude_ignores_directories_above_root() {
        let runner = Runner::builder()
            .root(".")
            .exclude("**/build/**")
            .build()
            .expect("Failed to build runner");

        let root = runner.root().join("build").join("stubs");
        let nested = Runner { root: root.clone(), ..runner };
        assert!(!nested.should_exclude(&root.join("core.pyi")));
        assert!(nested.should_exclude(&root.join("build/gen.pyi")));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = Runner::builder().root(".").exclude("stubs/[").build();
        assert!(matches!(
            result,
            Err(RunnerError::Pattern { ref pattern, .. }) if pattern == "stubs/["
        ));
    }

    #[test]
    fn test_is_selected() {
        let runner = Runner::builder()
            .root(".")
            .build()
            .expect("Failed to build runner");

        assert!(runner.is_selected(Path::new("core.pyi")));
        assert!(runner.is_selected(Path::new("setup.py")));
        assert!(!runner.is_selected(Path::new("core.pyi.bak")));
        assert!(!runner.is_selected(Path::new("README.md")));

        let all = Runner::builder()
            .root(".")
            .extensions(Vec::<String>::new())
            .build()
            .expect("Failed to build runner");
        assert!(all.is_selected(Path::new("README.md")));
        assert!(!all.is_selected(Path::new("README.md.bak")));
    }
}
