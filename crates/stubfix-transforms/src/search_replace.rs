//! Transform for literal, single-line search and replace.
//!
//! # Configuration
//!
//! ```toml
//! [transforms.search-replace]
//! old = "QtCore.pyqtSignal"
//! new = "QtCore.pyqtBoundSignal"
//! ```
//!
//! Patterns are plain strings, not regular expressions, and may not span
//! lines.

use stubfix_core::{Change, FileContext, Location, Rewrite, Transform, TransformConfig};
use thiserror::Error;

/// Transform code for search-replace.
pub const CODE: &str = "SF002";

/// Transform name for search-replace.
pub const NAME: &str = "search-replace";

/// Errors building a [`SearchReplace`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchReplaceError {
    /// The search string is empty.
    #[error("search string must not be empty")]
    EmptyPattern,

    /// A pattern contains a line break.
    #[error("{0} string must be a single line")]
    Multiline(&'static str),

    /// A required option is missing from the configuration block.
    #[error("missing `{0}` option in [transforms.search-replace]")]
    MissingOption(&'static str),
}

/// Replaces every occurrence of one string with another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReplace {
    old: String,
    new: String,
}

impl SearchReplace {
    /// Creates a new search-replace transform.
    ///
    /// # Errors
    ///
    /// Returns an error if `old` is empty or either string contains a newline.
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Result<Self, SearchReplaceError> {
        let old = old.into();
        let new = new.into();

        if old.is_empty() {
            return Err(SearchReplaceError::EmptyPattern);
        }
        if old.contains(['\n', '\r']) {
            return Err(SearchReplaceError::Multiline("search"));
        }
        if new.contains(['\n', '\r']) {
            return Err(SearchReplaceError::Multiline("replacement"));
        }

        Ok(Self { old, new })
    }

    /// Builds the transform from `old` / `new` configuration options.
    ///
    /// # Errors
    ///
    /// Returns an error if an option is missing or invalid.
    pub fn from_config(config: &TransformConfig) -> Result<Self, SearchReplaceError> {
        let old = config
            .get_str("old")
            .ok_or(SearchReplaceError::MissingOption("old"))?;
        let new = config
            .get_str("new")
            .ok_or(SearchReplaceError::MissingOption("new"))?;
        Self::new(old, new)
    }
}

impl Transform for SearchReplace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Replaces a literal string on every line"
    }

    fn apply(&self, ctx: &FileContext) -> Rewrite {
        if self.old == self.new || !ctx.content.contains(self.old.as_str()) {
            return Rewrite::unchanged(ctx.content);
        }

        let mut rewrite = Rewrite::default();

        for (idx, line) in ctx.content.split_inclusive('\n').enumerate() {
            let count = line.matches(self.old.as_str()).count();
            if count == 0 {
                rewrite.content.push_str(line);
                continue;
            }

            rewrite.changes.push(Change::new(
                CODE,
                NAME,
                Location::new(ctx.relative_path.clone(), idx + 1),
                format!(
                    "Replaced {count} occurrence(s) of `{}` with `{}`",
                    self.old, self.new
                ),
            ));
            rewrite.content.push_str(&line.replace(&self.old, &self.new));
        }

        rewrite
    }
}
