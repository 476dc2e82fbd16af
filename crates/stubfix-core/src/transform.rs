//! Transform trait for defining stub rewrites.

use crate::context::FileContext;
use crate::types::Rewrite;

/// A per-file text transform.
///
/// Implement this trait to create transforms that rewrite individual stub
/// files. A transform receives the current file contents and returns the new
/// contents together with a list of the changes it made. Transforms never fail:
/// content they do not recognize is returned unchanged.
///
/// # Example
///
/// ```ignore
/// use stubfix_core::{Change, FileContext, Location, Rewrite, Transform};
///
/// pub struct StripTrailingWhitespace;
///
/// impl Transform for StripTrailingWhitespace {
///     fn name(&self) -> &'static str { "strip-trailing-whitespace" }
///     fn code(&self) -> &'static str { "SF100" }
///
///     fn apply(&self, ctx: &FileContext) -> Rewrite {
///         let mut rewrite = Rewrite::default();
///         for (idx, line) in ctx.content.lines().enumerate() {
///             let trimmed = line.trim_end();
///             if trimmed.len() != line.len() {
///                 rewrite.changes.push(Change::new(
///                     self.code(),
///                     self.name(),
///                     Location::new(ctx.relative_path.clone(), idx + 1),
///                     "stripped trailing whitespace",
///                 ));
///             }
///             rewrite.content.push_str(trimmed);
///             rewrite.content.push('\n');
///         }
///         rewrite
///     }
/// }
/// ```
pub trait Transform: Send + Sync {
    /// Returns the kebab-case name of this transform (e.g., "convert-enums").
    fn name(&self) -> &'static str;

    /// Returns the transform code (e.g., "SF001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this transform rewrites.
    fn description(&self) -> &'static str {
        ""
    }

    /// Rewrites a single file.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being rewritten, including its contents
    ///
    /// # Returns
    ///
    /// The rewritten contents and the changes made. When nothing matched, the
    /// returned content equals `ctx.content` and the change list is empty.
    fn apply(&self, ctx: &FileContext) -> Rewrite;
}

/// Type alias for boxed Transform trait objects.
pub type TransformBox = Box<dyn Transform>;
