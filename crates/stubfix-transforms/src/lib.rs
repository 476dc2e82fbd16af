//! # stubfix-transforms
//!
//! Built-in transforms for stubfix.
//!
//! ## Available Transforms
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SF001 | `convert-enums` | Moves enum members assigned after `class X(int): ...` into the class body |
//! | SF002 | `search-replace` | Replaces a literal single-line string |
//!
//! ## Usage
//!
//! ```ignore
//! use stubfix_core::Runner;
//! use stubfix_transforms::ConvertEnums;
//!
//! let report = Runner::builder()
//!     .root("./stubs")
//!     .transform(ConvertEnums::new())
//!     .build()?
//!     .run()?;
//! ```
//!
//! The enum rewriter is also usable without the runner:
//!
//! ```
//! let out = stubfix_transforms::convert_enums::rewrite(
//!     "class E(int): ...\nE.A = ...  # type: E\n",
//! );
//! assert_eq!(out, "class E(int):\n    A: 'E'\n");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
pub mod convert_enums;
pub mod search_replace;

pub use catalog::{all_transforms, TransformInfo};
pub use convert_enums::{rewrite, rewrite_stream, ConvertEnums, EnumRewriter, RewriteStats};
pub use search_replace::{SearchReplace, SearchReplaceError};

/// Re-export core types for convenience.
pub use stubfix_core::{Rewrite, Transform};
