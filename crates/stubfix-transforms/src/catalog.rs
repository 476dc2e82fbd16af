//! Catalog of built-in transforms.

use crate::{convert_enums, search_replace};

/// Static description of a built-in transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformInfo {
    /// Transform code (e.g., "SF001").
    pub code: &'static str,
    /// Transform name (e.g., "convert-enums").
    pub name: &'static str,
    /// CLI subcommand that runs it.
    pub command: &'static str,
    /// One-line description.
    pub description: &'static str,
}

const CATALOG: &[TransformInfo] = &[
    TransformInfo {
        code: convert_enums::CODE,
        name: convert_enums::NAME,
        command: "enums",
        description: "Move enum members assigned after `class X(int): ...` into the class body",
    },
    TransformInfo {
        code: search_replace::CODE,
        name: search_replace::NAME,
        command: "replace",
        description: "Replace a literal single-line string in every file",
    },
];

/// Returns every built-in transform.
#[must_use]
pub fn all_transforms() -> &'static [TransformInfo] {
    CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_and_names_are_unique() {
        let codes: HashSet<_> = all_transforms().iter().map(|t| t.code).collect();
        let names: HashSet<_> = all_transforms().iter().map(|t| t.name).collect();
        assert_eq!(codes.len(), all_transforms().len());
        assert_eq!(names.len(), all_transforms().len());
    }
}
