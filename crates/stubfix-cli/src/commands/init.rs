//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# stubfix configuration

[runner]
# Root used by `stubfix enums` without a path, relative to this file
# (default: current directory)
# root = "./stubs"

# Extensions processed when walking a directory (empty = every file)
extensions = [".py", ".pyi"]

# Glob patterns to exclude, matched against paths relative to the root
exclude = [
    "**/.git/**",
]

# Suffix used for the temporary backup while a file is replaced
backup_suffix = ".bak"

[transforms.convert-enums]
enabled = true

# Defaults for `stubfix replace PATH` when OLD and NEW are omitted
# [transforms.search-replace]
# old = "QtCore.pyqtSignal"
# new = "QtCore.pyqtBoundSignal"

[prune]
# Extensions kept by `stubfix prune`
keep = [".py", ".pyi"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to adjust extensions and excludes", config_path.display());
    println!("  2. Run: stubfix enums <stub-dir>");

    Ok(())
}
