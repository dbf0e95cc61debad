//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# logmsglint configuration

# Lowest severity that makes `logmsglint check` exit with status 1
# ("info", "warning" or "error").
fail_on = "warning"

[analyzer]
# Root directory to analyze, relative to the checked path
# root = "."

# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Respect .gitignore files
respect_gitignore = true

[settings]
# Extra sensitive-data patterns (regular expressions, matched
# case-insensitively), checked after the built-in set.
sensitive-patterns = [
    # '\bsession[_-]?id\b',
]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.lowercase-start]
enabled = true

[rules.english-only]
enabled = true

[rules.no-special-chars]
enabled = true

[rules.no-sensitive-data]
enabled = true
# severity = "error"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(PROJECT_CONFIG_NAMES[0]);
    write_default(config_path, force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure rules", config_path.display());
    println!("  2. Run: logmsglint check");

    Ok(())
}

fn write_default(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
