//! Configuration check: `autoreview validate`.

use anyhow::{Context, Result};
use std::path::Path;

use autoreview::review_config::ReviewConfig;
use autoreview::reviewers::fetch_all_reviewers;

pub fn cmd_validate(path: &Path) -> Result<()> {
    let config = ReviewConfig::load(path)
        .with_context(|| format!("Invalid configuration {}", path.display()))?;

    println!("Configuration: {}", path.display());

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No warnings.");
    } else {
        println!("Warnings:");
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    let reviewers = fetch_all_reviewers(&config);
    println!("Reviewers ({}):", reviewers.len());
    for alias in &reviewers {
        println!("  {}", alias);
    }

    Ok(())
}
