//! Offline dry run: `autoreview resolve`.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

use autoreview::review_config::ReviewConfig;
use autoreview::reviewers::{randomly_pick_reviewers, resolve_candidates};

/// Print the reviewers a pull request by `author` touching `files` would get,
/// before any access check.
pub fn cmd_resolve(config_path: &Path, author: &str, seed: Option<u64>, files: &[String]) -> Result<()> {
    let config = ReviewConfig::load(config_path)
        .with_context(|| format!("Invalid configuration {}", config_path.display()))?;

    let candidates: Vec<String> = resolve_candidates(&config, files, author).into_iter().collect();
    if candidates.is_empty() {
        println!("No reviewers.");
        return Ok(());
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for alias in randomly_pick_reviewers(candidates, &config, &mut rng) {
        println!("{}", alias);
    }

    Ok(())
}
