//! Reviewer resolution engine.
//!
//! Turns a [`ReviewConfig`](crate::review_config::ReviewConfig) plus the facts
//! of one pull request into the set of aliases to request.
//!
//! ## Components
//!
//! - [`matcher`]: glob matching of changed paths
//! - [`groups`]: cycle-safe group expansion
//! - [`resolve`]: file, author, co-member, default and full-universe resolution
//! - [`sampler`]: random cap on the reviewer count
//!
//! ## Example
//!
//! ```
//! use autoreview::review_config::ReviewConfig;
//! use autoreview::reviewers::identify_reviewers_by_changed_files;
//!
//! let config = ReviewConfig::parse(r#"
//! reviewers:
//!   groups:
//!     mario-brothers: [mario, luigi]
//! files:
//!   '**/*.js': [mario-brothers, princess-peach]
//! "#).unwrap();
//!
//! let reviewers = identify_reviewers_by_changed_files(&config, &["path/to/file.js"], &["luigi"]);
//! assert_eq!(reviewers.into_iter().collect::<Vec<_>>(), vec!["mario", "princess-peach"]);
//! ```

pub mod groups;
pub mod matcher;
pub mod resolve;
pub mod sampler;

pub use resolve::{
    fetch_all_reviewers, fetch_default_reviewers, fetch_other_group_members,
    identify_reviewers_by_author, identify_reviewers_by_changed_files, resolve_candidates,
};
pub use sampler::randomly_pick_reviewers;

/// Prefix that marks a team alias (`team:<slug>`).
pub const TEAM_PREFIX: &str = "team:";

/// The team slug of a `team:<slug>` alias, or `None` for an individual.
pub fn team_slug(alias: &str) -> Option<&str> {
    alias.strip_prefix(TEAM_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_slug() {
        assert_eq!(team_slug("team:koopa-troop"), Some("koopa-troop"));
        assert_eq!(team_slug("mario"), None);
        assert_eq!(team_slug("teammate"), None);
    }
}
