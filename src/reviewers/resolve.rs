//! Reviewer resolution.
//!
//! Each function answers one question about the configuration and returns a
//! deduplicated set. The orchestrator unions the additive sources
//! (changed files, author, group co-members) and falls back to the defaults
//! when that union is empty. Nothing here performs I/O.

use std::collections::BTreeSet;

use tracing::debug;

use crate::review_config::ReviewConfig;
use crate::reviewers::groups::{expand, expand_all};
use crate::reviewers::matcher::PathMatcher;

/// Reviewers whose `files` patterns match at least one changed file.
///
/// Every alias in `excludes` (normally the author) is removed from the result.
/// With `options.last_files_match_only`, a changed file only counts toward the
/// last pattern in document order that matches it.
pub fn identify_reviewers_by_changed_files<F: AsRef<str>, E: AsRef<str>>(
    config: &ReviewConfig,
    changed_files: &[F],
    excludes: &[E],
) -> BTreeSet<String> {
    let rules: Vec<(PathMatcher, &[String])> = config
        .files
        .iter()
        .map(|(pattern, targets)| (PathMatcher::new(pattern), targets.as_slice()))
        .collect();

    let mut matched_rules = vec![false; rules.len()];
    if config.options.last_files_match_only {
        for file in changed_files {
            if let Some(index) = rules
                .iter()
                .rposition(|(matcher, _)| matcher.matches(file.as_ref()))
            {
                matched_rules[index] = true;
            }
        }
    } else {
        for (index, (matcher, _)) in rules.iter().enumerate() {
            matched_rules[index] = matcher.matches_any(changed_files);
        }
    }

    let mut reviewers = BTreeSet::new();
    for ((matcher, targets), matched) in rules.iter().zip(matched_rules) {
        if matched {
            debug!(pattern = matcher.as_str(), "files rule matched");
            reviewers.extend(expand_all(*targets, &config.reviewers.groups));
        }
    }

    remove_excluded(reviewers, excludes)
}

/// Reviewers configured in `per_author` for the author.
///
/// A `per_author` key matches when it equals the author or names a group the
/// author belongs to (directly or through nested groups). Targets of every
/// matching key are combined.
pub fn identify_reviewers_by_author(config: &ReviewConfig, author: &str) -> BTreeSet<String> {
    let groups = &config.reviewers.groups;
    let mut reviewers = BTreeSet::new();

    for (key, targets) in config.reviewers.per_author.iter() {
        let matches_author = key == author || expand(key, groups).contains(author);
        if matches_author {
            debug!(key = key.as_str(), author, "per_author entry matched");
            reviewers.extend(expand_all(targets, groups));
        }
    }

    reviewers
}

/// The other members of every group that lists the author directly.
///
/// Only active with `options.enable_group_assignment`. Members that are
/// themselves groups are expanded; the author is never included.
pub fn fetch_other_group_members(config: &ReviewConfig, author: &str) -> BTreeSet<String> {
    if !config.options.enable_group_assignment {
        return BTreeSet::new();
    }

    let groups = &config.reviewers.groups;
    let mut reviewers = BTreeSet::new();
    for (name, members) in groups.iter() {
        if !members.iter().any(|member| member == author) {
            continue;
        }
        debug!(group = name.as_str(), author, "author belongs to group");
        let others: Vec<&String> = members.iter().filter(|member| *member != author).collect();
        reviewers.extend(expand_all(&others, groups));
    }

    reviewers.remove(author);
    reviewers
}

/// The expanded `reviewers.defaults`, minus `excludes`.
pub fn fetch_default_reviewers<S: AsRef<str>>(
    config: &ReviewConfig,
    excludes: &[S],
) -> BTreeSet<String> {
    let reviewers = expand_all(&config.reviewers.defaults, &config.reviewers.groups);
    remove_excluded(reviewers, excludes)
}

/// Every alias reachable from anywhere in the configuration.
///
/// Covers defaults, group members, `files` targets and `per_author` targets,
/// all expanded. Independent of the pull request.
pub fn fetch_all_reviewers(config: &ReviewConfig) -> BTreeSet<String> {
    let groups = &config.reviewers.groups;
    let mut reviewers = expand_all(&config.reviewers.defaults, groups);

    for members in groups.values() {
        reviewers.extend(expand_all(members, groups));
    }
    for targets in config.files.values() {
        reviewers.extend(expand_all(targets, groups));
    }
    for targets in config.reviewers.per_author.values() {
        reviewers.extend(expand_all(targets, groups));
    }

    reviewers
}

/// Candidate reviewers for a pull request before access validation.
///
/// Unions the file, author and group co-member sources and falls back to the
/// defaults when that union is empty. The author is never a candidate, since
/// GitHub refuses review requests to a pull request's own author.
pub fn resolve_candidates<F: AsRef<str>>(
    config: &ReviewConfig,
    changed_files: &[F],
    author: &str,
) -> BTreeSet<String> {
    let mut candidates = identify_reviewers_by_changed_files(config, changed_files, &[author]);
    candidates.extend(identify_reviewers_by_author(config, author));
    candidates.extend(fetch_other_group_members(config, author));
    candidates.remove(author);

    if candidates.is_empty() {
        debug!("no rule matched; falling back to default reviewers");
        candidates = fetch_default_reviewers(config, &[author]);
    }
    candidates
}

fn remove_excluded<S: AsRef<str>>(
    mut reviewers: BTreeSet<String>,
    excludes: &[S],
) -> BTreeSet<String> {
    for excluded in excludes {
        reviewers.remove(excluded.as_ref());
    }
    reviewers
}
