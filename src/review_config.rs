//! Reviewer configuration for autoreview.
//!
//! The configuration lives in the repository (by default at
//! `.github/reviewers.yml`) and is read once per run.
//!
//! # Configuration File Format
//!
//! ```yaml
//! reviewers:
//!   defaults:
//!     - repository-owners
//!   groups:
//!     repository-owners:
//!       - mario
//!       - team:koopa-troop
//!     mario-brothers:
//!       - mario
//!       - luigi
//!   per_author:
//!     luigi:
//!       - mario-brothers
//!
//! files:
//!   '**/*.js':
//!     - mario-brothers
//!     - princess-peach
//!   '.github/**':
//!     - repository-owners
//!
//! options:
//!   ignore_draft: true
//!   ignored_keywords:
//!     - DO NOT REVIEW
//!   enable_group_assignment: false
//!   number_of_reviewers: 3
//!   last_files_match_only: false
//! ```

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;

use crate::errors::ConfigError;
use crate::reviewers::groups;
use crate::reviewers::matcher::PathMatcher;

/// Default location of the configuration inside the repository.
pub const DEFAULT_CONFIG_PATH: &str = ".github/reviewers.yml";

/// An ordered mapping from a key (group name, author, glob) to alias references.
///
/// YAML mappings keep document order.
pub type AliasMap = IndexMap<String, Vec<String>>;

/// The `reviewers` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewersSection {
    /// Requested when no other rule matches
    #[serde(default, deserialize_with = "null_as_empty")]
    pub defaults: Vec<String>,
    /// Named sets of aliases, usable anywhere an alias is expected
    #[serde(default, deserialize_with = "alias_map")]
    pub groups: AliasMap,
    /// Author login or group name -> aliases to request for that author
    #[serde(default, deserialize_with = "alias_map")]
    pub per_author: AliasMap,
}

/// The `options` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsSection {
    /// Skip draft pull requests
    #[serde(default)]
    pub ignore_draft: bool,
    /// Skip pull requests whose title contains any of these (case-sensitive)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ignored_keywords: Vec<String>,
    /// Request the author's fellow group members
    #[serde(default)]
    pub enable_group_assignment: bool,
    /// Cap on the number of reviewers requested per run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_reviewers: Option<NonZeroUsize>,
    /// Each changed file only counts toward the last matching `files` pattern
    #[serde(default)]
    pub last_files_match_only: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` mapping or a `null` value reads as empty.
pub fn alias_map<'de, D>(deserializer: D) -> Result<AliasMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<String, Option<Vec<String>>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, values)| (key, values.unwrap_or_default()))
        .collect())
}

/// The complete reviewer configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub reviewers: ReviewersSection,
    /// Glob pattern -> aliases to request when a changed file matches
    #[serde(default, deserialize_with = "alias_map")]
    pub files: AliasMap,
    #[serde(default)]
    pub options: OptionsSection,
}

impl ReviewConfig {
    /// Parse configuration from a YAML string.
    ///
    /// An empty document is an empty configuration.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Load configuration from a file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::LocalMissing {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Validate the configuration and return any warnings.
    ///
    /// Nothing here stops a run; unknown names are valid logins, so only
    /// shapes that can never do anything useful are reported.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (pattern, targets) in &self.files {
            if !PathMatcher::new(pattern).is_glob() && has_glob_syntax(pattern) {
                warnings.push(format!(
                    "Files pattern '{}' is not a valid glob and will only match literally",
                    pattern
                ));
            }
            if targets.is_empty() {
                warnings.push(format!("Files pattern '{}' has no reviewers", pattern));
            }
        }

        for (name, members) in &self.reviewers.groups {
            if members.is_empty() {
                warnings.push(format!("Group '{}' has no members", name));
            }
            if groups::is_self_referencing(name, &self.reviewers.groups) {
                warnings.push(format!(
                    "Group '{}' references itself; the cycle is ignored during expansion",
                    name
                ));
            }
        }

        for (author, targets) in &self.reviewers.per_author {
            if targets.is_empty() {
                warnings.push(format!("per_author entry '{}' has no reviewers", author));
            }
        }

        if self
            .options
            .ignored_keywords
            .iter()
            .any(|keyword| keyword.is_empty())
        {
            warnings.push("ignored_keywords contains an empty keyword, which is skipped".into());
        }

        warnings
    }
}

fn has_glob_syntax(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}
