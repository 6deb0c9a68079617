//! Group expansion.
//!
//! Groups and aliases share one namespace: a reference is a group exactly
//! when it is a key of `reviewers.groups`. Expansion is recursive and
//! guarded by a visited set, so mutually or self-referencing groups stop
//! with whatever members were reachable.

use std::collections::{BTreeSet, HashSet};

use crate::review_config::AliasMap;

/// Expand a single alias or group name into individual and team aliases.
pub fn expand(reference: &str, groups: &AliasMap) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    let mut visiting = HashSet::new();
    expand_into(reference, groups, &mut visiting, &mut out);
    out
}

/// Expand every reference and union the results.
pub fn expand_all<S: AsRef<str>>(references: &[S], groups: &AliasMap) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for reference in references {
        let mut visiting = HashSet::new();
        expand_into(reference.as_ref(), groups, &mut visiting, &mut out);
    }
    out
}

fn expand_into<'a>(
    reference: &'a str,
    groups: &'a AliasMap,
    visiting: &mut HashSet<&'a str>,
    out: &mut BTreeSet<String>,
) {
    let Some(members) = groups.get(reference) else {
        out.insert(reference.to_string());
        return;
    };
    if !visiting.insert(reference) {
        return;
    }
    for member in members {
        expand_into(member, groups, visiting, out);
    }
}

/// Whether `name` is reachable from its own members.
pub fn is_self_referencing(name: &str, groups: &AliasMap) -> bool {
    let Some(members) = groups.get(name) else {
        return false;
    };
    let mut seen = HashSet::new();
    let mut stack: Vec<&str> = members.iter().map(String::as_str).collect();
    while let Some(current) = stack.pop() {
        if current == name {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        if let Some(next) = groups.get(current) {
            stack.extend(next.iter().map(String::as_str));
        }
    }
    false
}
