//! Run orchestration.
//!
//! A run fetches the configuration, applies the gates, resolves candidate
//! reviewers, validates their repository access concurrently, samples the
//! final set, requests the review and keeps the missing-access comment up to
//! date. Every platform interaction goes through [`PullRequestHost`], so the
//! sequence can be driven against GitHub or against an in-memory mock.

pub mod access;
pub mod host;
pub mod runner;

pub use access::{AccessReport, check_access};
pub use host::PullRequestHost;
pub use runner::{ReviewRequestRunner, RunOutcome};
