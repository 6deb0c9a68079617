use anyhow::Result;
use rand::Rng;
use std::collections::HashSet;
use tracing::{info, warn};

use super::access::check_access;
use super::host::PullRequestHost;
use crate::gates::{GateDecision, ReviewGate};
use crate::reviewers::{fetch_all_reviewers, randomly_pick_reviewers, resolve_candidates};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No configuration in the repository or on disk
    ConfigMissing,
    /// The gate decided to leave this pull request alone
    Suppressed(GateDecision),
    /// No rule matched and no defaults are configured
    NoReviewers,
    Completed {
        assigned: Vec<String>,
        missing_access: Vec<String>,
    },
}

/// Runs one review-request pass against a [`PullRequestHost`].
pub struct ReviewRequestRunner<'a, H: ?Sized> {
    host: &'a H,
    validate_all: bool,
}

impl<'a, H> ReviewRequestRunner<'a, H>
where
    H: PullRequestHost + ?Sized,
{
    pub fn new(host: &'a H, validate_all: bool) -> Self {
        Self { host, validate_all }
    }

    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RunOutcome> {
        info!("Fetching configuration");
        let config = match self.host.fetch_config().await {
            Ok(config) => config,
            Err(e) if e.is_absent() => {
                warn!("{}; terminating the process", e);
                return Ok(RunOutcome::ConfigMissing);
            }
            Err(e) => return Err(e.into()),
        };
        for warning in config.validate() {
            warn!("Configuration: {}", warning);
        }

        let pull_request = self.host.get_pull_request();
        let decision =
            ReviewGate::new(&pull_request.title, pull_request.is_draft, &config).evaluate();
        if !decision.should_proceed() {
            info!(reason = %decision, "Matched the ignoring rules; terminating the process");
            return Ok(RunOutcome::Suppressed(decision));
        }

        info!("Fetching changed files in the pull request");
        let changed_files = self.host.fetch_changed_files().await?;
        info!("Fetching reviewers already requested or approved");
        let current_reviewers = self.host.fetch_current_reviewers().await?;

        info!(author = %pull_request.author, files = changed_files.len(), "Identifying reviewers");
        let candidates = resolve_candidates(&config, &changed_files, &pull_request.author);
        if candidates.is_empty() {
            info!("No reviewers matched and no defaults are configured; terminating the process");
            return Ok(RunOutcome::NoReviewers);
        }

        let current: HashSet<&str> = current_reviewers.iter().map(String::as_str).collect();
        let pending: Vec<String> = candidates
            .into_iter()
            .filter(|alias| !current.contains(alias.as_str()))
            .collect();

        info!(count = pending.len(), "Checking repository access of reviewers");
        let first_pass = check_access(self.host, &pending).await;
        let mut missing_access = first_pass.missing_access.clone();

        if self.validate_all {
            let checked: HashSet<&str> = first_pass
                .validated
                .iter()
                .chain(first_pass.missing_access.iter())
                .map(String::as_str)
                .collect();
            let remainder: Vec<String> = fetch_all_reviewers(&config)
                .into_iter()
                .filter(|alias| !checked.contains(alias.as_str()))
                .collect();

            info!(count = remainder.len(), "Checking repository access of every configured reviewer");
            let second_pass = check_access(self.host, &remainder).await;
            for alias in second_pass.missing_access {
                if !missing_access.contains(&alias) {
                    missing_access.push(alias);
                }
            }
        }

        let assigned = randomly_pick_reviewers(first_pass.validated, &config, rng);
        if assigned.is_empty() {
            info!("No reviewers left to request");
        } else {
            info!("Requesting review to {}", assigned.join(", "));
            self.host.assign_reviewers(&assigned).await?;
        }

        let existing = self.host.get_existing_notification_comment().await?;
        if !missing_access.is_empty() || existing.is_some() {
            if !missing_access.is_empty() {
                warn!("Reviewers without repository access: {}", missing_access.join(", "));
            }
            self.host
                .post_notification(&missing_access, existing.as_ref())
                .await?;
        }

        Ok(RunOutcome::Completed {
            assigned,
            missing_access,
        })
    }
}
