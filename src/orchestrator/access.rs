//! Concurrent repository-access validation.

use futures::future::join_all;
use tracing::{debug, warn};

use super::host::PullRequestHost;

/// Result of checking a batch of aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessReport {
    pub validated: Vec<String>,
    pub missing_access: Vec<String>,
}

/// Check every alias concurrently and partition by outcome.
///
/// All checks settle before this returns. A check that errors counts as
/// missing access for that alias only; it does not fail the batch.
pub async fn check_access<H>(host: &H, aliases: &[String]) -> AccessReport
where
    H: PullRequestHost + ?Sized,
{
    let checks = aliases.iter().map(|alias| host.has_access(alias));
    let results = join_all(checks).await;

    let mut report = AccessReport::default();
    for (alias, result) in aliases.iter().zip(results) {
        match result {
            Ok(true) => report.validated.push(alias.clone()),
            Ok(false) => {
                debug!(alias = alias.as_str(), "no repository access");
                report.missing_access.push(alias.clone());
            }
            Err(e) => {
                warn!(alias = alias.as_str(), error = %e, "access check failed; treating as missing access");
                report.missing_access.push(alias.clone());
            }
        }
    }
    report
}
