//! Review request run: `autoreview` / `autoreview run`.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use autoreview::event::PullRequestEvent;
use autoreview::github::GitHubHost;
use autoreview::orchestrator::{ReviewRequestRunner, RunOutcome};
use autoreview::settings::RunSettings;

use crate::RunArgs;

fn resolve_token(args: &RunArgs) -> Option<String> {
    args.token
        .clone()
        .filter(|token| !token.is_empty())
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .filter(|token| !token.is_empty())
}

fn build_settings(args: &RunArgs) -> Result<RunSettings> {
    let token = resolve_token(args)
        .context("No GitHub token: pass --token or set INPUT_TOKEN or GITHUB_TOKEN")?;
    let event_path = args
        .event_path
        .clone()
        .context("No event payload: pass --event-path or set GITHUB_EVENT_PATH")?;

    Ok(RunSettings::new(token, event_path)
        .with_config_path(args.config.as_str())
        .with_use_local(args.use_local)
        .with_validate_all(args.validate_all)
        .with_api_url(args.api_url.as_str())
        .with_git_ref(args.git_ref.clone()))
}

pub async fn cmd_run(args: &RunArgs) -> Result<()> {
    let settings = build_settings(args)?;
    let event = PullRequestEvent::load(&settings.event_path)?;
    info!(
        repository = %event.repository,
        pull_request = event.pull_request.number,
        author = event.pull_request.author.as_str(),
        "Starting review request"
    );

    let validate_all = settings.validate_all;
    let host = GitHubHost::new(settings, event)?;
    let mut rng = StdRng::from_entropy();
    let outcome = ReviewRequestRunner::new(&host, validate_all)
        .run(&mut rng)
        .await?;

    match outcome {
        RunOutcome::ConfigMissing => info!("Finished: no configuration"),
        RunOutcome::Suppressed(reason) => info!(%reason, "Finished: review request skipped"),
        RunOutcome::NoReviewers => info!("Finished: no reviewers to request"),
        RunOutcome::Completed {
            assigned,
            missing_access,
        } => info!(
            assigned = assigned.len(),
            missing_access = missing_access.len(),
            "Finished"
        ),
    }
    Ok(())
}
