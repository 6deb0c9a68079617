//! Integration tests for autoreview
//!
//! These drive the binary end to end without touching the network: local
//! configuration files, event payloads on disk and offline subcommands.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "INPUT_TOKEN",
    "INPUT_CONFIG",
    "INPUT_USE_LOCAL",
    "INPUT_VALIDATE_ALL",
    "GITHUB_TOKEN",
    "GITHUB_EVENT_PATH",
    "GITHUB_API_URL",
    "GITHUB_REF",
    "AUTOREVIEW_LOG_FORMAT",
    "RUST_LOG",
];

const MARIO_CONFIG: &str = r#"
reviewers:
  defaults:
    - repository-owners
  groups:
    repository-owners:
      - mario
      - team:koopa-troop
    mario-brothers:
      - mario
      - luigi
files:
  '**/*.js':
    - mario-brothers
    - princess-peach
options:
  ignore_draft: true
"#;

/// Helper to create an autoreview Command isolated from the Actions environment
fn autoreview() -> Command {
    let mut cmd = cargo_bin_cmd!("autoreview");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn pull_request_event(draft: bool) -> String {
    format!(
        r#"{{
            "action": "opened",
            "pull_request": {{
                "number": 7,
                "title": "Add castle level",
                "draft": {},
                "user": {{"login": "luigi"}},
                "head": {{"ref": "feature/castle", "sha": "abc123"}}
            }},
            "repository": {{"name": "castle", "owner": {{"login": "nintendo"}}}}
        }}"#,
        draft
    )
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_autoreview_help() {
        autoreview()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("validate"))
            .stdout(predicate::str::contains("resolve"));
    }

    #[test]
    fn test_autoreview_version() {
        autoreview()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_run_help_lists_flags() {
        autoreview()
            .args(["run", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--use-local"))
            .stdout(predicate::str::contains("--validate-all"));
    }
}

// =============================================================================
// validate
// =============================================================================

mod validate {
    use super::*;

    #[test]
    fn test_validate_lists_reviewers() {
        let dir = TempDir::new().unwrap();
        let config = write_file(&dir, "reviewers.yml", MARIO_CONFIG);

        autoreview()
            .arg("validate")
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("No warnings."))
            .stdout(predicate::str::contains("Reviewers (4):"))
            .stdout(predicate::str::contains("team:koopa-troop"))
            .stdout(predicate::str::contains("princess-peach"));
    }

    #[test]
    fn test_validate_reports_warnings() {
        let dir = TempDir::new().unwrap();
        let config = write_file(
            &dir,
            "reviewers.yml",
            "reviewers:\n  groups:\n    empty-group: []\nfiles:\n  '**/*.rs': [mario]\n",
        );

        autoreview()
            .arg("validate")
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("Warnings:"))
            .stdout(predicate::str::contains("empty-group"));
    }

    #[test]
    fn test_validate_malformed_yaml_fails() {
        let dir = TempDir::new().unwrap();
        let config = write_file(&dir, "reviewers.yml", "files: [unclosed\n");

        autoreview()
            .arg("validate")
            .arg(&config)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn test_validate_missing_file_fails() {
        let dir = TempDir::new().unwrap();

        autoreview()
            .arg("validate")
            .arg(dir.path().join("nope.yml"))
            .assert()
            .failure();
    }
}

// =============================================================================
// resolve
// =============================================================================

mod resolve {
    use super::*;

    #[test]
    fn test_resolve_excludes_author() {
        let dir = TempDir::new().unwrap();
        let config = write_file(&dir, "reviewers.yml", MARIO_CONFIG);

        autoreview()
            .arg("resolve")
            .arg("--config")
            .arg(&config)
            .args(["--author", "luigi", "path/to/file.js"])
            .assert()
            .success()
            .stdout("mario\nprincess-peach\n");
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = write_file(&dir, "reviewers.yml", MARIO_CONFIG);

        autoreview()
            .arg("resolve")
            .arg("--config")
            .arg(&config)
            .args(["--author", "bowser", "Cargo.toml"])
            .assert()
            .success()
            .stdout("mario\nteam:koopa-troop\n");
    }

    #[test]
    fn test_resolve_no_reviewers() {
        let dir = TempDir::new().unwrap();
        let config = write_file(&dir, "reviewers.yml", "files:\n  '**/*.js': [mario]\n");

        autoreview()
            .arg("resolve")
            .arg("--config")
            .arg(&config)
            .args(["--author", "luigi", "README.md"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No reviewers."));
    }

    #[test]
    fn test_resolve_applies_cap() {
        let dir = TempDir::new().unwrap();
        let config = write_file(
            &dir,
            "reviewers.yml",
            "files:\n  '**/*.js': [mario, toad, princess-peach]\noptions:\n  number_of_reviewers: 2\n",
        );

        let output = autoreview()
            .arg("resolve")
            .arg("--config")
            .arg(&config)
            .args(["--author", "luigi", "--seed", "3", "src/app.js"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_ne!(lines[0], lines[1]);
    }
}

// =============================================================================
// run (offline paths only)
// =============================================================================

mod run {
    use super::*;

    #[test]
    fn test_missing_local_config_ends_successfully() {
        let dir = TempDir::new().unwrap();
        let event = write_file(&dir, "event.json", &pull_request_event(false));

        autoreview()
            .args(["--token", "ghs_test", "--use-local", "--config"])
            .arg(dir.path().join("reviewers.yml"))
            .arg("--event-path")
            .arg(&event)
            .assert()
            .success()
            .stderr(predicate::str::contains("terminating the process"));
    }

    #[test]
    fn test_run_subcommand_reads_environment() {
        let dir = TempDir::new().unwrap();
        let event = write_file(&dir, "event.json", &pull_request_event(false));

        autoreview()
            .arg("run")
            .env("GITHUB_TOKEN", "ghs_test")
            .env("INPUT_USE_LOCAL", "true")
            .env("INPUT_CONFIG", dir.path().join("reviewers.yml"))
            .env("GITHUB_EVENT_PATH", &event)
            .assert()
            .success()
            .stderr(predicate::str::contains("does not exist"));
    }

    #[test]
    fn test_draft_is_skipped_before_any_api_call() {
        let dir = TempDir::new().unwrap();
        let config = write_file(&dir, "reviewers.yml", MARIO_CONFIG);
        let event = write_file(&dir, "event.json", &pull_request_event(true));

        autoreview()
            .args(["--token", "ghs_test", "--use-local", "--config"])
            .arg(&config)
            .arg("--event-path")
            .arg(&event)
            .args(["--api-url", "http://127.0.0.1:9"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Matched the ignoring rules"));
    }

    #[test]
    fn test_json_log_format() {
        let dir = TempDir::new().unwrap();
        let event = write_file(&dir, "event.json", &pull_request_event(false));

        autoreview()
            .args(["--log-format", "json", "--token", "ghs_test", "--use-local", "--config"])
            .arg(dir.path().join("reviewers.yml"))
            .arg("--event-path")
            .arg(&event)
            .assert()
            .success()
            .stderr(predicate::str::contains("\"level\":\"WARN\""));
    }

    #[test]
    fn test_missing_token_fails() {
        let dir = TempDir::new().unwrap();
        let event = write_file(&dir, "event.json", &pull_request_event(false));

        autoreview()
            .arg("--event-path")
            .arg(&event)
            .assert()
            .failure()
            .stderr(predicate::str::contains("No GitHub token"));
    }

    #[test]
    fn test_missing_event_path_fails() {
        autoreview()
            .args(["--token", "ghs_test"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No event payload"));
    }

    #[test]
    fn test_non_pull_request_event_fails() {
        let dir = TempDir::new().unwrap();
        let event = write_file(
            &dir,
            "event.json",
            r#"{"ref": "refs/heads/main", "repository": {"name": "castle", "owner": {"login": "nintendo"}}}"#,
        );

        autoreview()
            .args(["--token", "ghs_test", "--event-path"])
            .arg(&event)
            .assert()
            .failure();
    }
}
