use std::path::PathBuf;

use crate::review_config::DEFAULT_CONFIG_PATH;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Process-level inputs for one run.
///
/// Built once from the CLI/environment layer and passed by reference to
/// everything that needs it. Nothing caches these values elsewhere; a new
/// run (or a test) builds a new `RunSettings`.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub token: String,
    /// Path of the reviewer configuration, in the repository or on disk
    pub config_path: String,
    /// Read `config_path` from the local checkout instead of the GitHub API
    pub use_local: bool,
    /// Also check access for every alias in the configuration
    pub validate_all: bool,
    pub event_path: PathBuf,
    pub api_url: String,
    /// Git ref to read a remote configuration from; the PR head ref when unset
    pub git_ref: Option<String>,
}

impl RunSettings {
    pub fn new(token: impl Into<String>, event_path: impl Into<PathBuf>) -> Self {
        Self {
            token: token.into(),
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            use_local: false,
            validate_all: false,
            event_path: event_path.into(),
            api_url: DEFAULT_API_URL.to_string(),
            git_ref: None,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_use_local(mut self, use_local: bool) -> Self {
        self.use_local = use_local;
        self
    }

    pub fn with_validate_all(mut self, validate_all: bool) -> Self {
        self.validate_all = validate_all;
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Empty refs are treated as unset.
    pub fn with_git_ref(mut self, git_ref: Option<String>) -> Self {
        self.git_ref = git_ref.filter(|r| !r.is_empty());
        self
    }

    /// The local path of the configuration when running in local mode.
    pub fn local_config_path(&self) -> PathBuf {
        PathBuf::from(&self.config_path)
    }
}
