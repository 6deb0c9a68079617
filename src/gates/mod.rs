use crate::review_config::ReviewConfig;

/// Whether review-request processing should run for a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// Draft pull request with `ignore_draft` set
    SkipDraft,
    /// Title contains this ignored keyword
    SkipKeyword(String),
}

impl GateDecision {
    pub fn should_proceed(&self) -> bool {
        matches!(self, GateDecision::Proceed)
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateDecision::Proceed => write!(f, "proceed"),
            GateDecision::SkipDraft => write!(f, "draft pull request is ignored"),
            GateDecision::SkipKeyword(keyword) => {
                write!(f, "title contains ignored keyword '{}'", keyword)
            }
        }
    }
}

pub struct ReviewGate<'a> {
    pub title: &'a str,
    pub is_draft: bool,
    pub config: &'a ReviewConfig,
}

impl<'a> ReviewGate<'a> {
    pub fn new(title: &'a str, is_draft: bool, config: &'a ReviewConfig) -> Self {
        Self {
            title,
            is_draft,
            config,
        }
    }

    pub fn evaluate(&self) -> GateDecision {
        let options = &self.config.options;

        if options.ignore_draft && self.is_draft {
            return GateDecision::SkipDraft;
        }

        // An empty keyword is a substring of every title
        if let Some(keyword) = options
            .ignored_keywords
            .iter()
            .find(|keyword| !keyword.is_empty() && self.title.contains(keyword.as_str()))
        {
            return GateDecision::SkipKeyword(keyword.clone());
        }

        GateDecision::Proceed
    }
}

/// Returns false when the pull request should be left alone.
pub fn should_request_review(title: &str, is_draft: bool, config: &ReviewConfig) -> bool {
    ReviewGate::new(title, is_draft, config)
        .evaluate()
        .should_proceed()
}
