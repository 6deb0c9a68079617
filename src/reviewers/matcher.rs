//! Glob matching of changed file paths against `files` patterns.
//!
//! `*` stays inside one path segment, `**` spans any number of segments
//! (including none), `?` is one character, `[...]` a character class and
//! `{a,b}` an alternation. Wildcards match dotfiles. A pattern that is not a
//! well-formed glob is compared literally, so matching never fails.

use globset::{GlobBuilder, GlobMatcher};

/// A `files` pattern compiled once for repeated matching.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    source: String,
    compiled: Option<GlobMatcher>,
}

impl PathMatcher {
    pub fn new(pattern: &str) -> Self {
        Self {
            source: pattern.to_string(),
            compiled: GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map(|glob| glob.compile_matcher())
                .ok(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern compiled as a glob (as opposed to a literal fallback).
    pub fn is_glob(&self) -> bool {
        self.compiled.is_some()
    }

    pub fn matches(&self, path: &str) -> bool {
        match &self.compiled {
            Some(matcher) => matcher.is_match(path),
            None => self.source == path,
        }
    }

    /// Whether any of `paths` matches.
    pub fn matches_any<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        paths.iter().any(|path| self.matches(path.as_ref()))
    }
}

/// Check if `path` matches `pattern`.
pub fn matches(pattern: &str, path: &str) -> bool {
    PathMatcher::new(pattern).matches(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_path_without_wildcards() {
        assert!(matches("src/lib.rs", "src/lib.rs"));
        assert!(!matches("src/lib.rs", "src/lib.rs.bak"));
        assert!(!matches("src/lib.rs", "other/src/lib.rs"));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        assert!(matches("src/*.rs", "src/main.rs"));
        assert!(!matches("src/*.rs", "src/cmd/run.rs"));
        assert!(!matches("*.js", "path/to/file.js"));
    }

    #[test]
    fn test_double_star_spans_segments() {
        assert!(matches("**/*.js", "path/to/file.js"));
        assert!(matches("**/*.js", "file.js"));
        assert!(matches("docs/**", "docs/guide/intro.md"));
        assert!(matches("src/**/mod.rs", "src/mod.rs"));
        assert!(matches("src/**/mod.rs", "src/a/b/mod.rs"));
    }

    #[test]
    fn test_double_star_alone_matches_everything() {
        assert!(matches("**", "README.md"));
        assert!(matches("**", "deeply/nested/path/file.txt"));
        assert!(matches("**", ".github/workflows/ci.yml"));
    }

    #[test]
    fn test_question_mark_is_one_character() {
        assert!(matches("v?.txt", "v1.txt"));
        assert!(!matches("v?.txt", "v10.txt"));
        assert!(!matches("a?b", "a/b"));
    }

    #[test]
    fn test_character_class() {
        assert!(matches("[abc].rs", "a.rs"));
        assert!(!matches("[abc].rs", "d.rs"));
        assert!(matches("[!abc].rs", "d.rs"));
    }

    #[test]
    fn test_brace_alternatives() {
        assert!(matches("**/*.{js,ts}", "a/b.ts"));
        assert!(matches("**/*.{js,ts}", "index.js"));
        assert!(!matches("**/*.{js,ts}", "a/b.rs"));
        assert!(matches("{docs,site}/**", "site/index.md"));
    }

    #[test]
    fn test_unclosed_brace_falls_back_to_literal() {
        let matcher = PathMatcher::new("src/*.{js,ts");
        assert!(!matcher.is_glob());
        assert!(matcher.matches("src/*.{js,ts"));
        assert!(!matcher.matches("src/a.js"));
    }

    #[test]
    fn test_wildcards_match_dotfiles() {
        assert!(matches(".github/**", ".github/workflows/ci.yml"));
        assert!(matches("**/*", "config/.env"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matches("*.JS", "file.js"));
    }

    #[test]
    fn test_malformed_pattern_falls_back_to_literal() {
        let matcher = PathMatcher::new("src/a**b");
        assert!(!matcher.is_glob());
        assert!(matcher.matches("src/a**b"));
        assert!(!matcher.matches("src/axxb"));
    }

    #[test]
    fn test_matches_any() {
        let matcher = PathMatcher::new("**/*.js");
        assert!(matcher.matches_any(&["README.md", "lib/index.js"]));
        assert!(!matcher.matches_any(&["README.md"]));
        assert!(!matcher.matches_any::<&str>(&[]));
    }
}
