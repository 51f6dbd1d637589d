//! # Glob Matcher
//!
//! A single path glob, optionally negated with a leading `!`.
//!
//! Supported syntax: `*` (within one path segment), `**` (any depth,
//! including none), `?`, bracket classes `[...]` and brace alternation
//! `{a,b}`. Matching is anchored to the whole path.

use globset::{GlobBuilder, GlobMatcher as CompiledGlob};
use std::fmt;

/// Prefix that turns a pattern into an exclusion.
const NEGATION_PREFIX: char = '!';

/// A compiled path pattern.
#[derive(Clone)]
pub struct GlobPattern {
    raw: String,
    negated: bool,
    engine: Engine,
}

#[derive(Clone)]
enum Engine {
    Compiled(CompiledGlob),
    /// Pattern the glob engine rejected; compared byte-for-byte.
    Literal,
}

impl GlobPattern {
    /// Build a matcher from a raw pattern string.
    ///
    /// Never fails: a pattern the glob engine cannot compile is kept as a
    /// literal and only matches a path spelled exactly the same way.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let (negated, effective) = match raw.strip_prefix(NEGATION_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let engine = match GlobBuilder::new(effective)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
        {
            Ok(glob) => Engine::Compiled(glob.compile_matcher()),
            Err(e) => {
                tracing::debug!(pattern = %raw, error = %e, "Glob did not compile, matching literally");
                Engine::Literal
            }
        };

        Self {
            raw: raw.to_string(),
            negated,
            engine,
        }
    }

    /// The pattern exactly as written in the policy, including any `!`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The pattern with the negation prefix removed.
    #[must_use]
    pub fn effective(&self) -> &str {
        if self.negated {
            &self.raw[NEGATION_PREFIX.len_utf8()..]
        } else {
            &self.raw
        }
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Test `path` against this pattern, inverting the result when negated.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.structural_match(path) != self.negated
    }

    fn structural_match(&self, path: &str) -> bool {
        let pattern = self.effective();
        if pattern.is_empty() || path.is_empty() {
            return pattern.is_empty() && path.is_empty();
        }

        match &self.engine {
            Engine::Compiled(glob) => glob.is_match(path),
            Engine::Literal => pattern == path,
        }
    }
}

impl fmt::Debug for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobPattern")
            .field("raw", &self.raw)
            .field("negated", &self.negated)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for GlobPattern {}

impl From<&str> for GlobPattern {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_prefix_is_stripped() {
        let pattern = GlobPattern::new("!src/server/**");
        assert!(pattern.is_negated());
        assert_eq!(pattern.effective(), "src/server/**");
        assert_eq!(pattern.as_str(), "!src/server/**");

        let pattern = GlobPattern::new("src/**");
        assert!(!pattern.is_negated());
        assert_eq!(pattern.effective(), "src/**");
    }

    #[test]
    fn test_double_star_matches_any_depth() {
        let pattern = GlobPattern::new("**/*.md");
        assert!(pattern.matches("README.md"));
        assert!(pattern.matches("docs/guide.md"));
        assert!(pattern.matches("docs/deep/nested/notes.md"));
        assert!(!pattern.matches("src/index.js"));
    }

    #[test]
    fn test_single_star_stays_within_segment() {
        let pattern = GlobPattern::new("src/*.rs");
        assert!(pattern.matches("src/lib.rs"));
        assert!(!pattern.matches("src/nested/lib.rs"));
    }

    #[test]
    fn test_question_mark_and_brackets() {
        assert!(GlobPattern::new("v?.txt").matches("v1.txt"));
        assert!(!GlobPattern::new("v?.txt").matches("v10.txt"));
        assert!(GlobPattern::new("file[0-9].log").matches("file7.log"));
        assert!(!GlobPattern::new("file[0-9].log").matches("fileA.log"));
    }

    #[test]
    fn test_brace_alternation() {
        let pattern = GlobPattern::new("src/**/*.{ts,tsx}");
        assert!(pattern.matches("src/ui/App.tsx"));
        assert!(pattern.matches("src/api.ts"));
        assert!(!pattern.matches("src/ui/App.css"));
    }

    #[test]
    fn test_match_is_anchored() {
        let pattern = GlobPattern::new("docs");
        assert!(pattern.matches("docs"));
        assert!(!pattern.matches("docs/guide.md"));
        assert!(!pattern.matches("my-docs"));
    }

    #[test]
    fn test_negated_pattern_inverts_result() {
        let paths = ["foo/bar.txt", "foo/a/b/c", "other/foo/x", "README.md"];
        let plain = GlobPattern::new("foo/**");
        let negated = GlobPattern::new("!foo/**");
        for path in paths {
            assert_eq!(negated.matches(path), !plain.matches(path), "{path}");
        }
    }

    #[test]
    fn test_empty_pattern_and_path() {
        assert!(GlobPattern::new("").matches(""));
        assert!(!GlobPattern::new("").matches("README.md"));
        assert!(!GlobPattern::new("**").matches(""));
        // "!" alone negates the empty pattern.
        assert!(!GlobPattern::new("!").matches(""));
        assert!(GlobPattern::new("!").matches("a"));
    }

    #[test]
    fn test_malformed_pattern_matches_literally() {
        let pattern = GlobPattern::new("src/[oops");
        assert!(pattern.matches("src/[oops"));
        assert!(!pattern.matches("src/o"));
    }

    #[test]
    fn test_dotfiles_are_matched_by_wildcards() {
        assert!(GlobPattern::new(".github/**").matches(".github/workflows/ci.yml"));
        assert!(GlobPattern::new("**/*.yml").matches(".github/labeler.yml"));
    }
}
