//! # Policy Evaluator
//!
//! Decides whether a label's patterns cover the whole footprint of a pull
//! request: every changed file has to be accepted by the pattern list.
//!
//! Within one list, plain patterns are alternatives (any of them may accept
//! a file) and `!` patterns are exclusions (a file under any of them is
//! rejected). A list made only of exclusions accepts everything that is not
//! excluded.

use crate::glob::GlobPattern;

/// Returns `true` when every file in `changed_files` is accepted by `patterns`.
///
/// An empty file list is vacuously accepted. Scanning stops at the first
/// rejected file.
#[must_use]
pub fn all_files_match<S: AsRef<str>>(changed_files: &[S], patterns: &[GlobPattern]) -> bool {
    changed_files
        .iter()
        .all(|file| file_matches(file.as_ref(), patterns))
}

/// Returns `true` when `file` is accepted by `patterns`.
#[must_use]
pub fn file_matches(file: &str, patterns: &[GlobPattern]) -> bool {
    // A negated matcher returns false for paths under its glob.
    let excluded = patterns
        .iter()
        .filter(|p| p.is_negated())
        .any(|p| !p.matches(file));
    if excluded {
        return false;
    }

    let mut inclusions = patterns.iter().filter(|p| !p.is_negated()).peekable();
    inclusions.peek().is_none() || inclusions.any(|p| p.matches(file))
}
