//! # Label Reconciler
//!
//! Compares the labels a policy asks for against the labels a pull request
//! already carries and produces the two action sets the caller applies.

use crate::evaluator::all_files_match;
use crate::loader::Policy;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Labels to attach and labels to detach, in policy order.
///
/// The two lists are disjoint: a label is either covered by the changed
/// files or it is not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl Reconciliation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Labels from `to_add` that `current` does not already carry.
    #[must_use]
    pub fn new_labels<S: AsRef<str>>(&self, current: &[S]) -> Vec<String> {
        let present: HashSet<&str> = current.iter().map(AsRef::as_ref).collect();
        self.to_add
            .iter()
            .filter(|label| !present.contains(label.as_str()))
            .cloned()
            .collect()
    }

    /// The label set left on the pull request once this result is applied.
    ///
    /// Removals only take effect when `sync_labels` is set. The result is
    /// sorted.
    #[must_use]
    pub fn resulting_labels<S: AsRef<str>>(&self, current: &[S], sync_labels: bool) -> Vec<String> {
        let mut labels: BTreeSet<String> =
            current.iter().map(|l| l.as_ref().to_string()).collect();

        labels.extend(self.to_add.iter().cloned());

        if sync_labels {
            for label in &self.to_remove {
                labels.remove(label);
            }
        }

        labels.into_iter().collect()
    }
}

/// Work out which labels to add and which to remove.
///
/// A label whose patterns cover every changed file goes into `to_add`,
/// whether or not the pull request already has it. A label that does not
/// cover the changes goes into `to_remove` only if it is currently present.
#[must_use]
pub fn reconcile<F, L>(policy: &Policy, changed_files: &[F], current_labels: &[L]) -> Reconciliation
where
    F: AsRef<str>,
    L: AsRef<str>,
{
    let present: HashSet<&str> = current_labels.iter().map(AsRef::as_ref).collect();
    let mut result = Reconciliation::default();

    for (label, patterns) in policy.iter() {
        if all_files_match(changed_files, patterns) {
            debug!(label = %label, "All changed files match, label applies");
            result.to_add.push(label.to_string());
        } else if present.contains(label) {
            debug!(label = %label, "Changed files not covered, label is stale");
            result.to_remove.push(label.to_string());
        } else {
            debug!(label = %label, "Changed files not covered");
        }
    }

    result
}
