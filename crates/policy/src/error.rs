//! Errors raised while loading a label policy.

use thiserror::Error;

/// The policy document cannot be turned into a [`Policy`](crate::Policy).
///
/// Every variant that concerns a single entry names the offending label.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The document is not valid YAML
    #[error("Failed to parse policy document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document root is not a mapping of label to patterns
    #[error("Policy document must be a mapping of label names to patterns, found {found}")]
    NotAMapping { found: &'static str },

    /// A top-level key is a collection or tagged value
    #[error("Label names must be scalars, found {found}")]
    InvalidLabelName { found: &'static str },

    /// A label maps to something other than a string or a list
    #[error("Label '{label}' must map to a pattern string or a list of patterns, found {found}")]
    InvalidValue { label: String, found: &'static str },

    /// A label maps to an empty list
    #[error("Label '{label}' has no patterns")]
    EmptyPatterns { label: String },

    /// A list entry is not a non-empty string
    #[error("Label '{label}' has an invalid pattern at index {index}: expected a non-empty string, found {found}")]
    InvalidPattern {
        label: String,
        index: usize,
        found: &'static str,
    },
}

impl ConfigurationError {
    /// The label the error is about, when it concerns a single entry.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { label, .. }
            | Self::EmptyPatterns { label }
            | Self::InvalidPattern { label, .. } => Some(label),
            Self::Yaml(_) | Self::NotAMapping { .. } | Self::InvalidLabelName { .. } => None,
        }
    }
}
