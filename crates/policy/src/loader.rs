//! # Policy Loader
//!
//! Turns a parsed configuration document into a [`Policy`]:
//!
//! ```yaml
//! documentation: "docs/**"
//! frontend:
//!   - "src/**"
//!   - "!src/server/**"
//! ```
//!
//! Glob syntax is not validated here; a pattern the glob engine rejects is
//! matched literally at evaluation time.

use crate::error::ConfigurationError;
use crate::glob::GlobPattern;
use serde_yaml::Value;

/// Ordered mapping of label name to its non-empty pattern list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    entries: Vec<(String, Vec<GlobPattern>)>,
}

impl Policy {
    /// Parse a YAML policy document.
    ///
    /// # Errors
    /// Returns `ConfigurationError::Yaml` for malformed YAML and any other
    /// variant for a document of the wrong shape.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigurationError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Value = serde_yaml::from_str(text)?;
        parse_policy(&document)
    }

    /// Iterate `(label, patterns)` in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GlobPattern])> {
        self.entries
            .iter()
            .map(|(label, patterns)| (label.as_str(), patterns.as_slice()))
    }

    /// Patterns for `label`, if the policy defines it.
    #[must_use]
    pub fn patterns(&self, label: &str) -> Option<&[GlobPattern]> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, patterns)| patterns.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shape of a single label entry in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyValue {
    Single(String),
    Multiple(Vec<String>),
    Invalid { found: &'static str },
}

impl PolicyValue {
    /// Classify a raw document value.
    ///
    /// # Errors
    /// Returns `ConfigurationError::InvalidPattern` when a list contains
    /// something other than a string.
    fn classify(label: &str, value: &Value) -> Result<Self, ConfigurationError> {
        match value {
            Value::String(pattern) => Ok(Self::Single(pattern.clone())),
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::String(pattern) => Ok(pattern.clone()),
                    other => Err(ConfigurationError::InvalidPattern {
                        label: label.to_string(),
                        index,
                        found: kind_of(other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Multiple),
            other => Ok(Self::Invalid {
                found: kind_of(other),
            }),
        }
    }

    /// Normalize into a validated pattern list.
    fn into_patterns(self, label: &str) -> Result<Vec<GlobPattern>, ConfigurationError> {
        let raw = match self {
            Self::Single(pattern) => vec![pattern],
            Self::Multiple(patterns) if patterns.is_empty() => {
                return Err(ConfigurationError::EmptyPatterns {
                    label: label.to_string(),
                })
            }
            Self::Multiple(patterns) => patterns,
            Self::Invalid { found } => {
                return Err(ConfigurationError::InvalidValue {
                    label: label.to_string(),
                    found,
                })
            }
        };

        if let Some(index) = raw.iter().position(String::is_empty) {
            return Err(ConfigurationError::InvalidPattern {
                label: label.to_string(),
                index,
                found: "an empty string",
            });
        }

        Ok(raw.iter().map(|p| GlobPattern::new(p)).collect())
    }
}

/// Build a [`Policy`] from an already parsed document.
///
/// An empty document (`null`) yields an empty policy.
///
/// # Errors
/// Returns `ConfigurationError` naming the offending label when an entry is
/// neither a string nor a list of non-empty strings.
pub fn parse_policy(document: &Value) -> Result<Policy, ConfigurationError> {
    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Policy::default()),
        other => {
            return Err(ConfigurationError::NotAMapping {
                found: kind_of(other),
            })
        }
    };

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let label = label_name(key)?;
        let patterns = PolicyValue::classify(&label, value)?.into_patterns(&label)?;
        entries.push((label, patterns));
    }

    Ok(Policy { entries })
}

/// Scalar keys such as `2024:` or `true:` name a label by their text.
fn label_name(key: &Value) -> Result<String, ConfigurationError> {
    match key {
        Value::String(label) => Ok(label.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ConfigurationError::InvalidLabelName {
            found: kind_of(other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
