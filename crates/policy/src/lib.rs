//! Label policy engine.
//!
//! Given a policy that maps label names to path globs and the list of files
//! a pull request changes, work out which labels belong on the pull request
//! and which stale ones should come off.
//!
//! # Usage
//!
//! ```
//! use policy::{reconcile, Policy};
//!
//! let policy = Policy::from_yaml_str(
//!     r#"
//! docs: "**/*.md"
//! frontend:
//!   - "src/**"
//!   - "!src/server/**"
//! "#,
//! )?;
//!
//! let result = reconcile(&policy, &["src/ui/App.tsx"], &["docs"]);
//! assert_eq!(result.to_add, vec!["frontend"]);
//! assert_eq!(result.to_remove, vec!["docs"]);
//! # Ok::<(), policy::ConfigurationError>(())
//! ```
//!
//! # Architecture
//!
//! - [`GlobPattern`] matches one path against one (optionally negated) glob
//! - [`all_files_match`] decides whether a pattern list covers every changed file
//! - [`reconcile`] turns a [`Policy`] plus pull request state into a [`Reconciliation`]
//! - [`parse_policy`] builds a [`Policy`] from a parsed document
//!
//! Everything here is synchronous and free of I/O.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod evaluator;
pub mod glob;
pub mod loader;
pub mod reconcile;

pub use error::ConfigurationError;
pub use evaluator::{all_files_match, file_matches};
pub use glob::GlobPattern;
pub use loader::{parse_policy, Policy, PolicyValue};
pub use reconcile::{reconcile, Reconciliation};
