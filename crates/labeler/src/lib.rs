//! Pull request labeler.
//!
//! Reads a label policy (label name to path globs) from the repository,
//! compares it with the files a pull request changes and adds or removes
//! labels accordingly. The matching itself lives in the [`policy`] crate;
//! this crate supplies the GitHub side.
//!
//! # Usage
//!
//! ```no_run
//! use labeler::{Labeler, RunConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RunConfig {
//!     token: std::env::var("GITHUB_TOKEN")?,
//!     owner: "5dlabs".to_string(),
//!     repo: "cto".to_string(),
//!     pr_number: 1956,
//!     sha: None,
//!     configuration_path: ".github/labeler.yml".to_string(),
//!     sync_labels: true,
//!     api_url: "https://api.github.com".to_string(),
//!     output_file: None,
//!     dry_run: false,
//! };
//!
//! let report = Labeler::new(config)?.run().await?;
//! println!("added {:?}, removed {:?}", report.to_add, report.removed);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod event;
pub mod github;
pub mod outputs;
pub mod runner;

pub use config::{RunArgs, RunConfig};
pub use error::{GitHubError, LabelerError};
pub use github::{GitHubClient, PullRequest};
pub use outputs::ActionOutputs;
pub use runner::{Labeler, RunReport};
