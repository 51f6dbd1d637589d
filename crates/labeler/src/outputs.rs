//! Step outputs written to the file named by `GITHUB_OUTPUT`.

use crate::error::LabelerError;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Labels reported back to the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutputs {
    /// Labels this run attached that were not there before
    pub new_labels: Vec<String>,
    /// Labels on the pull request after this run
    pub all_labels: Vec<String>,
}

impl ActionOutputs {
    /// Render as `name=value` lines.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "new-labels={}\nall-labels={}\n",
            self.new_labels.join(","),
            self.all_labels.join(",")
        )
    }

    /// Append the outputs to `path`, creating it if needed.
    ///
    /// # Errors
    /// Returns `LabelerError::Io` if the file cannot be opened or written.
    pub async fn append_to(&self, path: &Path) -> Result<(), LabelerError> {
        let io_err = |source| LabelerError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(io_err)?;

        file.write_all(self.render().as_bytes())
            .await
            .map_err(io_err)?;
        file.flush().await.map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs() -> ActionOutputs {
        ActionOutputs {
            new_labels: vec!["docs".into()],
            all_labels: vec!["bug".into(), "docs".into()],
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(outputs().render(), "new-labels=docs\nall-labels=bug,docs\n");
        assert_eq!(
            ActionOutputs::default().render(),
            "new-labels=\nall-labels=\n"
        );
    }

    #[tokio::test]
    async fn test_append_keeps_existing_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        tokio::fs::write(&path, "previous=1\n").await.unwrap();

        outputs().append_to(&path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "previous=1\nnew-labels=docs\nall-labels=bug,docs\n");
    }
}
