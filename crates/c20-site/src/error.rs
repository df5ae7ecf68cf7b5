//! Site error types.

use std::path::PathBuf;

use c20_content::ContentError;

/// Error returned by site operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Loading or interpreting content failed.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Search index serialization failed.
    #[error("Failed to serialize search index: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing build output failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Output path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
