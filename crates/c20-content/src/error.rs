//! Content error types.

use std::path::PathBuf;

/// Error returned when reading or interpreting the content tree fails.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// I/O error on a content or data file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Front matter block is not valid YAML for a page.
    #[error("Invalid front matter in {}: {source}", path.display())]
    FrontMatter {
        /// Markdown source file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Structured data file is not valid YAML.
    #[error("Invalid data file {}: {source}", path.display())]
    Data {
        /// YAML data file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A page has no record for the requested language.
    #[error("Page {page_id} has no {lang:?} source")]
    MissingLanguage {
        /// Page identifier.
        page_id: String,
        /// Requested language code.
        lang: String,
    },

    /// Background loading task failed to complete.
    #[error("Content loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ContentError {
    /// Wrap an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check whether this error means the file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
