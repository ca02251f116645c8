use std::path::PathBuf;

use approvals_types::{ArtifactKind, TestCaseId};

/// Errors from artifact store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact exists but is not valid UTF-8 text.
    #[error("artifact {} is not valid UTF-8", .path.display())]
    InvalidUtf8 {
        path: PathBuf,
        /// The content with invalid sequences replaced by U+FFFD.
        lossy: String,
    },

    /// The requested artifact does not exist.
    #[error("no {kind} artifact for {id}")]
    NotFound { id: TestCaseId, kind: ArtifactKind },

    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
