use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a verification call.
///
/// A text mismatch is *not* an error: it is reported through the
/// [`Assertion`](crate::Assertion) collaborator.
#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("invalid test case: {0}")]
    Type(#[from] approvals_types::TypeError),

    #[error("store error: {0}")]
    Store(#[from] approvals_store::StoreError),

    #[error("diff error: {0}")]
    Diff(#[from] approvals_diff::DiffError),

    #[error("trace error: {0}")]
    Trace(#[from] approvals_render::TraceError),

    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type ApprovalResult<T> = Result<T, ApprovalError>;
