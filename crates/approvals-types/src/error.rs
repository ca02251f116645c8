use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid test case id {id:?}: {reason}")]
    InvalidTestCaseId { id: String, reason: String },
}
