//! Error types for the diff crate.

use std::path::PathBuf;

/// Errors that can occur while showing a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// No diff program is configured.
    #[error("no diff program configured: set {env} or configure one programmatically")]
    NotConfigured { env: &'static str },

    /// The diff program could not be started.
    #[error("cannot launch diff program {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The diff program ran but exited unsuccessfully.
    #[error("diff program {} exited with {}", .program.display(), describe_exit(.code))]
    ExitStatus { program: PathBuf, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
