use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Environment variable naming the external diff program.
pub const DIFF_PROGRAM_ENV: &str = "LIB_APPROVALS_DIFF";

/// Which external program shows a mismatch.
///
/// The program receives two arguments, the received artifact path and the
/// approved artifact path, in that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffToolConfig {
    /// Program path or name looked up on `PATH`.
    pub program: Option<PathBuf>,
}

impl DiffToolConfig {
    /// Read the program from [`DIFF_PROGRAM_ENV`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from))
    }

    /// Read the program through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        Self {
            program: lookup(DIFF_PROGRAM_ENV),
        }
    }

    /// Use `program` regardless of the environment.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    /// Replace the configured program.
    pub fn set_program(&mut self, program: impl Into<PathBuf>) {
        self.program = Some(program.into());
    }

    /// The program to run.
    ///
    /// Fails with [`DiffError::NotConfigured`] if none is set or it is empty.
    pub fn resolve(&self) -> DiffResult<&Path> {
        match self.program.as_deref() {
            Some(program) if !program.as_os_str().is_empty() => Ok(program),
            _ => Err(DiffError::NotConfigured {
                env: DIFF_PROGRAM_ENV,
            }),
        }
    }
}
