use std::ffi::OsString;
use std::path::{Path, PathBuf};

use approvals_diff::{DiffToolConfig, DIFF_PROGRAM_ENV};
use serde::{Deserialize, Serialize};

use crate::error::{ApprovalError, ApprovalResult};

/// Environment variable naming the artifact directory.
pub const DIRECTORY_ENV: &str = "LIB_APPROVALS_DIR";

/// Environment variable that disables launching the diff program when set
/// to `1` or `true`.
pub const NO_DIFF_ENV: &str = "LIB_APPROVALS_NO_DIFF";

/// Configuration for an [`Approvals`](crate::Approvals) engine.
///
/// ```toml
/// directory = "tests/approvals"
/// diff_program = "meld"
/// launch_diff = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApprovalsConfig {
    /// Directory holding the received/approved artifacts.
    pub directory: PathBuf,
    /// External diff program. Falls back to `LIB_APPROVALS_DIFF`.
    pub diff_program: Option<PathBuf>,
    /// When `false`, mismatches still fail but no diff program is started.
    pub launch_diff: bool,
}

impl Default for ApprovalsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            diff_program: None,
            launch_diff: true,
        }
    }
}

impl ApprovalsConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var_os(key))
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> ApprovalResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> ApprovalResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| ApprovalError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply environment-style overrides looked up through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(dir) = lookup(DIRECTORY_ENV) {
            self.directory = PathBuf::from(dir);
        }
        if let Some(program) = lookup(DIFF_PROGRAM_ENV) {
            self.diff_program = Some(PathBuf::from(program));
        }
        if let Some(flag) = lookup(NO_DIFF_ENV) {
            let flag = flag.to_string_lossy().to_ascii_lowercase();
            self.launch_diff = !matches!(flag.as_str(), "1" | "true" | "yes");
        }
        self
    }

    /// Diff launcher settings derived from this config.
    pub fn diff_tool(&self) -> DiffToolConfig {
        DiffToolConfig {
            program: self.diff_program.clone(),
        }
    }
}
