//! Launching the external diff program.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::config::DiffToolConfig;
use crate::error::{DiffError, DiffResult};

/// Shows the difference between a received and an approved artifact.
pub trait DiffLauncher: Send + Sync {
    /// Show the diff and wait until the viewer is done.
    fn launch(&self, received: &Path, approved: &Path) -> DiffResult<()>;
}

/// Runs the configured program as `<program> <received> <approved>`.
///
/// The program is spawned directly, never through a shell, so paths need no
/// quoting. The call blocks until the program exits; any non-zero exit is an
/// error.
#[derive(Clone, Debug, Default)]
pub struct ExternalDiffLauncher {
    config: DiffToolConfig,
}

impl ExternalDiffLauncher {
    pub fn new(config: DiffToolConfig) -> Self {
        Self { config }
    }

    /// Launcher for the program named by `LIB_APPROVALS_DIFF`.
    pub fn from_env() -> Self {
        Self::new(DiffToolConfig::from_env())
    }

    pub fn config(&self) -> &DiffToolConfig {
        &self.config
    }

    /// Select the program programmatically.
    pub fn set_program(&mut self, program: impl Into<std::path::PathBuf>) {
        self.config.set_program(program);
    }
}

impl DiffLauncher for ExternalDiffLauncher {
    fn launch(&self, received: &Path, approved: &Path) -> DiffResult<()> {
        let program = self.config.resolve()?;
        debug!(
            program = %program.display(),
            received = %received.display(),
            approved = %approved.display(),
            "launching diff program"
        );

        let status = Command::new(program)
            .arg(received)
            .arg(approved)
            .status()
            .map_err(|source| DiffError::Launch {
                program: program.to_path_buf(),
                source,
            })?;

        if !status.success() {
            return Err(DiffError::ExitStatus {
                program: program.to_path_buf(),
                code: status.code(),
            });
        }

        info!(program = %program.display(), "diff program finished");
        Ok(())
    }
}

/// A launcher that shows nothing. Used when diff display is switched off.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDiffLauncher;

impl DiffLauncher for NoopDiffLauncher {
    fn launch(&self, received: &Path, approved: &Path) -> DiffResult<()> {
        debug!(
            received = %received.display(),
            approved = %approved.display(),
            "diff display disabled"
        );
        Ok(())
    }
}
