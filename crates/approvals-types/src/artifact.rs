use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::id::TestCaseId;

/// The two artifacts kept per test case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Output of the latest run. Always overwritten.
    Received,
    /// Accepted baseline. Only ever created empty by the engine.
    Approved,
}

impl ArtifactKind {
    /// File name suffix appended to the test case id.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Received => ".received.txt",
            Self::Approved => ".approved.txt",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received => write!(f, "received"),
            Self::Approved => write!(f, "approved"),
        }
    }
}

/// Received/approved path pair for one test case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub received: PathBuf,
    pub approved: PathBuf,
}

impl ArtifactPaths {
    /// Derive both artifact paths for `id` under `root`.
    pub fn new(root: &Path, id: &TestCaseId) -> Self {
        Self {
            received: root.join(id.file_name(ArtifactKind::Received)),
            approved: root.join(id.file_name(ArtifactKind::Approved)),
        }
    }

    /// Path of the given artifact.
    pub fn get(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Received => &self.received,
            ArtifactKind::Approved => &self.approved,
        }
    }
}
