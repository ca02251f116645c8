//! In-memory artifact store for testing and ephemeral use.
//!
//! [`InMemoryApprovalStore`] keeps both artifacts of every test case in a
//! `BTreeMap` behind a `RwLock`. Paths it reports are virtual: nothing is
//! written to disk.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use approvals_types::{ArtifactKind, ArtifactPaths, TestCaseId};

use crate::error::{StoreError, StoreResult};
use crate::traits::ApprovalStore;

#[derive(Clone, Debug, Default)]
struct Artifacts {
    received: Option<String>,
    approved: Option<String>,
}

/// An in-memory implementation of [`ApprovalStore`].
#[derive(Debug)]
pub struct InMemoryApprovalStore {
    root: PathBuf,
    artifacts: RwLock<BTreeMap<TestCaseId, Artifacts>>,
}

impl InMemoryApprovalStore {
    /// Create an empty store whose virtual paths are rooted at `.`.
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
            artifacts: RwLock::new(BTreeMap::new()),
        }
    }

    /// Replace the approved text, as a human promoting a baseline would.
    pub fn set_approved(&self, id: &TestCaseId, text: impl Into<String>) -> StoreResult<()> {
        let mut artifacts = self.write_lock()?;
        artifacts.entry(id.clone()).or_default().approved = Some(text.into());
        Ok(())
    }

    /// Number of test cases with at least one artifact.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read_lock(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, BTreeMap<TestCaseId, Artifacts>>> {
        self.artifacts
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write_lock(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, BTreeMap<TestCaseId, Artifacts>>> {
        self.artifacts
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryApprovalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ApprovalStore for InMemoryApprovalStore {
    fn paths(&self, id: &TestCaseId) -> ArtifactPaths {
        ArtifactPaths::new(&self.root, id)
    }

    fn write_received(&self, id: &TestCaseId, text: &str) -> StoreResult<()> {
        let mut artifacts = self.write_lock()?;
        artifacts.entry(id.clone()).or_default().received = Some(text.to_string());
        Ok(())
    }

    fn read_received(&self, id: &TestCaseId) -> StoreResult<Option<String>> {
        let artifacts = self.read_lock()?;
        Ok(artifacts.get(id).and_then(|a| a.received.clone()))
    }

    fn read_approved(&self, id: &TestCaseId) -> StoreResult<Option<String>> {
        let artifacts = self.read_lock()?;
        Ok(artifacts.get(id).and_then(|a| a.approved.clone()))
    }

    fn seed_approved(&self, id: &TestCaseId) -> StoreResult<()> {
        let mut artifacts = self.write_lock()?;
        artifacts
            .entry(id.clone())
            .or_default()
            .approved
            .get_or_insert_with(String::new);
        Ok(())
    }

    fn accept(&self, id: &TestCaseId) -> StoreResult<()> {
        let mut artifacts = self.write_lock()?;
        let entry = artifacts.get_mut(id);
        match entry {
            Some(Artifacts {
                received: Some(received),
                approved,
            }) => {
                *approved = Some(received.clone());
                Ok(())
            }
            _ => Err(StoreError::NotFound {
                id: id.clone(),
                kind: ArtifactKind::Received,
            }),
        }
    }

    fn remove_received(&self, id: &TestCaseId) -> StoreResult<bool> {
        let mut artifacts = self.write_lock()?;
        Ok(artifacts
            .get_mut(id)
            .and_then(|a| a.received.take())
            .is_some())
    }

    fn list(&self) -> StoreResult<Vec<TestCaseId>> {
        let artifacts = self.read_lock()?;
        Ok(artifacts
            .iter()
            .filter(|(_, a)| a.received.is_some() || a.approved.is_some())
            .map(|(id, _)| id.clone())
            .collect())
    }
}
