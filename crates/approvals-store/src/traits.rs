use approvals_types::{ArtifactPaths, TestCaseId};

use crate::error::StoreResult;

/// Storage for received and approved artifacts.
///
/// All implementations must satisfy these invariants:
/// - `write_received` always replaces the previous received text.
/// - `seed_approved` never overwrites an existing approved artifact.
/// - Text is stored and returned byte for byte; no newline normalization.
/// - All I/O errors are propagated, never silently ignored.
pub trait ApprovalStore: Send + Sync {
    /// Locations of both artifacts for `id`.
    fn paths(&self, id: &TestCaseId) -> ArtifactPaths;

    /// Write (or overwrite) the received artifact.
    fn write_received(&self, id: &TestCaseId, text: &str) -> StoreResult<()>;

    /// Read the received artifact.
    ///
    /// Returns `Ok(None)` if it does not exist.
    fn read_received(&self, id: &TestCaseId) -> StoreResult<Option<String>>;

    /// Read the approved artifact.
    ///
    /// Returns `Ok(None)` if it does not exist.
    fn read_approved(&self, id: &TestCaseId) -> StoreResult<Option<String>>;

    /// Create an empty approved artifact if none exists.
    fn seed_approved(&self, id: &TestCaseId) -> StoreResult<()>;

    /// Promote the received artifact to approved, replacing the baseline.
    ///
    /// Fails with `StoreError::NotFound` if there is no received artifact.
    fn accept(&self, id: &TestCaseId) -> StoreResult<()>;

    /// Delete the received artifact. Returns `true` if it existed.
    fn remove_received(&self, id: &TestCaseId) -> StoreResult<bool>;

    /// Every test case with at least one artifact, sorted by id.
    fn list(&self) -> StoreResult<Vec<TestCaseId>>;
}
