//! Directory-backed artifact store.
//!
//! Artifacts for test case `T` live at `<root>/T.received.txt` and
//! `<root>/T.approved.txt`. The root defaults to the working directory.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use approvals_types::{ArtifactKind, ArtifactPaths, TestCaseId};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::traits::ApprovalStore;

/// An [`ApprovalStore`] keeping artifacts as UTF-8 files in one directory.
#[derive(Clone, Debug)]
pub struct FileApprovalStore {
    root: PathBuf,
}

impl FileApprovalStore {
    /// Store artifacts under `root`. The directory is not created.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store artifacts in the current working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// The directory holding the artifacts.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, id: &TestCaseId, kind: ArtifactKind) -> PathBuf {
        self.root.join(id.file_name(kind))
    }

    fn read(&self, id: &TestCaseId, kind: ArtifactKind) -> StoreResult<Option<String>> {
        let path = self.path(id, kind);
        match fs::read(&path) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes).map_err(|e| StoreError::InvalidUtf8 {
                    path: path.clone(),
                    lossy: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                })?;
                debug!(%id, %kind, len = text.len(), "artifact read");
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

impl Default for FileApprovalStore {
    fn default() -> Self {
        Self::current_dir()
    }
}

impl ApprovalStore for FileApprovalStore {
    fn paths(&self, id: &TestCaseId) -> ArtifactPaths {
        ArtifactPaths::new(&self.root, id)
    }

    fn write_received(&self, id: &TestCaseId, text: &str) -> StoreResult<()> {
        let path = self.path(id, ArtifactKind::Received);
        fs::write(&path, text).map_err(|e| StoreError::io(&path, e))?;
        debug!(%id, path = %path.display(), len = text.len(), "received artifact written");
        Ok(())
    }

    fn read_received(&self, id: &TestCaseId) -> StoreResult<Option<String>> {
        self.read(id, ArtifactKind::Received)
    }

    fn read_approved(&self, id: &TestCaseId) -> StoreResult<Option<String>> {
        self.read(id, ArtifactKind::Approved)
    }

    fn seed_approved(&self, id: &TestCaseId) -> StoreResult<()> {
        let path = self.path(id, ArtifactKind::Approved);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                info!(%id, path = %path.display(), "seeded empty approved artifact");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn accept(&self, id: &TestCaseId) -> StoreResult<()> {
        let received = self.path(id, ArtifactKind::Received);
        let approved = self.path(id, ArtifactKind::Approved);
        match fs::copy(&received, &approved) {
            Ok(_) => {
                info!(%id, path = %approved.display(), "received artifact accepted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !received.exists() => {
                Err(StoreError::NotFound {
                    id: id.clone(),
                    kind: ArtifactKind::Received,
                })
            }
            Err(e) => Err(StoreError::io(approved, e)),
        }
    }

    fn remove_received(&self, id: &TestCaseId) -> StoreResult<bool> {
        let path = self.path(id, ArtifactKind::Received);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(%id, path = %path.display(), "received artifact removed");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn list(&self) -> StoreResult<Vec<TestCaseId>> {
        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "directory walk failed"));
                StoreError::io(path, source)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let id = TestCaseId::from_file_name(name, ArtifactKind::Received)
                .or_else(|| TestCaseId::from_file_name(name, ArtifactKind::Approved));
            if let Some(id) = id {
                ids.push(id);
            }
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> TestCaseId {
        TestCaseId::new(name).unwrap()
    }

    #[test]
    fn received_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());
        let id = id("test.overwrite");

        store.write_received(&id, "first\n").unwrap();
        store.write_received(&id, "second\n").unwrap();

        let on_disk = fs::read_to_string(dir.path().join("test.overwrite.received.txt")).unwrap();
        assert_eq!(on_disk, "second\n");
        assert_eq!(store.read_received(&id).unwrap().as_deref(), Some("second\n"));
    }

    #[test]
    fn missing_approved_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());
        assert_eq!(store.read_approved(&id("test.absent")).unwrap(), None);
    }

    #[test]
    fn seed_creates_empty_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());
        let id = id("test.seed");

        store.seed_approved(&id).unwrap();
        let path = dir.path().join("test.seed.approved.txt");
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        fs::write(&path, "baseline\n").unwrap();
        store.seed_approved(&id).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "baseline\n");
    }

    #[test]
    fn text_is_byte_exact() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());
        let id = id("test.crlf");

        store.write_received(&id, "a\r\nb").unwrap();
        assert_eq!(store.read_received(&id).unwrap().as_deref(), Some("a\r\nb"));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());
        fs::write(dir.path().join("test.bin.approved.txt"), [0xFF, 0xFE]).unwrap();

        let err = store.read_approved(&id("test.bin")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUtf8 { ref lossy, .. } if lossy == "\u{FFFD}\u{FFFD}"));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path().join("missing"));

        let err = store.write_received(&id("test.nowhere"), "x").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn accept_copies_received() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());
        let id = id("test.accept");

        store.write_received(&id, "6\n").unwrap();
        store.accept(&id).unwrap();
        assert_eq!(store.read_approved(&id).unwrap().as_deref(), Some("6\n"));
        assert_eq!(store.read_received(&id).unwrap().as_deref(), Some("6\n"));
    }

    #[test]
    fn accept_without_received_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());

        let err = store.accept(&id("test.nothing")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: ArtifactKind::Received,
                ..
            }
        ));
    }

    #[test]
    fn remove_received_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());
        let id = id("test.remove");

        assert!(!store.remove_received(&id).unwrap());
        store.write_received(&id, "x").unwrap();
        assert!(store.remove_received(&id).unwrap());
        assert_eq!(store.read_received(&id).unwrap(), None);
    }

    #[test]
    fn list_finds_both_kinds_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path());

        store.write_received(&id("test.b"), "b").unwrap();
        store.seed_approved(&id("test.b")).unwrap();
        store.seed_approved(&id("test.a")).unwrap();
        store.write_received(&id("test.c"), "c").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.received.txt")).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(String::from).collect();
        assert_eq!(ids, ["test.a", "test.b", "test.c"]);
    }

    #[test]
    fn paths_follow_root() {
        let store = FileApprovalStore::new("snapshots");
        let paths = store.paths(&id("test.list"));
        assert_eq!(paths.received, Path::new("snapshots").join("test.list.received.txt"));
        assert_eq!(paths.approved, Path::new("snapshots").join("test.list.approved.txt"));
    }
}
