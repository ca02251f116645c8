use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactKind;
use crate::error::TypeError;

/// Name of a verification scenario.
///
/// A `TestCaseId` is the stem of the two artifact files kept for a scenario:
/// `<id>.received.txt` and `<id>.approved.txt`. It must stay stable across
/// runs; the caller owns it.
///
/// Any non-empty string is accepted as long as it contains no NUL byte and no
/// line break. Dots and slashes are allowed (`"test.function.1-arg"`,
/// `"parser/expr"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TestCaseId(String);

impl TestCaseId {
    /// Validate and wrap a test case name.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidTestCaseId {
                id,
                reason: "must not be empty".into(),
            });
        }
        if let Some(c) = id.chars().find(|c| matches!(c, '\0' | '\n' | '\r')) {
            return Err(TypeError::InvalidTestCaseId {
                reason: format!("must not contain {c:?}"),
                id,
            });
        }
        Ok(Self(id))
    }

    /// The raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the given artifact, e.g. `test.list.received.txt`.
    pub fn file_name(&self, kind: ArtifactKind) -> String {
        format!("{}{}", self.0, kind.suffix())
    }

    /// Recover the id from an artifact file name.
    ///
    /// Returns `None` if the name does not end in the artifact suffix or the
    /// remaining stem is not a valid id.
    pub fn from_file_name(name: &str, kind: ArtifactKind) -> Option<Self> {
        name.strip_suffix(kind.suffix())
            .and_then(|stem| Self::new(stem).ok())
    }
}

impl fmt::Display for TestCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TestCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestCaseId({})", self.0)
    }
}

impl FromStr for TestCaseId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TestCaseId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TestCaseId {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TestCaseId> for String {
    fn from(id: TestCaseId) -> Self {
        id.0
    }
}

impl AsRef<str> for TestCaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_dotted_names() {
        let id = TestCaseId::new("test.primitive.int").unwrap();
        assert_eq!(id.as_str(), "test.primitive.int");
        assert_eq!(id.to_string(), "test.primitive.int");
    }

    #[test]
    fn rejects_empty() {
        let err = TestCaseId::new("").unwrap_err();
        assert!(matches!(err, TypeError::InvalidTestCaseId { .. }));
    }

    #[test]
    fn rejects_control_characters() {
        assert!(TestCaseId::new("a\nb").is_err());
        assert!(TestCaseId::new("a\rb").is_err());
        assert!(TestCaseId::new("a\0b").is_err());
    }

    #[test]
    fn file_names() {
        let id = TestCaseId::new("test.map").unwrap();
        assert_eq!(id.file_name(ArtifactKind::Received), "test.map.received.txt");
        assert_eq!(id.file_name(ArtifactKind::Approved), "test.map.approved.txt");
    }

    #[test]
    fn from_file_name_strips_suffix() {
        let id = TestCaseId::from_file_name("test.list.received.txt", ArtifactKind::Received);
        assert_eq!(id, Some(TestCaseId::new("test.list").unwrap()));

        assert!(TestCaseId::from_file_name("test.list.approved.txt", ArtifactKind::Received)
            .is_none());
        assert!(TestCaseId::from_file_name(".received.txt", ArtifactKind::Received).is_none());
    }

    #[test]
    fn serde_round_trip_validates() {
        let id = TestCaseId::new("test.set").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"test.set\"");
        let back: TestCaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<TestCaseId>("\"\"").is_err());
    }

    proptest! {
        #[test]
        fn file_name_recovers_id(stem in "[a-z][a-z0-9._-]{0,24}") {
            let id = TestCaseId::new(stem.clone()).unwrap();
            for kind in [ArtifactKind::Received, ArtifactKind::Approved] {
                let name = id.file_name(kind);
                prop_assert_eq!(TestCaseId::from_file_name(&name, kind), Some(id.clone()));
            }
        }
    }
}
