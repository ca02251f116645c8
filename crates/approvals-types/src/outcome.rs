use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of comparing a received artifact against its baseline.
///
/// A freshly seeded baseline counts as `Passed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationOutcome {
    Passed,
    Failed,
}

impl VerificationOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl From<bool> for VerificationOutcome {
    fn from(passed: bool) -> Self {
        if passed {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bool() {
        assert_eq!(VerificationOutcome::from(true), VerificationOutcome::Passed);
        assert_eq!(VerificationOutcome::from(false), VerificationOutcome::Failed);
        assert!(VerificationOutcome::Passed.is_passed());
        assert!(VerificationOutcome::Failed.is_failed());
    }
}
