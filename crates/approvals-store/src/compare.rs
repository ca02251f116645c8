//! The seed-and-compare protocol.

use approvals_types::{TestCaseId, VerificationOutcome};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::ApprovalStore;

/// How a received text related to its baseline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// No baseline existed; an empty one was created. Counts as a pass.
    Seeded,
    /// Received text equals the baseline byte for byte.
    Matched,
    /// Received text differs from the baseline.
    Mismatched {
        /// The baseline text the received text was compared against.
        approved: String,
    },
}

impl Comparison {
    /// Pass/fail verdict. Seeding passes.
    pub fn outcome(&self) -> VerificationOutcome {
        match self {
            Self::Seeded | Self::Matched => VerificationOutcome::Passed,
            Self::Mismatched { .. } => VerificationOutcome::Failed,
        }
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded)
    }
}

/// Persist `received` for `id` and compare it against the stored baseline.
///
/// The received artifact is written before anything else, whatever the
/// outcome. A missing baseline is created empty and the comparison passes.
/// Equality is exact: no trimming, no newline normalization. A baseline that
/// is not valid UTF-8 can never equal the received text and is reported as a
/// mismatch, carrying its lossy decoding for display.
pub fn compare<S>(store: &S, id: &TestCaseId, received: &str) -> StoreResult<Comparison>
where
    S: ApprovalStore + ?Sized,
{
    store.write_received(id, received)?;

    let approved = match store.read_approved(id) {
        Err(StoreError::InvalidUtf8 { path, lossy }) => {
            warn!(%id, path = %path.display(), "approved artifact is not valid UTF-8");
            return Ok(Comparison::Mismatched { approved: lossy });
        }
        other => other?,
    };
    let Some(approved) = approved else {
        store.seed_approved(id)?;
        info!(%id, "no approved artifact; seeded baseline");
        return Ok(Comparison::Seeded);
    };

    if approved == received {
        debug!(%id, "received matches approved");
        Ok(Comparison::Matched)
    } else {
        debug!(%id, received_len = received.len(), approved_len = approved.len(), "received differs from approved");
        Ok(Comparison::Mismatched { approved })
    }
}
