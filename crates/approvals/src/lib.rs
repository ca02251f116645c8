//! Approval (golden file) testing.
//!
//! Render a value, or the trace of a function applied over argument
//! sequences, to canonical text. Store it as the *received* artifact and
//! compare it byte for byte with the *approved* artifact. A mismatch fails
//! the test and opens an external diff program on the pair; the human
//! promotes received to approved to accept a new baseline.
//!
//! # Quick Start
//!
//! ```no_run
//! // First run seeds an empty `fib.approved.txt` and passes.
//! approvals::verify(&vec![1i32, 1, 2, 3, 5], "fib").unwrap();
//! ```
//!
//! # Key Types
//!
//! - [`Approvals`] -- The engine, generic over store and diff launcher
//! - [`ApprovalsConfig`] -- Directory, diff program, launch switch
//! - [`Assertion`] -- How verdicts reach the test framework
//! - [`VerificationReport`] / [`PanicAssertion`] -- Ready-made collaborators
//! - [`Verification`] -- What one call found
//!
//! # Environment
//!
//! | Variable | Meaning |
//! |---|---|
//! | `LIB_APPROVALS_DIFF` | Diff program, run as `<program> <received> <approved>` |
//! | `LIB_APPROVALS_DIR` | Artifact directory (default `.`) |
//! | `LIB_APPROVALS_NO_DIFF` | `1`/`true`: fail mismatches without launching the diff |

pub mod assertion;
pub mod config;
pub mod engine;
pub mod error;

pub use assertion::{Assertion, AssertionRecord, PanicAssertion, VerificationReport};
pub use config::{ApprovalsConfig, DIRECTORY_ENV, NO_DIFF_ENV};
pub use engine::{Approvals, Verification};
pub use error::{ApprovalError, ApprovalResult};

pub use approvals_diff::{
    DiffLauncher, DiffToolConfig, ExternalDiffLauncher, LineDiff, NoopDiffLauncher,
    DIFF_PROGRAM_ENV,
};
pub use approvals_render::{
    render_via_display, ArgumentTrace, Displayed, DomainError, Failure, Render,
};
pub use approvals_store::{ApprovalStore, Comparison, FileApprovalStore, InMemoryApprovalStore};
pub use approvals_types::{ArtifactPaths, TestCaseId, VerificationOutcome};

/// Run `check` against an environment-configured engine and a fresh report,
/// panicking if the verdict was a failure. An error raised after the verdict
/// (the diff program) is part of the panic message.
fn with_report<F>(check: F) -> ApprovalResult<Verification>
where
    F: FnOnce(&Approvals, &mut VerificationReport) -> ApprovalResult<Verification>,
{
    let approvals = Approvals::from_env();
    let mut report = VerificationReport::new();
    let verification = check(&approvals, &mut report);
    if let (false, Err(err)) = (report.passed(), &verification) {
        panic!("{report}\n\n{err}");
    }
    report.assert_all_passed();
    verification
}

/// Verify `value` in the environment-configured directory.
///
/// Panics on a mismatch, after the diff program has run.
pub fn verify<T: Render + ?Sized>(value: &T, id: &str) -> ApprovalResult<Verification> {
    with_report(|approvals, report| approvals.verify(value, id, report))
}

/// Verify the trace of `f` over `xs`. Panics on a mismatch.
pub fn verify_all<X, R, F>(
    f: F,
    xs: impl IntoIterator<Item = X>,
    id: &str,
) -> ApprovalResult<Verification>
where
    X: Render,
    R: Render,
    F: FnMut(&X) -> Result<R, Failure>,
{
    with_report(|approvals, report| approvals.verify_all(f, xs, id, report))
}

/// Verify the trace of `f` over `xs × ys`. Panics on a mismatch.
pub fn verify_all2<X, Y, R, F>(
    f: F,
    xs: impl IntoIterator<Item = X>,
    ys: impl IntoIterator<Item = Y>,
    id: &str,
) -> ApprovalResult<Verification>
where
    X: Render,
    Y: Render,
    R: Render,
    F: FnMut(&X, &Y) -> Result<R, Failure>,
{
    with_report(|approvals, report| approvals.verify_all2(f, xs, ys, id, report))
}

/// Verify the trace of `f` over `xs × ys × zs`. Panics on a mismatch.
pub fn verify_all3<X, Y, Z, R, F>(
    f: F,
    xs: impl IntoIterator<Item = X>,
    ys: impl IntoIterator<Item = Y>,
    zs: impl IntoIterator<Item = Z>,
    id: &str,
) -> ApprovalResult<Verification>
where
    X: Render,
    Y: Render,
    Z: Render,
    R: Render,
    F: FnMut(&X, &Y, &Z) -> Result<R, Failure>,
{
    with_report(|approvals, report| approvals.verify_all3(f, xs, ys, zs, id, report))
}
