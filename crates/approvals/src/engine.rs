//! The verification engine: render, compare, report, then show the diff.

use approvals_diff::{diff_lines, DiffLauncher, ExternalDiffLauncher, LineDiff, NoopDiffLauncher};
use approvals_render::{trace1, trace2, trace3, Failure, Render};
use approvals_store::{compare, ApprovalStore, Comparison, FileApprovalStore};
use approvals_types::{ArtifactPaths, TestCaseId, VerificationOutcome};
use tracing::{debug, info, warn};

use crate::assertion::Assertion;
use crate::config::ApprovalsConfig;
use crate::error::ApprovalResult;

/// What one verification call found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verification {
    pub id: TestCaseId,
    pub outcome: VerificationOutcome,
    pub comparison: Comparison,
    pub paths: ArtifactPaths,
    /// Line diff against the baseline, present only on a mismatch.
    pub diff: Option<LineDiff>,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.outcome.is_passed()
    }

    /// The message handed to the assertion collaborator.
    pub fn message(&self) -> String {
        match &self.comparison {
            Comparison::Seeded => format!(
                "{}: seeded empty baseline {}",
                self.id,
                self.paths.approved.display()
            ),
            Comparison::Matched => format!("{}: received matches approved", self.id),
            Comparison::Mismatched { .. } => {
                let mut message = format!(
                    "{}: received differs from approved\n  received: {}\n  approved: {}",
                    self.id,
                    self.paths.received.display(),
                    self.paths.approved.display()
                );
                if let Some(diff) = &self.diff {
                    message.push_str(&format!(" ({})\n{}", diff.summary(), diff.to_unified()));
                }
                message
            }
        }
    }
}

/// Approval-testing engine over a store and a diff launcher.
///
/// Each `verify*` call writes the received artifact, compares it with the
/// approved one, reports the verdict through the [`Assertion`] collaborator,
/// and on a mismatch launches the diff program. Diff launch failures are
/// returned as errors after the verdict has been reported.
pub struct Approvals<S = FileApprovalStore, L = ExternalDiffLauncher> {
    store: S,
    launcher: L,
    launch_diff: bool,
}

impl Approvals {
    /// File-backed engine built from `config`.
    pub fn new(config: ApprovalsConfig) -> Self {
        info!(
            directory = %config.directory.display(),
            launch_diff = config.launch_diff,
            "approvals engine configured"
        );
        Self {
            launcher: ExternalDiffLauncher::new(config.diff_tool()),
            store: FileApprovalStore::new(config.directory),
            launch_diff: config.launch_diff,
        }
    }

    /// File-backed engine configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(ApprovalsConfig::from_env())
    }
}

impl Default for Approvals {
    fn default() -> Self {
        Self::new(ApprovalsConfig::default())
    }
}

impl<S: ApprovalStore> Approvals<S, ExternalDiffLauncher> {
    /// Select the diff program programmatically.
    pub fn set_diff_program(&mut self, program: impl Into<std::path::PathBuf>) {
        self.launcher.set_program(program);
    }
}

impl<S: ApprovalStore> Approvals<S, NoopDiffLauncher> {
    /// Engine that never shows a diff.
    pub fn without_diff(store: S) -> Self {
        Self::with_parts(store, NoopDiffLauncher)
    }
}

impl<S: ApprovalStore, L: DiffLauncher> Approvals<S, L> {
    pub fn with_parts(store: S, launcher: L) -> Self {
        Self {
            store,
            launcher,
            launch_diff: true,
        }
    }

    /// Keep failing on mismatches but stop launching the diff program.
    pub fn set_launch_diff(&mut self, launch: bool) {
        self.launch_diff = launch;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Verify the canonical text of `value`.
    pub fn verify<T, A>(
        &self,
        value: &T,
        id: impl AsRef<str>,
        assertion: &mut A,
    ) -> ApprovalResult<Verification>
    where
        T: Render + ?Sized,
        A: Assertion + ?Sized,
    {
        let id = TestCaseId::new(id.as_ref())?;
        self.verify_text(&value.render(), id, assertion)
    }

    /// Verify the trace of `f` over `xs`.
    pub fn verify_all<X, R, F, A>(
        &self,
        f: F,
        xs: impl IntoIterator<Item = X>,
        id: impl AsRef<str>,
        assertion: &mut A,
    ) -> ApprovalResult<Verification>
    where
        X: Render,
        R: Render,
        F: FnMut(&X) -> Result<R, Failure>,
        A: Assertion + ?Sized,
    {
        let id = TestCaseId::new(id.as_ref())?;
        let trace = trace1(f, xs)?;
        self.verify_text(&trace.render(), id, assertion)
    }

    /// Verify the trace of `f` over every pair from `xs` and `ys`.
    pub fn verify_all2<X, Y, R, F, A>(
        &self,
        f: F,
        xs: impl IntoIterator<Item = X>,
        ys: impl IntoIterator<Item = Y>,
        id: impl AsRef<str>,
        assertion: &mut A,
    ) -> ApprovalResult<Verification>
    where
        X: Render,
        Y: Render,
        R: Render,
        F: FnMut(&X, &Y) -> Result<R, Failure>,
        A: Assertion + ?Sized,
    {
        let id = TestCaseId::new(id.as_ref())?;
        let trace = trace2(f, xs, ys)?;
        self.verify_text(&trace.render(), id, assertion)
    }

    /// Verify the trace of `f` over every triple from `xs`, `ys` and `zs`.
    pub fn verify_all3<X, Y, Z, R, F, A>(
        &self,
        f: F,
        xs: impl IntoIterator<Item = X>,
        ys: impl IntoIterator<Item = Y>,
        zs: impl IntoIterator<Item = Z>,
        id: impl AsRef<str>,
        assertion: &mut A,
    ) -> ApprovalResult<Verification>
    where
        X: Render,
        Y: Render,
        Z: Render,
        R: Render,
        F: FnMut(&X, &Y, &Z) -> Result<R, Failure>,
        A: Assertion + ?Sized,
    {
        let id = TestCaseId::new(id.as_ref())?;
        let trace = trace3(f, xs, ys, zs)?;
        self.verify_text(&trace.render(), id, assertion)
    }

    /// Verify already-rendered text.
    pub fn verify_text<A>(
        &self,
        received: &str,
        id: TestCaseId,
        assertion: &mut A,
    ) -> ApprovalResult<Verification>
    where
        A: Assertion + ?Sized,
    {
        let comparison = compare(&self.store, &id, received)?;
        let diff = match &comparison {
            Comparison::Mismatched { approved } => Some(diff_lines(approved, received)),
            Comparison::Seeded | Comparison::Matched => None,
        };
        let verification = Verification {
            paths: self.store.paths(&id),
            outcome: comparison.outcome(),
            id,
            comparison,
            diff,
        };

        if let Some(diff) = &verification.diff {
            warn!(id = %verification.id, summary = %diff.summary(), "approval mismatch");
        } else {
            debug!(id = %verification.id, seeded = verification.comparison.is_seeded(), "approval passed");
        }

        // An aborting collaborator never returns on failure, so the diff
        // has to be up before the verdict.
        let early_launch = (!verification.passed() && assertion.aborts())
            .then(|| self.show_diff(&verification.paths));
        let mut message = verification.message();
        if let Some(Err(err)) = &early_launch {
            message.push_str(&format!("\n{err}"));
        }
        assertion.assert_true(verification.passed(), &message);

        match early_launch {
            Some(launched) => launched?,
            None if !verification.passed() => self.show_diff(&verification.paths)?,
            None => {}
        }
        Ok(verification)
    }

    fn show_diff(&self, paths: &ArtifactPaths) -> ApprovalResult<()> {
        if !self.launch_diff {
            debug!(received = %paths.received.display(), "diff launch disabled");
            return Ok(());
        }
        self.launcher
            .launch(&paths.received, &paths.approved)
            .map_err(|e| {
                warn!(error = %e, "diff program failed");
                e.into()
            })
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use approvals_diff::{DiffError, DiffResult};
    use approvals_store::InMemoryApprovalStore;

    use super::*;
    use crate::assertion::{PanicAssertion, VerificationReport};
    use crate::error::ApprovalError;

    #[derive(Default)]
    struct RecordingLauncher {
        calls: Mutex<Vec<(PathBuf, PathBuf)>>,
        fail: bool,
    }

    impl RecordingLauncher {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DiffLauncher for RecordingLauncher {
        fn launch(&self, received: &Path, approved: &Path) -> DiffResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((received.to_path_buf(), approved.to_path_buf()));
            if self.fail {
                return Err(DiffError::ExitStatus {
                    program: PathBuf::from("recording"),
                    code: Some(1),
                });
            }
            Ok(())
        }
    }

    fn engine() -> Approvals<InMemoryApprovalStore, RecordingLauncher> {
        Approvals::with_parts(InMemoryApprovalStore::new(), RecordingLauncher::default())
    }

    fn id(name: &str) -> TestCaseId {
        TestCaseId::new(name).unwrap()
    }

    #[test]
    fn first_run_seeds_and_passes_without_diff() {
        let approvals = engine();
        let mut report = VerificationReport::new();

        let verification = approvals.verify(&13i32, "test.int", &mut report).unwrap();
        assert!(verification.passed());
        assert!(verification.comparison.is_seeded());
        assert!(report.passed());
        assert!(approvals.launcher().calls().is_empty());

        let store = approvals.store();
        assert_eq!(store.read_received(&id("test.int")).unwrap().as_deref(), Some("13"));
        assert_eq!(store.read_approved(&id("test.int")).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn match_passes_without_diff() {
        let approvals = engine();
        approvals
            .store()
            .set_approved(&id("test.vec"), "0 = 13\n1 = 15\n2 = -1\n")
            .unwrap();
        let mut report = VerificationReport::new();

        approvals
            .verify(&vec![13i32, 15, -1], "test.vec", &mut report)
            .unwrap();
        assert!(report.passed());
        assert!(approvals.launcher().calls().is_empty());
    }

    #[test]
    fn mismatch_fails_and_launches_diff_once() {
        let approvals = engine();
        approvals.store().set_approved(&id("test.value"), "5").unwrap();
        let mut report = VerificationReport::new();

        let verification = approvals.verify(&6i32, "test.value", &mut report).unwrap();
        assert!(!verification.passed());
        assert!(!report.passed());
        assert_eq!(verification.diff.as_ref().unwrap().summary(), "+1 -1 lines");

        let calls = approvals.launcher().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from("./test.value.received.txt"));
        assert_eq!(calls[0].1, PathBuf::from("./test.value.approved.txt"));
    }

    #[test]
    fn failure_message_carries_unified_diff() {
        let approvals = engine();
        approvals.store().set_approved(&id("test.msg"), "a\nb\n").unwrap();
        let mut report = VerificationReport::new();

        approvals
            .verify_text("a\nc\n", id("test.msg"), &mut report)
            .unwrap();
        let message = report.failures().next().unwrap();
        assert!(message.starts_with("test.msg: received differs from approved"));
        assert!(message.contains("-b\n+c\n"));
    }

    #[test]
    fn diff_error_follows_recorded_failure() {
        let approvals =
            Approvals::with_parts(InMemoryApprovalStore::new(), RecordingLauncher::failing());
        approvals.store().set_approved(&id("test.err"), "5").unwrap();
        let mut report = VerificationReport::new();

        let err = approvals.verify(&6i32, "test.err", &mut report).unwrap_err();
        assert!(matches!(err, ApprovalError::Diff(DiffError::ExitStatus { .. })));
        assert_eq!(report.len(), 1);
        assert!(!report.passed());
    }

    #[test]
    fn unconfigured_diff_program_is_reported() {
        let approvals =
            Approvals::with_parts(InMemoryApprovalStore::new(), ExternalDiffLauncher::default());
        approvals.store().set_approved(&id("test.unset"), "5").unwrap();
        let mut report = VerificationReport::new();

        let err = approvals.verify(&6i32, "test.unset", &mut report).unwrap_err();
        assert!(matches!(
            err,
            ApprovalError::Diff(DiffError::NotConfigured { env: "LIB_APPROVALS_DIFF" })
        ));
        assert!(!report.passed());
    }

    #[test]
    fn unconfigured_diff_program_is_silent_on_match() {
        let approvals =
            Approvals::with_parts(InMemoryApprovalStore::new(), ExternalDiffLauncher::default());
        approvals.store().set_approved(&id("test.same"), "5").unwrap();
        let mut report = VerificationReport::new();

        approvals.verify(&5i32, "test.same", &mut report).unwrap();
        assert!(report.passed());
    }

    #[test]
    fn aborting_assertion_message_names_diff_error() {
        let approvals =
            Approvals::with_parts(InMemoryApprovalStore::new(), ExternalDiffLauncher::default());
        approvals.store().set_approved(&id("test.abort.unset"), "5").unwrap();

        let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            approvals.verify(&6i32, "test.abort.unset", &mut PanicAssertion)
        }))
        .unwrap_err();
        let message = panicked.downcast_ref::<String>().unwrap();
        assert!(message.contains("received differs from approved"));
        assert!(message.contains("LIB_APPROVALS_DIFF"));
    }

    #[test]
    fn disabled_launch_still_fails() {
        let mut approvals = engine();
        approvals.set_launch_diff(false);
        approvals.store().set_approved(&id("test.quiet"), "5").unwrap();
        let mut report = VerificationReport::new();

        let verification = approvals.verify(&6i32, "test.quiet", &mut report).unwrap();
        assert!(!verification.passed());
        assert!(approvals.launcher().calls().is_empty());
    }

    #[test]
    fn aborting_assertion_sees_diff_first() {
        let approvals = engine();
        approvals.store().set_approved(&id("test.abort"), "5").unwrap();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            approvals.verify(&6i32, "test.abort", &mut PanicAssertion)
        }));
        assert!(outcome.is_err());
        assert_eq!(approvals.launcher().calls().len(), 1);
    }

    #[test]
    fn trace_with_domain_failure() {
        let approvals = engine();
        let mut report = VerificationReport::new();

        approvals
            .verify_all(
                |x: &f64| {
                    if *x < 0.0 {
                        Err(Failure::domain("negative input"))
                    } else {
                        Ok(x.sqrt())
                    }
                },
                [4.0f64, -1.0],
                "test.sqrt",
                &mut report,
            )
            .unwrap();
        assert_eq!(
            approvals.store().read_received(&id("test.sqrt")).unwrap().as_deref(),
            Some("4 = 2\n-1 = negative input\n")
        );
    }

    #[test]
    fn fatal_failure_aborts_before_writing() {
        let approvals = engine();
        let mut report = VerificationReport::new();

        let err = approvals
            .verify_all(
                |_: &i32| -> Result<i32, Failure> { Err(Failure::fatal("disk on fire")) },
                [1i32],
                "test.fatal",
                &mut report,
            )
            .unwrap_err();
        assert!(matches!(err, ApprovalError::Trace(_)));
        assert!(report.is_empty());
        assert!(approvals.store().is_empty().unwrap());
    }

    #[test]
    fn two_and_three_argument_traces() {
        let approvals = engine();
        let mut report = VerificationReport::new();

        approvals
            .verify_all2(
                |a: &i32, b: &i32| Ok::<_, Failure>(a * b),
                [1i32, 2],
                [10i32, 20],
                "test.product",
                &mut report,
            )
            .unwrap();
        approvals
            .verify_all3(
                |a: &&str, b: &&str, c: &&str| Ok::<_, Failure>(format!("{a}{b}{c}")),
                ["a"],
                ["b", "c"],
                ["d"],
                "test.concat",
                &mut report,
            )
            .unwrap();

        let store = approvals.store();
        assert_eq!(
            store.read_received(&id("test.product")).unwrap().as_deref(),
            Some("1, 10 = 10\n1, 20 = 20\n2, 10 = 20\n2, 20 = 40\n")
        );
        assert_eq!(
            store.read_received(&id("test.concat")).unwrap().as_deref(),
            Some("a, b, d = abd\na, c, d = acd\n")
        );
    }

    #[test]
    fn invalid_id_is_an_error() {
        let approvals = engine();
        let mut report = VerificationReport::new();
        let err = approvals.verify(&1i32, "", &mut report).unwrap_err();
        assert!(matches!(err, ApprovalError::Type(_)));
        assert!(report.is_empty());
    }
}
