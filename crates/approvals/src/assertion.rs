//! The boolean-assertion collaborator that turns outcomes into test verdicts.

use std::fmt;

/// Receives the verdict of every verification.
///
/// This is the only capability the engine needs from a test framework.
pub trait Assertion {
    /// Record `condition`; `false` fails the current test.
    fn assert_true(&mut self, condition: bool, message: &str);

    /// Whether a failed assertion unwinds immediately.
    ///
    /// The engine shows the diff before calling an aborting collaborator.
    fn aborts(&self) -> bool {
        false
    }
}

impl<A: Assertion + ?Sized> Assertion for &mut A {
    fn assert_true(&mut self, condition: bool, message: &str) {
        (**self).assert_true(condition, message);
    }

    fn aborts(&self) -> bool {
        (**self).aborts()
    }
}

/// Panics on the first failed assertion, like `assert!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicAssertion;

impl Assertion for PanicAssertion {
    fn assert_true(&mut self, condition: bool, message: &str) {
        assert!(condition, "{message}");
    }

    fn aborts(&self) -> bool {
        true
    }
}

/// One recorded assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssertionRecord {
    pub passed: bool,
    pub message: String,
}

/// Collects every assertion so results can be inspected after the fact.
#[derive(Clone, Debug, Default)]
pub struct VerificationReport {
    records: Vec<AssertionRecord>,
}

impl VerificationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no recorded assertion failed.
    pub fn passed(&self) -> bool {
        self.records.iter().all(|r| r.passed)
    }

    /// Messages of the failed assertions, in recording order.
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.message.as_str())
    }

    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append every record of `other`.
    pub fn merge(&mut self, other: VerificationReport) {
        self.records.extend(other.records);
    }

    /// Panic with every failure message if any assertion failed.
    pub fn assert_all_passed(&self) {
        if !self.passed() {
            panic!("{self}");
        }
    }
}

impl Assertion for VerificationReport {
    fn assert_true(&mut self, condition: bool, message: &str) {
        self.records.push(AssertionRecord {
            passed: condition,
            message: message.to_string(),
        });
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failures().count();
        write!(f, "{failed} of {} verification(s) failed", self.len())?;
        for message in self.failures() {
            write!(f, "\n\n{message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_passes() {
        let report = VerificationReport::new();
        assert!(report.passed());
        assert!(report.is_empty());
        report.assert_all_passed();
    }

    #[test]
    fn records_in_order() {
        let mut report = VerificationReport::new();
        report.assert_true(true, "first");
        report.assert_true(false, "second");
        report.assert_true(false, "third");

        assert_eq!(report.len(), 3);
        assert!(!report.passed());
        assert_eq!(report.failures().collect::<Vec<_>>(), ["second", "third"]);
        assert_eq!(report.to_string(), "2 of 3 verification(s) failed\n\nsecond\n\nthird");
    }

    #[test]
    #[should_panic(expected = "1 of 1 verification(s) failed")]
    fn assert_all_passed_panics_on_failure() {
        let mut report = VerificationReport::new();
        report.assert_true(false, "mismatch");
        report.assert_all_passed();
    }

    #[test]
    fn merge_appends() {
        let mut a = VerificationReport::new();
        a.assert_true(true, "a");
        let mut b = VerificationReport::new();
        b.assert_true(false, "b");
        a.merge(b);
        assert_eq!(a.len(), 2);
        assert!(!a.passed());
    }

    #[test]
    fn panic_assertion_passes_silently() {
        let mut assertion = PanicAssertion;
        assertion.assert_true(true, "fine");
        assert!(assertion.aborts());
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn panic_assertion_panics() {
        PanicAssertion.assert_true(false, "boom");
    }

    #[test]
    fn mutable_reference_forwards() {
        fn fail_once<A: Assertion>(mut assertion: A) -> bool {
            assertion.assert_true(false, "via reference");
            assertion.aborts()
        }

        let mut report = VerificationReport::new();
        assert!(!fail_once(&mut report));
        assert_eq!(report.len(), 1);
    }
}
