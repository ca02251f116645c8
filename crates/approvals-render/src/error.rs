//! Error types for trace building.

use std::fmt;

/// Marker for the one class of errors a function under test may raise and
/// still produce a trace line.
///
/// Implement it for the error type your function returns for invalid input:
///
/// ```
/// use approvals_render::DomainError;
///
/// #[derive(Debug)]
/// struct NegativeInput(f64);
///
/// impl std::fmt::Display for NegativeInput {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "negative input: {}", self.0)
///     }
/// }
///
/// impl std::error::Error for NegativeInput {}
/// impl DomainError for NegativeInput {}
/// ```
///
/// Such errors convert into [`Failure::Domain`] with `?` and their `Display`
/// text takes the place of the result.
pub trait DomainError: std::error::Error {}

/// Why a function under test produced no result.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// Recoverable failure for this input. Rendered inline.
    #[error("{0}")]
    Domain(String),

    /// Anything else. Aborts the whole trace.
    #[error(transparent)]
    Fatal(Box<dyn std::error::Error + Send + Sync>),
}

impl Failure {
    /// A domain failure carrying `message` as its trace text.
    pub fn domain(message: impl fmt::Display) -> Self {
        Self::Domain(message.to_string())
    }

    /// A failure that is not part of the trace and propagates out of it.
    pub fn fatal(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Fatal(error.into())
    }

    /// Returns `true` for failures that are rendered inline.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

impl<E: DomainError> From<E> for Failure {
    fn from(error: E) -> Self {
        Self::Domain(error.to_string())
    }
}

/// Errors that abort trace building.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The function under test returned [`Failure::Fatal`].
    #[error("invocation ({arguments}) aborted: {source}")]
    Aborted {
        /// Comma-joined argument text of the failing combination.
        arguments: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Convenience alias for trace results.
pub type TraceResult<T> = Result<T, TraceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct OutOfRange;

    impl fmt::Display for OutOfRange {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "out of range")
        }
    }

    impl std::error::Error for OutOfRange {}
    impl DomainError for OutOfRange {}

    fn checked(x: i32) -> Result<i32, Failure> {
        let parsed: Result<i32, OutOfRange> = if x < 0 { Err(OutOfRange) } else { Ok(x) };
        Ok(parsed?)
    }

    #[test]
    fn domain_errors_convert_with_question_mark() {
        let failure = checked(-1).unwrap_err();
        assert!(failure.is_domain());
        assert_eq!(failure.to_string(), "out of range");
    }

    #[test]
    fn fatal_keeps_message() {
        let failure = Failure::fatal("disk on fire");
        assert!(!failure.is_domain());
        assert_eq!(failure.to_string(), "disk on fire");
    }

    #[test]
    fn aborted_display_names_arguments() {
        let err = TraceError::Aborted {
            arguments: "1, 2".into(),
            source: "boom".into(),
        };
        assert_eq!(err.to_string(), "invocation (1, 2) aborted: boom");
    }
}
