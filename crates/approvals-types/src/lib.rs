//! Foundation types for approval testing.
//!
//! This crate provides the identity and artifact types shared by every other
//! approvals crate.
//!
//! # Key Types
//!
//! - [`TestCaseId`] -- Caller-owned name of a scenario
//! - [`ArtifactKind`] -- Received or approved artifact
//! - [`ArtifactPaths`] -- The on-disk pair derived from a [`TestCaseId`]
//! - [`VerificationOutcome`] -- Passed or failed

pub mod artifact;
pub mod error;
pub mod id;
pub mod outcome;

pub use artifact::{ArtifactKind, ArtifactPaths};
pub use error::TypeError;
pub use id::TestCaseId;
pub use outcome::VerificationOutcome;
