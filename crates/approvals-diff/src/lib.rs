//! Diff display for approval testing.
//!
//! Pass/fail is decided by exact text equality elsewhere. This crate only
//! *shows* differences: it launches an external comparison program on the
//! received/approved pair, and computes a line diff for failure messages.
//!
//! # Key Types
//!
//! - [`DiffToolConfig`] -- Resolves the diff program (`LIB_APPROVALS_DIFF`)
//! - [`DiffLauncher`] / [`ExternalDiffLauncher`] -- Run the program on two files
//! - [`LineDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level text diff

pub mod config;
pub mod error;
pub mod launcher;
pub mod line_diff;

pub use config::{DiffToolConfig, DIFF_PROGRAM_ENV};
pub use error::{DiffError, DiffResult};
pub use launcher::{DiffLauncher, ExternalDiffLauncher, NoopDiffLauncher};
pub use line_diff::{diff_lines, DiffHunk, DiffLine, LineDiff};
