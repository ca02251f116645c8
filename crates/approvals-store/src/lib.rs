//! Artifact storage for approval testing.
//!
//! Every test case owns two text artifacts: the *received* artifact holding
//! the output of the latest run, and the *approved* artifact holding the
//! accepted baseline.
//!
//! # Protocol
//!
//! [`compare`] runs the seed-and-compare protocol against any
//! [`ApprovalStore`]:
//!
//! 1. Write the received artifact, unconditionally.
//! 2. Read the approved artifact. If it is missing, create it empty and
//!    report [`Comparison::Seeded`].
//! 3. Otherwise report [`Comparison::Matched`] iff both texts are equal byte
//!    for byte, else [`Comparison::Mismatched`].
//!
//! # Storage Backends
//!
//! - [`FileApprovalStore`] -- `<id>.received.txt` / `<id>.approved.txt` files
//!   in one directory
//! - [`InMemoryApprovalStore`] -- `BTreeMap`-based store for tests
//!
//! # Design Rules
//!
//! 1. The engine never writes non-empty text to an approved artifact; only
//!    [`ApprovalStore::accept`] (a human action) does.
//! 2. All I/O errors are propagated, never silently ignored.
//! 3. No locking: callers serialize verifications of the same test case.

pub mod compare;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use compare::{compare, Comparison};
pub use error::{StoreError, StoreResult};
pub use file::FileApprovalStore;
pub use memory::InMemoryApprovalStore;
pub use traits::ApprovalStore;
