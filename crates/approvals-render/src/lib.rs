//! Canonical text rendering for approval testing.
//!
//! Everything that gets verified is first turned into *canonical text*: the
//! one deterministic string form of a value. Rendering the same logical input
//! twice yields byte-identical text; no addresses, no timestamps.
//!
//! # Key Types
//!
//! - [`Render`] -- The to-text capability, implemented for scalars,
//!   sequences, sets and mappings
//! - [`Displayed`] / [`render_via_display!`] -- Opt a `Display` type in
//! - [`ArgumentTrace`] -- Results of applying a function over the Cartesian
//!   product of up to three argument sequences
//! - [`Failure`] / [`DomainError`] -- What a function under test may return
//!   instead of a result
//!
//! # Line Formats
//!
//! ```text
//! sequence / set   <index> = <element>
//! mapping          <key> = <value>
//! trace            <arg1>, <arg2>, <arg3> = <result or failure message>
//! ```
//!
//! Every line ends in a single `\n`; an empty input renders to `""`.
//!
//! # Ordering
//!
//! Collections render in their own iteration order. `BTreeSet`/`BTreeMap`
//! are value-ordered and therefore deterministic; `HashSet`/`HashMap` render
//! in hash order, which can change between runs. No sort is imposed.

pub mod error;
pub mod number;
pub mod render;
pub mod trace;

pub use error::{DomainError, Failure, TraceError, TraceResult};
pub use number::format_general;
pub use render::{render_mapping, render_sequence, Displayed, Render};
pub use trace::{trace1, trace2, trace3, ArgumentTrace, TraceEntry};
