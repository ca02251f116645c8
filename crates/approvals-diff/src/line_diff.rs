//! Line-by-line diff of an approved and a received text.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce hunks with
//! context lines. The result is only ever displayed; it never decides whether
//! a verification passes.

use std::fmt::Write as _;

use similar::{ChangeTag, TextDiff};

/// Context lines kept around each change.
const CONTEXT_LINES: usize = 3;

/// The result of diffing approved text against received text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDiff {
    /// The diff hunks.
    pub hunks: Vec<DiffHunk>,
    /// Total number of lines in the approved text.
    pub approved_lines: usize,
    /// Total number of lines in the received text.
    pub received_lines: usize,
}

impl LineDiff {
    /// Returns `true` if the texts have identical lines.
    ///
    /// Texts that differ only in a missing trailing newline compare equal
    /// here, though not byte for byte.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Lines present in the received text only.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Lines present in the approved text only.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    /// One-line summary, e.g. `+2 -1 lines`.
    pub fn summary(&self) -> String {
        format!("+{} -{} lines", self.additions(), self.deletions())
    }

    /// Render as a unified diff with `--- approved` / `+++ received` headers.
    pub fn to_unified(&self) -> String {
        let mut out = String::from("--- approved\n+++ received\n");
        for hunk in &self.hunks {
            let _ = writeln!(
                out,
                "@@ -{},{} +{},{} @@",
                hunk.approved_start, hunk.approved_count, hunk.received_start, hunk.received_count
            );
            for line in &hunk.lines {
                let (marker, text) = match line {
                    DiffLine::Context(t) => (' ', t),
                    DiffLine::Added(t) => ('+', t),
                    DiffLine::Removed(t) => ('-', t),
                };
                let _ = writeln!(out, "{marker}{text}");
            }
        }
        out
    }
}

/// A contiguous region of changes in a diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// Line number in the approved text where this hunk starts (1-based).
    pub approved_start: usize,
    /// Number of approved lines in this hunk.
    pub approved_count: usize,
    /// Line number in the received text where this hunk starts (1-based).
    pub received_start: usize,
    /// Number of received lines in this hunk.
    pub received_count: usize,
    /// The individual diff lines in this hunk.
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// A line present in both texts.
    Context(String),
    /// A line only in the received text.
    Added(String),
    /// A line only in the approved text.
    Removed(String),
}

/// Compute a line diff from `approved` to `received`.
pub fn diff_lines(approved: &str, received: &str) -> LineDiff {
    let approved_lines = approved.lines().count();
    let received_lines = received.lines().count();

    if approved == received {
        return LineDiff {
            hunks: Vec::new(),
            approved_lines,
            received_lines,
        };
    }

    let text_diff = TextDiff::from_lines(approved, received);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let Some(first) = group.first() else {
            continue;
        };
        let mut hunk = DiffHunk {
            approved_start: first.old_range().start + 1,
            approved_count: 0,
            received_start: first.new_range().start + 1,
            received_count: 0,
            lines: Vec::new(),
        };

        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        hunk.lines.push(DiffLine::Context(text));
                        hunk.approved_count += 1;
                        hunk.received_count += 1;
                    }
                    ChangeTag::Delete => {
                        hunk.lines.push(DiffLine::Removed(text));
                        hunk.approved_count += 1;
                    }
                    ChangeTag::Insert => {
                        hunk.lines.push(DiffLine::Added(text));
                        hunk.received_count += 1;
                    }
                }
            }
        }

        hunks.push(hunk);
    }

    LineDiff {
        hunks,
        approved_lines,
        received_lines,
    }
}
