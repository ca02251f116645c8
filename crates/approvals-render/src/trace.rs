//! Function-application traces over argument sequences.
//!
//! A trace applies a function to every combination of elements drawn from one
//! to three sequences. The leftmost sequence is the outermost loop, so for
//! `xs = [0, 1]` and `ys = [0, 1]` the combinations are visited as
//! `(0, 0), (0, 1), (1, 0), (1, 1)`.
//!
//! Each invocation either yields a result, a [`Failure::Domain`] whose message
//! is recorded in place of the result, or a [`Failure::Fatal`] which aborts the
//! trace with [`TraceError::Aborted`].

use tracing::debug;

use crate::error::{Failure, TraceError, TraceResult};
use crate::render::Render;

/// One invocation of the function under test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// Canonical text of each argument, in parameter order.
    pub arguments: Vec<String>,
    /// Canonical text of the result, or the domain failure message.
    pub result: Result<String, String>,
}

impl TraceEntry {
    /// Arguments joined with `", "`.
    pub fn argument_text(&self) -> String {
        self.arguments.join(", ")
    }

    /// Returns `true` if the invocation produced a result.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl Render for TraceEntry {
    fn render_into(&self, out: &mut String) {
        out.push_str(&self.argument_text());
        out.push_str(" = ");
        match &self.result {
            Ok(text) | Err(text) => out.push_str(text),
        }
        out.push('\n');
    }
}

/// Ordered record of every invocation in a trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgumentTrace {
    entries: Vec<TraceEntry>,
}

impl ArgumentTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of invocations that ended in a domain failure.
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_ok()).count()
    }

    /// Record one invocation.
    ///
    /// Domain failures become entries; fatal failures abort.
    fn record<R: Render>(
        &mut self,
        arguments: Vec<String>,
        outcome: Result<R, Failure>,
    ) -> TraceResult<()> {
        let result = match outcome {
            Ok(value) => Ok(value.render()),
            Err(Failure::Domain(message)) => Err(message),
            Err(Failure::Fatal(source)) => {
                return Err(TraceError::Aborted {
                    arguments: arguments.join(", "),
                    source,
                });
            }
        };
        self.entries.push(TraceEntry { arguments, result });
        Ok(())
    }
}

impl Render for ArgumentTrace {
    fn render_into(&self, out: &mut String) {
        for entry in &self.entries {
            entry.render_into(out);
        }
    }
}

impl<'a> IntoIterator for &'a ArgumentTrace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Apply `f` to every element of `xs`.
pub fn trace1<A, R, F>(mut f: F, xs: impl IntoIterator<Item = A>) -> TraceResult<ArgumentTrace>
where
    A: Render,
    R: Render,
    F: FnMut(&A) -> Result<R, Failure>,
{
    let mut trace = ArgumentTrace::new();
    for x in xs {
        trace.record(vec![x.render()], f(&x))?;
    }
    debug!(arity = 1, entries = trace.len(), "trace built");
    Ok(trace)
}

/// Apply `f` to every pair drawn from `xs` and `ys`, `xs` outermost.
pub fn trace2<A, B, R, F>(
    mut f: F,
    xs: impl IntoIterator<Item = A>,
    ys: impl IntoIterator<Item = B>,
) -> TraceResult<ArgumentTrace>
where
    A: Render,
    B: Render,
    R: Render,
    F: FnMut(&A, &B) -> Result<R, Failure>,
{
    let ys: Vec<B> = ys.into_iter().collect();
    let mut trace = ArgumentTrace::new();
    for x in xs {
        for y in &ys {
            trace.record(vec![x.render(), y.render()], f(&x, y))?;
        }
    }
    debug!(arity = 2, entries = trace.len(), "trace built");
    Ok(trace)
}

/// Apply `f` to every triple drawn from `xs`, `ys` and `zs`, `xs` outermost
/// and `zs` innermost.
pub fn trace3<A, B, C, R, F>(
    mut f: F,
    xs: impl IntoIterator<Item = A>,
    ys: impl IntoIterator<Item = B>,
    zs: impl IntoIterator<Item = C>,
) -> TraceResult<ArgumentTrace>
where
    A: Render,
    B: Render,
    C: Render,
    R: Render,
    F: FnMut(&A, &B, &C) -> Result<R, Failure>,
{
    let ys: Vec<B> = ys.into_iter().collect();
    let zs: Vec<C> = zs.into_iter().collect();
    let mut trace = ArgumentTrace::new();
    for x in xs {
        for y in &ys {
            for z in &zs {
                trace.record(vec![x.render(), y.render(), z.render()], f(&x, y, z))?;
            }
        }
    }
    debug!(arity = 3, entries = trace.len(), "trace built");
    Ok(trace)
}
