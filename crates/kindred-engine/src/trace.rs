//! Evaluation traces.
//!
//! The expression evaluator is generic over a [`TraceMode`]. Under
//! [`NoTrace`] the step log is a zero-sized no-op and the closures that would
//! resolve names for a [`TraceEvent`] are never run; under [`WithTrace`] every
//! evaluated node leaves one event behind.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// One evaluated node. Events are emitted in post-order (operands first);
/// `depth` is the node's distance from the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub depth: usize,
    pub step: String,
    pub people: BTreeSet<String>,
}

/// Compile-time switch for whether evaluation records [`TraceEvent`]s.
pub trait TraceMode {
    /// What an evaluation leaves behind: the events, or nothing.
    type Events: Default + fmt::Debug;

    fn push(events: &mut Self::Events, event: impl FnOnce() -> TraceEvent);
}

#[derive(Debug)]
pub enum NoTrace {}

impl TraceMode for NoTrace {
    type Events = ();

    #[inline]
    fn push(_events: &mut (), _event: impl FnOnce() -> TraceEvent) {}
}

#[derive(Debug)]
pub enum WithTrace {}

impl TraceMode for WithTrace {
    type Events = Vec<TraceEvent>;

    #[inline]
    fn push(events: &mut Vec<TraceEvent>, event: impl FnOnce() -> TraceEvent) {
        events.push(event());
    }
}

/// A result together with the events recorded while computing it.
#[derive(Debug)]
pub struct Traced<M: TraceMode, V> {
    pub value: V,
    pub trace: M::Events,
}

/// Tracks nesting depth while an expression tree is walked.
///
/// Call [`StepLog::enter`] before evaluating a node's operands and
/// [`StepLog::leave`] once the node's own result is known.
#[derive(Debug)]
pub struct StepLog<M: TraceMode> {
    depth: usize,
    events: M::Events,
}

impl<M: TraceMode> StepLog<M> {
    pub fn new() -> Self {
        Self {
            depth: 0,
            events: M::Events::default(),
        }
    }

    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Close the innermost open node. `describe` yields its label and people.
    pub fn leave(&mut self, describe: impl FnOnce() -> (String, BTreeSet<String>)) {
        self.depth = self.depth.saturating_sub(1);
        let depth = self.depth;
        M::push(&mut self.events, || {
            let (step, people) = describe();
            TraceEvent {
                depth,
                step,
                people,
            }
        });
    }

    pub fn finish<V>(self, value: V) -> Traced<M, V> {
        Traced {
            value,
            trace: self.events,
        }
    }
}

impl<M: TraceMode> Default for StepLog<M> {
    fn default() -> Self {
        Self::new()
    }
}
