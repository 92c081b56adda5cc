//! Composite behavior nodes.
//!
//! Composites own an ordered set of children and a cursor that survives
//! across ticks within one activation. This module provides the fixed-order
//! family: [`Sequence`] (AND logic), [`Selector`] (OR logic), and
//! [`SelectorWithFail`] (OR logic with an exhaustion check). The randomized
//! variants in [`crate::random`] reuse the same dispatch.

use crate::node::{Behavior, Node, NodeState};
use crate::Status;

/// Runs the child at the cursor, chaining successive successes within the
/// same tick.
///
/// An explicit loop rather than recursive re-entry: a chain of
/// instantaneously succeeding children is consumed in one call without
/// growing the stack.
pub(crate) fn tick_sequence<C>(
    children: &mut [Node<C>],
    cursor: &mut usize,
    ctx: &mut C,
) -> Status {
    if children.is_empty() {
        return Status::Failure;
    }
    loop {
        match children[*cursor].tick(ctx) {
            Status::Failure => return Status::Failure,
            Status::Running => return Status::Running,
            Status::Success => {
                *cursor += 1;
                if *cursor >= children.len() {
                    return Status::Success;
                }
            }
            // Unknown/NotRun from externally authored leaves pass through.
            other => return other,
        }
    }
}

/// Runs the child at the cursor, advancing past failures one tick at a time.
///
/// `bounded` selects between the two selector kinds: the plain selector
/// indexes past the end once every child has failed (a programmer-error
/// panic), the bounded one reports `Failure` instead.
pub(crate) fn tick_selector<C>(
    children: &mut [Node<C>],
    cursor: &mut usize,
    bounded: bool,
    ctx: &mut C,
) -> Status {
    if children.is_empty() {
        return Status::Failure;
    }
    if bounded && *cursor >= children.len() {
        return Status::Failure;
    }
    match children[*cursor].tick(ctx) {
        Status::Success => Status::Success,
        Status::Failure => {
            // Try the next child on the next tick; no fallthrough within
            // the current one.
            *cursor += 1;
            Status::Running
        }
        other => other,
    }
}

/// Resets the cursor and recursively resets every child.
pub(crate) fn reset_children<C>(children: &mut [Node<C>], cursor: &mut usize) {
    *cursor = 0;
    for child in children.iter_mut() {
        child.reset();
    }
}

/// Executes child behaviors in order until one fails.
///
/// # Semantics
///
/// The cursor starts at the first child and persists across ticks:
/// - child `Failure` → the sequence returns `Failure` immediately
/// - child `Success` → advance and dispatch the next child **within the
///   same tick**; when the cursor passes the last child, `Success`
/// - child `Running` → `Running`, resuming at the same child next tick
///
/// A sequence with no children evaluates to `Failure`.
pub struct Sequence<C> {
    children: Vec<Node<C>>,
    cursor: usize,
}

impl<C> Sequence<C> {
    /// Creates a new sequence over the given children.
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self {
            children,
            cursor: 0,
        }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        tick_sequence(&mut self.children, &mut self.cursor, ctx)
    }

    fn reset(&mut self) {
        reset_children(&mut self.children, &mut self.cursor);
    }
}

/// Executes child behaviors in order until one succeeds.
///
/// # Semantics
///
/// - child `Success` → `Success` immediately
/// - child `Failure` → advance the cursor and return `Running`; the next
///   child is only attempted on the next tick
/// - child `Running` → `Running`
///
/// The cursor is deliberately **not** checked against the child count: once
/// every child has failed, the next tick indexes past the end and panics.
/// Use [`SelectorWithFail`] when exhaustion should surface as `Failure`.
/// The two kinds are intentionally distinct; trees depend on either
/// behavior.
pub struct Selector<C> {
    children: Vec<Node<C>>,
    cursor: usize,
}

impl<C> Selector<C> {
    /// Creates a new selector over the given children.
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self {
            children,
            cursor: 0,
        }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        tick_selector(&mut self.children, &mut self.cursor, false, ctx)
    }

    fn reset(&mut self) {
        reset_children(&mut self.children, &mut self.cursor);
    }
}

/// [`Selector`] with an exhaustion check.
///
/// Identical child-selection semantics, plus one bounds check: once the
/// cursor reaches the child count, the node reports `Failure` instead of
/// indexing out of range.
pub struct SelectorWithFail<C> {
    children: Vec<Node<C>>,
    cursor: usize,
}

impl<C> SelectorWithFail<C> {
    /// Creates a new bounded selector over the given children.
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self {
            children,
            cursor: 0,
        }
    }
}

impl<C> Behavior<C> for SelectorWithFail<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        tick_selector(&mut self.children, &mut self.cursor, true, ctx)
    }

    fn reset(&mut self) {
        reset_children(&mut self.children, &mut self.cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::leaf;

    /// Context recording which child indices ran, in order.
    #[derive(Default)]
    struct Trace {
        ran: Vec<usize>,
    }

    fn succeed(id: usize) -> Node<Trace> {
        leaf(format!("succeed-{id}"), move |ctx: &mut Trace| {
            ctx.ran.push(id);
            Status::Success
        })
    }

    fn fail(id: usize) -> Node<Trace> {
        leaf(format!("fail-{id}"), move |ctx: &mut Trace| {
            ctx.ran.push(id);
            Status::Failure
        })
    }

    /// Leaf that runs for `ticks` evaluations before succeeding.
    fn run_then_succeed(id: usize, ticks: u32) -> Node<Trace> {
        let mut remaining = ticks;
        leaf(format!("slow-{id}"), move |ctx: &mut Trace| {
            ctx.ran.push(id);
            if remaining > 0 {
                remaining -= 1;
                Status::Running
            } else {
                remaining = ticks;
                Status::Success
            }
        })
    }

    #[test]
    fn sequence_chains_successes_within_one_tick() {
        let mut node = Node::new(
            "seq",
            Sequence::new(vec![succeed(0), succeed(1), succeed(2)]),
        );
        let mut trace = Trace::default();

        assert_eq!(node.tick(&mut trace), Status::Success);
        assert_eq!(trace.ran, vec![0, 1, 2]);
    }

    #[test]
    fn sequence_suspends_on_running_child_and_resumes_there() {
        let mut node = Node::new(
            "seq",
            Sequence::new(vec![succeed(0), run_then_succeed(1, 1), succeed(2)]),
        );
        let mut trace = Trace::default();

        assert_eq!(node.tick(&mut trace), Status::Running);
        assert_eq!(trace.ran, vec![0, 1]);

        // Next tick resumes at the second child; the first is not re-run.
        trace.ran.clear();
        assert_eq!(node.tick(&mut trace), Status::Success);
        assert_eq!(trace.ran, vec![1, 2]);
    }

    #[test]
    fn sequence_fails_immediately_and_restarts_after_reset() {
        let mut node = Node::new("seq", Sequence::new(vec![succeed(0), fail(1), succeed(2)]));
        let mut trace = Trace::default();

        assert_eq!(node.tick(&mut trace), Status::Failure);
        assert_eq!(trace.ran, vec![0, 1]);

        // Completion reset the cursor; the next tick starts from the front.
        trace.ran.clear();
        assert_eq!(node.tick(&mut trace), Status::Failure);
        assert_eq!(trace.ran, vec![0, 1]);
    }

    #[test]
    fn empty_sequence_fails() {
        let mut node = Node::new("seq", Sequence::<Trace>::new(vec![]));
        assert_eq!(node.tick(&mut Trace::default()), Status::Failure);
    }

    #[test]
    fn selector_advances_one_child_per_tick() {
        let mut node = Node::new("sel", Selector::new(vec![fail(0), succeed(1)]));
        let mut trace = Trace::default();

        // First tick fails child 0 and reports Running.
        assert_eq!(node.tick(&mut trace), Status::Running);
        assert_eq!(trace.ran, vec![0]);

        // Second tick tries child 1.
        trace.ran.clear();
        assert_eq!(node.tick(&mut trace), Status::Success);
        assert_eq!(trace.ran, vec![1]);
    }

    #[test]
    fn selector_succeeds_immediately_on_first_success() {
        let mut node = Node::new("sel", Selector::new(vec![succeed(0), fail(1)]));
        let mut trace = Trace::default();

        assert_eq!(node.tick(&mut trace), Status::Success);
        assert_eq!(trace.ran, vec![0]);
    }

    #[test]
    fn selector_stays_on_running_child() {
        let mut node = Node::new(
            "sel",
            Selector::new(vec![fail(0), run_then_succeed(1, 2)]),
        );
        let mut trace = Trace::default();

        assert_eq!(node.tick(&mut trace), Status::Running); // child 0 fails
        assert_eq!(node.tick(&mut trace), Status::Running); // child 1 running
        assert_eq!(node.tick(&mut trace), Status::Running); // still child 1
        assert_eq!(node.tick(&mut trace), Status::Success);
        assert_eq!(trace.ran, vec![0, 1, 1, 1]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn selector_overruns_after_every_child_failed() {
        let mut node = Node::new("sel", Selector::new(vec![fail(0), fail(1)]));
        let mut trace = Trace::default();

        assert_eq!(node.tick(&mut trace), Status::Running);
        assert_eq!(node.tick(&mut trace), Status::Running);
        // Both children failed; the cursor now points past the end.
        node.tick(&mut trace);
    }

    #[test]
    fn selector_with_fail_reports_exhaustion() {
        let mut node = Node::new("sel", SelectorWithFail::new(vec![fail(0), fail(1)]));
        let mut trace = Trace::default();

        assert_eq!(node.tick(&mut trace), Status::Running);
        assert_eq!(node.tick(&mut trace), Status::Running);
        assert_eq!(node.tick(&mut trace), Status::Failure);

        // Failure reset the cursor; the cycle starts over.
        trace.ran.clear();
        assert_eq!(node.tick(&mut trace), Status::Running);
        assert_eq!(trace.ran, vec![0]);
    }

    #[test]
    fn empty_selectors_fail() {
        let mut node = Node::new("sel", Selector::<Trace>::new(vec![]));
        assert_eq!(node.tick(&mut Trace::default()), Status::Failure);

        let mut node = Node::new("sel", SelectorWithFail::<Trace>::new(vec![]));
        assert_eq!(node.tick(&mut Trace::default()), Status::Failure);
    }
}
