//! Builder utilities for ergonomic tree construction.
//!
//! Helper functions that cut the `Node::new(..., Sequence::new(...))`
//! boilerplate when authoring trees, plus [`leaf`] for turning a closure
//! into a leaf node.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use crate::composite::{Selector, SelectorWithFail, Sequence};
use crate::decorator::{Delay, Inverter, Repeater, Succeeder, TickClock, Timer, UntilFail};
use crate::node::{Behavior, Node, NodeState};
use crate::random::{
    AlwaysRandomSelector, AlwaysRandomSequence, RandomSelector, RandomSequence,
    WeightedRandomSelector,
};
use crate::Status;

struct ClosureLeaf<F>(F);

impl<C, F> Behavior<C> for ClosureLeaf<F>
where
    F: FnMut(&mut C) -> Status + Send,
{
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        (self.0)(ctx)
    }
}

/// Creates a leaf node from a closure.
///
/// The closure is invoked once per tick with the tree context. Conditions
/// and instantaneous actions are usually written this way; stateful leaves
/// implement [`Behavior`] directly.
pub fn leaf<C: 'static>(
    name: impl Into<String>,
    behavior: impl FnMut(&mut C) -> Status + Send + 'static,
) -> Node<C> {
    Node::new(name, ClosureLeaf(behavior))
}

/// Creates a sequence node.
pub fn sequence<C: 'static>(name: impl Into<String>, children: Vec<Node<C>>) -> Node<C> {
    Node::new(name, Sequence::new(children))
}

/// Creates a selector node (no exhaustion check).
pub fn selector<C: 'static>(name: impl Into<String>, children: Vec<Node<C>>) -> Node<C> {
    Node::new(name, Selector::new(children))
}

/// Creates a selector node that fails on exhaustion.
pub fn selector_with_fail<C: 'static>(name: impl Into<String>, children: Vec<Node<C>>) -> Node<C> {
    Node::new(name, SelectorWithFail::new(children))
}

/// Creates a sequence over a one-time shuffle of the children.
pub fn random_sequence<C: 'static>(
    name: impl Into<String>,
    children: Vec<Node<C>>,
    rng: &mut impl Rng,
) -> Node<C> {
    Node::new(name, RandomSequence::new(children, rng))
}

/// Creates a selector over a one-time shuffle of the children.
pub fn random_selector<C: 'static>(
    name: impl Into<String>,
    children: Vec<Node<C>>,
    rng: &mut impl Rng,
) -> Node<C> {
    Node::new(name, RandomSelector::new(children, rng))
}

/// Creates a sequence that reshuffles on every reset.
pub fn always_random_sequence<C: 'static>(
    name: impl Into<String>,
    children: Vec<Node<C>>,
    rng: StdRng,
) -> Node<C> {
    Node::new(name, AlwaysRandomSequence::new(children, rng))
}

/// Creates a selector that reshuffles on every reset.
pub fn always_random_selector<C: 'static>(
    name: impl Into<String>,
    children: Vec<Node<C>>,
    rng: StdRng,
) -> Node<C> {
    Node::new(name, AlwaysRandomSelector::new(children, rng))
}

/// Creates a selector ordered by weighted draw, re-sampled on every reset.
pub fn weighted_random_selector<C: 'static>(
    name: impl Into<String>,
    children: Vec<Node<C>>,
    weights: Vec<u32>,
    rng: StdRng,
) -> Node<C> {
    Node::new(name, WeightedRandomSelector::new(children, weights, rng))
}

/// Creates an inverter node.
pub fn inverter<C: 'static>(name: impl Into<String>, child: Node<C>) -> Node<C> {
    Node::new(name, Inverter::new(child))
}

/// Creates a succeeder node.
pub fn succeeder<C: 'static>(name: impl Into<String>, child: Node<C>) -> Node<C> {
    Node::new(name, Succeeder::new(child))
}

/// Creates an until-fail loop node.
pub fn until_fail<C: 'static>(name: impl Into<String>, child: Node<C>) -> Node<C> {
    Node::new(name, UntilFail::new(child))
}

/// Creates a repeater node.
pub fn repeater<C: 'static>(name: impl Into<String>, child: Node<C>, repeats: u32) -> Node<C> {
    Node::new(name, Repeater::new(child, repeats))
}

/// Creates a timer node.
pub fn timer<C: 'static>(
    name: impl Into<String>,
    child: Node<C>,
    interval: Duration,
    clock: TickClock,
) -> Node<C> {
    Node::new(name, Timer::new(child, interval, clock))
}

/// Creates a delay node.
pub fn delay<C: 'static>(
    name: impl Into<String>,
    child: Node<C>,
    duration: Duration,
    clock: TickClock,
) -> Node<C> {
    Node::new(name, Delay::new(child, duration, clock))
}
