//! Randomized composite nodes.
//!
//! Variants of [`Sequence`](crate::Sequence) and
//! [`Selector`](crate::Selector) whose child order is permuted:
//!
//! - [`RandomSequence`] / [`RandomSelector`]: permuted once at construction
//! - [`AlwaysRandomSequence`] / [`AlwaysRandomSelector`]: re-permuted on
//!   every reset
//! - [`WeightedRandomSelector`]: weighted order without replacement,
//!   re-sampled on every reset
//!
//! Randomness is never ambient: construction-time shuffles borrow a
//! caller-supplied [`Rng`], and the re-shuffling variants own a seeded
//! [`StdRng`] passed in by the caller, keeping replays deterministic.
//!
//! A shuffle replaces the children list wholesale with a permutation of the
//! same nodes; children are never added or removed after construction.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::composite::{reset_children, tick_selector, tick_sequence};
use crate::node::{Behavior, Node, NodeState};
use crate::Status;

/// Sequence over children permuted once at construction.
pub struct RandomSequence<C> {
    children: Vec<Node<C>>,
    cursor: usize,
}

impl<C> RandomSequence<C> {
    /// Creates a sequence over a one-time shuffle of `children`.
    pub fn new(mut children: Vec<Node<C>>, rng: &mut impl Rng) -> Self {
        children.shuffle(rng);
        Self {
            children,
            cursor: 0,
        }
    }
}

impl<C> Behavior<C> for RandomSequence<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        tick_sequence(&mut self.children, &mut self.cursor, ctx)
    }

    fn reset(&mut self) {
        reset_children(&mut self.children, &mut self.cursor);
    }
}

/// Selector over children permuted once at construction.
///
/// Shares the plain [`Selector`](crate::Selector) semantics, including the
/// deliberate absence of an exhaustion check.
pub struct RandomSelector<C> {
    children: Vec<Node<C>>,
    cursor: usize,
}

impl<C> RandomSelector<C> {
    /// Creates a selector over a one-time shuffle of `children`.
    pub fn new(mut children: Vec<Node<C>>, rng: &mut impl Rng) -> Self {
        children.shuffle(rng);
        Self {
            children,
            cursor: 0,
        }
    }
}

impl<C> Behavior<C> for RandomSelector<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        tick_selector(&mut self.children, &mut self.cursor, false, ctx)
    }

    fn reset(&mut self) {
        reset_children(&mut self.children, &mut self.cursor);
    }
}

/// Sequence that re-permutes its children on every reset.
pub struct AlwaysRandomSequence<C> {
    children: Vec<Node<C>>,
    cursor: usize,
    rng: StdRng,
}

impl<C> AlwaysRandomSequence<C> {
    /// Creates a sequence that shuffles with its own `rng` at construction
    /// and again on every reset.
    pub fn new(mut children: Vec<Node<C>>, mut rng: StdRng) -> Self {
        children.shuffle(&mut rng);
        Self {
            children,
            cursor: 0,
            rng,
        }
    }
}

impl<C> Behavior<C> for AlwaysRandomSequence<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        tick_sequence(&mut self.children, &mut self.cursor, ctx)
    }

    fn reset(&mut self) {
        reset_children(&mut self.children, &mut self.cursor);
        self.children.shuffle(&mut self.rng);
    }
}

/// Selector that re-permutes its children on every reset.
pub struct AlwaysRandomSelector<C> {
    children: Vec<Node<C>>,
    cursor: usize,
    rng: StdRng,
}

impl<C> AlwaysRandomSelector<C> {
    /// Creates a selector that shuffles with its own `rng` at construction
    /// and again on every reset.
    pub fn new(mut children: Vec<Node<C>>, mut rng: StdRng) -> Self {
        children.shuffle(&mut rng);
        Self {
            children,
            cursor: 0,
            rng,
        }
    }
}

impl<C> Behavior<C> for AlwaysRandomSelector<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        tick_selector(&mut self.children, &mut self.cursor, false, ctx)
    }

    fn reset(&mut self) {
        reset_children(&mut self.children, &mut self.cursor);
        self.children.shuffle(&mut self.rng);
    }
}

/// Selector whose child order is drawn by weight, without replacement.
///
/// Each reset produces a new total order: children are repeatedly sampled
/// from the remaining pool with probability proportional to their weight
/// relative to the sum of remaining weights. Zero-weight children sort
/// behind every positively weighted one.
///
/// A weight list whose length does not match the child count falls back to
/// uniform weighting for this construction.
pub struct WeightedRandomSelector<C> {
    children: Vec<Node<C>>,
    weights: Vec<u32>,
    cursor: usize,
    rng: StdRng,
}

impl<C> WeightedRandomSelector<C> {
    /// Creates a weighted selector; `weights` parallels `children`.
    pub fn new(children: Vec<Node<C>>, weights: Vec<u32>, rng: StdRng) -> Self {
        let weights = if weights.len() == children.len() {
            weights
        } else {
            tracing::warn!(
                children = children.len(),
                weights = weights.len(),
                "weight count does not match child count, using uniform weights"
            );
            vec![1; children.len()]
        };
        let mut selector = Self {
            children,
            weights,
            cursor: 0,
            rng,
        };
        selector.reorder();
        selector
    }

    /// Draws a fresh weighted order over all children.
    ///
    /// Weights travel with their children so later draws stay attached to
    /// the right node.
    fn reorder(&mut self) {
        let mut pool: Vec<(Node<C>, u32)> = self
            .children
            .drain(..)
            .zip(self.weights.drain(..))
            .collect();

        while !pool.is_empty() {
            let total: u64 = pool.iter().map(|(_, weight)| u64::from(*weight)).sum();
            let picked = if total == 0 {
                // Only zero-weight children remain; draw uniformly.
                self.rng.gen_range(0..pool.len())
            } else {
                let mut roll = self.rng.gen_range(0..total);
                let mut picked = None;
                for (index, (_, weight)) in pool.iter().enumerate() {
                    let weight = u64::from(*weight);
                    if roll < weight {
                        picked = Some(index);
                        break;
                    }
                    roll -= weight;
                }
                // The roll is strictly below the pool total, so some child
                // must absorb it.
                picked.unwrap_or_else(|| unreachable!("weighted draw exhausted the pool"))
            };
            let (child, weight) = pool.remove(picked);
            self.children.push(child);
            self.weights.push(weight);
        }
    }
}

impl<C> Behavior<C> for WeightedRandomSelector<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        tick_selector(&mut self.children, &mut self.cursor, false, ctx)
    }

    fn reset(&mut self) {
        reset_children(&mut self.children, &mut self.cursor);
        self.reorder();
    }
}
