//! Tick-driven behavior tree engine.
//!
//! A small interpreter for agent decision-making: an external driver ticks
//! the tree root once per scheduling tick, evaluation recurses synchronously
//! through composites and decorators to leaves, and nodes that need more
//! time report [`Status::Running`] and are resumed on a later tick.
//!
//! - **Stateful traversal**: composite cursors, decorator timers, and
//!   per-node evaluation counts survive across ticks within one activation
//!   and reset automatically on completion
//! - **Synchronous core**: nodes never block; all waiting is expressed as
//!   `Running`
//! - **Observable**: every node carries a status-change observer list,
//!   notified synchronously in registration order
//! - **Deterministic randomness**: shuffle composites draw from explicitly
//!   owned, caller-seeded sources
//!
//! # Architecture
//!
//! - [`Node`] / [`Behavior`]: the per-tick evaluation contract
//! - [`Status`]: the five-valued result of an evaluation
//! - Composite nodes: [`Sequence`], [`Selector`], [`SelectorWithFail`],
//!   plus the randomized variants in [`random`]
//! - Decorator nodes: [`Inverter`], [`Succeeder`], [`UntilFail`],
//!   [`Repeater`], [`Timer`], [`Delay`]
//! - [`BehaviorTree`]: the driver-facing wrapper around the root
//!
//! Long-running asynchronous leaves live in the companion `agent-runtime`
//! crate, which bridges this synchronous core to externally scheduled
//! actions.

pub mod builder;
pub mod composite;
pub mod decorator;
pub mod node;
pub mod random;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use composite::{Selector, SelectorWithFail, Sequence};
pub use decorator::{Delay, Inverter, Repeater, Succeeder, TickClock, Timer, UntilFail};
pub use node::{Behavior, Node, NodeState, Observer, StatusChange};
pub use random::{
    AlwaysRandomSelector, AlwaysRandomSequence, RandomSelector, RandomSequence,
    WeightedRandomSelector,
};
pub use status::Status;
pub use tree::BehaviorTree;
