//! Asynchronous action bridge for behavior-tree agents.
//!
//! The `behavior-tree` core never suspends: waiting is expressed as
//! [`Status::Running`](behavior_tree::Status) and re-evaluation on a later
//! tick. This crate supplies the other half of that contract:
//!
//! - [`Agent`]: a single-flight "current behavior" slot scheduled on tokio,
//!   where reassignment cancels the previous holder
//! - [`ActionHost`]: the capability surface the tree requires from an agent
//! - [`ActionNode`]: the leaf that assigns a routine once per activation
//! - [`ActionScope`] / [`ReleaseGuard`]: cooperative cancellation with
//!   guaranteed release of agent-held state on every exit path

pub mod action;
pub mod agent;
pub mod error;

// Re-export core types for ergonomic API
pub use action::{action, ActionNode, AssignPredicate, RoutineFactory};
pub use agent::{
    routine, ActionFuture, ActionHost, ActionId, ActionRoutine, ActionScope, Agent, ReleaseGuard,
};
pub use error::{AgentError, Result};
