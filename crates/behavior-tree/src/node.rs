//! Core node contract.
//!
//! Every tree element is a [`Node`]: shared bookkeeping (name, diagnostic
//! reason, last observed status, evaluation count, observers) wrapped around a
//! node-specific [`Behavior`]. The wrapper owns the per-tick protocol so that
//! composites, decorators, and leaves only implement their own evaluation
//! logic:
//!
//! - evaluate the behavior to obtain a [`Status`]
//! - notify observers when the status-change trigger condition holds
//! - count the evaluation
//! - reset automatically on any non-`Running` result
//!
//! The trait is generic over a context type `C`, allowing nodes to read game
//! state and make decisions without the tree holding references into it.

use crate::Status;

/// A behavior evaluated by a [`Node`] against a context.
///
/// Implementations hold all node-specific traversal state (child lists,
/// cursors, timers) and mutate it freely during [`evaluate`]. The shared
/// bookkeeping lives in the [`NodeState`] passed in; behaviors may read the
/// evaluation count from it and write diagnostics to
/// [`NodeState::set_reason`].
///
/// [`evaluate`]: Behavior::evaluate
pub trait Behavior<C>: Send {
    /// Evaluate this behavior for one tick.
    ///
    /// Called through [`Node::tick`], which performs the shared bookkeeping
    /// before and after. Returns the status of this evaluation.
    fn evaluate(&mut self, state: &mut NodeState, ctx: &mut C) -> Status;

    /// Node-specific reset hook.
    ///
    /// Invoked by [`Node::reset`] after the evaluation count is cleared.
    /// Composites reset their cursor and children here; decorators forward
    /// the reset to their child; stateless leaves need nothing.
    fn reset(&mut self) {}
}

/// Snapshot of a status change, delivered synchronously to observers.
#[derive(Debug, Clone, Copy)]
pub struct StatusChange<'a> {
    /// Display name of the node whose status changed.
    pub node: &'a str,
    /// The newly observed status.
    pub status: Status,
    /// The node's diagnostic reason at the time of the change.
    pub reason: &'a str,
}

/// Observer callback registered on a node.
pub type Observer = Box<dyn FnMut(&StatusChange<'_>) + Send>;

/// Shared per-node bookkeeping: identity, diagnostics, and evaluation count.
pub struct NodeState {
    name: String,
    status_reason: String,
    last_status: Status,
    last_reason: String,
    evaluations: u32,
    observers: Vec<Observer>,
}

impl NodeState {
    fn new(name: String) -> Self {
        Self {
            name,
            status_reason: String::new(),
            last_status: Status::NotRun,
            last_reason: String::new(),
            evaluations: 0,
            observers: Vec::new(),
        }
    }

    /// Display name of this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The most recently recorded status.
    ///
    /// Starts out as [`Status::NotRun`] and is updated whenever the
    /// status-change trigger fires.
    pub fn last_status(&self) -> Status {
        self.last_status
    }

    /// Free-text diagnostic set by the node's own evaluation logic.
    ///
    /// Has no effect on control flow; it only feeds observers (and the
    /// trigger condition in [`Node::tick`]).
    pub fn status_reason(&self) -> &str {
        &self.status_reason
    }

    /// Replaces the diagnostic reason.
    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.status_reason = reason.into();
    }

    /// Number of evaluations since the last reset.
    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }

    /// `true` on the first evaluation of an activation (count is zero).
    pub fn is_first_evaluation(&self) -> bool {
        self.evaluations == 0
    }

    /// Applies the status-change trigger and notifies observers when it
    /// fires.
    ///
    /// The trigger condition is: the status differs from the last recorded
    /// one, OR the previously recorded reason equals the current reason.
    /// The second arm reads inverted but is load-bearing: existing trees
    /// depend on its firing pattern (see DESIGN.md).
    fn record(&mut self, status: Status) {
        if status != self.last_status || self.last_reason == self.status_reason {
            self.last_status = status;
            self.last_reason = self.status_reason.clone();
            let change = StatusChange {
                node: &self.name,
                status,
                reason: &self.status_reason,
            };
            // Synchronous delivery, registration order.
            for observer in &mut self.observers {
                observer(&change);
            }
        }
    }
}

/// A behavior tree node: shared bookkeeping plus a node-specific behavior.
pub struct Node<C> {
    state: NodeState,
    behavior: Box<dyn Behavior<C>>,
}

impl<C> Node<C> {
    /// Creates a node with the given display name and behavior.
    pub fn new(name: impl Into<String>, behavior: impl Behavior<C> + 'static) -> Self {
        Self {
            state: NodeState::new(name.into()),
            behavior: Box::new(behavior),
        }
    }

    /// Display name of this node.
    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// The most recently recorded status.
    pub fn last_status(&self) -> Status {
        self.state.last_status()
    }

    /// Current diagnostic reason.
    pub fn status_reason(&self) -> &str {
        self.state.status_reason()
    }

    /// Number of evaluations since the last reset.
    pub fn evaluations(&self) -> u32 {
        self.state.evaluations()
    }

    /// Registers a status-change observer.
    ///
    /// Observers are invoked synchronously and unbuffered, in registration
    /// order, from within [`tick`](Node::tick).
    pub fn observe(&mut self, observer: impl FnMut(&StatusChange<'_>) + Send + 'static) {
        self.state.observers.push(Box::new(observer));
    }

    /// Evaluates this node for one tick.
    ///
    /// This is the single entry point into the node's control flow:
    ///
    /// 1. the behavior's [`evaluate`](Behavior::evaluate) produces a status
    /// 2. observers are notified when the trigger condition holds
    /// 3. the evaluation count is incremented
    /// 4. on any non-`Running` status the node resets itself
    pub fn tick(&mut self, ctx: &mut C) -> Status {
        let status = self.behavior.evaluate(&mut self.state, ctx);
        self.state.record(status);
        self.state.evaluations += 1;
        if status != Status::Running {
            self.reset();
        }
        status
    }

    /// Clears the evaluation count and runs the behavior's reset hook.
    ///
    /// Called automatically by [`tick`](Node::tick) on completion and
    /// explicitly by parents when they restart a branch. Idempotent.
    pub fn reset(&mut self) {
        self.state.evaluations = 0;
        self.behavior.reset();
    }
}
