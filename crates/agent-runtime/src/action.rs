//! The action leaf node.
//!
//! [`ActionNode`] bridges the synchronous tree interpreter to an agent's
//! asynchronous work: at most once per activation it packages a routine and
//! registers it as the agent's current behavior, then steps aside while the
//! action runs outside the tree's call stack.

use behavior_tree::{Behavior, Node, NodeState, Status};

use crate::agent::{ActionHost, ActionId, ActionRoutine};

/// Produces the action routine when the node decides to assign one.
pub type RoutineFactory<C> = Box<dyn FnMut(&mut C) -> ActionRoutine + Send>;

/// Decides whether a fresh action should be (re)assigned.
///
/// Receives the context and the identity of the action this node most
/// recently started, if any.
pub type AssignPredicate<C> = Box<dyn FnMut(&C, Option<ActionId>) -> bool + Send>;

/// Leaf that assigns a long-running action to its owning agent.
///
/// # Semantics
///
/// - On the first evaluation of an activation, the predicate is consulted;
///   when it approves, the routine is packaged and registered with the
///   agent, and its identity remembered. Either way the node reports
///   `Running`.
/// - Every later evaluation of the same activation reports `Success`
///   without re-invoking the predicate or re-registering. The action
///   itself is responsible for eventually releasing the agent's slot.
///
/// The default predicate (see [`ActionNode::single_flight`]) refuses to
/// reassign while the most recently started action is still the agent's
/// active one, so a looping tree cannot stack duplicate actions.
pub struct ActionNode<C> {
    factory: RoutineFactory<C>,
    should_assign: AssignPredicate<C>,
    last_started: Option<ActionId>,
}

impl<C: ActionHost> ActionNode<C> {
    /// Creates an action node with an explicit reassignment predicate.
    pub fn new(
        factory: impl FnMut(&mut C) -> ActionRoutine + Send + 'static,
        should_assign: impl FnMut(&C, Option<ActionId>) -> bool + Send + 'static,
    ) -> Self {
        Self {
            factory: Box::new(factory),
            should_assign: Box::new(should_assign),
            last_started: None,
        }
    }

    /// Creates an action node guarded by the agent-level single-flight
    /// check: assign only while the agent is active and this node's last
    /// action is no longer the current one.
    pub fn single_flight(factory: impl FnMut(&mut C) -> ActionRoutine + Send + 'static) -> Self {
        Self::new(factory, |ctx: &C, last: Option<ActionId>| {
            ctx.is_active() && !last.is_some_and(|id| ctx.is_current_action(id))
        })
    }
}

impl<C: ActionHost> Behavior<C> for ActionNode<C> {
    fn evaluate(&mut self, state: &mut NodeState, ctx: &mut C) -> Status {
        if state.is_first_evaluation() {
            if (self.should_assign)(ctx, self.last_started) {
                let routine = (self.factory)(ctx);
                self.last_started = Some(ctx.start_action(routine));
                state.set_reason("assigned new action");
            } else {
                state.set_reason("kept current action");
            }
            Status::Running
        } else {
            Status::Success
        }
    }
}

/// Creates a single-flight action leaf node.
pub fn action<C: ActionHost + 'static>(
    name: impl Into<String>,
    factory: impl FnMut(&mut C) -> ActionRoutine + Send + 'static,
) -> Node<C> {
    Node::new(name, ActionNode::single_flight(factory))
}
