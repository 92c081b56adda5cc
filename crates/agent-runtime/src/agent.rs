//! Agent-side action scheduling.
//!
//! The tree core is synchronous; anything long-running is handed off here.
//! An [`Agent`] owns a single "current behavior" slot: at most one action
//! runs per agent at a time, and registering a new action cancels the
//! previous holder's scope before taking ownership. Actions run on the
//! agent's tokio runtime, outside the tree-evaluation call stack, and
//! observe cancellation cooperatively at their suspension points.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Identity of an action started on an agent.
///
/// Monotonically increasing per agent; an `ActionNode` remembers the id it
/// most recently started to tell whether it is still the active leaf.
pub type ActionId = u64;

/// Boxed future produced by an action routine.
pub type ActionFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A packaged unit of asynchronous work, invoked once with its scope.
pub type ActionRoutine = Box<dyn FnOnce(ActionScope) -> ActionFuture + Send>;

/// Packages an async closure into an [`ActionRoutine`].
pub fn routine<F, Fut>(action: F) -> ActionRoutine
where
    F: FnOnce(ActionScope) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Box::new(move |scope| Box::pin(action(scope)))
}

/// Capability surface an agent exposes to its behavior tree.
///
/// This is the entire boundary between the tree core and agent/game logic;
/// spatial, perceptual, and animation behavior all live behind it.
pub trait ActionHost {
    /// Registers `routine` as the agent's current behavior, cancelling the
    /// previous holder first, and returns the new action's identity.
    fn start_action(&mut self, routine: ActionRoutine) -> ActionId;

    /// Whether `id` is still the agent's active action.
    fn is_current_action(&self, id: ActionId) -> bool;

    /// Whether the agent is alive and able to run actions.
    fn is_active(&self) -> bool;
}

/// Cancellation scope handed to an action routine.
///
/// The scope's token is a child of the agent-lifetime token, so agent
/// shutdown and reassignment both cancel it. Actions must check the scope
/// at every suspension point and perform their release obligations through
/// guards, not conditional code.
#[derive(Clone)]
pub struct ActionScope {
    id: ActionId,
    cancel: CancellationToken,
}

impl ActionScope {
    /// Identity of the action this scope belongs to.
    pub fn id(&self) -> ActionId {
        self.id
    }

    /// Whether this scope has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Completes when this scope is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }

    /// The underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Derives a token for re-entrant sub-work.
    ///
    /// Cancelling this scope cancels every token derived from it, tying a
    /// sub-action's lifetime to its parent action.
    pub fn child_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }
}

/// Runs a release closure when dropped.
///
/// Actions wrap their release obligations (clearing occupancy, leaving a
/// group) in one of these so the release happens on every exit path,
/// cancelled or not.
pub struct ReleaseGuard<F: FnOnce()> {
    release: Option<F>,
}

impl<F: FnOnce()> ReleaseGuard<F> {
    /// Creates a guard that runs `release` on drop.
    pub fn new(release: F) -> Self {
        Self {
            release: Some(release),
        }
    }
}

impl<F: FnOnce()> Drop for ReleaseGuard<F> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// The active-action slot shared between the agent and in-flight guards.
struct ActiveSlot {
    current: Mutex<Option<ActionId>>,
}

/// Clears the slot when the action's future finishes, on every exit path.
struct ActiveGuard {
    id: ActionId,
    slot: Arc<ActiveSlot>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        if let Ok(mut current) = self.slot.current.lock() {
            // A successor may already own the slot; only clear our own claim.
            if *current == Some(self.id) {
                *current = None;
            }
        }
    }
}

/// An agent with a single-flight action slot, scheduled on tokio.
pub struct Agent {
    slot: Arc<ActiveSlot>,
    lifetime: CancellationToken,
    current_cancel: Option<CancellationToken>,
    next_id: ActionId,
    handle: Handle,
}

impl Agent {
    /// Creates an agent scheduling onto the current tokio runtime.
    pub fn new() -> Result<Self> {
        Ok(Self::with_handle(Handle::try_current()?))
    }

    /// Creates an agent scheduling onto the given runtime handle.
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            slot: Arc::new(ActiveSlot {
                current: Mutex::new(None),
            }),
            lifetime: CancellationToken::new(),
            current_cancel: None,
            next_id: 0,
            handle,
        }
    }

    /// The identity of the currently active action, if any.
    pub fn current_action(&self) -> Option<ActionId> {
        *self
            .slot
            .current
            .lock()
            .expect("active-action slot poisoned")
    }

    /// Whether any action currently owns the slot.
    pub fn has_active_action(&self) -> bool {
        self.current_action().is_some()
    }

    /// Cancels the agent lifetime and with it every action scope.
    pub fn shutdown(&self) {
        self.lifetime.cancel();
    }
}

impl ActionHost for Agent {
    fn start_action(&mut self, routine: ActionRoutine) -> ActionId {
        // Single-flight: the previous holder is cancelled before the new
        // action takes ownership of the slot.
        if let Some(previous) = self.current_cancel.take() {
            previous.cancel();
        }

        self.next_id += 1;
        let id = self.next_id;
        let cancel = self.lifetime.child_token();
        self.current_cancel = Some(cancel.clone());
        *self
            .slot
            .current
            .lock()
            .expect("active-action slot poisoned") = Some(id);

        let scope = ActionScope { id, cancel };
        let guard = ActiveGuard {
            id,
            slot: Arc::clone(&self.slot),
        };
        let future = routine(scope);
        tracing::debug!(action = id, "action registered as current behavior");
        self.handle.spawn(async move {
            let _release = guard;
            future.await;
            tracing::debug!(action = id, "action finished");
        });
        id
    }

    fn is_current_action(&self, id: ActionId) -> bool {
        self.current_action() == Some(id)
    }

    fn is_active(&self) -> bool {
        !self.lifetime.is_cancelled()
    }
}
