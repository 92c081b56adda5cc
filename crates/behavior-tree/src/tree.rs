//! Tree driver.
//!
//! A thin wrapper owning the root node. The external scheduler calls
//! [`BehaviorTree::tick`] once per tick; everything else about the tree's
//! control flow happens inside the nodes.

use crate::node::Node;
use crate::Status;

/// A behavior tree rooted at a single node.
pub struct BehaviorTree<C> {
    root: Node<C>,
    ticks: u64,
}

impl<C> BehaviorTree<C> {
    /// Creates a tree over the given root node.
    pub fn new(root: Node<C>) -> Self {
        Self { root, ticks: 0 }
    }

    /// Evaluates the whole tree for one tick.
    ///
    /// The single entry point into the tree's control flow; drivers call it
    /// once per scheduling tick.
    pub fn tick(&mut self, ctx: &mut C) -> Status {
        self.ticks += 1;
        let status = self.root.tick(ctx);
        tracing::trace!(
            tick = self.ticks,
            root = self.root.name(),
            status = %status,
            "behavior tree ticked"
        );
        status
    }

    /// Resets the whole tree back to its initial traversal state.
    pub fn reset(&mut self) {
        self.root.reset();
    }

    /// Number of ticks driven so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The root node.
    pub fn root(&self) -> &Node<C> {
        &self.root
    }

    /// Mutable access to the root node, e.g. for observer registration.
    pub fn root_mut(&mut self) -> &mut Node<C> {
        &mut self.root
    }
}
