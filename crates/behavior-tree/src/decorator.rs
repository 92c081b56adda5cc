//! Decorator behavior nodes.
//!
//! Decorators own exactly one child and transform or gate its result:
//! [`Inverter`], [`Succeeder`], [`UntilFail`], [`Repeater`], and the
//! time-gated [`Timer`] and [`Delay`]. Child ownership is enforced by the
//! constructors, so the "missing child" structural error of looser engines
//! cannot occur here.

use std::time::{Duration, Instant};

use crate::node::{Behavior, Node, NodeState};
use crate::Status;

/// Clock source for time-gated decorators, chosen at construction.
#[derive(Debug, Clone, Copy)]
pub enum TickClock {
    /// Real elapsed time, measured from the first evaluation of an
    /// activation.
    WallClock,
    /// Deterministic time: every evaluation of an activation advances the
    /// clock by the given step. Suited to fixed-step simulations and tests.
    FixedStep(Duration),
}

impl TickClock {
    /// Elapsed time for the current evaluation.
    ///
    /// `started` is lazily initialised on the first wall-clock reading;
    /// `evaluations` is the number of completed evaluations this activation
    /// (zero on the first call), which drives the fixed-step variant.
    fn elapsed(self, started: &mut Option<Instant>, evaluations: u32) -> Duration {
        match self {
            TickClock::WallClock => started.get_or_insert_with(Instant::now).elapsed(),
            TickClock::FixedStep(step) => step * evaluations,
        }
    }
}

/// Inverts the result of its child behavior.
///
/// `Success` and `Failure` swap; `Running` (and any other status) passes
/// through unchanged.
pub struct Inverter<C> {
    child: Node<C>,
}

impl<C> Inverter<C> {
    /// Creates a new inverter around the given child.
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Reports `Success` for every completed child evaluation.
///
/// `Running` passes through; everything else, `Failure` included, becomes
/// `Success`. Useful for optional steps that must not abort a sequence.
pub struct Succeeder<C> {
    child: Node<C>,
}

impl<C> Succeeder<C> {
    /// Creates a new succeeder around the given child.
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Succeeder<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => Status::Success,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Loops the child until it fails.
///
/// Reports `Failure` only when the child does; any other child result maps
/// to `Running`. The wrapper never resets the child itself; a child that
/// completes resets on its own and starts a fresh activation next tick.
pub struct UntilFail<C> {
    child: Node<C>,
}

impl<C> UntilFail<C> {
    /// Creates a new until-fail loop around the given child.
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for UntilFail<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Failure => Status::Failure,
            _ => Status::Running,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Completes once the child has finished a configured number of times.
///
/// Each tick runs the child once. When the child completes (any
/// non-`Running` status) before the repeat count is reached, the repeater
/// forces `Failure`; on reaching the count it resets both itself and the
/// child and reports `Success`. A repeat count of zero completes on the
/// first child completion.
///
/// The completion counter survives the forced-`Failure` resets; it is
/// cleared only when the repeater completes successfully (see DESIGN.md).
pub struct Repeater<C> {
    child: Node<C>,
    repeats: u32,
    completed: u32,
}

impl<C> Repeater<C> {
    /// Creates a repeater that completes after `repeats` child completions.
    pub fn new(child: Node<C>, repeats: u32) -> Self {
        Self {
            child,
            repeats,
            completed: 0,
        }
    }
}

impl<C> Behavior<C> for Repeater<C> {
    fn evaluate(&mut self, _state: &mut NodeState, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => {
                self.completed += 1;
                if self.repeats > 0 && self.completed < self.repeats {
                    Status::Failure
                } else {
                    self.completed = 0;
                    self.child.reset();
                    Status::Success
                }
            }
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Runs the child every tick until an interval elapses.
///
/// Reports `Running` while `elapsed <= interval` and `Success` once
/// `elapsed > interval` (strictly greater), independent of the child's own
/// status. The child's status is recorded into the node's diagnostic
/// reason only.
pub struct Timer<C> {
    child: Node<C>,
    interval: Duration,
    clock: TickClock,
    started: Option<Instant>,
}

impl<C> Timer<C> {
    /// Creates a timer gating the child behind the given interval.
    pub fn new(child: Node<C>, interval: Duration, clock: TickClock) -> Self {
        Self {
            child,
            interval,
            clock,
            started: None,
        }
    }
}

impl<C> Behavior<C> for Timer<C> {
    fn evaluate(&mut self, state: &mut NodeState, ctx: &mut C) -> Status {
        let elapsed = self.clock.elapsed(&mut self.started, state.evaluations());
        let child_status = self.child.tick(ctx);
        state.set_reason(format!("child: {child_status}"));
        if elapsed > self.interval {
            Status::Success
        } else {
            Status::Running
        }
    }

    fn reset(&mut self) {
        self.started = None;
        self.child.reset();
    }
}

/// Withholds the child until a delay elapses.
///
/// The first evaluation records the start and reports `Running` without
/// touching the child; while `elapsed <= delay` the child is never
/// evaluated. Afterwards the child runs once per tick and its status is
/// returned directly.
pub struct Delay<C> {
    child: Node<C>,
    delay: Duration,
    clock: TickClock,
    started: Option<Instant>,
}

impl<C> Delay<C> {
    /// Creates a delay gating the child behind the given duration.
    pub fn new(child: Node<C>, delay: Duration, clock: TickClock) -> Self {
        Self {
            child,
            delay,
            clock,
            started: None,
        }
    }
}

impl<C> Behavior<C> for Delay<C> {
    fn evaluate(&mut self, state: &mut NodeState, ctx: &mut C) -> Status {
        let elapsed = self.clock.elapsed(&mut self.started, state.evaluations());
        if elapsed > self.delay {
            self.child.tick(ctx)
        } else {
            Status::Running
        }
    }

    fn reset(&mut self) {
        self.started = None;
        self.child.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::leaf;

    const STEP: Duration = Duration::from_secs(1);

    #[derive(Default)]
    struct Counter {
        runs: u32,
    }

    fn counting(status: Status) -> Node<Counter> {
        leaf("counting", move |ctx: &mut Counter| {
            ctx.runs += 1;
            status
        })
    }

    #[test]
    fn inverter_swaps_and_passes_running() {
        let mut ctx = Counter::default();

        let mut node = Node::new("inv", Inverter::new(counting(Status::Success)));
        assert_eq!(node.tick(&mut ctx), Status::Failure);

        let mut node = Node::new("inv", Inverter::new(counting(Status::Failure)));
        assert_eq!(node.tick(&mut ctx), Status::Success);

        let mut node = Node::new("inv", Inverter::new(counting(Status::Running)));
        assert_eq!(node.tick(&mut ctx), Status::Running);
    }

    #[test]
    fn double_inverter_restores_child_status() {
        let mut ctx = Counter::default();
        for status in [Status::Success, Status::Failure, Status::Running] {
            let mut node = Node::new(
                "inv2",
                Inverter::new(Node::new("inv1", Inverter::new(counting(status)))),
            );
            assert_eq!(node.tick(&mut ctx), status);
        }
    }

    #[test]
    fn succeeder_never_propagates_failure() {
        let mut ctx = Counter::default();

        let mut node = Node::new("ok", Succeeder::new(counting(Status::Failure)));
        assert_eq!(node.tick(&mut ctx), Status::Success);

        let mut node = Node::new("ok", Succeeder::new(counting(Status::Success)));
        assert_eq!(node.tick(&mut ctx), Status::Success);

        let mut node = Node::new("ok", Succeeder::new(counting(Status::Running)));
        assert_eq!(node.tick(&mut ctx), Status::Running);
    }

    #[test]
    fn until_fail_loops_through_success() {
        let mut ctx = Counter::default();

        let mut node = Node::new("loop", UntilFail::new(counting(Status::Success)));
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Running);

        let mut node = Node::new("loop", UntilFail::new(counting(Status::Failure)));
        assert_eq!(node.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn repeater_forces_failure_until_count_reached() {
        let mut ctx = Counter::default();
        let mut node = Node::new("rep", Repeater::new(counting(Status::Success), 3));

        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert_eq!(node.tick(&mut ctx), Status::Success);

        // Counter cleared on completion; the cycle repeats.
        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.runs, 4);
    }

    #[test]
    fn repeater_with_zero_count_completes_immediately() {
        let mut ctx = Counter::default();
        let mut node = Node::new("rep", Repeater::new(counting(Status::Success), 0));
        assert_eq!(node.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn repeater_passes_running_through() {
        let mut ctx = Counter::default();
        let mut node = Node::new("rep", Repeater::new(counting(Status::Running), 2));
        assert_eq!(node.tick(&mut ctx), Status::Running);
    }

    #[test]
    fn timer_succeeds_strictly_after_interval() {
        let mut ctx = Counter::default();
        let mut node = Node::new(
            "timer",
            Timer::new(counting(Status::Failure), STEP * 3, TickClock::FixedStep(STEP)),
        );

        // elapsed 0s, 1s, 2s, 3s: all <= interval.
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        // elapsed: 4s > 3s.
        assert_eq!(node.tick(&mut ctx), Status::Success);

        // The child ran on every tick regardless of its failures.
        assert_eq!(ctx.runs, 5);
    }

    #[test]
    fn timer_records_child_status_as_reason() {
        let mut ctx = Counter::default();
        let mut node = Node::new(
            "timer",
            Timer::new(counting(Status::Failure), STEP, TickClock::FixedStep(STEP)),
        );
        node.tick(&mut ctx);
        assert_eq!(node.status_reason(), "child: Failure");
    }

    #[test]
    fn delay_withholds_child_then_passes_status_through() {
        let mut ctx = Counter::default();
        let mut node = Node::new(
            "delay",
            Delay::new(counting(Status::Failure), STEP * 2, TickClock::FixedStep(STEP)),
        );

        // elapsed 0s, 1s, 2s: child never evaluated.
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.runs, 0);

        // elapsed 3s > 2s: the child runs and its status passes through.
        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.runs, 1);
    }

    #[test]
    fn delay_restarts_after_completion() {
        let mut ctx = Counter::default();
        let mut node = Node::new(
            "delay",
            Delay::new(counting(Status::Success), STEP, TickClock::FixedStep(STEP)),
        );

        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(node.tick(&mut ctx), Status::Success);

        // Completion reset the clock; the delay starts over.
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.runs, 1);
    }
}
