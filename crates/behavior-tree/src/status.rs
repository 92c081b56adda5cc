//! Status returned by behavior nodes.

/// The result of evaluating a behavior node for one tick.
///
/// # Tick Semantics
///
/// Nodes that cannot finish within a single tick return [`Status::Running`]
/// and are re-evaluated on the next tick. Everything else counts as a
/// completed evaluation and causes the node to reset itself before its next
/// activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Status {
    /// The behavior failed.
    ///
    /// For conditions: the condition was not met.
    /// For actions: the action could not be carried out.
    Failure,

    /// The behavior completed successfully.
    Success,

    /// The behavior has started but needs more ticks to finish.
    Running,

    /// Reserved status. No built-in node produces it, but externally
    /// authored leaves may, and observers must be prepared to see it.
    Unknown,

    /// The node has never been evaluated.
    NotRun,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    ///
    /// `Running`, `Unknown`, and `NotRun` are fixed points. This is the
    /// mapping used by [`Inverter`](crate::decorator::Inverter).
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_swaps_terminal_statuses() {
        assert_eq!(Status::Success.invert(), Status::Failure);
        assert_eq!(Status::Failure.invert(), Status::Success);
    }

    #[test]
    fn invert_leaves_non_terminal_statuses_alone() {
        assert_eq!(Status::Running.invert(), Status::Running);
        assert_eq!(Status::Unknown.invert(), Status::Unknown);
        assert_eq!(Status::NotRun.invert(), Status::NotRun);
    }

    #[test]
    fn double_invert_is_identity() {
        for status in [
            Status::Failure,
            Status::Success,
            Status::Running,
            Status::Unknown,
            Status::NotRun,
        ] {
            assert_eq!(status.invert().invert(), status);
        }
    }
}
