//! Agent runtime errors.

/// Errors surfaced by the agent runtime.
///
/// Control-flow outcomes of tree evaluation are always a
/// [`Status`](behavior_tree::Status), never an error; this enum covers the
/// genuinely exceptional surface around agent construction.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No tokio runtime is available to schedule actions on.
    #[error("no tokio runtime available to schedule actions: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
