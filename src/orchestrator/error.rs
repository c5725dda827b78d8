//! Orchestrator error types.

use thiserror::Error;

/// Request-level pipeline failures.
///
/// Partial failure is not an error: adapters that time out or abort simply
/// contribute nothing. Only the total case escalates.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Every configured adapter failed or timed out and no postings exist.
    #[error("all {adapters} job sources failed")]
    AllSourcesFailed { adapters: usize },
}
