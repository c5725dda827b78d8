//! Scoring error types.

use thiserror::Error;

/// Errors from the text-completion capability.
///
/// Never escapes the scorer: every failure collapses into the deterministic
/// fallback enrichment for that one posting.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The completion provider call failed.
    #[error("completion call failed: {message}")]
    Completion { message: String },

    /// The provider answered with no text content.
    #[error("completion response contained no text")]
    EmptyResponse,
}
