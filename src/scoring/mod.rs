//! Relevance scoring: persona classification, prompt, parser, and the
//! concurrent batch scorer over a pluggable completion client.

pub mod client;
pub mod error;
pub mod parser;
pub mod persona;
pub mod prompt;
pub mod scorer;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::{CompletionClient, GenAiCompletionClient};
pub use error::ScoringError;
pub use persona::{Persona, classify};
pub use scorer::{FALLBACK_SCORE, RelevanceScorer};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockCompletionClient;
