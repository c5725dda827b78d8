//! Post-fetch result pipeline: dedup, recency filtering, interleaving.
//!
//! Pure functions over posting vectors, run between the adapter fan-out and
//! the scorer.

pub mod dedup;
pub mod interleave;
pub mod recency;

pub use dedup::dedup_per_platform;
pub use interleave::{GLOBAL_CAP, INTERLEAVE_BATCH, interleave};
pub use recency::filter_recent;
