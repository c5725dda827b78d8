//! jobmesh: multi-source job posting aggregation service.
//!
//! Fetches postings concurrently from several listing platforms, normalizes
//! them into one record shape, deduplicates and recency-filters, interleaves
//! platforms fairly, enriches each posting with an LLM relevance score (with
//! deterministic fallback), and serves paginated, TTL-cached results over
//! HTTP.

pub mod adapters;
pub mod browser;
pub mod cache;
pub mod config;
pub mod gateway;
pub mod hashing;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod pipeline;
pub mod scoring;

pub use config::Config;
pub use model::{Platform, Posting, SearchQuery, SearchResponse, SeekerProfile};
pub use orchestrator::Orchestrator;
