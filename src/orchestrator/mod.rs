//! Pipeline driver.
//!
//! One search runs: cache lookup → concurrent adapter fan-out → normalize →
//! dedup → recency filter → interleave → concurrent scoring → cache write →
//! paginate. Adapters settle independently; a failure or timeout is an empty
//! contribution, never a cancelled sibling.

pub mod error;

pub use error::OrchestratorError;

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::adapters::SourceAdapter;
use crate::cache::{CacheStatus, Clock, SearchCache};
use crate::hashing;
use crate::model::{Posting, SearchQuery, SearchResponse, SeekerProfile};
use crate::normalize::normalize;
use crate::pipeline::{dedup_per_platform, filter_recent, interleave};
use crate::scoring::RelevanceScorer;
use crate::scoring::scorer::apply_fallback;

pub struct Orchestrator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    scorer: RelevanceScorer,
    cache: SearchCache,
    clock: Arc<dyn Clock>,
    adapter_timeout: Duration,
    per_platform_limit: usize,
    pipeline_budget: Duration,
}

impl Orchestrator {
    pub fn new(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        scorer: RelevanceScorer,
        cache: SearchCache,
        clock: Arc<dyn Clock>,
        adapter_timeout: Duration,
        per_platform_limit: usize,
        pipeline_budget: Duration,
    ) -> Self {
        Self {
            adapters,
            scorer,
            cache,
            clock,
            adapter_timeout,
            per_platform_limit,
            pipeline_budget,
        }
    }

    /// Runs one search end to end.
    ///
    /// A cache hit returns the stored snapshot without touching any adapter.
    #[instrument(skip_all, fields(title = %query.title, location = %query.location, page = query.page))]
    pub async fn search(
        &self,
        query: &SearchQuery,
        profile: &SeekerProfile,
    ) -> Result<(SearchResponse, CacheStatus), OrchestratorError> {
        let key = query.cache_key();
        let search_id = hashing::hash_to_u64(&key);

        if let Some(snapshot) = self.cache.get(&key) {
            info!(search_id, total = snapshot.len(), "serving search from cache");
            return Ok((
                SearchResponse::paginate(&snapshot, query.page, query.limit),
                CacheStatus::Hit,
            ));
        }

        let deadline = Instant::now() + self.pipeline_budget;

        let (postings, failed_adapters) = self.fetch_all(query, deadline).await;
        if failed_adapters == self.adapters.len() && postings.is_empty() {
            return Err(OrchestratorError::AllSourcesFailed {
                adapters: self.adapters.len(),
            });
        }

        let postings = dedup_per_platform(postings);
        let postings = filter_recent(postings, self.clock.now());
        let postings = interleave(postings);

        let scored = self.score_within_budget(postings, profile, deadline).await;

        self.cache.put(key, scored.clone());
        info!(search_id, total = scored.len(), "search pipeline complete");

        Ok((
            SearchResponse::paginate(&scored, query.page, query.limit),
            CacheStatus::Miss,
        ))
    }

    /// Drops the cached snapshot for this query's key.
    pub fn invalidate(&self, query: &SearchQuery) {
        self.cache.invalidate(&query.cache_key());
    }

    /// Fans out to every adapter concurrently and settles them all.
    ///
    /// Each adapter runs under its own timeout, capped at the pipeline
    /// deadline so one slow source cannot hold the request past the budget.
    /// Returns normalized postings plus the number of adapters that
    /// contributed nothing because of an error or timeout.
    async fn fetch_all(&self, query: &SearchQuery, deadline: Instant) -> (Vec<Posting>, usize) {
        let adapter_deadline = deadline.min(Instant::now() + self.adapter_timeout);

        let fetches = self.adapters.iter().map(|adapter| {
            let adapter = Arc::clone(adapter);
            async move {
                let platform = adapter.platform();
                let result = tokio::time::timeout_at(
                    adapter_deadline,
                    adapter.fetch_up_to(query, self.per_platform_limit),
                )
                .await;

                match result {
                    Ok(Ok(candidates)) => {
                        info!(%platform, yield_count = candidates.len(), "adapter settled");
                        Some((platform, candidates))
                    }
                    Ok(Err(e)) => {
                        warn!(%platform, error = %e, "adapter failed");
                        None
                    }
                    Err(_) => {
                        warn!(%platform, "adapter timed out, treating as empty yield");
                        None
                    }
                }
            }
        });

        let settled = join_all(fetches).await;

        let mut failed = 0;
        let mut postings = Vec::new();
        for outcome in settled {
            match outcome {
                Some((platform, candidates)) => {
                    postings.extend(
                        candidates
                            .into_iter()
                            .filter_map(|raw| normalize(raw, platform)),
                    );
                }
                None => failed += 1,
            }
        }

        (postings, failed)
    }

    /// Scores postings, unless the pipeline budget has already run out, in
    /// which case every posting gets the deterministic fallback.
    async fn score_within_budget(
        &self,
        postings: Vec<Posting>,
        profile: &SeekerProfile,
        deadline: Instant,
    ) -> Vec<Posting> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            warn!("pipeline budget exhausted before scoring, applying fallbacks");
            return fallback_all(postings);
        }

        match tokio::time::timeout_at(deadline, self.scorer.score_batch(postings.clone(), profile))
            .await
        {
            Ok(scored) => scored,
            Err(_) => {
                warn!("scoring abandoned at pipeline budget, applying fallbacks");
                fallback_all(postings)
            }
        }
    }
}

fn fallback_all(mut postings: Vec<Posting>) -> Vec<Posting> {
    for posting in &mut postings {
        apply_fallback(posting);
    }
    postings
}
