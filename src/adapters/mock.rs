//! Scripted adapter for orchestrator and gateway tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::error::AdapterError;
use super::{FetchedPage, SourceAdapter};
use crate::model::{ApplySource, Platform, RawCandidate, SearchQuery};

/// What a [`MockAdapter`] does when asked to fetch.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Yield these candidates on page 1, nothing after.
    Yield(Vec<RawCandidate>),
    /// Fail with a challenge.
    Challenge,
    /// Sleep past any reasonable timeout before yielding.
    Hang(Duration),
}

/// In-memory adapter with scripted behavior and a fetch counter.
pub struct MockAdapter {
    platform: Platform,
    behavior: Mutex<MockBehavior>,
    fetch_count: Arc<AtomicUsize>,
}

impl MockAdapter {
    pub fn yielding(platform: Platform, candidates: Vec<RawCandidate>) -> Self {
        Self {
            platform,
            behavior: Mutex::new(MockBehavior::Yield(candidates)),
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn challenging(platform: Platform) -> Self {
        Self {
            platform,
            behavior: Mutex::new(MockBehavior::Challenge),
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn hanging(platform: Platform, delay: Duration) -> Self {
        Self {
            platform,
            behavior: Mutex::new(MockBehavior::Hang(delay)),
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `fetch_page` calls, for cache-hit assertions.
    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetch_count)
    }
}

/// Builds a minimal plausible raw candidate for tests.
pub fn candidate(platform: Platform, n: usize) -> RawCandidate {
    RawCandidate {
        title: Some(format!("Engineer {n}")),
        company: Some(format!("Company {n}")),
        location: Some("Melbourne VIC".to_string()),
        description: Some("Build and run services.".to_string()),
        full_description: None,
        url: Some(format!("https://{}.example/job/{n}", platform.as_str())),
        salary: None,
        job_type: None,
        posted_date: Some("2d ago".to_string()),
        requirements: Vec::new(),
        benefits: Vec::new(),
        tags: Vec::new(),
        source: ApplySource::Platform,
    }
}

#[async_trait]
impl SourceAdapter for MockAdapter {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_page(
        &self,
        _query: &SearchQuery,
        page: usize,
    ) -> Result<FetchedPage, AdapterError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        let behavior = self.behavior.lock().clone();
        match behavior {
            MockBehavior::Yield(candidates) => {
                if page == 1 {
                    Ok(FetchedPage {
                        candidates,
                        has_more: false,
                    })
                } else {
                    Ok(FetchedPage::default())
                }
            }
            MockBehavior::Challenge => Err(AdapterError::Challenge {
                platform: self.platform,
            }),
            MockBehavior::Hang(delay) => {
                tokio::time::sleep(delay).await;
                Ok(FetchedPage::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> SearchQuery {
        SearchQuery {
            title: "Engineer".to_string(),
            location: "Melbourne".to_string(),
            skills: vec![],
            seniority: String::new(),
            open_to_relocate: false,
            career_priorities: vec![],
            page: 1,
            limit: 15,
        }
    }

    #[tokio::test]
    async fn test_yielding_adapter_counts_fetches() {
        let adapter = MockAdapter::yielding(
            Platform::Seek,
            vec![candidate(Platform::Seek, 1), candidate(Platform::Seek, 2)],
        );
        let counter = adapter.fetch_counter();

        let fetched = adapter.fetch_up_to(&query(), 10).await.expect("yields");
        assert_eq!(fetched.len(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_up_to_truncates() {
        let adapter = MockAdapter::yielding(
            Platform::Jora,
            (0..8).map(|n| candidate(Platform::Jora, n)).collect(),
        );

        let fetched = adapter.fetch_up_to(&query(), 5).await.expect("yields");
        assert_eq!(fetched.len(), 5);
    }

    #[tokio::test]
    async fn test_challenging_adapter_errors() {
        let adapter = MockAdapter::challenging(Platform::Indeed);
        let err = adapter.fetch_up_to(&query(), 10).await.unwrap_err();
        assert!(matches!(err, AdapterError::Challenge { platform: Platform::Indeed }));
    }
}
