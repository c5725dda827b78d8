//! Per-platform listing adapters.
//!
//! One generic [`ScrapeAdapter`] does the work; platforms differ only in the
//! [`PlatformProfile`] data that drives it.

pub mod error;
pub mod profile;
pub mod scrape;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::AdapterError;
pub use profile::PlatformProfile;
pub use scrape::ScrapeAdapter;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockAdapter;

use async_trait::async_trait;

use crate::model::{Platform, RawCandidate, SearchQuery};

/// One results page worth of raw candidates.
#[derive(Debug, Default)]
pub struct FetchedPage {
    pub candidates: Vec<RawCandidate>,
    /// Whether the platform appears to have further pages.
    pub has_more: bool,
}

/// Fetches raw candidates from one listing platform.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    /// Fetches one results page (1-based `page`).
    async fn fetch_page(
        &self,
        query: &SearchQuery,
        page: usize,
    ) -> Result<FetchedPage, AdapterError>;

    /// Walks result pages until `limit` candidates are gathered or the
    /// platform runs out.
    async fn fetch_up_to(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RawCandidate>, AdapterError> {
        let mut collected = Vec::new();
        let mut page = 1;

        loop {
            let fetched = self.fetch_page(query, page).await?;
            let empty = fetched.candidates.is_empty();
            collected.extend(fetched.candidates);

            if collected.len() >= limit || !fetched.has_more || empty {
                break;
            }
            page += 1;
        }

        collected.truncate(limit);
        Ok(collected)
    }
}
