//! Profile-driven scrape adapter.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::AdapterError;
use super::profile::PlatformProfile;
use super::{FetchedPage, SourceAdapter};
use crate::browser::{BrowserClient, BrowserError, PageSnapshot};
use crate::model::{ApplySource, Platform, RawCandidate, SearchQuery};

/// Scrapes one platform according to its [`PlatformProfile`].
///
/// Detail views are resolved serially, one candidate at a time, so a single
/// search never hammers a platform with parallel requests.
pub struct ScrapeAdapter {
    profile: PlatformProfile,
    browser: Arc<dyn BrowserClient>,
    detail_timeout: Duration,
    /// Max detail views resolved per results page. Zero disables resolution.
    detail_limit: usize,
}

impl ScrapeAdapter {
    pub fn new(
        platform: Platform,
        browser: Arc<dyn BrowserClient>,
        detail_timeout: Duration,
        detail_limit: usize,
    ) -> Self {
        Self {
            profile: PlatformProfile::for_platform(platform),
            browser,
            detail_timeout,
            detail_limit,
        }
    }

    fn map_navigation_error(&self, source: BrowserError) -> AdapterError {
        match source {
            BrowserError::ChallengeDetected { .. } => AdapterError::Challenge {
                platform: self.profile.platform,
            },
            other => AdapterError::Navigation {
                platform: self.profile.platform,
                source: other,
            },
        }
    }

    /// Finds result cards, trying each selector generation in order.
    fn find_cards(&self, page: &PageSnapshot) -> Vec<crate::browser::ElementData> {
        for selector in self.profile.card_selectors {
            if let Ok(cards) = page.select(selector) {
                if !cards.is_empty() {
                    return cards;
                }
            }
        }
        Vec::new()
    }

    /// Extracts one candidate from a card fragment. `None` means skip: the
    /// card is sponsored or too broken to identify.
    fn extract_candidate(&self, card: &PageSnapshot) -> Option<RawCandidate> {
        if let Some(marker) = self.profile.sponsored_marker {
            match card.select(marker) {
                Ok(matches) if !matches.is_empty() => {
                    debug!(platform = %self.profile.platform, "skipping sponsored card");
                    return None;
                }
                _ => {}
            }
        }

        let title = self.first_text(card, self.profile.title_selectors);
        let url = card
            .select_first(self.profile.link_selectors)
            .ok()
            .flatten()
            .and_then(|link| link.attr("href").map(str::to_string))
            .and_then(|href| self.profile.absolutize(&href));

        // A card we cannot title or link to is not actionable.
        let (Some(_), Some(_)) = (&title, &url) else {
            debug!(platform = %self.profile.platform, "skipping unextractable card");
            return None;
        };

        Some(RawCandidate {
            title,
            company: self.first_text(card, self.profile.company_selectors),
            location: self.first_text(card, self.profile.location_selectors),
            description: self.first_text(card, self.profile.description_selectors),
            full_description: None,
            url,
            salary: self.first_text(card, self.profile.salary_selectors),
            job_type: self.first_text(card, self.profile.job_type_selectors),
            posted_date: self.first_text(card, self.profile.posted_date_selectors),
            requirements: Vec::new(),
            benefits: Vec::new(),
            tags: self.collect_tags(card),
            source: ApplySource::Platform,
        })
    }

    fn first_text(&self, card: &PageSnapshot, selectors: &[&str]) -> Option<String> {
        card.select_first(selectors)
            .ok()
            .flatten()
            .map(|e| e.text)
            .filter(|t| !t.is_empty())
    }

    fn collect_tags(&self, card: &PageSnapshot) -> Vec<String> {
        for selector in self.profile.tag_selectors {
            if let Ok(matches) = card.select(selector) {
                let tags: Vec<String> = matches
                    .into_iter()
                    .map(|e| e.text)
                    .filter(|t| !t.is_empty())
                    .collect();
                if !tags.is_empty() {
                    return tags;
                }
            }
        }
        Vec::new()
    }

    /// Visits detail views serially, upgrading `url`/`source` when an
    /// external apply link exists. Failures leave the listing URL in place.
    async fn resolve_details(&self, candidates: &mut [RawCandidate]) {
        if self.detail_limit == 0 || self.profile.apply_link_selectors.is_empty() {
            return;
        }

        for candidate in candidates.iter_mut().take(self.detail_limit) {
            let Some(listing_url) = candidate.url.clone() else {
                continue;
            };

            let navigation =
                tokio::time::timeout(self.detail_timeout, self.browser.navigate(&listing_url))
                    .await;

            let detail = match navigation {
                Ok(Ok(page)) => page,
                Ok(Err(BrowserError::ChallengeDetected { .. })) => {
                    // Details are an enrichment; the listing data stands.
                    warn!(
                        platform = %self.profile.platform,
                        "challenge on detail view, skipping remaining detail resolution"
                    );
                    return;
                }
                Ok(Err(e)) => {
                    debug!(platform = %self.profile.platform, error = %e, "detail fetch failed");
                    continue;
                }
                Err(_) => {
                    debug!(platform = %self.profile.platform, "detail fetch timed out");
                    continue;
                }
            };

            if candidate.full_description.is_none() {
                candidate.full_description =
                    self.first_text(&detail, self.profile.full_description_selectors);
            }

            let apply_url = detail
                .select_first(self.profile.apply_link_selectors)
                .ok()
                .flatten()
                .and_then(|e| e.attr("href").map(str::to_string))
                .and_then(|href| self.profile.absolutize(&href));

            if let Some(apply_url) = apply_url {
                if self.profile.is_external(&apply_url) {
                    candidate.url = Some(apply_url);
                    candidate.source = ApplySource::CompanySite;
                }
            }
        }
    }
}

#[async_trait]
impl SourceAdapter for ScrapeAdapter {
    fn platform(&self) -> Platform {
        self.profile.platform
    }

    #[instrument(skip(self, query), fields(platform = %self.profile.platform, page))]
    async fn fetch_page(
        &self,
        query: &SearchQuery,
        page: usize,
    ) -> Result<FetchedPage, AdapterError> {
        let url = self.profile.search_url(query, page)?;

        let snapshot = self
            .browser
            .navigate(url.as_str())
            .await
            .map_err(|e| self.map_navigation_error(e))?;

        let cards = self.find_cards(&snapshot);
        let card_count = cards.len();

        let mut candidates: Vec<RawCandidate> = cards
            .into_iter()
            .filter_map(|card| {
                let fragment = PageSnapshot::new(snapshot.url(), card.html);
                self.extract_candidate(&fragment)
            })
            .collect();

        self.resolve_details(&mut candidates).await;

        debug!(
            platform = %self.profile.platform,
            cards = card_count,
            extracted = candidates.len(),
            "scraped results page"
        );

        // A short page means the platform ran out of listings.
        Ok(FetchedPage {
            has_more: card_count >= self.profile.page_size,
            candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::MockBrowser;

    const SEEK_URL: &str = "https://www.seek.com.au/software-engineer-jobs/in-melbourne";

    fn seek_card(n: usize, extra: &str) -> String {
        format!(
            r#"<article data-automation="normalJob">
                 <a data-automation="jobTitle" href="/job/{n}">Engineer {n}</a>
                 <span data-automation="jobCompany">Acme {n}</span>
                 <span data-automation="jobLocation">Melbourne VIC</span>
                 <span data-automation="jobShortDescription">Build things.</span>
                 <span data-automation="jobListingDate">3d ago</span>
                 {extra}
               </article>"#
        )
    }

    fn query() -> SearchQuery {
        SearchQuery {
            title: "Software Engineer".to_string(),
            location: "Melbourne".to_string(),
            skills: vec![],
            seniority: "Senior".to_string(),
            open_to_relocate: false,
            career_priorities: vec![],
            page: 1,
            limit: 15,
        }
    }

    fn adapter(browser: MockBrowser, detail_limit: usize) -> ScrapeAdapter {
        ScrapeAdapter::new(
            Platform::Seek,
            Arc::new(browser),
            Duration::from_secs(1),
            detail_limit,
        )
    }

    #[tokio::test]
    async fn test_extracts_candidates_from_cards() {
        let browser = MockBrowser::new();
        let html = format!("<html><body>{}{}</body></html>", seek_card(1, ""), seek_card(2, ""));
        browser.script_page(SEEK_URL, html);

        let page = adapter(browser, 0)
            .fetch_page(&query(), 1)
            .await
            .expect("scripted page");

        assert_eq!(page.candidates.len(), 2);
        assert_eq!(page.candidates[0].title.as_deref(), Some("Engineer 1"));
        assert_eq!(page.candidates[0].company.as_deref(), Some("Acme 1"));
        assert_eq!(
            page.candidates[0].url.as_deref(),
            Some("https://www.seek.com.au/job/1")
        );
        assert_eq!(page.candidates[0].posted_date.as_deref(), Some("3d ago"));
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_skips_sponsored_cards() {
        let browser = MockBrowser::new();
        let html = format!(
            "<html><body>{}{}</body></html>",
            seek_card(1, r#"<span data-automation="jobPremium">Promoted</span>"#),
            seek_card(2, "")
        );
        browser.script_page(SEEK_URL, html);

        let page = adapter(browser, 0)
            .fetch_page(&query(), 1)
            .await
            .expect("scripted page");

        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].title.as_deref(), Some("Engineer 2"));
    }

    #[tokio::test]
    async fn test_skips_card_without_title_or_link() {
        let browser = MockBrowser::new();
        let html = format!(
            r#"<html><body>
                 <article data-automation="normalJob"><span>not a job</span></article>
                 {}
               </body></html>"#,
            seek_card(1, "")
        );
        browser.script_page(SEEK_URL, html);

        let page = adapter(browser, 0)
            .fetch_page(&query(), 1)
            .await
            .expect("scripted page");

        assert_eq!(page.candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_challenge_aborts_adapter() {
        let browser = MockBrowser::new();
        browser.script_challenge(SEEK_URL);

        let err = adapter(browser, 0).fetch_page(&query(), 1).await.unwrap_err();
        assert!(matches!(err, AdapterError::Challenge { platform: Platform::Seek }));
    }

    #[tokio::test]
    async fn test_detail_resolution_classifies_external_apply() {
        let browser = MockBrowser::new();
        browser.script_page(
            SEEK_URL,
            format!("<html><body>{}</body></html>", seek_card(1, "")),
        );
        browser.script_page(
            "https://www.seek.com.au/job/1",
            r#"<html><body>
                 <a data-automation="job-detail-apply" href="https://careers.acme.com/apply/1">Apply</a>
                 <div data-automation="jobAdDetails">Long form description.</div>
               </body></html>"#,
        );

        let page = adapter(browser, 10)
            .fetch_page(&query(), 1)
            .await
            .expect("scripted pages");

        let candidate = &page.candidates[0];
        assert_eq!(candidate.source, ApplySource::CompanySite);
        assert_eq!(candidate.url.as_deref(), Some("https://careers.acme.com/apply/1"));
        assert_eq!(
            candidate.full_description.as_deref(),
            Some("Long form description.")
        );
    }

    #[tokio::test]
    async fn test_detail_failure_keeps_listing_url() {
        let browser = MockBrowser::new();
        browser.script_page(
            SEEK_URL,
            format!("<html><body>{}</body></html>", seek_card(1, "")),
        );
        // Detail page deliberately not scripted.

        let page = adapter(browser, 10)
            .fetch_page(&query(), 1)
            .await
            .expect("scripted page");

        let candidate = &page.candidates[0];
        assert_eq!(candidate.source, ApplySource::Platform);
        assert_eq!(candidate.url.as_deref(), Some("https://www.seek.com.au/job/1"));
    }

    #[tokio::test]
    async fn test_platform_apply_link_stays_platform_sourced() {
        let browser = MockBrowser::new();
        browser.script_page(
            SEEK_URL,
            format!("<html><body>{}</body></html>", seek_card(1, "")),
        );
        browser.script_page(
            "https://www.seek.com.au/job/1",
            r#"<a data-automation="job-detail-apply" href="/job/1/apply">Quick apply</a>"#,
        );

        let page = adapter(browser, 10)
            .fetch_page(&query(), 1)
            .await
            .expect("scripted pages");

        let candidate = &page.candidates[0];
        assert_eq!(candidate.source, ApplySource::Platform);
        assert_eq!(candidate.url.as_deref(), Some("https://www.seek.com.au/job/1"));
    }
}
