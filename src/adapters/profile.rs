//! Per-platform scraping profiles.
//!
//! Each platform differs only in data: where the search lives, how results
//! are marked up, and which detail-view elements expose the real apply link.
//! The [`ScrapeAdapter`](super::ScrapeAdapter) is generic over this.
//!
//! Listing sites rotate their markup, so every field carries a list of
//! selector generations tried in order.

use url::Url;

use super::error::AdapterError;
use crate::model::{Platform, SearchQuery};

/// Selector tables and URL rules for one listing platform.
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    pub platform: Platform,
    /// Base used to absolutize relative hrefs.
    pub base_url: &'static str,
    /// One result card.
    pub card_selectors: &'static [&'static str],
    pub title_selectors: &'static [&'static str],
    pub company_selectors: &'static [&'static str],
    pub location_selectors: &'static [&'static str],
    pub description_selectors: &'static [&'static str],
    /// Anchor carrying the listing href.
    pub link_selectors: &'static [&'static str],
    pub salary_selectors: &'static [&'static str],
    pub job_type_selectors: &'static [&'static str],
    pub posted_date_selectors: &'static [&'static str],
    pub tag_selectors: &'static [&'static str],
    /// Matches inside a card only when the card is a paid placement.
    pub sponsored_marker: Option<&'static str>,
    /// Detail view: anchor whose href is the external application URL.
    pub apply_link_selectors: &'static [&'static str],
    /// Detail view: full job description body.
    pub full_description_selectors: &'static [&'static str],
    /// Approximate cards per results page, used to guess `has_more`.
    pub page_size: usize,
}

impl PlatformProfile {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Seek => SEEK,
            Platform::Indeed => INDEED,
            Platform::LinkedIn => LINKEDIN,
            Platform::Jora => JORA,
            Platform::Adzuna => ADZUNA,
        }
    }

    /// Builds the search URL for `query` at 1-based `page`.
    pub fn search_url(&self, query: &SearchQuery, page: usize) -> Result<Url, AdapterError> {
        let start = page.saturating_sub(1);
        let result = match self.platform {
            Platform::Seek => {
                // Seek encodes the search in the path, not the query string.
                let path = format!(
                    "https://www.seek.com.au/{}-jobs/in-{}",
                    slug(&query.title),
                    slug(&query.location)
                );
                Url::parse(&path).map(|mut url| {
                    if page > 1 {
                        url.query_pairs_mut().append_pair("page", &page.to_string());
                    }
                    url
                })
            }
            Platform::Indeed => Url::parse("https://au.indeed.com/jobs").map(|mut url| {
                url.query_pairs_mut()
                    .append_pair("q", &query.title)
                    .append_pair("l", &query.location)
                    .append_pair("start", &(start * self.page_size).to_string());
                url
            }),
            Platform::LinkedIn => {
                Url::parse("https://www.linkedin.com/jobs/search/").map(|mut url| {
                    url.query_pairs_mut()
                        .append_pair("keywords", &query.title)
                        .append_pair("location", &query.location)
                        .append_pair("start", &(start * self.page_size).to_string());
                    url
                })
            }
            Platform::Jora => Url::parse("https://au.jora.com/j").map(|mut url| {
                url.query_pairs_mut()
                    .append_pair("q", &query.title)
                    .append_pair("l", &query.location)
                    .append_pair("p", &page.to_string());
                url
            }),
            Platform::Adzuna => Url::parse("https://www.adzuna.com.au/search").map(|mut url| {
                url.query_pairs_mut()
                    .append_pair("q", &query.title)
                    .append_pair("w", &query.location)
                    .append_pair("p", &page.to_string());
                url
            }),
        };

        result.map_err(|source| AdapterError::SearchUrl {
            platform: self.platform,
            source,
        })
    }

    /// Absolutizes an href scraped from a card or detail view.
    pub fn absolutize(&self, href: &str) -> Option<String> {
        if href.is_empty() {
            return None;
        }
        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_string());
        }
        Url::parse(self.base_url)
            .ok()?
            .join(href)
            .ok()
            .map(|u| u.to_string())
    }

    /// Returns `true` when `url` leaves this platform's host.
    pub fn is_external(&self, url: &str) -> bool {
        let Some(platform_host) = Url::parse(self.base_url).ok().and_then(|u| {
            u.host_str().map(|h| h.trim_start_matches("www.").to_string())
        }) else {
            return false;
        };

        match Url::parse(url) {
            Ok(parsed) => parsed
                .host_str()
                .map(|h| {
                    let host = h.trim_start_matches("www.");
                    // Subdomains stay internal; a mere suffix match
                    // ("evilseek.com.au") does not.
                    host != platform_host && !host.ends_with(&format!(".{platform_host}"))
                })
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}

fn slug(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

const SEEK: PlatformProfile = PlatformProfile {
    platform: Platform::Seek,
    base_url: "https://www.seek.com.au",
    card_selectors: &[
        "article[data-automation='normalJob']",
        "[data-automation='searchArticle']",
    ],
    title_selectors: &["[data-automation='jobTitle']"],
    company_selectors: &["[data-automation='jobCompany']"],
    location_selectors: &["[data-automation='jobLocation']"],
    description_selectors: &["[data-automation='jobShortDescription']"],
    link_selectors: &["a[data-automation='jobTitle']"],
    salary_selectors: &["[data-automation='jobSalary']"],
    job_type_selectors: &["[data-automation='jobWorkType']"],
    posted_date_selectors: &["[data-automation='jobListingDate']"],
    tag_selectors: &["[data-automation='jobTag']"],
    sponsored_marker: Some("[data-automation='jobPremium']"),
    apply_link_selectors: &["a[data-automation='job-detail-apply']"],
    full_description_selectors: &["[data-automation='jobAdDetails']"],
    page_size: 22,
};

const INDEED: PlatformProfile = PlatformProfile {
    platform: Platform::Indeed,
    base_url: "https://au.indeed.com",
    card_selectors: &["div.job_seen_beacon", "a.tapItem", "div.slider_item"],
    title_selectors: &["a.jcs-JobTitle", "h2.jobTitle"],
    company_selectors: &["span[data-testid='company-name']", "span.companyName"],
    location_selectors: &["div[data-testid='text-location']", "div.companyLocation"],
    description_selectors: &["div[data-testid='jobsnippet_footer']", "div.job-snippet"],
    link_selectors: &["a.jcs-JobTitle", "h2.jobTitle a"],
    salary_selectors: &[
        "div.salary-snippet-container",
        "div[data-testid='attribute_snippet_testid']",
    ],
    job_type_selectors: &["div.metadata-jobtype"],
    posted_date_selectors: &["span.date", "span[data-testid='myJobsStateDate']"],
    tag_selectors: &[],
    sponsored_marker: Some("span.sponsoredGray"),
    apply_link_selectors: &["button[aria-label*='Apply on company site'] ~ a"],
    full_description_selectors: &["#jobDescriptionText"],
    page_size: 15,
};

const LINKEDIN: PlatformProfile = PlatformProfile {
    platform: Platform::LinkedIn,
    base_url: "https://www.linkedin.com",
    card_selectors: &[".jobs-search__results-list > li", "div.base-card"],
    title_selectors: &[".base-search-card__title"],
    company_selectors: &[".base-search-card__subtitle"],
    location_selectors: &[".job-search-card__location"],
    description_selectors: &[],
    link_selectors: &["a.base-card__full-link"],
    salary_selectors: &[".job-search-card__salary-info"],
    job_type_selectors: &[],
    posted_date_selectors: &["time.job-search-card__listdate", "time"],
    tag_selectors: &[],
    sponsored_marker: None,
    apply_link_selectors: &[],
    full_description_selectors: &[".show-more-less-html__markup"],
    page_size: 25,
};

const JORA: PlatformProfile = PlatformProfile {
    platform: Platform::Jora,
    base_url: "https://au.jora.com",
    card_selectors: &[".job-card", ".result-card", ".job-listing"],
    title_selectors: &[".job-title", ".title", "h3"],
    company_selectors: &[".company-name", ".company", ".job-company"],
    location_selectors: &[".location", ".job-location"],
    description_selectors: &[".job-description", ".summary", ".job-abstract"],
    link_selectors: &["a.job-link", "h3 a", "a"],
    salary_selectors: &[".salary", ".job-salary"],
    job_type_selectors: &[".work-type"],
    posted_date_selectors: &[".posted-date", ".date", ".listing-date"],
    tag_selectors: &[".job-tags .tag", ".badge"],
    sponsored_marker: Some(".sponsored-label"),
    apply_link_selectors: &[],
    full_description_selectors: &["#job-description-container"],
    page_size: 15,
};

const ADZUNA: PlatformProfile = PlatformProfile {
    platform: Platform::Adzuna,
    base_url: "https://www.adzuna.com.au",
    card_selectors: &[".search-result__job", "article[data-aid]"],
    title_selectors: &[".job-title", "h2 a"],
    company_selectors: &[".job-company", ".company"],
    location_selectors: &[".job-location", ".location"],
    description_selectors: &[".job-description", ".search-result__snippet"],
    link_selectors: &["h2 a", "a.job-link"],
    salary_selectors: &[".job-salary"],
    job_type_selectors: &[".job-contract-type"],
    posted_date_selectors: &[".job-posted", ".date"],
    tag_selectors: &[".job-tag"],
    sponsored_marker: None,
    apply_link_selectors: &["a.apply-button"],
    full_description_selectors: &[".job-detail-description"],
    page_size: 20,
};
