//! Canonical data model shared across the pipeline.

use serde::{Deserialize, Serialize};

/// External listing platforms the aggregator can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Seek,
    Indeed,
    LinkedIn,
    Jora,
    Adzuna,
}

impl Platform {
    /// All platforms, in the order adapters are configured by default.
    pub const ALL: [Platform; 5] = [
        Platform::Seek,
        Platform::Indeed,
        Platform::LinkedIn,
        Platform::Jora,
        Platform::Adzuna,
    ];

    /// Lowercase tag used in posting ids and log fields.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Seek => "seek",
            Platform::Indeed => "indeed",
            Platform::LinkedIn => "linkedin",
            Platform::Jora => "jora",
            Platform::Adzuna => "adzuna",
        }
    }

}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the apply link ultimately lands.
///
/// `CompanySite` means the adapter resolved an external application URL from
/// the detail view; `Platform` means the link stays on the listing site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplySource {
    Platform,
    CompanySite,
}

impl Default for ApplySource {
    fn default() -> Self {
        ApplySource::Platform
    }
}

/// A loosely-shaped candidate as extracted from a listing page, before
/// normalization. Every field is optional; the normalizer decides survival.
#[derive(Debug, Clone, Default)]
pub struct RawCandidate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub url: Option<String>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub posted_date: Option<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub tags: Vec<String>,
    pub source: ApplySource,
}

/// Canonical normalized job posting.
///
/// Created by the normalizer, enriched in place by the relevance scorer, and
/// persisted only inside a cache entry. `platform` never changes after
/// normalization; `match_score` is always in `0..=100` once set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    /// Deterministic BLAKE3 hash of platform + title + company + location.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub benefits: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    /// Display string as scraped ("3d ago", "2024-05-01", ...). Parsed only
    /// best-effort by the recency filter, never rewritten.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    pub platform: Platform,
    pub url: String,
    pub source: ApplySource,

    // Enrichment fields, absent until the scorer has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_analysis: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub match_highlights: Vec<String>,
}

impl Posting {
    /// Returns `true` once the scorer has attached a score.
    #[inline]
    pub fn is_scored(&self) -> bool {
        self.match_score.is_some()
    }
}

/// Immutable parameters of one aggregation run.
///
/// Passed unchanged to every adapter and to the scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub location: String,
    pub skills: Vec<String>,
    pub seniority: String,
    pub open_to_relocate: bool,
    pub career_priorities: Vec<String>,
    /// 1-based page number.
    pub page: usize,
    /// Postings per page, > 0.
    pub limit: usize,
}

impl SearchQuery {
    /// Cache key for this query: `(title, location, skills)` only.
    pub fn cache_key(&self) -> [u8; 32] {
        crate::hashing::search_key(&self.title, &self.location, &self.skills)
    }
}

/// Requester profile consumed by the relevance scorer.
///
/// Only the fields the persona classifier and prompt actually read; resume
/// parsing and the rest of the profile surface live outside this service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub seniority: String,
    #[serde(default)]
    pub open_to_relocate: bool,
    #[serde(default)]
    pub career_priorities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_position: Option<String>,
}

/// One page of merged, scored results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub jobs: Vec<Posting>,
    /// Total postings in the merged set (all pages).
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl SearchResponse {
    /// Slices a page out of a full merged set.
    pub fn paginate(postings: &[Posting], page: usize, limit: usize) -> Self {
        let total = postings.len();
        let total_pages = total.div_ceil(limit.max(1));
        let start = (page.saturating_sub(1)) * limit;
        let end = (start + limit).min(total);
        let jobs = if start < total {
            postings[start..end].to_vec()
        } else {
            Vec::new()
        };

        Self {
            jobs,
            total,
            page,
            total_pages,
        }
    }
}
