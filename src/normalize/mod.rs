//! Raw candidate → canonical posting.

use tracing::debug;

use crate::hashing;
use crate::model::{Platform, Posting, RawCandidate};

const DEFAULT_JOB_TYPE: &str = "Full-time";

/// Normalizes one raw candidate into a canonical [`Posting`].
///
/// Returns `None` when the candidate lacks a non-empty title, company, or
/// location; everything else is optional. Field content is trimmed but never
/// fabricated. Normalizing the same candidate twice yields the same id.
pub fn normalize(raw: RawCandidate, platform: Platform) -> Option<Posting> {
    let title = required(raw.title)?;
    let company = required(raw.company)?;
    let location = required(raw.location)?;
    let url = required(raw.url).or_else(|| {
        debug!(%platform, %title, "candidate has no url");
        None
    })?;

    let id = hashing::posting_id(platform.as_str(), &title, &company, &location);

    Some(Posting {
        id,
        title,
        company,
        location,
        description: optional(raw.description),
        full_description: optional(raw.full_description),
        requirements: trimmed_list(raw.requirements),
        benefits: trimmed_list(raw.benefits),
        tags: trimmed_list(raw.tags),
        salary: optional(raw.salary),
        job_type: Some(optional(raw.job_type).unwrap_or_else(|| DEFAULT_JOB_TYPE.to_string())),
        posted_date: optional(raw.posted_date),
        platform,
        url,
        source: raw.source,
        summary: None,
        detailed_summary: None,
        match_score: None,
        match_analysis: None,
        match_highlights: Vec::new(),
    })
}

fn required(field: Option<String>) -> Option<String> {
    field.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn optional(field: Option<String>) -> Option<String> {
    field.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn trimmed_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApplySource;

    fn raw() -> RawCandidate {
        RawCandidate {
            title: Some("  Software Engineer ".to_string()),
            company: Some("Acme".to_string()),
            location: Some("Melbourne VIC".to_string()),
            description: Some("Build things.".to_string()),
            url: Some("https://www.seek.com.au/job/1".to_string()),
            posted_date: Some("3d ago".to_string()),
            tags: vec![" Rust ".to_string(), "".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_trims_and_fills_defaults() {
        let posting = normalize(raw(), Platform::Seek).expect("valid candidate");

        assert_eq!(posting.title, "Software Engineer");
        assert_eq!(posting.job_type.as_deref(), Some("Full-time"));
        assert_eq!(posting.tags, vec!["Rust".to_string()]);
        assert_eq!(posting.platform, Platform::Seek);
        assert_eq!(posting.source, ApplySource::Platform);
        assert!(!posting.is_scored());
    }

    #[test]
    fn test_normalize_rejects_missing_required_fields() {
        let mut no_title = raw();
        no_title.title = None;
        assert!(normalize(no_title, Platform::Seek).is_none());

        let mut blank_company = raw();
        blank_company.company = Some("   ".to_string());
        assert!(normalize(blank_company, Platform::Seek).is_none());

        let mut no_location = raw();
        no_location.location = None;
        assert!(normalize(no_location, Platform::Seek).is_none());

        let mut no_url = raw();
        no_url.url = None;
        assert!(normalize(no_url, Platform::Seek).is_none());
    }

    #[test]
    fn test_normalize_is_idempotent_on_id() {
        let a = normalize(raw(), Platform::Seek).expect("valid");
        let b = normalize(raw(), Platform::Seek).expect("valid");
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_id_depends_on_platform() {
        let a = normalize(raw(), Platform::Seek).expect("valid");
        let b = normalize(raw(), Platform::Indeed).expect("valid");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_explicit_job_type_is_kept() {
        let mut candidate = raw();
        candidate.job_type = Some("Contract".to_string());

        let posting = normalize(candidate, Platform::Seek).expect("valid");
        assert_eq!(posting.job_type.as_deref(), Some("Contract"));
    }
}
