//! Duplicate removal.

use std::collections::HashSet;

use crate::model::Posting;

/// Drops repeated postings, keeping first occurrence order.
///
/// Ids already encode the platform, so the same role listed on two platforms
/// survives as two postings; only repeats within one platform collapse.
pub fn dedup_per_platform(postings: Vec<Posting>) -> Vec<Posting> {
    let mut seen: HashSet<String> = HashSet::with_capacity(postings.len());
    postings
        .into_iter()
        .filter(|posting| seen.insert(posting.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Platform, RawCandidate};
    use crate::normalize::normalize;

    fn posting(platform: Platform, title: &str) -> Posting {
        normalize(
            RawCandidate {
                title: Some(title.to_string()),
                company: Some("Acme".to_string()),
                location: Some("Melbourne".to_string()),
                url: Some("https://example.com/job".to_string()),
                ..Default::default()
            },
            platform,
        )
        .expect("valid candidate")
    }

    #[test]
    fn test_dedup_removes_same_platform_repeats() {
        let postings = vec![
            posting(Platform::Seek, "Engineer"),
            posting(Platform::Seek, "Engineer"),
            posting(Platform::Seek, "Analyst"),
        ];

        let deduped = dedup_per_platform(postings);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "Engineer");
        assert_eq!(deduped[1].title, "Analyst");
    }

    #[test]
    fn test_dedup_keeps_cross_platform_duplicates() {
        let postings = vec![
            posting(Platform::Seek, "Engineer"),
            posting(Platform::Indeed, "Engineer"),
        ];

        assert_eq!(dedup_per_platform(postings).len(), 2);
    }

    #[test]
    fn test_dedup_preserves_order() {
        let postings = vec![
            posting(Platform::Seek, "A"),
            posting(Platform::Seek, "B"),
            posting(Platform::Seek, "A"),
            posting(Platform::Seek, "C"),
        ];

        let titles: Vec<_> = dedup_per_platform(postings)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }
}
