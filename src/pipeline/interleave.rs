//! Round-robin platform interleaving.

use std::collections::BTreeMap;

use crate::model::{Platform, Posting};

/// Postings taken from each platform per round-robin turn.
pub const INTERLEAVE_BATCH: usize = 5;

/// Hard cap on the merged result set.
pub const GLOBAL_CAP: usize = 200;

/// Merges per-platform postings into one fair ordering.
///
/// Platforms take turns contributing up to [`INTERLEAVE_BATCH`] postings,
/// preserving each platform's internal order, until every platform is
/// exhausted or [`GLOBAL_CAP`] is reached. With N platforms each holding at
/// least a full batch, the first N*batch entries contain exactly one batch
/// per platform.
pub fn interleave(postings: Vec<Posting>) -> Vec<Posting> {
    // BTreeMap keyed by platform order keeps rotation deterministic.
    let mut by_platform: BTreeMap<usize, Vec<Posting>> = BTreeMap::new();
    for posting in postings {
        let rank = Platform::ALL
            .iter()
            .position(|p| *p == posting.platform)
            .unwrap_or(Platform::ALL.len());
        by_platform.entry(rank).or_default().push(posting);
    }

    let mut queues: Vec<std::vec::IntoIter<Posting>> =
        by_platform.into_values().map(Vec::into_iter).collect();

    let mut merged = Vec::new();
    while !queues.is_empty() && merged.len() < GLOBAL_CAP {
        let mut exhausted = Vec::new();

        for (idx, queue) in queues.iter_mut().enumerate() {
            let mut taken = 0;
            while taken < INTERLEAVE_BATCH && merged.len() < GLOBAL_CAP {
                match queue.next() {
                    Some(posting) => {
                        merged.push(posting);
                        taken += 1;
                    }
                    None => break,
                }
            }
            if queue.len() == 0 {
                exhausted.push(idx);
            }
        }

        for idx in exhausted.into_iter().rev() {
            queues.remove(idx);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplySource, Posting};

    fn posting(platform: Platform, n: usize) -> Posting {
        Posting {
            id: format!("{}-{n}", platform.as_str()),
            title: format!("Job {n}"),
            company: "Acme".to_string(),
            location: "Melbourne".to_string(),
            description: None,
            full_description: None,
            requirements: vec![],
            benefits: vec![],
            tags: vec![],
            salary: None,
            job_type: None,
            posted_date: None,
            platform,
            url: "https://example.com".to_string(),
            source: ApplySource::Platform,
            summary: None,
            detailed_summary: None,
            match_score: None,
            match_analysis: None,
            match_highlights: vec![],
        }
    }

    fn stock(platform: Platform, count: usize) -> Vec<Posting> {
        (0..count).map(|n| posting(platform, n)).collect()
    }

    #[test]
    fn test_first_window_is_fair() {
        let mut input = Vec::new();
        input.extend(stock(Platform::Seek, 10));
        input.extend(stock(Platform::Indeed, 10));
        input.extend(stock(Platform::Jora, 10));

        let merged = interleave(input);
        assert_eq!(merged.len(), 30);

        let first_window = &merged[..15];
        for platform in [Platform::Seek, Platform::Indeed, Platform::Jora] {
            let count = first_window.iter().filter(|p| p.platform == platform).count();
            assert_eq!(count, INTERLEAVE_BATCH, "unfair share for {platform}");
        }
    }

    #[test]
    fn test_no_run_longer_than_batch_while_others_remain() {
        let mut input = Vec::new();
        input.extend(stock(Platform::Seek, 20));
        input.extend(stock(Platform::Indeed, 20));

        let merged = interleave(input);
        let mut run = 1;
        for pair in merged.windows(2) {
            if pair[0].platform == pair[1].platform {
                run += 1;
                assert!(run <= INTERLEAVE_BATCH, "run of {run} for {}", pair[0].platform);
            } else {
                run = 1;
            }
        }
    }

    #[test]
    fn test_platform_internal_order_preserved() {
        let merged = interleave(stock(Platform::Seek, 12));
        let ids: Vec<_> = merged.iter().map(|p| p.id.clone()).collect();
        let expected: Vec<_> = (0..12).map(|n| format!("seek-{n}")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_uneven_platforms_drain_cleanly() {
        let mut input = Vec::new();
        input.extend(stock(Platform::Seek, 3));
        input.extend(stock(Platform::Indeed, 12));

        let merged = interleave(input);
        assert_eq!(merged.len(), 15);
        // Seek contributes its 3 and drops out; Indeed fills the rest.
        assert_eq!(merged.iter().filter(|p| p.platform == Platform::Seek).count(), 3);
    }

    #[test]
    fn test_global_cap() {
        let mut input = Vec::new();
        for platform in Platform::ALL {
            input.extend(stock(platform, 60));
        }

        let merged = interleave(input);
        assert_eq!(merged.len(), GLOBAL_CAP);
    }
}
