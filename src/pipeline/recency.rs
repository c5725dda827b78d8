//! Posting-age filter.
//!
//! Listing sites report posting dates as display strings in wildly different
//! shapes. Parsing is best-effort and the filter fails open: a date we cannot
//! read never costs a seeker a posting.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

use crate::model::Posting;

const MAX_AGE_DAYS: i64 = 30;

/// Drops postings known to be older than 30 days.
///
/// Missing or unparseable dates keep the posting.
pub fn filter_recent(postings: Vec<Posting>, now: DateTime<Utc>) -> Vec<Posting> {
    let cutoff = now - Duration::days(MAX_AGE_DAYS);
    let before = postings.len();

    let kept: Vec<Posting> = postings
        .into_iter()
        .filter(|posting| match &posting.posted_date {
            Some(raw) => match parse_posted_date(raw, now) {
                Some(posted) => posted >= cutoff,
                None => true,
            },
            None => true,
        })
        .collect();

    if kept.len() < before {
        debug!(dropped = before - kept.len(), "recency filter removed stale postings");
    }
    kept
}

/// Best-effort parse of a scraped posting-date string.
///
/// Handles ISO dates/timestamps and the common relative forms:
/// `"today"`, `"yesterday"`, `"3d ago"`, `"5 days ago"`, `"2h ago"`,
/// `"1w ago"`, `"30+ days ago"`.
pub fn parse_posted_date(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(&text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if text == "today" || text == "just posted" || text == "posted today" {
        return Some(now);
    }
    if text == "yesterday" {
        return Some(now - Duration::days(1));
    }

    // "30+ days ago" means at least 30 days. Treat as exactly the cutoff age
    // plus one so it is always filtered.
    if text.starts_with("30+") {
        return Some(now - Duration::days(MAX_AGE_DAYS + 1));
    }

    parse_relative(&text, now)
}

fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    // Strip common decoration: "posted 3 days ago" / "3d ago" / "3 days ago".
    let stripped = text
        .trim_start_matches("posted")
        .trim()
        .trim_end_matches("ago")
        .trim();

    let (number_part, unit_part) = match stripped.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) if idx > 0 => stripped.split_at(idx),
        _ => return None,
    };

    let amount: i64 = number_part.parse().ok()?;
    let unit = unit_part.trim();

    let age = if unit.starts_with("mo") {
        Duration::days(amount * 30)
    } else if unit.starts_with('h') {
        Duration::hours(amount)
    } else if unit.starts_with('d') {
        Duration::days(amount)
    } else if unit.starts_with('w') {
        Duration::weeks(amount)
    } else {
        return None;
    };

    Some(now - age)
}
