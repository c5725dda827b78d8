//! Concurrent relevance scorer.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::client::CompletionClient;
use super::parser::parse_assessment;
use super::persona::{Persona, classify};
use super::prompt::{SYSTEM_INSTRUCTIONS, build_prompt};
use crate::model::{Posting, SeekerProfile};

/// Score applied when the completion call fails entirely.
pub const FALLBACK_SCORE: u8 = 70;

/// Score applied when the reply parsed but carried no `Score:` header.
pub const DEFAULT_PARSED_SCORE: u8 = 75;

const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable.";

/// Scores a batch of postings against a seeker profile.
///
/// Every posting leaves scored: either from the completion reply or from the
/// deterministic fallback. One posting's failure never affects the batch.
pub struct RelevanceScorer {
    client: Arc<dyn CompletionClient>,
    model: String,
    call_timeout: Duration,
}

impl RelevanceScorer {
    pub fn new(client: Arc<dyn CompletionClient>, model: String, call_timeout: Duration) -> Self {
        Self {
            client,
            model,
            call_timeout,
        }
    }

    /// Scores all postings concurrently, each call under its own timeout.
    #[instrument(skip_all, fields(postings = postings.len()))]
    pub async fn score_batch(
        &self,
        postings: Vec<Posting>,
        profile: &SeekerProfile,
    ) -> Vec<Posting> {
        let persona = classify(profile);
        debug!(?persona, "scoring batch");

        let futures = postings
            .into_iter()
            .map(|posting| self.score_one(posting, profile, persona));

        join_all(futures).await
    }

    async fn score_one(
        &self,
        mut posting: Posting,
        profile: &SeekerProfile,
        persona: Persona,
    ) -> Posting {
        let prompt = build_prompt(&posting, profile, persona);

        let reply = tokio::time::timeout(
            self.call_timeout,
            self.client.complete(&self.model, SYSTEM_INSTRUCTIONS, &prompt),
        )
        .await;

        match reply {
            Ok(Ok(text)) => apply_reply(&mut posting, &text),
            Ok(Err(e)) => {
                warn!(posting = %posting.id, error = %e, "completion failed, using fallback");
                apply_fallback(&mut posting);
            }
            Err(_) => {
                warn!(posting = %posting.id, "completion timed out, using fallback");
                apply_fallback(&mut posting);
            }
        }

        posting
    }
}

fn apply_reply(posting: &mut Posting, text: &str) {
    let parsed = parse_assessment(text);

    posting.match_score = Some(parsed.score.unwrap_or(DEFAULT_PARSED_SCORE));
    posting.match_highlights = parsed.highlights;
    posting.summary = Some(
        parsed
            .list_summary
            .unwrap_or_else(|| synthesized_summary(posting)),
    );
    posting.detailed_summary = parsed.detailed_summary;
    posting.match_analysis = Some(
        parsed
            .analysis
            .unwrap_or_else(|| ANALYSIS_UNAVAILABLE.to_string()),
    );
}

/// Deterministic enrichment used when no completion reply is available.
pub fn apply_fallback(posting: &mut Posting) {
    posting.match_score = Some(FALLBACK_SCORE);
    posting.match_highlights = Vec::new();
    posting.summary = Some(synthesized_summary(posting));
    posting.detailed_summary = None;
    posting.match_analysis = Some(ANALYSIS_UNAVAILABLE.to_string());
}

fn synthesized_summary(posting: &Posting) -> String {
    format!(
        "{} position at {} in {}.",
        posting.title, posting.company, posting.location
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplySource, Platform};
    use crate::scoring::mock::MockCompletionClient;

    fn posting(n: usize) -> Posting {
        Posting {
            id: format!("id-{n}"),
            title: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Melbourne VIC".to_string(),
            description: Some("Build things.".to_string()),
            full_description: None,
            requirements: vec![],
            benefits: vec![],
            tags: vec![],
            salary: None,
            job_type: None,
            posted_date: None,
            platform: Platform::Seek,
            url: "https://example.com".to_string(),
            source: ApplySource::Platform,
            summary: None,
            detailed_summary: None,
            match_score: None,
            match_analysis: None,
            match_highlights: vec![],
        }
    }

    fn scorer(client: MockCompletionClient) -> RelevanceScorer {
        RelevanceScorer::new(Arc::new(client), "test-model".to_string(), Duration::from_millis(200))
    }

    const REPLY: &str = "Score: 88\n\nHighlights:\n\u{2022} Skills align\n\nList Summary:\nAcme seeking Software Engineer in Melbourne.\n\nDetailed Summary:\nWho we are:\nAcme.\n\nAnalysis:\nGood match.";

    #[tokio::test]
    async fn test_scores_from_reply() {
        let scored = scorer(MockCompletionClient::replying(REPLY))
            .score_batch(vec![posting(1)], &SeekerProfile::default())
            .await;

        let p = &scored[0];
        assert_eq!(p.match_score, Some(88));
        assert_eq!(p.match_highlights, vec!["Skills align".to_string()]);
        assert_eq!(p.summary.as_deref(), Some("Acme seeking Software Engineer in Melbourne."));
        assert_eq!(p.match_analysis.as_deref(), Some("Good match."));
    }

    #[tokio::test]
    async fn test_failure_gets_deterministic_fallback() {
        let scored = scorer(MockCompletionClient::failing())
            .score_batch(vec![posting(1)], &SeekerProfile::default())
            .await;

        let p = &scored[0];
        assert_eq!(p.match_score, Some(FALLBACK_SCORE));
        assert_eq!(
            p.summary.as_deref(),
            Some("Software Engineer position at Acme in Melbourne VIC.")
        );
        assert_eq!(p.match_analysis.as_deref(), Some("Analysis unavailable."));
    }

    #[tokio::test]
    async fn test_timeout_gets_fallback() {
        let scored = scorer(MockCompletionClient::hanging(Duration::from_secs(5)))
            .score_batch(vec![posting(1)], &SeekerProfile::default())
            .await;

        assert_eq!(scored[0].match_score, Some(FALLBACK_SCORE));
    }

    #[tokio::test]
    async fn test_reply_without_score_uses_default() {
        let scored = scorer(MockCompletionClient::replying("List Summary:\nSomething."))
            .score_batch(vec![posting(1)], &SeekerProfile::default())
            .await;

        assert_eq!(scored[0].match_score, Some(DEFAULT_PARSED_SCORE));
        assert_eq!(scored[0].match_analysis.as_deref(), Some("Analysis unavailable."));
    }

    #[tokio::test]
    async fn test_every_posting_in_batch_ends_scored() {
        let scored = scorer(MockCompletionClient::replying(REPLY))
            .score_batch((0..8).map(posting).collect(), &SeekerProfile::default())
            .await;

        assert_eq!(scored.len(), 8);
        assert!(scored.iter().all(|p| p.is_scored()));
        assert!(scored.iter().all(|p| p.match_score.unwrap() <= 100));
    }
}
