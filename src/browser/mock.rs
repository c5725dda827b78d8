//! Scripted browser for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{BrowserClient, BrowserError, PageSnapshot};

/// In-memory browser that serves pre-scripted HTML per URL.
///
/// Unknown URLs return [`BrowserError::PageNotScripted`]; URLs scripted as
/// challenges return [`BrowserError::ChallengeDetected`].
#[derive(Clone, Default)]
pub struct MockBrowser {
    pages: Arc<Mutex<HashMap<String, String>>>,
    challenge_urls: Arc<Mutex<Vec<String>>>,
    navigate_count: Arc<AtomicUsize>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `html` to be served for `url`.
    pub fn script_page(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.lock().insert(url.into(), html.into());
    }

    /// Scripts `url` to answer with a challenge page.
    pub fn script_challenge(&self, url: impl Into<String>) {
        self.challenge_urls.lock().push(url.into());
    }

    /// Number of `navigate` calls made so far.
    pub fn navigate_count(&self) -> usize {
        self.navigate_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserClient for MockBrowser {
    async fn navigate(&self, url: &str) -> Result<PageSnapshot, BrowserError> {
        self.navigate_count.fetch_add(1, Ordering::SeqCst);

        if self.challenge_urls.lock().iter().any(|u| u == url) {
            return Err(BrowserError::ChallengeDetected {
                url: url.to_string(),
            });
        }

        let html = self
            .pages
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| BrowserError::PageNotScripted {
                url: url.to_string(),
            })?;

        Ok(PageSnapshot::new(url, html))
    }
}
