//! Page-fetching capability behind a trait.
//!
//! Adapters never touch HTTP or HTML parsing directly; they ask a
//! [`BrowserClient`] for a [`PageSnapshot`] and query it with CSS selectors.
//! The production impl is [`HttpBrowser`]; tests swap in the scripted
//! [`MockBrowser`].

pub mod error;
pub mod http;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::BrowserError;
pub use http::HttpBrowser;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockBrowser;

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;

/// One element matched by a selector, detached from the page it came from.
///
/// Snapshots own their data so adapters can hold results across awaits.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Whitespace-collapsed visible text of the element.
    pub text: String,
    /// Attribute map (`href`, `data-*`, ...).
    pub attributes: HashMap<String, String>,
    /// Outer HTML, so callers can re-query inside this element.
    pub html: String,
}

impl ElementData {
    /// Returns an attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A fully-loaded page, queryable by CSS selector.
#[derive(Debug)]
pub struct PageSnapshot {
    url: String,
    html: String,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// URL this snapshot was taken from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns every element matching `selector`, as owned data.
    pub fn select(&self, selector: &str) -> Result<Vec<ElementData>, BrowserError> {
        let parsed = Selector::parse(selector).map_err(|_| BrowserError::InvalidSelector {
            selector: selector.to_string(),
        })?;

        let document = Html::parse_document(&self.html);
        let elements = document
            .select(&parsed)
            .map(|element| {
                let text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
                let attributes = element
                    .value()
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                ElementData {
                    text,
                    attributes,
                    html: element.html(),
                }
            })
            .collect();

        Ok(elements)
    }

    /// First match for any of `selectors`, in order. Listing sites rotate
    /// their markup; adapters carry several selector generations per field.
    pub fn select_first(&self, selectors: &[&str]) -> Result<Option<ElementData>, BrowserError> {
        for selector in selectors {
            let mut matches = self.select(selector)?;
            if let Some(first) = matches.drain(..).find(|e| !e.text.is_empty()) {
                return Ok(Some(first));
            }
        }
        Ok(None)
    }

    /// Returns `true` if the page body looks like a bot challenge rather
    /// than content.
    pub fn looks_like_challenge(&self) -> bool {
        const MARKERS: [&str; 5] = [
            "captcha",
            "are you a robot",
            "verify you are human",
            "unusual traffic",
            "cf-challenge",
        ];

        let lowered = self.html.to_lowercase();
        MARKERS.iter().any(|marker| lowered.contains(marker))
    }
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fetches listing pages.
///
/// `#[async_trait]` so the orchestrator can hold adapters over different
/// browser impls as trait objects.
#[async_trait]
pub trait BrowserClient: Send + Sync {
    /// Loads `url` and returns a queryable snapshot of the resulting page.
    async fn navigate(&self, url: &str) -> Result<PageSnapshot, BrowserError>;
}
