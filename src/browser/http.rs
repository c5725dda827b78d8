//! reqwest-backed page fetcher.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{BrowserClient, BrowserError, PageSnapshot};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Plain HTTP fetcher with browser-like headers.
///
/// Carries an optional pre-authenticated session cookie for sources that
/// gate listings behind a login.
#[derive(Clone)]
pub struct HttpBrowser {
    client: reqwest::Client,
    session_cookie: Option<String>,
}

impl HttpBrowser {
    pub fn new(
        request_timeout: Duration,
        session_cookie: Option<String>,
    ) -> Result<Self, BrowserError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| BrowserError::RequestFailed {
                url: String::new(),
                source: e,
            })?;

        Ok(Self {
            client,
            session_cookie,
        })
    }
}

#[async_trait]
impl BrowserClient for HttpBrowser {
    async fn navigate(&self, url: &str) -> Result<PageSnapshot, BrowserError> {
        debug!(url, "fetching page");

        let mut request = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-AU,en;q=0.9");

        if let Some(cookie) = &self.session_cookie {
            request = request.header("Cookie", cookie.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| BrowserError::RequestFailed {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            // 403/429 from listing sites is almost always bot detection.
            if status.as_u16() == 403 || status.as_u16() == 429 {
                return Err(BrowserError::ChallengeDetected {
                    url: url.to_string(),
                });
            }
            return Err(BrowserError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| BrowserError::BodyRead {
            url: url.to_string(),
            source: e,
        })?;

        let snapshot = PageSnapshot::new(url, html);
        if snapshot.looks_like_challenge() {
            return Err(BrowserError::ChallengeDetected {
                url: url.to_string(),
            });
        }

        Ok(snapshot)
    }
}
