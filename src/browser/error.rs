//! Browser capability error types.

use thiserror::Error;

/// Errors raised while fetching or interrogating a listing page.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The page request failed at the transport level.
    #[error("failed to fetch '{url}': {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("'{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Reading the response body failed.
    #[error("failed to read body of '{url}': {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The page served a bot-detection or login challenge instead of
    /// listings. The adapter must abort its run when it sees this.
    #[error("challenge page detected at '{url}'")]
    ChallengeDetected { url: String },

    /// A selector string could not be compiled.
    #[error("invalid selector '{selector}'")]
    InvalidSelector { selector: String },

    /// Mock-only: the script has no page for this URL.
    #[error("no scripted page for '{url}'")]
    PageNotScripted { url: String },
}
