//! Adapter error types.

use thiserror::Error;

use crate::browser::BrowserError;
use crate::model::Platform;

/// Errors raised while fetching candidates from one platform.
///
/// Every variant is local to its adapter; the orchestrator never lets one
/// adapter's failure cancel the others.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The platform served a bot challenge. This adapter's run is over; any
    /// candidates gathered so far are discarded as untrustworthy.
    #[error("{platform} raised an anti-automation challenge")]
    Challenge { platform: Platform },

    /// Navigation to the listing page failed.
    #[error("{platform} navigation failed: {source}")]
    Navigation {
        platform: Platform,
        #[source]
        source: BrowserError,
    },

    /// The search URL could not be constructed.
    #[error("{platform} search url invalid: {source}")]
    SearchUrl {
        platform: Platform,
        #[source]
        source: url::ParseError,
    },
}

impl AdapterError {
    pub fn platform(&self) -> Platform {
        match self {
            AdapterError::Challenge { platform }
            | AdapterError::Navigation { platform, .. }
            | AdapterError::SearchUrl { platform, .. } => *platform,
        }
    }
}
