//! Error types for scrape operations.

use matchday_client::SessionError;
use thiserror::Error;
use url::Url;

/// Result alias for scrape operations.
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Primary error type for scrape operations.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A request through the session client failed.
    #[error("session request failed during '{operation}'")]
    Session {
        /// Operation identifier.
        operation: &'static str,
        /// Source session error.
        source: SessionError,
    },
    /// A listing page yielded no match links.
    #[error("no match links found on listing page")]
    EmptySelection {
        /// URL of the listing page that was inspected.
        url: Url,
    },
}
