//! Fully-read responses handed to callers.

use reqwest::{Response, StatusCode};
use url::Url;

use crate::error::{SessionError, SessionResult};

/// A completed response with its body read to a string.
///
/// Reading the body eagerly is what allows session-expiry classification
/// (which may need to inspect page content) without consuming the value
/// returned to the caller.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after any redirects.
    pub url: Url,
    /// Response status.
    pub status: StatusCode,
    /// Response body.
    pub body: String,
}

impl Page {
    pub(crate) async fn read(response: Response) -> SessionResult<Self> {
        let url = response.url().clone();
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| SessionError::Transport {
                operation: "read response body",
                source,
            })?;

        Ok(Self { url, status, body })
    }
}
