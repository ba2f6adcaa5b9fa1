//! Error types for session and request operations.
//!
//! Each failure mode the login sequence can hit gets its own variant so
//! calling code can log a precise cause ("bad credentials" vs "site layout
//! changed" vs "network unreachable") rather than a generic failure.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::signal::AuthFailureSignal;

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Primary error type for session and request operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A credential was blank; raised before any network call.
    #[error("missing credential '{field}'")]
    MissingCredential {
        /// Name of the blank credential field.
        field: &'static str,
    },
    /// A URL failed to parse or resolve.
    #[error("invalid URL '{value}'")]
    InvalidUrl {
        /// Offending URL or path value.
        value: String,
        /// Underlying parse error.
        source: url::ParseError,
    },
    /// Building the underlying HTTP client failed.
    #[error("failed to build HTTP client")]
    ClientBuild {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// Building an outgoing request failed.
    #[error("failed to build request")]
    RequestBuild {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// Fetching the login page failed at the transport level.
    #[error("login page unreachable")]
    LoginPageUnreachable {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// The login page answered with a non-success status.
    #[error("login page returned status {status}")]
    LoginPageStatus {
        /// Status returned by the login page.
        status: StatusCode,
    },
    /// The login page carried no form; a structural mismatch that will not
    /// self-resolve, so it is never retried automatically.
    #[error("no login form found on login page")]
    LoginFormMissing {
        /// URL of the page that was inspected.
        url: Url,
    },
    /// The submitted credentials were not accepted.
    #[error("login rejected by the site")]
    LoginRejected {
        /// Final URL after the login submission.
        url: Url,
    },
    /// A forwarded request failed at the transport level.
    #[error("transport failure during '{operation}'")]
    Transport {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// The request body cannot be cloned, so the mandatory single replay
    /// after re-authentication is impossible.
    #[error("request cannot be replayed after re-authentication")]
    ReplayUnsupported,
    /// The replayed request was rejected again; no further re-authentication
    /// is attempted for the same call.
    #[error("request rejected again after re-authentication")]
    ReplayRejected {
        /// Signal carried by the replayed response.
        signal: AuthFailureSignal,
    },
}
