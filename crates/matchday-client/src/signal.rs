//! Classification of responses that indicate a dead session.

use std::fmt::{self, Display, Formatter};

use reqwest::StatusCode;
use url::Url;

use crate::form::{has_login_form, has_logout_marker};
use crate::page::Page;

/// Server-side signal that the current session is no longer valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureSignal {
    /// The response carried HTTP 401.
    Unauthorized,
    /// The response carried HTTP 403.
    Forbidden,
    /// A nominally successful response was actually the login page: either
    /// the final URL is the login URL, or the body still carries a login
    /// form.
    RedirectedToLogin,
}

impl Display for AuthFailureSignal {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => formatter.write_str("unauthorized (401)"),
            Self::Forbidden => formatter.write_str("forbidden (403)"),
            Self::RedirectedToLogin => formatter.write_str("redirected to login page"),
        }
    }
}

/// Classify a completed response. `None` means the session is still valid as
/// far as this response can tell.
#[must_use]
pub fn classify_response(page: &Page, login_url: &Url) -> Option<AuthFailureSignal> {
    if page.status == StatusCode::UNAUTHORIZED {
        return Some(AuthFailureSignal::Unauthorized);
    }
    if page.status == StatusCode::FORBIDDEN {
        return Some(AuthFailureSignal::Forbidden);
    }
    if page.status.is_success() && (is_login_url(&page.url, login_url) || has_login_form(&page.body))
    {
        return Some(AuthFailureSignal::RedirectedToLogin);
    }
    None
}

/// Decide whether a completed login submission demonstrates success.
///
/// No single authoritative signal exists for a form login, so this is an OR
/// of independent positive signals: the final URL left the login page, the
/// final page carries no login form, or the final page carries a logout
/// marker. Any one is sufficient.
#[must_use]
pub fn login_succeeded(page: &Page, login_url: &Url) -> bool {
    !is_login_url(&page.url, login_url)
        || !has_login_form(&page.body)
        || has_logout_marker(&page.body)
}

/// Compare URLs by scheme, host, port, and path. The query string is ignored
/// because sites append return-URL parameters when bouncing to the login
/// page.
pub(crate) fn is_login_url(url: &Url, login_url: &Url) -> bool {
    url.scheme() == login_url.scheme()
        && url.host_str() == login_url.host_str()
        && url.port_or_known_default() == login_url.port_or_known_default()
        && url.path() == login_url.path()
}
