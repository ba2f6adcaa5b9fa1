//! Login form extraction and page markers.
//!
//! Pure functions over a parsed document; the session state machine consumes
//! their output but none of them touch the network. The form is re-extracted
//! on every login attempt because hidden fields (CSRF-style tokens) rotate.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{SessionError, SessionResult};

static FORM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("form").expect("static selector"));
static HIDDEN_INPUT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[type="hidden"]"#).expect("static selector"));
static PASSWORD_INPUT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[type="password"]"#).expect("static selector"));
static LOGOUT_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="logout"]"#).expect("static selector"));

/// A login form reduced to what submission needs: where to POST and which
/// hidden fields to echo back.
#[derive(Debug, Clone)]
pub struct LoginForm {
    /// Absolute submission URL resolved from the form's `action` attribute.
    pub action: Url,
    /// Hidden input name/value pairs in document order.
    pub hidden_fields: Vec<(String, String)>,
}

/// Extract the first form of a login page.
///
/// The `action` attribute may be absolute, site-root-relative, or
/// path-relative; all three resolve against the page URL. A missing or empty
/// `action` submits back to the page itself, as browsers do.
///
/// # Errors
///
/// Returns [`SessionError::LoginFormMissing`] when the page carries no form.
pub fn extract_login_form(body: &str, page_url: &Url) -> SessionResult<LoginForm> {
    let document = Html::parse_document(body);
    let form = document
        .select(&FORM_SELECTOR)
        .next()
        .ok_or_else(|| SessionError::LoginFormMissing {
            url: page_url.clone(),
        })?;

    let action = match form
        .value()
        .attr("action")
        .map(str::trim)
        .filter(|action| !action.is_empty())
    {
        Some(action) => page_url
            .join(action)
            .map_err(|source| SessionError::InvalidUrl {
                value: action.to_string(),
                source,
            })?,
        None => page_url.clone(),
    };

    let mut hidden_fields = Vec::new();
    for input in form.select(&HIDDEN_INPUT_SELECTOR) {
        let Some(name) = input.value().attr("name").filter(|name| !name.is_empty()) else {
            continue;
        };
        let value = input.value().attr("value").unwrap_or("");
        hidden_fields.push((name.to_string(), value.to_string()));
    }

    Ok(LoginForm {
        action,
        hidden_fields,
    })
}

/// Whether the page still carries a login form (a form with a password
/// input). Used both as a negative login-success signal and as a marker that
/// a request was silently bounced back to the login page.
#[must_use]
pub fn has_login_form(body: &str) -> bool {
    let document = Html::parse_document(body);
    document
        .select(&FORM_SELECTOR)
        .any(|form| form.select(&PASSWORD_INPUT_SELECTOR).next().is_some())
}

/// Whether the page carries an element only present once logged in.
#[must_use]
pub fn has_logout_marker(body: &str) -> bool {
    let document = Html::parse_document(body);
    document.select(&LOGOUT_LINK_SELECTOR).next().is_some()
}
