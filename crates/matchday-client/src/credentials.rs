//! Validated account credentials.

use std::fmt::{self, Debug, Formatter};

use crate::error::{SessionError, SessionResult};

/// Form field name the username is submitted under, regardless of what the
/// site's visible input is called.
pub const USERNAME_FIELD: &str = "username";

/// Form field name the password is submitted under.
pub const PASSWORD_FIELD: &str = "password";

/// Immutable username/password pair, validated at construction.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build credentials, rejecting blank fields up front so that a
    /// misconfigured account fails deterministically before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingCredential`] when either field is blank
    /// after trimming.
    pub fn new(username: &str, password: &str) -> SessionResult<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SessionError::MissingCredential { field: "username" });
        }

        let password = password.trim();
        if password.is_empty() {
            return Err(SessionError::MissingCredential { field: "password" });
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl Debug for Credentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
