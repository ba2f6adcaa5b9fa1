//! Typed site configuration and its serde document form.

use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Login page path used when none is configured.
pub const DEFAULT_LOGIN_PATH: &str = "/account/login";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const MAX_TIMEOUT_SECS: u64 = 300;

const ENV_BASE_URL: &str = "MATCHDAY_BASE_URL";
const ENV_LOGIN_PATH: &str = "MATCHDAY_LOGIN_PATH";
const ENV_USERNAME: &str = "MATCHDAY_USERNAME";
const ENV_PASSWORD: &str = "MATCHDAY_PASSWORD";
const ENV_TIMEOUT_SECS: &str = "MATCHDAY_TIMEOUT_SECS";

/// Raw configuration document as read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfigDocument {
    /// Root URL of the target site.
    pub base_url: String,
    /// Site-root-relative path of the login page.
    #[serde(default)]
    pub login_path: Option<String>,
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl SiteConfigDocument {
    /// Validate the document into a usable [`SiteConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when any field fails validation.
    pub fn into_config(self) -> ConfigResult<SiteConfig> {
        SiteConfig::new(
            &self.base_url,
            self.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH),
            &self.username,
            &self.password,
            self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}

/// Validated configuration for one target site and account.
#[derive(Clone)]
pub struct SiteConfig {
    /// Root URL of the target site.
    pub base_url: Url,
    /// Absolute URL of the login page, resolved against `base_url`.
    pub login_url: Url,
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SiteConfig {
    /// Build and validate a configuration from raw parts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when the base URL does not parse
    /// as an absolute http(s) URL, the login path is not site-root-relative,
    /// a credential is blank, or the timeout is out of range.
    pub fn new(
        base_url: &str,
        login_path: &str,
        username: &str,
        password: &str,
        timeout_secs: u64,
    ) -> ConfigResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let login_url = resolve_login_path(&base_url, login_path)?;
        let username = require_non_blank(username, "username")?;
        let password = require_non_blank(password, "password")?;
        let timeout = parse_timeout(timeout_secs)?;

        Ok(Self {
            base_url,
            login_url,
            username,
            password,
            timeout,
        })
    }

    /// Load configuration from `MATCHDAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when a required variable is unset
    /// and [`ConfigError::InvalidField`] when a value fails validation.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same contract as [`SiteConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingEnv { name })
        };

        let base_url = require(ENV_BASE_URL)?;
        let username = require(ENV_USERNAME)?;
        let password = require(ENV_PASSWORD)?;
        let login_path =
            lookup(ENV_LOGIN_PATH).unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());
        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidField {
                field: "timeout_secs",
                message: "must be an integer number of seconds".to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self::new(&base_url, &login_path, &username, &password, timeout_secs)?;
        tracing::debug!(base_url = %config.base_url, "loaded site configuration");
        Ok(config)
    }

    /// Parse configuration from a JSON document string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DocumentParse`] for malformed JSON and
    /// [`ConfigError::InvalidField`] for invalid values.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let document: SiteConfigDocument =
            serde_json::from_str(raw).map_err(|source| ConfigError::DocumentParse { source })?;
        document.into_config()
    }

    /// Read and parse configuration from a JSON document on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DocumentRead`] when the file cannot be read,
    /// plus the [`SiteConfig::from_json_str`] error contract.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

impl Debug for SiteConfig {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SiteConfig")
            .field("base_url", &self.base_url.as_str())
            .field("login_url", &self.login_url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> ConfigResult<Url> {
    let url: Url = raw.trim().parse().map_err(|_| ConfigError::InvalidField {
        field: "base_url",
        message: "must be an absolute URL".to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidField {
            field: "base_url",
            message: "must use the http or https scheme".to_string(),
        });
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidField {
            field: "base_url",
            message: "must include a host".to_string(),
        });
    }

    Ok(url)
}

fn resolve_login_path(base_url: &Url, login_path: &str) -> ConfigResult<Url> {
    let login_path = login_path.trim();
    if !login_path.starts_with('/') {
        return Err(ConfigError::InvalidField {
            field: "login_path",
            message: "must be site-root-relative (start with '/')".to_string(),
        });
    }

    base_url
        .join(login_path)
        .map_err(|_| ConfigError::InvalidField {
            field: "login_path",
            message: "does not resolve against the base URL".to_string(),
        })
}

fn require_non_blank(value: &str, field: &'static str) -> ConfigResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::InvalidField {
            field,
            message: "must not be blank".to_string(),
        });
    }
    Ok(value.to_string())
}

fn parse_timeout(timeout_secs: u64) -> ConfigResult<Duration> {
    if !(1..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
        return Err(ConfigError::InvalidField {
            field: "timeout_secs",
            message: format!("must be between 1 and {MAX_TIMEOUT_SECS}"),
        });
    }
    Ok(Duration::from_secs(timeout_secs))
}
