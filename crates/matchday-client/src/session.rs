//! Session guard and authenticating request pipeline.
//!
//! One [`SessionClient`] owns the cookie-bearing transport plus the only
//! piece of shared mutable state in the crate: an `authenticated` flag and
//! the async mutex that serialises login attempts. Any number of concurrent
//! callers may issue requests through one client; at most one login runs at
//! a time, and a request observing a session-expiry signal re-authenticates
//! and replays itself exactly once.

use std::sync::atomic::{AtomicBool, Ordering};

use matchday_config::SiteConfig;
use reqwest::{Client, Request};
use tokio::sync::Mutex;
use url::Url;

use crate::credentials::{Credentials, PASSWORD_FIELD, USERNAME_FIELD};
use crate::error::{SessionError, SessionResult};
use crate::form::extract_login_form;
use crate::page::Page;
use crate::signal::{classify_response, login_succeeded};

/// Authentication state shared by all callers of one client.
///
/// The flag transitions to `true` only while the lock is held; clearing it
/// is lock-free and idempotent.
#[derive(Debug, Default)]
struct SessionState {
    authenticated: AtomicBool,
    login_lock: Mutex<()>,
}

/// HTTP client that transparently authenticates against a login form and
/// recovers when the session expires mid-sequence.
#[derive(Debug)]
pub struct SessionClient {
    http: Client,
    base_url: Url,
    login_url: Url,
    credentials: Credentials,
    state: SessionState,
}

impl SessionClient {
    /// Build a client for one site and account.
    ///
    /// The underlying transport carries a persistent cookie store; the
    /// session cookie obtained at login travels on every subsequent request
    /// without manual handling.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingCredential`] for blank credentials
    /// (before any network call) and [`SessionError::ClientBuild`] when the
    /// transport cannot be constructed.
    pub fn new(config: &SiteConfig) -> SessionResult<Self> {
        let credentials = Credentials::new(&config.username, &config.password)?;
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|source| SessionError::ClientBuild { source })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            login_url: config.login_url.clone(),
            credentials,
            state: SessionState::default(),
        })
    }

    /// Root URL of the target site.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the guard currently believes the session is valid.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated.load(Ordering::Acquire)
    }

    /// Mark the session invalid so the next request logs in again.
    ///
    /// Lock-free and idempotent; safe to call from any number of concurrent
    /// callers.
    pub fn invalidate(&self) {
        if self.state.authenticated.swap(false, Ordering::AcqRel) {
            tracing::debug!("session invalidated");
        }
    }

    /// Make sure a valid session exists, logging in if necessary.
    ///
    /// Fast path: the flag is already set and no lock is touched. Slow path:
    /// acquire the login lock, re-check the flag (another caller may have
    /// just finished logging in while this one waited), and run the login
    /// sequence if it is still clear. Exactly one login attempt runs per
    /// invalidation no matter how many callers arrive; a failed attempt
    /// leaves the flag clear so a later caller retries from scratch.
    ///
    /// # Errors
    ///
    /// Propagates the login sequence's typed failures; see [`SessionError`].
    pub async fn ensure_authenticated(&self) -> SessionResult<()> {
        if self.state.authenticated.load(Ordering::Acquire) {
            return Ok(());
        }

        let _guard = self.state.login_lock.lock().await;
        if self.state.authenticated.load(Ordering::Acquire) {
            return Ok(());
        }

        self.login().await?;
        self.state.authenticated.store(true, Ordering::Release);
        Ok(())
    }

    /// GET a site path through the authenticating pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidUrl`] for paths that do not resolve
    /// against the base URL, plus the [`SessionClient::execute`] contract.
    pub async fn get(&self, path: &str) -> SessionResult<Page> {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| SessionError::InvalidUrl {
                value: path.to_string(),
                source,
            })?;
        let request = self
            .http
            .get(url)
            .build()
            .map_err(|source| SessionError::RequestBuild { source })?;

        self.execute(request).await
    }

    /// Send a request through the authenticating pipeline:
    /// ensure-authenticated, forward, classify, and on a session-expiry
    /// signal re-authenticate and replay exactly once.
    ///
    /// The single replay bounds worst-case request amplification to 2x and
    /// prevents retry storms when the site persistently rejects the account.
    ///
    /// # Errors
    ///
    /// Propagates login failures without forwarding the request, transport
    /// failures from forwarding, and [`SessionError::ReplayRejected`] when
    /// the replayed request still carries an auth-failure signal.
    pub async fn execute(&self, request: Request) -> SessionResult<Page> {
        self.ensure_authenticated().await?;

        let replay = request.try_clone();
        let page = self.forward(request).await?;
        let Some(signal) = classify_response(&page, &self.login_url) else {
            return Ok(page);
        };

        tracing::info!(%signal, url = %page.url, "session expired, re-authenticating");
        self.invalidate();
        self.ensure_authenticated().await?;

        let request = replay.ok_or(SessionError::ReplayUnsupported)?;
        let page = self.forward(request).await?;
        match classify_response(&page, &self.login_url) {
            Some(signal) => Err(SessionError::ReplayRejected { signal }),
            None => Ok(page),
        }
    }

    async fn forward(&self, request: Request) -> SessionResult<Page> {
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| SessionError::Transport {
                operation: "forward request",
                source,
            })?;

        Page::read(response).await
    }

    /// The login sequence: fetch the login page, extract the form, submit
    /// credentials plus hidden fields, and classify the outcome.
    async fn login(&self) -> SessionResult<()> {
        tracing::info!(url = %self.login_url, user = self.credentials.username(), "logging in");

        let response = self
            .http
            .get(self.login_url.clone())
            .send()
            .await
            .map_err(|source| SessionError::LoginPageUnreachable { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::LoginPageStatus { status });
        }

        let page_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|source| SessionError::Transport {
                operation: "read login page",
                source,
            })?;

        let form = extract_login_form(&body, &page_url)?;

        let mut fields = Vec::with_capacity(form.hidden_fields.len() + 2);
        fields.push((
            USERNAME_FIELD.to_string(),
            self.credentials.username().to_string(),
        ));
        fields.push((
            PASSWORD_FIELD.to_string(),
            self.credentials.password().to_string(),
        ));
        fields.extend(form.hidden_fields);

        let response = self
            .http
            .post(form.action)
            .form(&fields)
            .send()
            .await
            .map_err(|source| SessionError::Transport {
                operation: "submit login form",
                source,
            })?;

        let page = Page::read(response).await?;
        if page.status.is_success() && login_succeeded(&page, &self.login_url) {
            tracing::info!("login accepted");
            Ok(())
        } else {
            Err(SessionError::LoginRejected { url: page.url })
        }
    }
}
