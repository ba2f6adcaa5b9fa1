#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Session-authenticating HTTP client for a site without a public API.
//!
//! The site only speaks browser HTML: authentication is a username/password
//! form POST, the session lives in a cookie, and an expired session announces
//! itself as a 401/403 or as a silent bounce back to the login page. This
//! crate hides all of that behind one client:
//!
//! - `session.rs`: the [`SessionClient`] guard and request pipeline
//!   (single-flight login, invalidate-and-replay on session expiry)
//! - `form.rs`: login form extraction and page markers
//! - `signal.rs`: classification of responses that indicate a dead session
//! - `credentials.rs`: validated account credentials
//! - `page.rs`: fully-read responses handed to callers
//! - `error.rs`: typed failures so callers can tell bad credentials from a
//!   changed site layout or an unreachable host

pub mod credentials;
pub mod error;
pub mod form;
pub mod page;
pub mod session;
pub mod signal;

pub use credentials::{Credentials, PASSWORD_FIELD, USERNAME_FIELD};
pub use error::{SessionError, SessionResult};
pub use form::LoginForm;
pub use page::Page;
pub use session::SessionClient;
pub use signal::AuthFailureSignal;
