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

//! Site and credential configuration for the Matchday scraper.
//!
//! Layout: `model.rs` (typed configuration and its serde document form),
//! `error.rs` (structured configuration errors). Configuration is sourced
//! from the process environment or a JSON document and validated eagerly so
//! that blank credentials or malformed URLs fail before any network call.

pub mod error;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use model::{
    DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT_SECS, SiteConfig, SiteConfigDocument,
};
