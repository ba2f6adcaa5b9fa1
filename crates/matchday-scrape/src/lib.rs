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

//! Page-fetching utilities built on the session-authenticating client.
//!
//! Consumers here depend only on "issue a request, get back the same result
//! as if already logged in, or get a typed error describing why
//! authentication could not be established". Layout: `fetch.rs` (the
//! [`PageFetcher`] seam and concurrent multi-page fetches), `links.rs`
//! (match-detail link extraction from fixture listings), `error.rs`.

pub mod error;
pub mod fetch;
pub mod links;

pub use error::{ScrapeError, ScrapeResult};
pub use fetch::{FetchedPage, PageFetcher, fetch_pages};
pub use links::fetch_match_links;
