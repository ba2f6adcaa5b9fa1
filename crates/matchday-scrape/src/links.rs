//! Match-detail link extraction from fixture listing pages.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::error::{ScrapeError, ScrapeResult};
use crate::fetch::PageFetcher;

static MATCH_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="/matches/"]"#).expect("static selector"));

/// Fetch a fixtures listing and return the match-detail links it references,
/// deduplicated, in document order.
///
/// # Errors
///
/// Returns [`ScrapeError::Session`] when the listing cannot be fetched and
/// [`ScrapeError::EmptySelection`] when it contains no match links.
pub async fn fetch_match_links<F>(fetcher: &F, fixtures_path: &str) -> ScrapeResult<Vec<String>>
where
    F: PageFetcher + ?Sized,
{
    let page = fetcher
        .fetch(fixtures_path)
        .await
        .map_err(|source| ScrapeError::Session {
            operation: "fetch fixtures page",
            source,
        })?;

    let links = extract_match_links(&page.body);
    if links.is_empty() {
        return Err(ScrapeError::EmptySelection { url: page.url });
    }

    tracing::debug!(count = links.len(), url = %page.url, "extracted match links");
    Ok(links)
}

/// Extract match-detail hrefs from a listing page body.
#[must_use]
pub fn extract_match_links(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&MATCH_LINK_SELECTOR) {
        let Some(href) = anchor
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
        else {
            continue;
        };
        if seen.insert(href.to_string()) {
            links.push(href.to_string());
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use matchday_client::{Page, SessionError, SessionResult};
    use reqwest::StatusCode;
    use url::Url;

    struct FixtureFetcher {
        body: &'static str,
    }

    #[async_trait]
    impl PageFetcher for FixtureFetcher {
        async fn fetch(&self, _path: &str) -> SessionResult<Page> {
            Ok(Page {
                url: Url::parse("https://league.example/fixtures").expect("valid URL"),
                status: StatusCode::OK,
                body: self.body.to_string(),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _path: &str) -> SessionResult<Page> {
            Err(SessionError::ReplayUnsupported)
        }
    }

    const LISTING: &str = r#"
        <ul>
            <li><a href="/matches/101">Falcons v Wolves</a></li>
            <li><a href="/matches/102">Hornets v Giants</a></li>
            <li><a href="/matches/101">Falcons v Wolves (again)</a></li>
            <li><a href="/teams/falcons">Falcons</a></li>
        </ul>"#;

    #[test]
    fn extracts_links_deduplicated_in_document_order() {
        assert_eq!(
            extract_match_links(LISTING),
            vec!["/matches/101".to_string(), "/matches/102".to_string()]
        );
    }

    #[test]
    fn ignores_pages_without_match_anchors() {
        assert!(extract_match_links("<p>rained off</p>").is_empty());
    }

    #[tokio::test]
    async fn fetches_and_extracts_links() {
        let fetcher = FixtureFetcher { body: LISTING };
        let links = fetch_match_links(&fetcher, "/fixtures")
            .await
            .expect("links extracted");
        assert_eq!(links.len(), 2);
    }

    #[tokio::test]
    async fn empty_listing_is_an_error() {
        let fetcher = FixtureFetcher {
            body: "<p>no fixtures this week</p>",
        };
        let err = fetch_match_links(&fetcher, "/fixtures")
            .await
            .expect_err("empty selection");
        assert!(matches!(err, ScrapeError::EmptySelection { .. }));
    }

    #[tokio::test]
    async fn session_failures_carry_the_operation() {
        let err = fetch_match_links(&FailingFetcher, "/fixtures")
            .await
            .expect_err("session failure");
        assert!(matches!(
            err,
            ScrapeError::Session {
                operation: "fetch fixtures page",
                ..
            }
        ));
    }
}
