//! The fetcher seam and concurrent multi-page fetches.

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use matchday_client::{Page, SessionClient, SessionResult};

/// Boundary trait for issuing authenticated page requests.
///
/// Scrape utilities depend on this seam rather than on the concrete client
/// so they can run against fixtures in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a site path, authenticating as needed.
    async fn fetch(&self, path: &str) -> SessionResult<Page>;
}

#[async_trait]
impl PageFetcher for SessionClient {
    async fn fetch(&self, path: &str) -> SessionResult<Page> {
        self.get(path).await
    }
}

/// Outcome of fetching one path in a batch.
#[derive(Debug)]
pub struct FetchedPage {
    /// Path that was requested.
    pub path: String,
    /// The fetched page, or why it could not be fetched.
    pub result: SessionResult<Page>,
}

/// Fetch many paths concurrently through one shared session guard.
///
/// Outcomes are returned in input order; one path failing does not abort the
/// rest of the batch.
pub async fn fetch_pages<F>(fetcher: &F, paths: &[String], concurrency: usize) -> Vec<FetchedPage>
where
    F: PageFetcher + ?Sized,
{
    let concurrency = concurrency.max(1);
    tracing::debug!(count = paths.len(), concurrency, "fetching page batch");

    let mut outcomes = stream::iter(paths.iter().cloned().enumerate())
        .map(|(index, path)| async move {
            let result = fetcher.fetch(&path).await;
            (index, FetchedPage { path, result })
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;

    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use matchday_client::{AuthFailureSignal, SessionError};
    use matchday_config::SiteConfig;

    const LOGIN_PATH: &str = "/account/login";

    fn login_page_body() -> String {
        format!(
            r#"<html><body>
            <form method="post" action="{LOGIN_PATH}">
                <input type="hidden" name="__token" value="tok-123"/>
                <input type="text" name="login_box"/>
                <input type="password" name="password_box"/>
            </form></body></html>"#
        )
    }

    fn mount_login(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
        let login_get = server.mock(|when, then| {
            when.method(GET).path(LOGIN_PATH);
            then.status(200).body(login_page_body());
        });
        let login_post = server.mock(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(200)
                .body(r#"<html><body><a href="/account/logout">Log out</a></body></html>"#);
        });
        (login_get, login_post)
    }

    fn client_for(server: &MockServer) -> SessionClient {
        let config = SiteConfig::new(&server.base_url(), LOGIN_PATH, "alice", "s3cret", 5)
            .expect("valid config");
        SessionClient::new(&config).expect("client builds")
    }

    #[tokio::test]
    async fn fetches_batch_in_input_order_with_one_login() {
        let server = MockServer::start_async().await;
        let (login_get, login_post) = mount_login(&server);
        let matches: Vec<_> = (1..=3)
            .map(|round| {
                server.mock(|when, then| {
                    when.method(GET).path(format!("/matches/{round}"));
                    then.status(200).body(format!("<h1>Round {round}</h1>"));
                })
            })
            .collect();

        let client = client_for(&server);
        let paths: Vec<String> = (1..=3).map(|round| format!("/matches/{round}")).collect();
        let outcomes = fetch_pages(&client, &paths, 2).await;

        assert_eq!(outcomes.len(), 3);
        for (round, outcome) in (1..=3).zip(&outcomes) {
            assert_eq!(outcome.path, format!("/matches/{round}"));
            let page = outcome.result.as_ref().expect("page fetched");
            assert_eq!(page.body, format!("<h1>Round {round}</h1>"));
        }

        login_get.assert_calls(1);
        login_post.assert_calls(1);
        for mock in &matches {
            mock.assert_calls(1);
        }
    }

    #[tokio::test]
    async fn one_failing_path_does_not_abort_the_batch() {
        let server = MockServer::start_async().await;
        let (login_get, login_post) = mount_login(&server);
        server.mock(|when, then| {
            when.method(GET).path("/matches/1");
            then.status(200).body("<h1>Round 1</h1>");
        });
        server.mock(|when, then| {
            when.method(GET).path("/matches/2");
            then.status(401);
        });

        let client = client_for(&server);
        let paths = vec!["/matches/1".to_string(), "/matches/2".to_string()];
        let outcomes = fetch_pages(&client, &paths, 2).await;

        let first = outcomes[0].result.as_ref().expect("first page fetched");
        assert_eq!(first.body, "<h1>Round 1</h1>");

        let err = outcomes[1].result.as_ref().expect_err("second path fails");
        assert!(matches!(
            err,
            SessionError::ReplayRejected {
                signal: AuthFailureSignal::Unauthorized
            }
        ));

        // Initial login plus the single re-authentication the 401 path
        // triggered.
        login_get.assert_calls(2);
        login_post.assert_calls(2);
    }

    #[tokio::test]
    async fn empty_batch_touches_nothing() {
        let server = MockServer::start_async().await;
        let (login_get, _login_post) = mount_login(&server);

        let client = client_for(&server);
        let outcomes = fetch_pages(&client, &[], 4).await;

        assert!(outcomes.is_empty());
        login_get.assert_calls(0);
    }
}
