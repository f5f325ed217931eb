//! HTTP remote source.
//!
//! Talks to a JSON document API laid out relative to a base URL:
//!
//! | Operation   | Request                                   |
//! |-------------|-------------------------------------------|
//! | manifest    | `GET manifest`                            |
//! | one post    | `GET posts/{id}` (404 = absent)           |
//! | listing     | `GET posts?limit=n[&category=slug]`       |
//! | increment   | `POST posts/{id}/increment {"field": ..}` |

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{Counter, PostQuery, RemoteSource};
use crate::content::{Manifest, Post};
use crate::error::{FilmixoError, Result};

/// Remote source backed by an HTTP JSON API.
pub struct HttpSource {
    client: Client,
    base: Url,
    timeout: Duration,
}

impl HttpSource {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a source with the default 30-second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a source with a custom timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| FilmixoError::ConfigValidationError {
            message: format!("Invalid remote base_url '{}': {}", base_url, e),
        })?;

        if base.cannot_be_a_base() {
            return Err(FilmixoError::ConfigValidationError {
                message: format!("Remote base_url '{}' cannot hold paths", base_url),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("filmixo/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL by appending path segments to the base.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FilmixoError::ConfigValidationError {
                    message: format!("Remote base_url '{}' cannot hold paths", self.base),
                })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// GET a JSON document; `None` on 404.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(FilmixoError::RemoteStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Some(response.json::<T>().await?))
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_manifest(&self) -> Result<Manifest> {
        let url = self.endpoint(&["manifest"])?;
        // A missing manifest must not read as "nothing is active".
        self.get_json(url.clone())
            .await?
            .ok_or(FilmixoError::RemoteStatus {
                status: StatusCode::NOT_FOUND.as_u16(),
                url: url.to_string(),
            })
    }

    async fn fetch_record(&self, id: &str) -> Result<Option<Post>> {
        let url = self.endpoint(&["posts", id])?;
        let post: Option<Post> = self.get_json(url).await?;
        Ok(post.map(|mut p| {
            p.id = id.to_string();
            p
        }))
    }

    async fn query_posts(&self, query: &PostQuery) -> Result<Vec<Post>> {
        let mut url = self.endpoint(&["posts"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(category) = &query.category {
                pairs.append_pair("category", category);
            }
        }

        let posts: Option<Vec<Post>> = self.get_json(url).await?;
        Ok(posts.unwrap_or_default())
    }

    async fn increment(&self, id: &str, counter: Counter) -> Result<()> {
        let url = self.endpoint(&["posts", id, "increment"])?;
        let response = self
            .client
            .post(url.clone())
            .json(&serde_json::json!({ "field": counter.field() }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FilmixoError::RemoteStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn default_timeout_is_30_seconds() {
        let source = HttpSource::new("https://example.com/api").unwrap();
        assert_eq!(source.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let source =
            HttpSource::with_timeout("https://example.com", Duration::from_secs(5)).unwrap();
        assert_eq!(source.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpSource::new("not a url"),
            Err(FilmixoError::ConfigValidationError { .. })
        ));
        assert!(HttpSource::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let source = HttpSource::new("https://example.com/api/").unwrap();
        let url = source.endpoint(&["posts", "a b"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/posts/a%20b");

        let source = HttpSource::new("https://example.com/api").unwrap();
        assert_eq!(
            source.endpoint(&["manifest"]).unwrap().as_str(),
            "https://example.com/api/manifest"
        );
    }

    #[tokio::test]
    async fn fetches_manifest() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/manifest");
                then.status(200)
                    .json_body(json!({ "allIds": [{"id": "a", "t": 5}, "b"], "total_posts": 2 }));
            })
            .await;

        let source = HttpSource::new(&server.url("/api")).unwrap();
        let manifest = source.fetch_manifest().await.unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries[1].id, "b");
        assert_eq!(manifest.total(), 2);
    }

    #[tokio::test]
    async fn missing_manifest_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/manifest");
                then.status(404);
            })
            .await;

        let source = HttpSource::new(&server.base_url()).unwrap();
        let err = source.fetch_manifest().await.unwrap_err();

        assert!(err.to_string().contains("404"), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn fetch_record_sets_id_from_path() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/posts/p1");
                then.status(200)
                    .json_body(json!({ "title": "Arrival", "uploadTime": "2024-01-01" }));
            })
            .await;

        let source = HttpSource::new(&server.base_url()).unwrap();
        let post = source.fetch_record("p1").await.unwrap().unwrap();

        assert_eq!(post.id, "p1");
        assert_eq!(post.title, "Arrival");
    }

    #[tokio::test]
    async fn fetch_record_404_is_absent() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/posts/gone");
                then.status(404);
            })
            .await;

        let source = HttpSource::new(&server.base_url()).unwrap();
        assert!(source.fetch_record("gone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_surfaces_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/posts/p1");
                then.status(500);
            })
            .await;

        let source = HttpSource::new(&server.base_url()).unwrap();
        let err = source.fetch_record("p1").await.unwrap_err();

        assert!(matches!(err, FilmixoError::RemoteStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn query_posts_sends_limit_and_category() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/posts")
                    .query_param("limit", "12")
                    .query_param("category", "horror");
                then.status(200)
                    .json_body(json!([{ "id": "h1", "title": "Hereditary" }]));
            })
            .await;

        let source = HttpSource::new(&server.base_url()).unwrap();
        let posts = source
            .query_posts(&PostQuery::category("horror", 12))
            .await
            .unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "h1");
        mock.assert_calls_async(1).await;
    }

    #[tokio::test]
    async fn increment_posts_field() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/posts/p1/increment")
                    .json_body(json!({ "field": "likes" }));
                then.status(204);
            })
            .await;

        let source = HttpSource::new(&server.base_url()).unwrap();
        source.increment("p1", Counter::Likes).await.unwrap();

        mock.assert_calls_async(1).await;
    }

    #[tokio::test]
    async fn increment_failure_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/posts/p1/increment");
                then.status(403);
            })
            .await;

        let source = HttpSource::new(&server.base_url()).unwrap();
        assert!(source.increment("p1", Counter::Views).await.is_err());
    }
}
