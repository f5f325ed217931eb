//! Remote document source.
//!
//! The remote owns every post. This crate treats it as a black box with a
//! small query surface:
//! - [`RemoteSource::fetch_manifest`] lists active ids and their stamps
//! - [`RemoteSource::fetch_record`] returns one post
//! - [`RemoteSource::query_posts`] runs a newest-first listing
//! - [`RemoteSource::increment`] bumps an engagement counter

pub mod http;
pub mod mock;

pub use http::HttpSource;
pub use mock::MockSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::{Manifest, Post};
use crate::error::Result;

/// A newest-first listing of posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Restrict to one category slug; `None` lists every post.
    pub category: Option<String>,
    /// Maximum number of posts.
    pub limit: usize,
}

impl PostQuery {
    /// List every post.
    pub fn all(limit: usize) -> Self {
        Self {
            category: None,
            limit,
        }
    }

    /// List one category.
    pub fn category(slug: impl Into<String>, limit: usize) -> Self {
        Self {
            category: Some(slug.into()),
            limit,
        }
    }
}

/// Engagement counters stored on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Counter {
    Views,
    Likes,
}

impl Counter {
    /// Field name on the post document.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Likes => "likes",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Access to the hosted document store.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the manifest of active posts.
    async fn fetch_manifest(&self) -> Result<Manifest>;

    /// Fetch one post; `None` when the remote has no such document.
    async fn fetch_record(&self, id: &str) -> Result<Option<Post>>;

    /// Run a newest-first listing.
    async fn query_posts(&self, query: &PostQuery) -> Result<Vec<Post>>;

    /// Atomically add one to a counter on a post.
    async fn increment(&self, id: &str, counter: Counter) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_field_names() {
        assert_eq!(Counter::Views.field(), "views");
        assert_eq!(Counter::Likes.to_string(), "likes");
    }

    #[test]
    fn counter_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Counter::Likes).unwrap(), "\"likes\"");
    }

    #[test]
    fn query_constructors() {
        assert_eq!(PostQuery::all(12).category, None);
        let q = PostQuery::category("drama", 6);
        assert_eq!(q.category.as_deref(), Some("drama"));
        assert_eq!(q.limit, 6);
    }
}
