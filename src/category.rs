//! Category browsing.
//!
//! Unlike the homepage feed, category pages go straight to the remote: one
//! newest-first query per load, no mirror involved.

use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::content::Post;
use crate::error::Result;
use crate::feed::FetchGuard;
use crate::remote::{PostQuery, RemoteSource};

/// Known category slugs and their display names.
pub const CATEGORIES: [(&str, &str); 6] = [
    ("action", "Action"),
    ("comedy", "Comedy"),
    ("drama", "Drama"),
    ("thriller", "Thriller"),
    ("horror", "Horror"),
    ("romance", "Romance"),
];

/// Heading used when no known category is selected.
pub const ALL_POSTS: &str = "All Posts";

/// Default posts per category page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Display name for a known slug.
pub fn display_name(slug: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(known, _)| *known == slug)
        .map(|(_, name)| *name)
}

/// Whether the slug names one of the known categories.
pub fn is_known(slug: &str) -> bool {
    display_name(slug).is_some()
}

/// One loaded category page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPage {
    /// Known slug, or `None` for the all-posts listing.
    pub slug: Option<String>,
    /// Heading to show above the posts.
    pub heading: String,
    pub posts: Vec<Post>,
}

/// Result of [`CategoryFeed::load`].
#[derive(Debug)]
pub enum CategoryOutcome {
    /// Another load was in flight.
    Busy,
    Loaded(CategoryPage),
}

/// Loads newest posts for one category.
pub struct CategoryFeed {
    remote: Arc<dyn RemoteSource>,
    page_size: usize,
    fetching: AtomicBool,
}

impl CategoryFeed {
    pub fn new(remote: Arc<dyn RemoteSource>, page_size: usize) -> Self {
        Self {
            remote,
            page_size,
            fetching: AtomicBool::new(false),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Load a category; `all` or an unknown slug lists every post.
    pub async fn load(&self, slug: &str) -> Result<CategoryOutcome> {
        let Some(_guard) = FetchGuard::acquire(&self.fetching) else {
            tracing::debug!("Category load already in flight, dropping request");
            return Ok(CategoryOutcome::Busy);
        };

        let (query, known, heading) = match display_name(slug) {
            Some(name) => (
                PostQuery::category(slug, self.page_size),
                Some(slug.to_string()),
                name.to_string(),
            ),
            None => (PostQuery::all(self.page_size), None, ALL_POSTS.to_string()),
        };

        let posts = self.remote.query_posts(&query).await?;
        tracing::debug!("Loaded {} posts for '{}'", posts.len(), heading);

        Ok(CategoryOutcome::Loaded(CategoryPage {
            slug: known,
            heading,
            posts,
        }))
    }
}
