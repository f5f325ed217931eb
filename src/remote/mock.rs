//! In-process remote source for testing.
//!
//! `MockSource` keeps posts and a manifest in memory, records every fetch
//! and increment, and can be told to fail specific calls.
//!
//! # Example
//!
//! ```
//! use filmixo::content::{Post, Stamp};
//! use filmixo::remote::MockSource;
//!
//! let source = MockSource::new();
//! source.publish(Post::new("a", "Alien"), Stamp::Millis(1));
//! source.fail_record("a");
//!
//! assert_eq!(source.manifest_ids(), vec!["a".to_string()]);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{Counter, PostQuery, RemoteSource};
use crate::content::{Manifest, ManifestEntry, Post, Stamp};
use crate::error::{FilmixoError, Result};

#[derive(Debug, Default)]
struct MockState {
    entries: Vec<ManifestEntry>,
    posts: HashMap<String, Post>,
    total_posts: Option<u64>,
    manifest_down: bool,
    failing_records: HashSet<String>,
    failing_increments: bool,
    manifest_calls: usize,
    fetched: Vec<String>,
    increments: Vec<(String, Counter)>,
    queries: Vec<PostQuery>,
}

/// Scriptable remote source.
#[derive(Debug, Default)]
pub struct MockSource {
    state: Mutex<MockState>,
    latency: Mutex<Option<Duration>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delay every call, so concurrent callers overlap.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(PoisonError::into_inner) = Some(latency);
    }

    async fn wait(&self) {
        let latency = *self.latency.lock().unwrap_or_else(PoisonError::into_inner);
        match latency {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
    }

    /// Add or replace a post and list it in the manifest with `stamp`.
    ///
    /// The stored document keeps its own fields; only the manifest carries
    /// the stamp.
    pub fn publish(&self, post: Post, stamp: impl Into<Stamp>) {
        let stamp = stamp.into();
        let mut state = self.state();
        match state.entries.iter_mut().find(|e| e.id == post.id) {
            Some(entry) => entry.stamp = stamp,
            None => state.entries.push(ManifestEntry::new(post.id.clone(), stamp)),
        }
        state.posts.insert(post.id.clone(), post);
    }

    /// List an id in the manifest without storing a document for it.
    pub fn list_only(&self, id: &str, stamp: impl Into<Stamp>) {
        self.state().entries.push(ManifestEntry::new(id, stamp));
    }

    /// Drop a post from the manifest and the document store.
    pub fn unpublish(&self, id: &str) {
        let mut state = self.state();
        state.entries.retain(|e| e.id != id);
        state.posts.remove(id);
    }

    /// Set the published post count.
    pub fn set_total_posts(&self, total: u64) {
        self.state().total_posts = Some(total);
    }

    /// Make manifest fetches fail (or succeed again).
    pub fn set_manifest_down(&self, down: bool) {
        self.state().manifest_down = down;
    }

    /// Make fetches of one record fail.
    pub fn fail_record(&self, id: &str) {
        self.state().failing_records.insert(id.to_string());
    }

    /// Let a previously failing record succeed again.
    pub fn heal_record(&self, id: &str) {
        self.state().failing_records.remove(id);
    }

    /// Make counter increments fail (or succeed again).
    pub fn set_increments_failing(&self, failing: bool) {
        self.state().failing_increments = failing;
    }

    /// Ids in the current manifest, in order.
    pub fn manifest_ids(&self) -> Vec<String> {
        self.state().entries.iter().map(|e| e.id.clone()).collect()
    }

    /// Number of manifest fetches attempted.
    pub fn manifest_calls(&self) -> usize {
        self.state().manifest_calls
    }

    /// Ids passed to `fetch_record`, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.state().fetched.clone()
    }

    /// Forget recorded fetches.
    pub fn reset_fetched(&self) {
        self.state().fetched.clear();
    }

    /// Successful increments, in call order.
    pub fn increments(&self) -> Vec<(String, Counter)> {
        self.state().increments.clone()
    }

    /// Listings requested, in call order.
    pub fn queries(&self) -> Vec<PostQuery> {
        self.state().queries.clone()
    }
}

fn unavailable(what: &str) -> FilmixoError {
    FilmixoError::Other(anyhow::anyhow!("mock remote: {} unavailable", what))
}

#[async_trait]
impl RemoteSource for MockSource {
    async fn fetch_manifest(&self) -> Result<Manifest> {
        self.wait().await;
        let mut state = self.state();
        state.manifest_calls += 1;
        if state.manifest_down {
            return Err(unavailable("manifest"));
        }
        Ok(Manifest {
            entries: state.entries.clone(),
            total_posts: state.total_posts,
        })
    }

    async fn fetch_record(&self, id: &str) -> Result<Option<Post>> {
        self.wait().await;
        let mut state = self.state();
        state.fetched.push(id.to_string());
        if state.failing_records.contains(id) {
            return Err(unavailable(id));
        }
        Ok(state.posts.get(id).cloned())
    }

    async fn query_posts(&self, query: &PostQuery) -> Result<Vec<Post>> {
        self.wait().await;
        let mut state = self.state();
        state.queries.push(query.clone());

        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| match &query.category {
                Some(slug) => p.category.as_deref() == Some(slug.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            let at = a.upload_time.as_ref().and_then(Stamp::to_datetime);
            let bt = b.upload_time.as_ref().and_then(Stamp::to_datetime);
            bt.cmp(&at).then_with(|| a.id.cmp(&b.id))
        });
        posts.truncate(query.limit);
        Ok(posts)
    }

    async fn increment(&self, id: &str, counter: Counter) -> Result<()> {
        self.wait().await;
        let mut state = self.state();
        if state.failing_increments {
            return Err(unavailable("counter"));
        }
        if let Some(post) = state.posts.get_mut(id) {
            match counter {
                Counter::Views => post.views += 1,
                Counter::Likes => post.likes += 1,
            }
        }
        state.increments.push((id.to_string(), counter));
        Ok(())
    }
}
