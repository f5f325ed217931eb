//! Mirror-backed feed pagination.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::guard::FetchGuard;
use super::order::sort_by_recency;
use crate::content::Post;
use crate::error::FilmixoError;
use crate::sync::{SyncEngine, SyncReport};

/// Page sizes and the pause threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Posts served by an initial load.
    pub initial_load: usize,
    /// Posts served by each further load.
    pub batch_size: usize,
    /// Consecutive non-empty further loads before the feed pauses.
    /// 0 never pauses.
    pub pause_after_batches: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            initial_load: 6,
            batch_size: 12,
            pause_after_batches: 2,
        }
    }
}

/// One served page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Posts delivered by this load, newest first.
    pub posts: Vec<Post>,
    /// Whether this was an initial load.
    pub initial: bool,
    /// Posts delivered so far this session, including these.
    pub delivered: usize,
    /// Mirror entries not yet delivered.
    pub remaining: usize,
    /// The feed wants a manual resume before loading more.
    pub paused: bool,
    /// Reconciliation outcome, for initial loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncReport>,
}

/// Result of [`FeedPaginator::load_page`].
#[derive(Debug)]
pub enum PageOutcome {
    /// Another load was in flight; nothing happened.
    Busy,
    /// A page was served (possibly empty).
    Delivered(Page),
    /// The mirror could not be read.
    Failed(FilmixoError),
}

impl PageOutcome {
    /// The page, if one was served.
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Delivered(page) => Some(page),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    delivered: Vec<Post>,
    delivered_ids: HashSet<String>,
    consecutive_batches: usize,
}

/// Serves the mirror in pages, newest first.
///
/// Holds the per-session pagination state. Loads are single-flight: a call
/// made while another is in flight returns [`PageOutcome::Busy`] at once.
pub struct FeedPaginator {
    sync: SyncEngine,
    settings: FeedSettings,
    fetching: AtomicBool,
    session: Mutex<Session>,
}

impl FeedPaginator {
    pub fn new(sync: SyncEngine, settings: FeedSettings) -> Self {
        Self {
            sync,
            settings,
            fetching: AtomicBool::new(false),
            session: Mutex::new(Session::default()),
        }
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a load is in flight.
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    /// Number of posts delivered this session.
    pub fn delivered_count(&self) -> usize {
        self.session().delivered.len()
    }

    /// Posts delivered this session, in delivery order.
    pub fn delivered(&self) -> Vec<Post> {
        self.session().delivered.clone()
    }

    /// Look up a delivered post by id.
    pub fn find_delivered(&self, id: &str) -> Option<Post> {
        self.session().delivered.iter().find(|p| p.id == id).cloned()
    }

    /// Consecutive non-empty further loads since the last reset.
    pub fn consecutive_batches(&self) -> usize {
        self.session().consecutive_batches
    }

    /// Zero the consecutive-batch counter (manual resume).
    pub fn reset_batches(&self) {
        self.session().consecutive_batches = 0;
    }

    /// Load the next page.
    ///
    /// An initial load reconciles the mirror first and restarts the
    /// session; a further load serves the next `batch_size` posts not yet
    /// delivered.
    pub async fn load_page(&self, initial: bool) -> PageOutcome {
        let Some(_guard) = FetchGuard::acquire(&self.fetching) else {
            tracing::debug!("Feed load already in flight, dropping request");
            return PageOutcome::Busy;
        };

        let report = if initial {
            let report = self.sync.reconcile().await;
            *self.session() = Session::default();
            Some(report)
        } else {
            None
        };

        let mut posts = match self.sync.mirror().list_all().await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!("Failed to read mirror for feed: {}", e);
                return PageOutcome::Failed(e);
            }
        };
        sort_by_recency(&mut posts);

        let limit = if initial {
            self.settings.initial_load
        } else {
            self.settings.batch_size
        };

        let mut session = self.session();
        let mut undelivered: Vec<Post> = posts
            .into_iter()
            .filter(|p| !session.delivered_ids.contains(&p.id))
            .collect();
        let take = limit.min(undelivered.len());
        let batch: Vec<Post> = undelivered.drain(..take).collect();

        for post in &batch {
            session.delivered_ids.insert(post.id.clone());
            session.delivered.push(post.clone());
        }

        if !initial && !batch.is_empty() {
            session.consecutive_batches += 1;
        }
        let paused = !initial
            && self.settings.pause_after_batches > 0
            && session.consecutive_batches >= self.settings.pause_after_batches;

        tracing::debug!(
            "Served {} posts ({} delivered, {} remaining)",
            batch.len(),
            session.delivered.len(),
            undelivered.len()
        );

        PageOutcome::Delivered(Page {
            posts: batch,
            initial,
            delivered: session.delivered.len(),
            remaining: undelivered.len(),
            paused,
            sync: report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Stamp;
    use crate::mirror::{MemoryMirror, MirrorStore};
    use crate::remote::MockSource;
    use std::sync::Arc;
    use std::time::Duration;

    fn remote_with(count: i64) -> Arc<MockSource> {
        let remote = Arc::new(MockSource::new());
        for i in 0..count {
            remote.publish(Post::new(format!("p{:02}", i), "Post"), Stamp::Millis(i * 1_000));
        }
        remote
    }

    fn paginator(remote: &Arc<MockSource>, settings: FeedSettings) -> FeedPaginator {
        let mirror: Arc<dyn MirrorStore> = Arc::new(MemoryMirror::new());
        FeedPaginator::new(SyncEngine::new(mirror, remote.clone()), settings)
    }

    fn settings(initial_load: usize, batch_size: usize, pause_after_batches: usize) -> FeedSettings {
        FeedSettings {
            initial_load,
            batch_size,
            pause_after_batches,
        }
    }

    fn expect_page(outcome: PageOutcome) -> Page {
        match outcome {
            PageOutcome::Delivered(page) => page,
            other => panic!("expected a page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn initial_load_serves_newest_first() {
        let remote = remote_with(10);
        let feed = paginator(&remote, settings(3, 4, 0));

        let page = expect_page(feed.load_page(true).await);

        let ids: Vec<_> = page.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p09", "p08", "p07"]);
        assert!(page.initial);
        assert_eq!(page.remaining, 7);
        assert_eq!(page.sync.unwrap().fetched.len(), 10);
    }

    #[tokio::test]
    async fn further_loads_never_repeat_and_count_grows() {
        let remote = remote_with(10);
        let feed = paginator(&remote, settings(3, 4, 0));

        let mut seen = HashSet::new();
        let mut last = 0;
        let mut initial = true;
        loop {
            let page = expect_page(feed.load_page(initial).await);
            initial = false;
            assert!(page.delivered >= last);
            last = page.delivered;
            for post in &page.posts {
                assert!(seen.insert(post.id.clone()), "{} delivered twice", post.id);
            }
            if page.posts.is_empty() {
                break;
            }
        }

        assert_eq!(seen.len(), 10);
        assert_eq!(feed.delivered_count(), 10);
    }

    #[tokio::test]
    async fn further_load_does_not_reconcile() {
        let remote = remote_with(4);
        let feed = paginator(&remote, settings(2, 2, 0));

        feed.load_page(true).await;
        feed.load_page(false).await;

        assert_eq!(remote.manifest_calls(), 1);
    }

    #[tokio::test]
    async fn initial_load_resets_session() {
        let remote = remote_with(6);
        let feed = paginator(&remote, settings(2, 2, 0));

        feed.load_page(true).await;
        feed.load_page(false).await;
        assert_eq!(feed.delivered_count(), 4);

        let page = expect_page(feed.load_page(true).await);
        assert_eq!(page.delivered, 2);
        assert_eq!(page.posts[0].id, "p05");
    }

    #[tokio::test]
    async fn pauses_after_two_batches_until_reset() {
        let remote = remote_with(20);
        let feed = paginator(&remote, settings(2, 2, 2));

        assert!(!expect_page(feed.load_page(true).await).paused);
        assert!(!expect_page(feed.load_page(false).await).paused);
        assert!(expect_page(feed.load_page(false).await).paused);
        assert_eq!(feed.consecutive_batches(), 2);

        feed.reset_batches();
        assert!(!expect_page(feed.load_page(false).await).paused);
        assert!(expect_page(feed.load_page(false).await).paused);
    }

    #[tokio::test]
    async fn zero_threshold_never_pauses() {
        let remote = remote_with(20);
        let feed = paginator(&remote, settings(2, 2, 0));

        feed.load_page(true).await;
        for _ in 0..5 {
            assert!(!expect_page(feed.load_page(false).await).paused);
        }
    }

    #[tokio::test]
    async fn concurrent_load_is_dropped() {
        let remote = remote_with(4);
        remote.set_latency(Duration::from_millis(20));
        let feed = paginator(&remote, settings(2, 2, 0));

        let (first, second) = tokio::join!(feed.load_page(true), feed.load_page(true));

        assert!(matches!(first, PageOutcome::Delivered(_)));
        assert!(matches!(second, PageOutcome::Busy));
        assert_eq!(remote.manifest_calls(), 1);
        assert!(!feed.is_fetching());
    }

    #[tokio::test]
    async fn mirror_failure_clears_busy_flag() {
        struct BrokenMirror;

        #[async_trait::async_trait]
        impl MirrorStore for BrokenMirror {
            async fn get(&self, _id: &str) -> crate::Result<Option<Post>> {
                Ok(None)
            }
            async fn put(&self, _post: &Post) -> crate::Result<()> {
                Ok(())
            }
            async fn delete_many(&self, _ids: &[String]) -> crate::Result<usize> {
                Ok(0)
            }
            async fn list_keys(&self) -> crate::Result<Vec<String>> {
                Ok(Vec::new())
            }
            async fn list_all(&self) -> crate::Result<Vec<Post>> {
                Err(FilmixoError::Store {
                    key: "*".into(),
                    message: "disk gone".into(),
                })
            }
        }

        let remote = remote_with(2);
        let feed = FeedPaginator::new(
            SyncEngine::new(Arc::new(BrokenMirror), remote),
            FeedSettings::default(),
        );

        assert!(matches!(feed.load_page(true).await, PageOutcome::Failed(_)));
        assert!(!feed.is_fetching());
        assert!(matches!(feed.load_page(false).await, PageOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn pruned_posts_disappear_after_reload() {
        let remote = remote_with(3);
        let feed = paginator(&remote, settings(10, 10, 0));
        feed.load_page(true).await;

        remote.unpublish("p02");
        let page = expect_page(feed.load_page(true).await);

        assert_eq!(page.posts.len(), 2);
        assert!(feed.find_delivered("p02").is_none());
        assert!(feed.find_delivered("p01").is_some());
    }
}
