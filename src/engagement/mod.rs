//! View and like counters.
//!
//! Views count at most once per post per session; likes at most once per
//! post per device, tracked in a [`LikeLedger`]. A like the remote counted
//! but the ledger failed to save is still remembered for the session.

pub mod ledger;

pub use ledger::LikeLedger;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::remote::{Counter, RemoteSource};

/// Result of [`Engagement::record_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// The remote counter was incremented.
    Counted,
    /// Already counted this session (or a count is in flight).
    AlreadyCounted,
    /// The increment failed; a later call will retry.
    Failed,
}

/// Result of [`Engagement::like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    AlreadyLiked,
}

/// Session-scoped engagement tracking.
pub struct Engagement {
    remote: Arc<dyn RemoteSource>,
    viewed: Mutex<HashSet<String>>,
    liking: Mutex<HashSet<String>>,
    /// Counted remotely, but the ledger write failed.
    unsaved: Mutex<HashSet<String>>,
    ledger: Mutex<LikeLedger>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Engagement {
    pub fn new(remote: Arc<dyn RemoteSource>, ledger: LikeLedger) -> Self {
        Self {
            remote,
            viewed: Mutex::new(HashSet::new()),
            liking: Mutex::new(HashSet::new()),
            unsaved: Mutex::new(HashSet::new()),
            ledger: Mutex::new(ledger),
        }
    }

    /// Whether this device has liked a post.
    pub fn has_liked(&self, id: &str) -> bool {
        lock(&self.ledger).contains(id) || lock(&self.unsaved).contains(id)
    }

    /// Whether a view was counted for a post this session.
    pub fn has_viewed(&self, id: &str) -> bool {
        lock(&self.viewed).contains(id)
    }

    /// Count a view of a post, once per session.
    ///
    /// Failures are logged, not returned.
    pub async fn record_view(&self, id: &str) -> ViewOutcome {
        if !lock(&self.viewed).insert(id.to_string()) {
            return ViewOutcome::AlreadyCounted;
        }

        match self.remote.increment(id, Counter::Views).await {
            Ok(()) => ViewOutcome::Counted,
            Err(e) => {
                tracing::warn!("Failed to count view for {}: {}", id, e);
                lock(&self.viewed).remove(id);
                ViewOutcome::Failed
            }
        }
    }

    /// Like a post, once per device.
    ///
    /// When the remote counts the like but the ledger cannot be saved, the
    /// error is returned and the like is held in memory, so this session
    /// never counts it twice. The next session may.
    pub async fn like(&self, id: &str) -> Result<LikeOutcome> {
        if self.has_liked(id) || !lock(&self.liking).insert(id.to_string()) {
            return Ok(LikeOutcome::AlreadyLiked);
        }

        let result = match self.remote.increment(id, Counter::Likes).await {
            Ok(()) => {
                let saved = lock(&self.ledger).record(id);
                if let Err(e) = &saved {
                    tracing::warn!("Like for {} was counted but not saved: {}", id, e);
                    lock(&self.unsaved).insert(id.to_string());
                }
                saved.map(|()| LikeOutcome::Liked)
            }
            Err(e) => Err(e),
        };

        lock(&self.liking).remove(id);
        result
    }
}
