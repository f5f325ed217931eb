//! Visibility-driven load trigger.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{FeedPaginator, PageOutcome};

/// Where the trigger stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerState {
    /// Waiting for the sentinel to become visible.
    Armed,
    /// A further load is in flight.
    Loading,
    /// Waiting for a manual resume.
    Paused,
    /// The last load delivered nothing; the sentinel is hidden.
    Exhausted,
}

impl fmt::Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Armed => "armed",
            Self::Loading => "loading",
            Self::Paused => "paused",
            Self::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Turns "sentinel visible" signals into further page loads.
pub struct LoadTrigger {
    paginator: Arc<FeedPaginator>,
    state: Mutex<TriggerState>,
}

impl LoadTrigger {
    pub fn new(paginator: Arc<FeedPaginator>) -> Self {
        Self {
            paginator,
            state: Mutex::new(TriggerState::Armed),
        }
    }

    pub fn paginator(&self) -> &Arc<FeedPaginator> {
        &self.paginator
    }

    fn lock(&self) -> MutexGuard<'_, TriggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state.
    pub fn state(&self) -> TriggerState {
        *self.lock()
    }

    fn set(&self, state: TriggerState) {
        *self.lock() = state;
    }

    /// Run the initial load and arm the trigger.
    pub async fn start(&self) -> PageOutcome {
        let outcome = self.paginator.load_page(true).await;
        self.set(TriggerState::Armed);
        outcome
    }

    /// The sentinel became visible.
    ///
    /// Loads the next page when armed and idle; returns `None` when the
    /// signal was ignored.
    pub async fn on_visible(&self) -> Option<PageOutcome> {
        {
            let mut state = self.lock();
            if *state != TriggerState::Armed || self.paginator.is_fetching() {
                tracing::debug!("Ignoring visibility signal while {}", *state);
                return None;
            }
            *state = TriggerState::Loading;
        }

        let outcome = self.paginator.load_page(false).await;

        let next = match &outcome {
            PageOutcome::Delivered(page) if page.paused => TriggerState::Paused,
            PageOutcome::Delivered(page) if page.posts.is_empty() => TriggerState::Exhausted,
            _ => TriggerState::Armed,
        };
        self.set(next);

        Some(outcome)
    }

    /// Manual "load more": reset the batch counter and re-arm.
    ///
    /// Does not load by itself; the next visibility signal does.
    pub fn resume(&self) {
        self.paginator.reset_batches();
        let mut state = self.lock();
        if *state != TriggerState::Loading {
            *state = TriggerState::Armed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Post, Stamp};
    use crate::feed::FeedSettings;
    use crate::mirror::MemoryMirror;
    use crate::remote::MockSource;
    use crate::sync::SyncEngine;
    use std::time::Duration;

    fn trigger(posts: i64, settings: FeedSettings) -> (LoadTrigger, Arc<MockSource>) {
        let remote = Arc::new(MockSource::new());
        for i in 0..posts {
            remote.publish(Post::new(format!("p{}", i), "Post"), Stamp::Millis(i));
        }
        let sync = SyncEngine::new(Arc::new(MemoryMirror::new()), remote.clone());
        let paginator = Arc::new(FeedPaginator::new(sync, settings));
        (LoadTrigger::new(paginator), remote)
    }

    fn small(pause_after_batches: usize) -> FeedSettings {
        FeedSettings {
            initial_load: 2,
            batch_size: 2,
            pause_after_batches,
        }
    }

    #[tokio::test]
    async fn start_arms() {
        let (trigger, _) = trigger(4, small(2));
        let outcome = trigger.start().await;

        assert_eq!(outcome.page().unwrap().posts.len(), 2);
        assert_eq!(trigger.state(), TriggerState::Armed);
    }

    #[tokio::test]
    async fn pause_then_resume() {
        let (trigger, _) = trigger(20, small(2));
        trigger.start().await;

        trigger.on_visible().await.unwrap();
        assert_eq!(trigger.state(), TriggerState::Armed);
        trigger.on_visible().await.unwrap();
        assert_eq!(trigger.state(), TriggerState::Paused);

        assert!(trigger.on_visible().await.is_none());
        assert_eq!(trigger.paginator().delivered_count(), 6);

        trigger.resume();
        assert_eq!(trigger.state(), TriggerState::Armed);
        assert_eq!(trigger.paginator().consecutive_batches(), 0);

        trigger.on_visible().await.unwrap();
        assert_eq!(trigger.paginator().delivered_count(), 8);
    }

    #[tokio::test]
    async fn empty_page_exhausts() {
        let (trigger, _) = trigger(3, small(0));
        trigger.start().await;

        trigger.on_visible().await.unwrap();
        assert_eq!(trigger.state(), TriggerState::Armed);

        let outcome = trigger.on_visible().await.unwrap();
        assert!(outcome.page().unwrap().posts.is_empty());
        assert_eq!(trigger.state(), TriggerState::Exhausted);
        assert!(trigger.on_visible().await.is_none());
    }

    #[tokio::test]
    async fn visibility_ignored_while_paginator_busy() {
        let (trigger, remote) = trigger(4, small(0));
        remote.set_latency(Duration::from_millis(20));

        let (initial, signal) = tokio::join!(trigger.paginator().load_page(true), async {
            tokio::task::yield_now().await;
            trigger.on_visible().await
        });

        assert!(initial.page().is_some());
        assert!(signal.is_none());
        assert_eq!(trigger.state(), TriggerState::Armed);
    }

    #[test]
    fn state_display() {
        assert_eq!(TriggerState::Exhausted.to_string(), "exhausted");
    }
}
