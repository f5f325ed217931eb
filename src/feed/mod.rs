//! The homepage feed.
//!
//! [`FeedPaginator`] serves the mirror in pages, newest first, and
//! [`LoadTrigger`] turns visibility signals into further loads with a
//! manual pause every few batches.

pub mod guard;
pub mod order;
pub mod paginator;
pub mod trigger;

pub use guard::FetchGuard;
pub use order::{compare_recency, sort_by_recency};
pub use paginator::{FeedPaginator, FeedSettings, Page, PageOutcome};
pub use trigger::{LoadTrigger, TriggerState};
