//! Filmixo - offline-first client for the Filmixo movie-review feed.
//!
//! Keeps an on-device mirror of the site's posts in step with the remote
//! manifest, pages through it newest first, and tracks view and like
//! counters.
//!
//! # Modules
//!
//! - [`category`] - Category browsing straight from the remote
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`content`] - Posts, stamps, and the manifest
//! - [`engagement`] - View and like counters
//! - [`error`] - Error types and result aliases
//! - [`feed`] - Homepage pagination and the load trigger
//! - [`format`] - Compact counts and dates
//! - [`mirror`] - Local mirror stores
//! - [`remote`] - Remote document source
//! - [`route`] - Post page addresses
//! - [`sync`] - Mirror reconciliation
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use filmixo::content::{Post, Stamp};
//! use filmixo::feed::{FeedPaginator, FeedSettings};
//! use filmixo::mirror::MemoryMirror;
//! use filmixo::remote::MockSource;
//! use filmixo::sync::SyncEngine;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let remote = Arc::new(MockSource::new());
//! remote.publish(Post::new("p1", "Heat"), Stamp::Millis(1_700_000_000_000));
//!
//! let engine = SyncEngine::new(Arc::new(MemoryMirror::new()), remote);
//! let feed = FeedPaginator::new(engine, FeedSettings::default());
//!
//! let outcome = feed.load_page(true).await;
//! let page = outcome.page().unwrap();
//! assert_eq!(page.posts[0].title, "Heat");
//! # });
//! ```

pub mod category;
pub mod cli;
pub mod config;
pub mod content;
pub mod engagement;
pub mod error;
pub mod feed;
pub mod format;
pub mod mirror;
pub mod remote;
pub mod route;
pub mod sync;
pub mod ui;

pub use error::{FilmixoError, Result};
