//! Content model shared by the mirror, the remote source and the feed.
//!
//! - [`Post`] is both the remote record and the mirror entry
//! - [`Stamp`] is the last-modified token compared during reconciliation
//! - [`Manifest`] lists the identifiers the remote considers active

pub mod manifest;
pub mod post;
pub mod stamp;

pub use manifest::{Manifest, ManifestEntry};
pub use post::Post;
pub use stamp::{parse_timestamp, Stamp};
