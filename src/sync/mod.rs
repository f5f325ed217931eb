//! Mirror reconciliation.
//!
//! Aligns the local mirror with the remote manifest: prunes entries the
//! manifest no longer lists, then fetches every entry that is missing or
//! whose stamp differs from the manifest's.

pub mod engine;
pub mod report;

pub use engine::SyncEngine;
pub use report::SyncReport;
