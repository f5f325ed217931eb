//! Outcome of one reconciliation pass.

use serde::Serialize;

/// What a reconciliation pass did.
///
/// A pass never fails as a whole; anything that went wrong is recorded here
/// and logged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Number of entries in the manifest (0 when aborted).
    pub manifest_size: usize,
    /// Entries removed because the manifest no longer lists them.
    pub pruned: usize,
    /// Leftover files removed from the mirror: unreadable entries and
    /// interrupted writes.
    pub swept: usize,
    /// Ids fetched and written to the mirror.
    pub fetched: Vec<String>,
    /// Entries already matching the manifest stamp.
    pub fresh: usize,
    /// Ids the manifest lists but the remote has no document for.
    pub missing: Vec<String>,
    /// Ids whose fetch or write failed.
    pub failed: Vec<String>,
    /// The manifest could not be fetched, so nothing was touched.
    pub aborted: bool,
}

impl SyncReport {
    pub(crate) fn aborted() -> Self {
        Self {
            aborted: true,
            ..Self::default()
        }
    }

    /// True when the pass changed nothing in the mirror.
    pub fn is_noop(&self) -> bool {
        self.pruned == 0 && self.swept == 0 && self.fetched.is_empty()
    }

    /// True when every manifest entry ended up fresh in the mirror.
    pub fn is_complete(&self) -> bool {
        !self.aborted && self.missing.is_empty() && self.failed.is_empty()
    }

    /// One-line summary for logs and terminal output.
    pub fn summary(&self) -> String {
        if self.aborted {
            return "sync aborted: manifest unavailable".to_string();
        }
        let mut summary = format!(
            "{} active, {} fetched, {} fresh, {} pruned",
            self.manifest_size,
            self.fetched.len(),
            self.fresh,
            self.pruned
        );
        if self.swept > 0 {
            summary.push_str(&format!(", {} swept", self.swept));
        }
        if !self.missing.is_empty() {
            summary.push_str(&format!(", {} missing", self.missing.len()));
        }
        if !self.failed.is_empty() {
            summary.push_str(&format!(", {} failed", self.failed.len()));
        }
        summary
    }
}
