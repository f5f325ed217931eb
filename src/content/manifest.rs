//! The remote manifest of active posts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Stamp;

/// An active identifier and its last-modified stamp.
///
/// On the wire an entry is either `{"id": "...", "t": ...}` or a bare id
/// string; a bare id carries the zero stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireEntry")]
pub struct ManifestEntry {
    pub id: String,
    #[serde(rename = "t")]
    pub stamp: Stamp,
}

impl ManifestEntry {
    /// Create an entry.
    pub fn new(id: impl Into<String>, stamp: impl Into<Stamp>) -> Self {
        Self {
            id: id.into(),
            stamp: stamp.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireEntry {
    Bare(String),
    Stamped {
        id: String,
        #[serde(default)]
        t: Stamp,
    },
}

impl From<WireEntry> for ManifestEntry {
    fn from(wire: WireEntry) -> Self {
        match wire {
            WireEntry::Bare(id) => Self {
                id,
                stamp: Stamp::default(),
            },
            WireEntry::Stamped { id, t } => Self { id, stamp: t },
        }
    }
}

/// The authoritative list of active posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Active entries, in the order reconciliation processes them.
    #[serde(rename = "allIds", default)]
    pub entries: Vec<ManifestEntry>,

    /// Site-wide post count, when the remote publishes one.
    #[serde(rename = "total_posts", default, skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<u64>,
}

impl Manifest {
    /// Build a manifest from entries.
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self {
            entries,
            total_posts: None,
        }
    }

    /// Identifiers of every active post.
    pub fn active_ids(&self) -> HashSet<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Look up the stamp for an id.
    pub fn stamp_of(&self, id: &str) -> Option<&Stamp> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.stamp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Published post count, falling back to the number of entries.
    pub fn total(&self) -> u64 {
        self.total_posts.unwrap_or(self.entries.len() as u64)
    }
}
