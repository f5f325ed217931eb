//! Post records as served by the remote source and kept in the mirror.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Stamp;

/// A review post.
///
/// The same shape is used for remote records and mirror entries; a mirror
/// entry may simply be stale. Fields this crate does not interpret are kept
/// in `extra` so nothing is lost on a round trip through the mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier.
    #[serde(default)]
    pub id: String,

    /// Last-modified stamp copied from the manifest at sync time.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<Stamp>,

    /// Headline.
    #[serde(default)]
    pub title: String,

    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_image: Option<String>,

    /// Body paragraphs; the first doubles as the card excerpt.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<String>,

    /// Publication time, used when no stamp is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_time: Option<Stamp>,

    /// Category slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub views: u64,

    #[serde(default)]
    pub likes: u64,

    /// Everything else the remote sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Create a post with an id and title and nothing else.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stamp: None,
            title: title.into(),
            media_image: None,
            paragraphs: Vec::new(),
            upload_time: None,
            category: None,
            views: 0,
            likes: 0,
            extra: Map::new(),
        }
    }

    /// Set the last-modified stamp.
    pub fn with_stamp(mut self, stamp: impl Into<Stamp>) -> Self {
        self.stamp = Some(stamp.into());
        self
    }

    /// Set the upload time.
    pub fn with_upload_time(mut self, upload_time: impl Into<Stamp>) -> Self {
        self.upload_time = Some(upload_time.into());
        self
    }

    /// Set the category slug.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Append a body paragraph.
    pub fn with_paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    /// The stamp freshness checks compare against the manifest.
    ///
    /// Entries written by the sync engine always carry `t`; older entries
    /// fall back to their upload time.
    pub fn freshness_stamp(&self) -> Option<&Stamp> {
        self.stamp.as_ref().or(self.upload_time.as_ref())
    }

    /// The instant used to order the feed, newest first.
    ///
    /// Uses the stamp when it is set and parses, otherwise the upload time.
    /// `None` means the post sorts after every dated post.
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.stamp
            .as_ref()
            .filter(|s| !s.is_unset())
            .and_then(Stamp::to_datetime)
            .or_else(|| self.upload_time.as_ref().and_then(Stamp::to_datetime))
    }

    /// First paragraph, or an empty string.
    pub fn excerpt(&self) -> &str {
        self.paragraphs.first().map(String::as_str).unwrap_or("")
    }
}
