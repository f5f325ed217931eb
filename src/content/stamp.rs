//! Last-modified stamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A last-modified stamp: a timestamp or an opaque version token.
///
/// Freshness checks compare stamps by exact equality. Only recency sorting
/// tries to interpret a stamp as an instant (see [`Stamp::to_datetime`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stamp {
    /// Epoch milliseconds.
    Millis(i64),
    /// Document-store timestamp object.
    Epoch {
        seconds: i64,
        #[serde(default)]
        nanoseconds: u32,
    },
    /// Date string or opaque version token.
    Token(String),
}

impl Default for Stamp {
    fn default() -> Self {
        Self::Millis(0)
    }
}

impl Stamp {
    /// The zero stamp a bare manifest id carries. It still takes part in
    /// freshness checks but says nothing about when the post changed.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Millis(0))
    }

    /// Interpret the stamp as an instant, if it looks like one.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Self::Epoch {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            Self::Token(raw) => parse_timestamp(raw),
        }
    }
}

impl From<i64> for Stamp {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for Stamp {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

impl From<String> for Stamp {
    fn from(token: String) -> Self {
        Self::Token(token)
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => write!(f, "{}", ms),
            Self::Epoch {
                seconds,
                nanoseconds,
            } => write!(f, "{}.{:09}", seconds, nanoseconds),
            Self::Token(raw) => f.write_str(raw),
        }
    }
}

/// Parse a textual timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC), a bare
/// `YYYY-MM-DD`, or a string of digits (epoch milliseconds).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    if raw.chars().all(|c| c.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }

    None
}
