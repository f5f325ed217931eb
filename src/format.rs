//! Display helpers for counts and dates.

use chrono::{DateTime, Utc};

/// Compact a count: `950`, `1.5K`, `2M`, `3.1B`.
pub fn format_count(count: u64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    let value = count as f64;
    for (scale, suffix) in UNITS {
        if value >= scale {
            let scaled = format!("{:.1}", value / scale);
            let scaled = scaled.strip_suffix(".0").unwrap_or(&scaled);
            return format!("{}{}", scaled, suffix);
        }
    }
    count.to_string()
}

/// `MM/DD/YYYY`.
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.format("%m/%d/%Y").to_string()
}

/// Coarse relative time such as `3d ago`.
///
/// Months are 30 days and years 365. Instants in the future read as
/// `Just now`.
pub fn time_ago(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - instant).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    let (amount, unit) = if days / 365 > 0 {
        (days / 365, "y")
    } else if days / 30 > 0 {
        (days / 30, "mo")
    } else if days / 7 > 0 {
        (days / 7, "w")
    } else if days > 0 {
        (days, "d")
    } else if hours > 0 {
        (hours, "h")
    } else if minutes > 0 {
        (minutes, "m")
    } else {
        return "Just now".to_string();
    };

    format!("{}{} ago", amount, unit)
}
