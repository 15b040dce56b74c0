//! Display helpers for amounts and dates.
//!
//! Dates are rendered in UTC, the zone expenses are dated in. A date string that cannot be
//! parsed is returned unchanged.

use crate::model::parse_instant;
use chrono::{DateTime, Datelike, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Formats `amount` with two decimal places behind `symbol`, e.g. `$4.50`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{symbol}{amount:.2}")
}

/// A short, relative rendering of `date` as seen at `now`: `Today`, `Yesterday`, `3 days ago`
/// within the last week, otherwise `Mar 1`, with the year added when it differs from `now`.
pub fn format_relative_date(date: &str, now: DateTime<Utc>) -> String {
    let Some(instant) = parse_instant(date) else {
        return date.to_string();
    };
    let diff_days = (now - instant).num_milliseconds().div_euclid(MILLIS_PER_DAY);
    match diff_days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{diff_days} days ago"),
        _ if instant.year() == now.year() => instant.format("%b %-d").to_string(),
        _ => instant.format("%b %-d, %Y").to_string(),
    }
}

/// A long rendering of `date`, e.g. `Fri, Mar 1, 2024`.
pub fn format_date_for_display(date: &str) -> String {
    match parse_instant(date) {
        Some(instant) => instant.format("%a, %b %-d, %Y").to_string(),
        None => date.to_string(),
    }
}
