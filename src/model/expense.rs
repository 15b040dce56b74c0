use crate::model::Category;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A single recorded spending transaction. Once created, an expense is never modified; the only
/// way to change one is to delete it and add another.
///
/// The serialized field names (`createdAt` in particular) are the durable storage layout, so do
/// not rename them. Any field added later must tolerate being absent on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    id: String,
    title: String,
    amount: f64,
    category: Category,
    date: String,
    created_at: String,
}

impl Expense {
    /// Builds an expense from already-validated form data. The title is trimmed here.
    pub(crate) fn new(
        id: impl Into<String>,
        data: ExpenseFormData,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: data.title.trim().to_string(),
            amount: data.amount,
            category: data.category,
            date: data.date,
            created_at: format_instant(&created_at),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The ISO-8601 instant the expense happened at, as stored.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// The parsed `date`, or `None` when the stored string is not a recognizable instant.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.date)
    }
}

/// The data a user submits to create an expense: an `Expense` without `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFormData {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub date: String,
}

impl ExpenseFormData {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: Category,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            category,
            date: date.into(),
        }
    }
}

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses the date forms accepted for an expense:
/// - an RFC 3339 instant, e.g. `2024-03-01T09:30:00.000Z` or `2024-03-01T09:30:00+02:00`
/// - a calendar date, e.g. `2024-03-01`, taken as midnight UTC
/// - a date and time without an offset, e.g. `2024-03-01T09:30:00`, taken as UTC
///
/// Seconds may be omitted from the time, with or without an offset: `2024-03-01T09:30Z`,
/// `2024-03-01T09:30+02:00` and `2024-03-01T09:30` are all accepted.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if s.trim().is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|dt| dt.and_utc())
}

/// Renders an instant the way it is stored: RFC 3339, millisecond precision, `Z` suffix.
pub fn format_instant(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Sorts most recent first. The sort is stable, so expenses sharing a date keep their relative
/// order. Expenses whose date cannot be parsed go to the end.
pub(crate) fn sort_by_date_desc(expenses: &mut [Expense]) {
    expenses.sort_by_key(|e| Reverse(e.instant()));
}
