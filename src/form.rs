//! The add-expense form: raw text as the user typed it, validated field by field into an
//! `ExpenseFormData` the store will accept.

use crate::model::{format_instant, Category, ExpenseFormData};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The form fields before validation.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category: Option<Category>,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// One message per field that failed validation.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.amount.is_none() && self.category.is_none() && self.date.is_none()
    }

    /// All messages, in field order.
    pub fn messages(&self) -> Vec<&str> {
        [&self.title, &self.amount, &self.category, &self.date]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

impl ExpenseForm {
    /// An empty form with the date set to today.
    pub fn new() -> Self {
        Self {
            date: Self::default_date(),
            ..Default::default()
        }
    }

    /// Today's UTC date as `YYYY-MM-DD`, matching the zone dates are stored and shown in.
    pub fn default_date() -> String {
        Utc::now().date_naive().format(DATE_FORMAT).to_string()
    }

    /// Checks every field and, if they all pass, converts the form into `ExpenseFormData` with a
    /// trimmed title and the date as a midnight-UTC instant.
    pub fn validate(&self) -> Result<ExpenseFormData, FormErrors> {
        let mut errors = FormErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.title = Some("Title is required".to_string());
        }

        let amount = self.amount.trim();
        let parsed_amount = amount.parse::<f64>().ok();
        if amount.is_empty() {
            errors.amount = Some("Amount is required".to_string());
        } else if !parsed_amount.is_some_and(|a| a.is_finite() && a > 0.0) {
            errors.amount = Some("Amount must be greater than 0".to_string());
        }

        if self.category.is_none() {
            errors.category = Some("Please select a category".to_string());
        }

        let date = self.date.trim();
        let mut parsed_date = None;
        if date.is_empty() {
            errors.date = Some("Date is required".to_string());
        } else if !is_date_shaped(date) {
            errors.date = Some("Use format YYYY-MM-DD".to_string());
        } else {
            parsed_date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok();
            if parsed_date.is_none() {
                errors.date = Some("Invalid date. Please use format YYYY-MM-DD.".to_string());
            }
        }

        match (errors.is_empty(), parsed_amount, self.category, parsed_date) {
            (true, Some(amount), Some(category), Some(date)) => {
                let instant = date.and_time(NaiveTime::MIN).and_utc();
                Ok(ExpenseFormData::new(
                    title,
                    amount,
                    category,
                    format_instant(&instant),
                ))
            }
            _ => Err(errors),
        }
    }
}

/// Keeps only the characters that can appear in an amount: digits and `.`.
pub fn clean_amount_input(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Formats date input as the user types: keeps up to eight digits and inserts the dashes of
/// `YYYY-MM-DD`.
pub fn format_date_input(text: &str) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).take(8).collect();
    let mut formatted = String::with_capacity(10);
    for (ix, c) in digits.chars().enumerate() {
        if ix == 4 || ix == 6 {
            formatted.push('-');
        }
        formatted.push(c);
    }
    formatted
}

/// `NNNN-NN-NN`, digits only.
fn is_date_shaped(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(ix, b)| match ix {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, amount: &str, category: Option<Category>, date: &str) -> ExpenseForm {
        ExpenseForm {
            title: title.to_string(),
            amount: amount.to_string(),
            category,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let data = form(" Coffee ", "4.50", Some(Category::Food), "2024-03-01")
            .validate()
            .unwrap();
        assert_eq!(data.title, "Coffee");
        assert_eq!(data.amount, 4.5);
        assert_eq!(data.category, Category::Food);
        assert_eq!(data.date, "2024-03-01T00:00:00.000Z");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = form("", "", None, "").validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "Title is required",
                "Amount is required",
                "Please select a category",
                "Date is required"
            ]
        );
    }

    #[test]
    fn test_bad_amounts() {
        // The whole field must be a number; a valid prefix such as `1.2` in `1.2.3` is not enough.
        for amount in ["0", "-3", "abc", "1.2.3", "12abc", "inf", "NaN"] {
            let errors = form("Tea", amount, Some(Category::Food), "2024-03-01")
                .validate()
                .unwrap_err();
            assert_eq!(
                errors.amount.as_deref(),
                Some("Amount must be greater than 0"),
                "{amount}"
            );
            assert!(errors.title.is_none());
        }
    }

    #[test]
    fn test_bad_dates() {
        let errors = form("Tea", "3", Some(Category::Food), "2024/03/01")
            .validate()
            .unwrap_err();
        assert_eq!(errors.date.as_deref(), Some("Use format YYYY-MM-DD"));

        let errors = form("Tea", "3", Some(Category::Food), "2024-3-1")
            .validate()
            .unwrap_err();
        assert_eq!(errors.date.as_deref(), Some("Use format YYYY-MM-DD"));

        let errors = form("Tea", "3", Some(Category::Food), "2024-02-30")
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.date.as_deref(),
            Some("Invalid date. Please use format YYYY-MM-DD.")
        );
    }

    #[test]
    fn test_new_form_defaults_to_today() {
        let today = Utc::now().date_naive().format(DATE_FORMAT).to_string();
        let f = ExpenseForm::new();
        assert_eq!(f.date, today);
        assert!(f.title.is_empty());
        assert!(f.category.is_none());
    }

    #[test]
    fn test_clean_amount_input() {
        assert_eq!(clean_amount_input("$1,234.50"), "1234.50");
        assert_eq!(clean_amount_input("-12a"), "12");
        assert_eq!(clean_amount_input(""), "");
    }

    #[test]
    fn test_format_date_input() {
        assert_eq!(format_date_input("2024"), "2024");
        assert_eq!(format_date_input("20240"), "2024-0");
        assert_eq!(format_date_input("202403"), "2024-03");
        assert_eq!(format_date_input("2024031"), "2024-03-1");
        assert_eq!(format_date_input("20240315"), "2024-03-15");
        assert_eq!(format_date_input("2024-03-15999"), "2024-03-15");
        assert_eq!(format_date_input("ab"), "");
    }
}
