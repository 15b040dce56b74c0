use crate::error::ErrorState;
use crate::model::{Category, Expense};
use serde::Serialize;

/// A snapshot of everything the presentation layer reads from the store. Listeners receive one
/// of these after every committed change.
///
/// The derived views (`filtered_expenses`, `total` and the flags) are pure functions of the
/// snapshot and are recomputed on each call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreState {
    pub(super) expenses: Vec<Expense>,
    pub(super) is_loading: bool,
    pub(super) error: Option<ErrorState>,
    pub(super) search_query: String,
    pub(super) selected_category: Option<Category>,
}

impl StoreState {
    /// All expenses, most recent first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// What went wrong during the most recent action, if anything.
    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    /// The expenses matching the current search text and category, in collection order.
    ///
    /// A non-blank search query keeps expenses whose title contains the trimmed query,
    /// ignoring case. A selected category keeps only expenses in that category. Both filters
    /// apply together.
    pub fn filtered_expenses(&self) -> Vec<&Expense> {
        let query = self.search_query.trim().to_lowercase();
        self.expenses
            .iter()
            .filter(|e| query.is_empty() || e.title().to_lowercase().contains(&query))
            .filter(|e| match self.selected_category {
                Some(category) => e.category() == category,
                None => true,
            })
            .collect()
    }

    /// Sum of the filtered amounts, added left to right in list order. Zero when nothing matches.
    pub fn total(&self) -> f64 {
        self.filtered_expenses()
            .iter()
            .fold(0.0, |sum, e| sum + e.amount())
    }

    /// There are no expenses at all, as opposed to filters hiding them.
    pub fn has_no_expenses(&self) -> bool {
        self.expenses.is_empty()
    }

    /// There are expenses, but the current filters match none of them.
    pub fn has_no_results(&self) -> bool {
        !self.has_no_expenses() && self.filtered_expenses().is_empty()
    }

    /// A load is in progress and there is nothing cached to show yet.
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && self.expenses.is_empty()
    }
}
