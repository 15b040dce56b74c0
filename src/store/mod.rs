//! The expense store: owns the expense collection and the list filters, validates new expenses,
//! persists every change through the codec, and tells listeners when its state changes.
//!
//! The store is an ordinary value. The application constructs one at start-up, owns it at its
//! root, and lends it to whatever presents it. Mutating actions take `&mut self`, so two of them
//! can never be in flight against the same store at once; each read-modify-write cycle against
//! the durable blob finishes before the next begins.

mod listeners;
mod state;

use crate::codec::ExpenseCodec;
use crate::error::{ErrorState, StoreError, ValidationError};
use crate::model::{
    format_instant, parse_instant, sort_by_date_desc, Category, Expense, ExpenseFormData,
};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use tracing::{debug, error};
use uuid::Uuid;

pub use listeners::Subscription;
pub use state::StoreState;

pub struct ExpenseStore {
    codec: ExpenseCodec,
    state: StoreState,
    listeners: listeners::Listeners,
}

impl ExpenseStore {
    /// Create a store over `storage`. The collection starts empty and the filters start cleared;
    /// call `load_expenses` to read what was persisted.
    pub fn new(storage: Box<dyn KeyValueStore + Send>) -> Self {
        Self {
            codec: ExpenseCodec::new(storage),
            state: StoreState::default(),
            listeners: Default::default(),
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn expenses(&self) -> &[Expense] {
        self.state.expenses()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.state.error()
    }

    pub fn search_query(&self) -> &str {
        self.state.search_query()
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.state.selected_category()
    }

    pub fn filtered_expenses(&self) -> Vec<&Expense> {
        self.state.filtered_expenses()
    }

    pub fn total(&self) -> f64 {
        self.state.total()
    }

    /// Register `listener` to be called with the new state after every committed change. The
    /// listener stays registered until the returned `Subscription` is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StoreState) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Re-reads the whole collection from storage and installs it, most recent first.
    ///
    /// Failures never propagate: they are recorded in `error` and the collection already in
    /// memory is left as it was. Safe to call as often as needed, e.g. on every screen focus.
    pub async fn load_expenses(&mut self) {
        self.commit(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.codec.load().await {
            Ok(mut expenses) => {
                sort_by_date_desc(&mut expenses);
                debug!("Loaded {} expenses", expenses.len());
                self.commit(|s| {
                    s.expenses = expenses;
                    s.is_loading = false;
                });
            }
            Err(e) => {
                error!("Error loading expenses: {e}");
                let error = ErrorState::from(&e);
                self.commit(|s| {
                    s.error = Some(error);
                    s.is_loading = false;
                });
            }
        }
    }

    /// Validates `data`, creates an expense from it, and persists the new collection. The
    /// in-memory collection is only updated once the write has succeeded.
    ///
    /// The stored `date` is normalized to RFC 3339 in UTC with milliseconds, so
    /// `2024-03-01` comes back as `2024-03-01T00:00:00.000Z`.
    ///
    /// # Errors
    /// Every failure is both recorded in `error` and returned, so the caller can keep the user's
    /// input for a retry:
    /// - `StoreError::Validation` if `data` fails a precondition; nothing is written.
    /// - `StoreError::Serialization` or `StoreError::StorageWrite` if persisting fails; the
    ///   collection is unchanged.
    pub async fn add_expense(&mut self, data: ExpenseFormData) -> Result<Expense, StoreError> {
        self.commit(|s| s.error = None);
        match self.try_add_expense(data).await {
            Ok(expense) => Ok(expense),
            Err(e) => {
                error!("Error saving expense: {e}");
                let error = ErrorState::from(&e);
                self.commit(|s| s.error = Some(error));
                Err(e)
            }
        }
    }

    async fn try_add_expense(&mut self, mut data: ExpenseFormData) -> Result<Expense, StoreError> {
        let instant = validate(&data)?;
        data.date = format_instant(&instant);
        let expense = Expense::new(self.generate_id(), data, Utc::now());

        let mut updated = Vec::with_capacity(self.state.expenses.len() + 1);
        updated.push(expense.clone());
        updated.extend(self.state.expenses.iter().cloned());
        sort_by_date_desc(&mut updated);

        self.codec.save(&updated).await?;
        debug!("Added expense {}", expense.id());
        self.commit(|s| s.expenses = updated);
        Ok(expense)
    }

    /// Removes the expense with `id` and persists the result. Returns `true` if an expense was
    /// removed.
    ///
    /// An unknown `id` is not an error. A failed write is recorded in `error` only; the expense
    /// stays in the collection and `false` is returned.
    pub async fn delete_expense(&mut self, id: &str) -> bool {
        self.commit(|s| s.error = None);
        if !self.state.expenses.iter().any(|e| e.id() == id) {
            debug!("No expense with id '{id}', nothing to delete");
            return false;
        }

        let updated: Vec<Expense> = self
            .state
            .expenses
            .iter()
            .filter(|e| e.id() != id)
            .cloned()
            .collect();

        match self.codec.save(&updated).await {
            Ok(()) => {
                debug!("Deleted expense {id}");
                self.commit(|s| s.expenses = updated);
                true
            }
            Err(e) => {
                error!("Error deleting expense: {e}");
                let error = ErrorState::from(&e);
                self.commit(|s| s.error = Some(error));
                false
            }
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.commit(|s| s.search_query = query);
    }

    /// `None` shows every category.
    pub fn set_selected_category(&mut self, category: Option<Category>) {
        self.commit(|s| s.selected_category = category);
    }

    /// Applies `change` to the state and then notifies listeners.
    fn commit(&mut self, change: impl FnOnce(&mut StoreState)) {
        change(&mut self.state);
        self.listeners.notify(&self.state);
    }

    /// A random v4 UUID, re-drawn in the astronomically unlikely case that it is already taken.
    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.state.expenses.iter().any(|e| e.id() == id) {
                return id;
            }
        }
    }
}

/// Checks the preconditions for a new expense, first failure wins, and returns the parsed date.
fn validate(data: &ExpenseFormData) -> Result<DateTime<Utc>, ValidationError> {
    if data.title.trim().is_empty() || data.date.trim().is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !data.amount.is_finite() || data.amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }
    parse_instant(&data.date).ok_or(ValidationError::InvalidDate)
}
