//! Translates between the in-memory expense collection and the single durable blob that holds
//! it.

use crate::error::StoreError;
use crate::model::Expense;
use crate::storage::KeyValueStore;
use serde_json::Value;
use tracing::{debug, trace};

/// The one key under which the whole collection is stored, as a JSON array of expenses.
pub const STORAGE_KEY: &str = "expenses_data";

/// Reads and writes the expense collection through a dynamically-dispatched `KeyValueStore`.
/// The entire collection is the unit of write; there is no journaling beyond what a single
/// `set` on the underlying store guarantees.
pub struct ExpenseCodec {
    storage: Box<dyn KeyValueStore + Send>,
}

impl ExpenseCodec {
    pub fn new(storage: Box<dyn KeyValueStore + Send>) -> Self {
        Self { storage }
    }

    /// Loads the collection. An absent blob is a first launch and yields an empty collection.
    ///
    /// # Errors
    /// - `StoreError::StorageRead` if the underlying store fails.
    /// - `StoreError::CorruptData` if the blob is not JSON, is not an array, or holds records
    ///   that are not expenses.
    pub async fn load(&mut self) -> Result<Vec<Expense>, StoreError> {
        let bytes = match self
            .storage
            .get(STORAGE_KEY)
            .await
            .map_err(StoreError::StorageRead)?
        {
            Some(bytes) => bytes,
            None => {
                debug!("No stored expenses found under '{STORAGE_KEY}'");
                return Ok(Vec::new());
            }
        };
        trace!("Read {} bytes from '{STORAGE_KEY}'", bytes.len());
        decode(&bytes)
    }

    /// Serializes the full collection and writes it under `STORAGE_KEY`, replacing the prior
    /// value.
    ///
    /// # Errors
    /// - `StoreError::Serialization` if the collection cannot be encoded.
    /// - `StoreError::StorageWrite` if the underlying store fails.
    pub async fn save(&mut self, expenses: &[Expense]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(expenses).map_err(StoreError::Serialization)?;
        trace!(
            "Writing {} expenses ({} bytes) to '{STORAGE_KEY}'",
            expenses.len(),
            bytes.len()
        );
        self.storage
            .set(STORAGE_KEY, &bytes)
            .await
            .map_err(StoreError::StorageWrite)
    }
}

fn decode(bytes: &[u8]) -> Result<Vec<Expense>, StoreError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| StoreError::CorruptData(format!("stored expenses are not valid JSON: {e}")))?;
    if !value.is_array() {
        return Err(StoreError::CorruptData(
            "stored expenses are not an array".to_string(),
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| StoreError::CorruptData(format!("stored expense records are malformed: {e}")))
}
