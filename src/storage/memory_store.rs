//! Implements the `KeyValueStore` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this crate so that an embedding
//! application, or a test, can run the store top-to-bottom without touching the disk.

use crate::storage::KeyValueStore;
use crate::Result;
use anyhow::bail;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An in-memory `KeyValueStore`. Clones share the same data, so a test can hand one clone to the
/// expense store and keep another to inspect or tamper with the stored blobs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `MemoryStore` holding `value` under `key`.
    pub fn with_value(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let store = Self::default();
        store.put(key, value);
        store
    }

    /// Read a value directly, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    /// Write a value directly, bypassing failure injection.
    pub fn put(&self, key: &str, value: impl Into<Vec<u8>>) {
        let _ = self.lock().insert(key.to_string(), value.into());
    }

    pub fn remove(&self, key: &str) {
        let _ = self.lock().remove(key);
    }

    /// While set, every `get` fails.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// While set, every `set` fails and leaves the stored value untouched.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("Storage is unavailable, unable to read '{key}'");
        }
        Ok(self.peek(key))
    }

    async fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("Storage is unavailable, unable to write '{key}'");
        }
        self.put(key, value);
        Ok(())
    }
}
