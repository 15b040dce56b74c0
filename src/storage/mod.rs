//! The device persistence API: an asynchronous key-value store of opaque byte blobs.
//!
//! The expense store only ever touches this through `KeyValueStore`. Two implementations are
//! provided: `FileStore`, which keeps one file per key in a directory, and `MemoryStore`, which
//! keeps everything in memory and can be told to fail.

mod file_store;
mod memory_store;

use crate::Result;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// An asynchronous key-value byte store.
///
/// A single `set` call either replaces the whole value under `key` or leaves the prior value in
/// place. Nothing more is promised.
#[async_trait::async_trait]
pub trait KeyValueStore {
    /// Returns the bytes stored under `key`, or `None` if nothing has been stored there yet.
    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any prior value.
    async fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}
