//! Error types.
//!
//! Application-level code (config, commands, the binary) uses `anyhow` through the `Result` alias.
//! The expense store and its persistence codec use the typed `StoreError` so that callers can
//! tell a rejected form apart from a corrupt blob or an unavailable storage device.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// A precondition on caller-supplied expense data was not met. Checked in declaration order;
/// the first failure wins.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Amount must be a valid positive number")]
    InvalidAmount,
    #[error("Invalid date format")]
    InvalidDate,
}

/// Failures raised by the persistence codec and the expense store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The durable blob exists but is not a sequence of expense records.
    #[error("Invalid data format in storage: {0}")]
    CorruptData(String),

    /// The in-memory collection could not be encoded. Not expected for well-formed expenses.
    #[error("Failed to serialize expense data: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Failed to read expense data: {0:#}")]
    StorageRead(anyhow::Error),

    #[error("Failed to write expense data: {0:#}")]
    StorageWrite(anyhow::Error),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::CorruptData(_) => ErrorKind::CorruptData,
            StoreError::Serialization(_) => ErrorKind::Serialization,
            StoreError::StorageRead(_) => ErrorKind::StorageRead,
            StoreError::StorageWrite(_) => ErrorKind::StorageWrite,
        }
    }
}

/// The category of a `StoreError`, kept on the store state next to the rendered message.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    CorruptData,
    Serialization,
    StorageRead,
    StorageWrite,
}

serde_plain::derive_display_from_serialize!(ErrorKind);

/// The `error` field of the store state: what went wrong during the last action, if anything.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorState {
    kind: ErrorKind,
    message: String,
}

impl ErrorState {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&StoreError> for ErrorState {
    fn from(e: &StoreError) -> Self {
        ErrorState::new(e.kind(), e.to_string())
    }
}

impl Display for ErrorState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
