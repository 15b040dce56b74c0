pub mod args;
mod codec;
pub mod commands;
mod config;
mod error;
pub mod form;
pub mod format;
pub mod model;
pub mod storage;
pub mod store;
mod utils;


pub use codec::{ExpenseCodec, STORAGE_KEY};
pub use config::Config;
pub use error::{Error, ErrorKind, ErrorState, Result, StoreError, ValidationError};
