//! Implements the `KeyValueStore` trait with one file per key in a directory.

use crate::storage::KeyValueStore;
use crate::{utils, Result};
use anyhow::Context;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::trace;

const EXTENSION: &str = "json";
const TMP_EXTENSION: &str = "json.tmp";

/// Stores the value for `key` at `<dir>/<key>.json`. Writes go to a sibling temp file which is
/// then renamed over the target, so a reader sees either the old blob or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a `FileStore` rooted at `dir`, creating the directory if it does not exist.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        utils::make_dir(&dir)
            .await
            .context("Unable to create the storage directory")?;
        Ok(Self { dir })
    }

    /// The file that holds the value for `key`.
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{EXTENSION}"))
    }

    fn tmp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{TMP_EXTENSION}"))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        trace!("get {key} from {}", path.display());
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read file at {}", path.display())),
        }
    }

    async fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path(key);
        let tmp = self.tmp_path(key);
        trace!("set {key} ({} bytes) at {}", value.len(), path.display());
        utils::write(&tmp, value).await?;
        utils::rename(&tmp, &path).await
    }
}
