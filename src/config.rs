//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json`. It names the directory that
//! holds the expense data and the currency symbol amounts are displayed with.

use crate::storage::FileStore;
use crate::store::ExpenseStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_DIR: &str = ".data";
const CURRENCY_SYMBOL: &str = "$";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`. It
/// provides the paths of the items kept within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    data_dir: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, its data directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the home directory, e.g. `$HOME/expenses`
    /// - `currency_symbol` - The symbol to display amounts with. Defaults to `$`.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, currency_symbol: Option<String>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the expenses home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile {
            currency_symbol,
            ..Default::default()
        };
        let data_dir = resolve(&root, config_file.data_path());
        utils::make_dir(&data_dir).await?;
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    /// This will
    /// - validate that `expenses_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(expenses_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = expenses_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The expenses home directory is missing, run 'expenses init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'expenses init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let data_dir = resolve(&root, config_file.data_path());
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn currency_symbol(&self) -> &str {
        self.config_file.currency_symbol()
    }

    /// Opens the file-backed key-value store in the data directory.
    pub async fn storage(&self) -> Result<FileStore> {
        FileStore::new(&self.data_dir).await
    }

    /// Constructs an `ExpenseStore` over `storage()`. The store still needs to be loaded.
    pub async fn expense_store(&self) -> Result<ExpenseStore> {
        let storage = self.storage().await?;
        Ok(ExpenseStore::new(Box::new(storage)))
    }
}

/// Returns `p` unchanged if it is absolute, otherwise resolves it against `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "data_path": ".data",
///   "currency_symbol": "€"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Directory holding the expense data (optional, relative to the home directory or
    /// absolute). Defaults to $EXPENSES_HOME/.data if not specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_path: Option<PathBuf>,

    /// Symbol that amounts are displayed with. Defaults to `$` if not specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency_symbol: Option<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_path: None,
            currency_symbol: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names a different application
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_DIR))
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol.as_deref().unwrap_or(CURRENCY_SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("expenses_home");

        let config = Config::create(&home_dir, Some("€".to_string()))
            .await
            .unwrap();

        assert!(config.config_path().is_file());
        assert!(config.data_dir().is_dir());
        assert_eq!(config.data_dir(), config.root().join(DATA_DIR));
        assert_eq!(config.currency_symbol(), "€");
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), None).await.unwrap();
        let result = Config::create(dir.path(), None).await;
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path(), None).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(created.data_dir(), loaded.data_dir());
        assert_eq!(loaded.currency_symbol(), "$");
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), None).await.unwrap();
        std::fs::remove_dir(config.data_dir()).unwrap();
        let result = Config::load(dir.path()).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("data directory is missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "expenses",
            "config_version": 1
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.data_path(), PathBuf::from(DATA_DIR));
        assert_eq!(config.currency_symbol(), CURRENCY_SYMBOL);
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.json");
        let original = ConfigFile {
            data_path: Some(PathBuf::from("/var/lib/expenses")),
            currency_symbol: Some("£".to_string()),
            ..Default::default()
        };
        original.save(&path).await.unwrap();
        let read = ConfigFile::load(&path).await.unwrap();
        assert_eq!(original, read);
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("data_path"));
        assert!(!json.contains("currency_symbol"));
    }

    #[tokio::test]
    async fn test_absolute_data_path() {
        let home = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        Config::create(home.path(), None).await.unwrap();

        let config_file = ConfigFile {
            data_path: Some(elsewhere.path().to_path_buf()),
            ..Default::default()
        };
        config_file
            .save(home.path().join(CONFIG_JSON))
            .await
            .unwrap();

        let config = Config::load(home.path()).await.unwrap();
        assert_eq!(config.data_dir(), elsewhere.path());
    }
}
