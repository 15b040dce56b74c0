use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, its data directory and an initial `config.json`.
///
/// # Errors
/// - Returns an error if the home directory is already initialized or a file operation fails.
pub async fn init(expenses_home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let config = Config::create(expenses_home, args.currency_symbol().map(str::to_string))
        .await
        .context("Unable to create the expenses home directory and config")?;
    Ok(format!(
        "Successfully created the expenses home directory at {}",
        config.root().display()
    )
    .into())
}
