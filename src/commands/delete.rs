//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::bail;

/// Deletes the expense with the given ID. Returns the ID if an expense was removed.
///
/// An ID that matches nothing is reported in the message but is not an error.
///
/// # Errors
/// - Returns an error if the stored expenses cannot be loaded or the deletion cannot be saved.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<String>> {
    let mut store = config.expense_store().await?;
    store.load_expenses().await;
    if let Some(error) = store.error() {
        bail!("Unable to load expenses: {error}");
    }

    let removed = store.delete_expense(&args.id).await;
    if let Some(error) = store.error() {
        bail!("Unable to delete expense '{}': {error}", args.id);
    }

    if removed {
        Ok(Out::new(format!("Deleted expense {}", args.id), args.id))
    } else {
        Ok(format!("No expense with ID '{}' was found", args.id).into())
    }
}
