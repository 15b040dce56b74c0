//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::form::{clean_amount_input, ExpenseForm};
use crate::format::{format_currency, format_date_for_display};
use crate::model::Expense;
use crate::{Config, Result};
use anyhow::{anyhow, bail, Context};

/// Records a new expense.
///
/// The arguments go through the same form validation as an interactive entry would, then the
/// stored expenses are loaded and the new expense is added to them. A randomly generated ID is
/// returned with the new expense.
///
/// # Errors
///
/// - Returns an error listing every invalid field if the form does not validate.
/// - Returns an error if the stored expenses cannot be loaded. Nothing is written in that case,
///   so a damaged data file is never overwritten.
/// - Returns an error if the new collection cannot be saved.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let form = ExpenseForm {
        title: args.title,
        amount: clean_amount_input(&args.amount),
        category: Some(args.category),
        date: args.date.unwrap_or_else(ExpenseForm::default_date),
    };
    let data = form
        .validate()
        .map_err(|errors| anyhow!("Invalid expense: {}", errors.messages().join("; ")))?;

    let mut store = config.expense_store().await?;
    store.load_expenses().await;
    if let Some(error) = store.error() {
        bail!("Unable to load expenses: {error}");
    }

    let expense = store
        .add_expense(data)
        .await
        .context("Unable to save the expense")?;

    let message = format!(
        "Added {} {} ({}) on {} with ID: {}",
        expense.title(),
        format_currency(expense.amount(), config.currency_symbol()),
        expense.category(),
        format_date_for_display(expense.date()),
        expense.id()
    );
    Ok(Out::new(message, expense))
}
