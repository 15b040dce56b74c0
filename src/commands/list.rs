//! List command handler.

use crate::args::ListArgs;
use crate::commands::Out;
use crate::format::{format_currency, format_relative_date};
use crate::model::{Category, Expense};
use crate::store::StoreState;
use crate::{Config, Result};
use anyhow::bail;
use chrono::Utc;
use serde::Serialize;

/// The filtered view of the expenses along with its total.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseList {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub expenses: Vec<ExpenseRow>,
    pub total: f64,
}

/// One listed expense with its display strings.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseRow {
    #[serde(flatten)]
    pub expense: Expense,
    pub display_amount: String,
    pub display_date: String,
}

/// Lists the expenses matching `args`, most recent first, followed by their total.
///
/// # Errors
/// - Returns an error if the stored expenses cannot be loaded.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<ExpenseList>> {
    let mut store = config.expense_store().await?;
    store.load_expenses().await;
    if let Some(error) = store.error() {
        bail!("Unable to load expenses: {error}");
    }
    store.set_search_query(args.search.clone().unwrap_or_default());
    store.set_selected_category(args.category);

    let symbol = config.currency_symbol();
    let now = Utc::now();
    let rows: Vec<ExpenseRow> = store
        .filtered_expenses()
        .into_iter()
        .map(|e| ExpenseRow {
            expense: e.clone(),
            display_amount: format_currency(e.amount(), symbol),
            display_date: format_relative_date(e.date(), now),
        })
        .collect();

    let message = render(store.state(), &rows, symbol);
    let list = ExpenseList {
        search: args.search,
        category: args.category,
        expenses: rows,
        total: store.total(),
    };
    Ok(Out::new(message, list))
}

fn render(state: &StoreState, rows: &[ExpenseRow], symbol: &str) -> String {
    if state.has_no_expenses() {
        return "No expenses yet. Record one with 'expenses add'.".to_string();
    }
    if state.has_no_results() {
        return "No expenses match the current search and category.".to_string();
    }
    let mut lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let e = &row.expense;
            format!(
                "{} {:<28} {:>12}  {:<9}  {:<12}  {}",
                e.category().icon(),
                e.title(),
                row.display_amount,
                e.category().to_string(),
                row.display_date,
                e.id()
            )
        })
        .collect();
    let noun = if rows.len() == 1 { "expense" } else { "expenses" };
    lines.push(format!(
        "{} {noun}, total {}",
        rows.len(),
        format_currency(state.total(), symbol)
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::AddArgs;
    use crate::commands::add;
    use crate::test::TestEnv;

    async fn seed(env: &TestEnv) {
        let rows = [
            ("Coffee", "4.50", Category::Food, "2024-03-01"),
            ("Train ticket", "12", Category::Transport, "2024-02-15"),
            ("Coffee beans", "15.25", Category::Shopping, "2024-03-03"),
        ];
        for (title, amount, category, date) in rows {
            let args = AddArgs {
                title: title.to_string(),
                amount: amount.to_string(),
                category,
                date: Some(date.to_string()),
            };
            add(env.config(), args).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_list_empty() {
        let env = TestEnv::new().await;
        let out = list(env.config(), ListArgs::default()).await.unwrap();
        assert!(out.message().starts_with("No expenses yet"));
        let structure = out.structure().unwrap();
        assert!(structure.expenses.is_empty());
        assert_eq!(structure.total, 0.0);
    }

    #[tokio::test]
    async fn test_list_all() {
        let env = TestEnv::new().await;
        seed(&env).await;
        let out = list(env.config(), ListArgs::default()).await.unwrap();
        let structure = out.structure().unwrap();
        let titles: Vec<&str> = structure
            .expenses
            .iter()
            .map(|r| r.expense.title())
            .collect();
        assert_eq!(titles, vec!["Coffee beans", "Coffee", "Train ticket"]);
        assert_eq!(structure.total, 15.25 + 4.5 + 12.0);
        assert!(out.message().ends_with("3 expenses, total $31.75"));
        assert_eq!(structure.expenses[1].display_amount, "$4.50");
    }

    #[tokio::test]
    async fn test_list_filtered() {
        let env = TestEnv::new().await;
        seed(&env).await;
        let args = ListArgs {
            search: Some("COF".to_string()),
            category: Some(Category::Food),
        };
        let out = list(env.config(), args).await.unwrap();
        let structure = out.structure().unwrap();
        assert_eq!(structure.expenses.len(), 1);
        assert_eq!(structure.expenses[0].expense.title(), "Coffee");
        assert_eq!(structure.total, 4.5);
        assert!(out.message().ends_with("1 expense, total $4.50"));

        let args = ListArgs {
            search: Some("pizza".to_string()),
            category: None,
        };
        let out = list(env.config(), args).await.unwrap();
        assert!(out.message().starts_with("No expenses match"));
    }

    #[tokio::test]
    async fn test_list_corrupt_data() {
        let env = TestEnv::new().await;
        let config = env.config();
        let path = config.storage().await.unwrap().path(crate::codec::STORAGE_KEY);
        std::fs::write(&path, "{}").unwrap();
        let err = list(config, ListArgs::default()).await.unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }
}
