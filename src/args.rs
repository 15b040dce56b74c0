//! These structs provide the CLI interface for the expenses CLI.

use crate::model::Category;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for tracking personal expenses.
///
/// Record what you spend with a title, amount, category and date, then list, search, filter and
/// total your expenses. Everything is stored locally in a single JSON file under the expenses
/// home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and the initial configuration file.
    ///
    /// This is the first command you should run. By default the home directory is
    /// $HOME/expenses; pass --expenses-home or set EXPENSES_HOME to put it somewhere else.
    Init(InitArgs),
    /// Record a new expense.
    Add(AddArgs),
    /// List expenses, most recent first, with their total.
    List(ListArgs),
    /// Delete an expense by its ID.
    Delete(DeleteArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expense data and configuration is held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The symbol amounts are displayed with. Defaults to $
    #[arg(long)]
    currency_symbol: Option<String>,
}

impl InitArgs {
    pub fn new(currency_symbol: Option<String>) -> Self {
        Self { currency_symbol }
    }

    pub fn currency_symbol(&self) -> Option<&str> {
        self.currency_symbol.as_deref()
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// What the money was spent on.
    #[arg(long)]
    pub title: String,

    /// How much was spent, e.g. 4.50. Anything other than digits and '.' is ignored.
    #[arg(long)]
    pub amount: String,

    /// The spending category.
    #[arg(long, value_enum, ignore_case = true)]
    pub category: Category,

    /// The day the money was spent, as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

/// Args for the `expenses list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only show expenses whose title contains this text, ignoring case.
    #[arg(long)]
    pub search: Option<String>,

    /// Only show expenses in this category.
    #[arg(long, value_enum, ignore_case = true)]
    pub category: Option<Category>,
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the expense to delete, as shown by `expenses list`.
    pub id: String,
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from([
            "expenses",
            "--expenses-home",
            "/tmp/x",
            "add",
            "--title",
            "Coffee",
            "--amount",
            "4.50",
            "--category",
            "food",
        ])
        .unwrap();
        assert_eq!(args.common().expenses_home().path(), Path::new("/tmp/x"));
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.title, "Coffee");
                assert_eq!(add.category, Category::Food);
                assert!(add.date.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_filters() {
        let args = Args::try_parse_from([
            "expenses",
            "--log-level",
            "debug",
            "list",
            "--search",
            "cof",
            "--category",
            "Bills",
        ])
        .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        match args.command() {
            Command::List(list) => {
                assert_eq!(list.search.as_deref(), Some("cof"));
                assert_eq!(list.category, Some(Category::Bills));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = Args::try_parse_from([
            "expenses", "add", "--title", "x", "--amount", "1", "--category", "Groceries",
        ]);
        assert!(result.is_err());
    }
}
