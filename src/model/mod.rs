//! Types that represent the core data model, such as `Expense` and `Category`.
mod category;
mod expense;

pub use category::Category;
pub(crate) use expense::sort_by_date_desc;
pub use expense::{format_instant, parse_instant, Expense, ExpenseFormData};
