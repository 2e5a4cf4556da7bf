//! Domain types for the expense ledger.

pub mod budget;
pub mod category;
pub mod expense;
pub mod filter;
pub mod ledger;

pub use budget::{Budget, DEFAULT_MONTHLY_LIMIT};
pub use category::Category;
pub use expense::ExpenseRecord;
pub use filter::{apply_filter, CategoryFilter, FilterState};
pub use ledger::Ledger;
