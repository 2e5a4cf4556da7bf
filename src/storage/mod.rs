//! Durable persistence for the two keyed state entries.

pub mod json_store;

pub use json_store::JsonStateStore;

use crate::domain::{Budget, Ledger};
use crate::errors::Result;

/// Abstraction over persistence backends capable of storing the ledger and
/// budget entries. Each entry is written whole on every mutation.
pub trait StateStore: Send + Sync {
    /// Reads the stored ledger. `Ok(None)` when no entry exists yet; an
    /// error only for unreadable or unparsable data.
    fn load_ledger(&self) -> Result<Option<Ledger>>;

    fn save_ledger(&self, ledger: &Ledger) -> Result<()>;

    /// Reads the stored budget, with the same absence semantics as
    /// [`StateStore::load_ledger`].
    fn load_budget(&self) -> Result<Option<Budget>>;

    fn save_budget(&self, budget: &Budget) -> Result<()>;
}
