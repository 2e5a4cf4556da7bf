//! The session owns the ledger and budget and is the only mutation path.
//! Every mutation persists the whole value before returning.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::core::metrics::{self, CategoryTotal, DailyTotal, SpendSummary};
use crate::domain::{Budget, Category, ExpenseRecord, FilterState, Ledger};
use crate::errors::{Result, TrackerError};
use crate::storage::StateStore;

pub struct Session {
    ledger: Ledger,
    budget: Budget,
    storage: Box<dyn StateStore>,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Loads stored state, defaulting each entry when it is absent or
    /// unreadable. Corrupt storage is never fatal at startup.
    pub fn open(storage: Box<dyn StateStore>, clock: Arc<dyn Clock>) -> Self {
        let ledger = match storage.load_ledger() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => Ledger::new(),
            Err(err) => {
                tracing::warn!("stored ledger unreadable, starting empty: {err}");
                Ledger::new()
            }
        };
        let budget = match storage.load_budget() {
            Ok(Some(budget)) => budget,
            Ok(None) => Budget::default(),
            Err(err) => {
                tracing::warn!("stored budget unreadable, using default: {err}");
                Budget::default()
            }
        };
        Self {
            ledger,
            budget,
            storage,
            clock,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validates and logs a new expense, stamped with today's date, then
    /// persists the ledger.
    pub fn add_expense(
        &mut self,
        amount: f64,
        category: Category,
        note: &str,
    ) -> Result<ExpenseRecord> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(TrackerError::Validation(
                "amount must be a positive number".into(),
            ));
        }
        let record = ExpenseRecord::new(amount, category, note.trim(), self.clock.today());
        self.ledger.prepend(record.clone());
        self.storage.save_ledger(&self.ledger)?;
        tracing::debug!(id = %record.id, amount, "expense logged");
        Ok(record)
    }

    /// Removes a record by id, persisting on change. An absent id is a
    /// no-op, not an error.
    pub fn remove_expense(&mut self, id: Uuid) -> Result<Option<ExpenseRecord>> {
        let removed = self.ledger.remove(id);
        if removed.is_some() {
            self.storage.save_ledger(&self.ledger)?;
        }
        Ok(removed)
    }

    /// Drops every record and persists the empty ledger.
    pub fn clear_expenses(&mut self) -> Result<usize> {
        let dropped = self.ledger.clear();
        self.storage.save_ledger(&self.ledger)?;
        Ok(dropped)
    }

    /// Replaces the monthly limit. Negative limits are rejected.
    pub fn set_budget(&mut self, monthly_limit: f64) -> Result<()> {
        if !monthly_limit.is_finite() || monthly_limit < 0.0 {
            return Err(TrackerError::Validation(
                "monthly limit must be a non-negative number".into(),
            ));
        }
        self.budget = Budget::new(monthly_limit);
        self.storage.save_budget(&self.budget)?;
        Ok(())
    }

    pub fn summary(&self) -> SpendSummary {
        SpendSummary::from_parts(self.ledger.records(), self.budget)
    }

    pub fn by_category(&self) -> Vec<CategoryTotal> {
        metrics::by_category(self.ledger.records())
    }

    /// Daily series anchored to the session clock's current date.
    pub fn daily_series(&self, window_days: usize) -> Vec<DailyTotal> {
        metrics::daily_series(self.ledger.records(), self.clock.today(), window_days)
    }

    pub fn filtered(&self, filter: &FilterState) -> Vec<&ExpenseRecord> {
        crate::domain::apply_filter(self.ledger.records(), filter)
    }
}
