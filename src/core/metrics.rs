//! Pure derivations over the ledger and budget. Everything here is
//! stateless and recomputed on every call; ledgers are small enough that
//! incremental maintenance would not pay for itself.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Duration, NaiveDate};

use crate::domain::category::FIXED_CATEGORIES;
use crate::domain::{Budget, Category, ExpenseRecord};

/// Trailing window used by the daily series unless a caller asks otherwise.
pub const DEFAULT_WINDOW_DAYS: usize = 7;

/// Sum spent per category, presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Spending attributed to one calendar day of the trailing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Describes whether spending is aligned with the monthly limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    OverBudget,
    UnderBudget,
    Empty,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::Empty => "Empty",
        };
        f.write_str(label)
    }
}

/// Aggregate headline figures for the current ledger and budget.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendSummary {
    pub total_spent: f64,
    pub remaining: f64,
    pub percent_used: f64,
    pub status: BudgetStatus,
}

impl SpendSummary {
    pub fn from_parts(records: &[ExpenseRecord], budget: Budget) -> Self {
        let total_spent = total_spent(records);
        let limit = budget.monthly_limit;
        let status = if total_spent.abs() < f64::EPSILON && limit.abs() < f64::EPSILON {
            BudgetStatus::Empty
        } else {
            match total_spent.partial_cmp(&limit).unwrap_or(Ordering::Equal) {
                Ordering::Greater => BudgetStatus::OverBudget,
                Ordering::Less => BudgetStatus::UnderBudget,
                Ordering::Equal => BudgetStatus::OnTrack,
            }
        };
        Self {
            total_spent,
            remaining: remaining(records, budget),
            percent_used: percent_used(records, budget),
            status,
        }
    }
}

/// Sum of all recorded amounts.
pub fn total_spent(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}

/// Monthly limit minus total spent. Negative means over budget; that is a
/// signal, not an error.
pub fn remaining(records: &[ExpenseRecord], budget: Budget) -> f64 {
    budget.monthly_limit - total_spent(records)
}

/// Share of the limit consumed, clamped to `[0, 100]`. A zero limit with
/// any spending counts as fully used rather than dividing by zero.
pub fn percent_used(records: &[ExpenseRecord], budget: Budget) -> f64 {
    let total = total_spent(records);
    if budget.monthly_limit > 0.0 {
        (total / budget.monthly_limit * 100.0).clamp(0.0, 100.0)
    } else if total > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Groups spending by category label. The fixed categories are pre-seeded
/// at zero and always present, in presentation order; custom labels follow
/// in first-seen ledger order.
pub fn by_category(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = FIXED_CATEGORIES
        .iter()
        .map(|category| CategoryTotal {
            category: category.clone(),
            total: 0.0,
        })
        .collect();
    for record in records {
        match totals
            .iter_mut()
            .find(|entry| entry.category == record.category)
        {
            Some(entry) => entry.total += record.amount,
            None => totals.push(CategoryTotal {
                category: record.category.clone(),
                total: record.amount,
            }),
        }
    }
    totals
}

/// Spending per calendar day for the `window_days` ending at `today`,
/// oldest first. Days without records yield zero. The window is anchored to
/// the reference date, not to the ledger's own date range.
pub fn daily_series(
    records: &[ExpenseRecord],
    today: NaiveDate,
    window_days: usize,
) -> Vec<DailyTotal> {
    (0..window_days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset as i64);
            let total = records
                .iter()
                .filter(|record| record.date == date)
                .map(|record| record.amount)
                .sum();
            DailyTotal { date, total }
        })
        .collect()
}
