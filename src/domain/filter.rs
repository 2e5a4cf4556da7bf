//! Transient filter state and its pure projection over the ledger.

use crate::domain::category::Category;
use crate::domain::expense::ExpenseRecord;

/// Category restriction: everything, or one exact label.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// Free-text query plus category selector. Derived view state, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        let query = self.query.trim().to_lowercase();
        let query_hit = query.is_empty()
            || record.note.to_lowercase().contains(&query)
            || record.category.label().to_lowercase().contains(&query);
        let category_hit = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => *category == record.category,
        };
        query_hit && category_hit
    }
}

/// Projects the ledger through the filter, preserving ledger order.
pub fn apply_filter<'a>(
    records: &'a [ExpenseRecord],
    filter: &FilterState,
) -> Vec<&'a ExpenseRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}
