use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::Category;

/// A single logged expense. Created once, immutable thereafter, removed
/// only by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub amount: f64,
    pub category: Category,
    pub note: String,
    /// Calendar date of entry, day granularity.
    #[serde(rename = "timestamp")]
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub fn new(amount: f64, category: Category, note: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            note: note.into(),
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_storage_field_names() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let record = ExpenseRecord::new(200.0, Category::FoodAndDrinks, "Lunch", date);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "Food & Drinks");
        assert_eq!(json["timestamp"], "2026-08-07");
        assert_eq!(json["amount"], 200.0);
        assert_eq!(json["note"], "Lunch");
        assert!(json["id"].is_string());
    }

    #[test]
    fn fresh_records_get_distinct_ids() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let a = ExpenseRecord::new(10.0, Category::Other, "", date);
        let b = ExpenseRecord::new(10.0, Category::Other, "", date);
        assert_ne!(a.id, b.id);
    }
}
