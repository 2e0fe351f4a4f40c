//! Expense models.
//!
//! An [`Expense`] is a finalized, validated split as persisted by the expense
//! store. [`NewExpense`] is the same record before it has been assigned an id.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SplitLine;

fn default_category() -> String {
    "general".to_string()
}

/// An expense ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// What the money was spent on.
    pub description: String,
    /// The expense total.
    pub amount: Decimal,
    /// The group the expense belongs to.
    pub group_id: String,
    /// The participant who paid.
    pub paid_by: String,
    /// Who owes what.
    pub splits: Vec<SplitLine>,
    /// Free-form category.
    #[serde(default = "default_category")]
    pub category: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// A stored expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier assigned on insertion.
    pub id: Uuid,
    /// What the money was spent on.
    pub description: String,
    /// The expense total.
    pub amount: Decimal,
    /// The group the expense belongs to.
    pub group_id: String,
    /// The participant who paid.
    pub paid_by: String,
    /// Who owes what.
    pub splits: Vec<SplitLine>,
    /// Free-form category.
    pub category: String,
    /// Free-form notes.
    pub notes: String,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Assigns an id and timestamp to a new expense.
    pub fn from_new(new_expense: NewExpense) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: new_expense.description,
            amount: new_expense.amount,
            group_id: new_expense.group_id,
            paid_by: new_expense.paid_by,
            splits: new_expense.splits,
            category: new_expense.category,
            notes: new_expense.notes,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_new_expense_defaults() {
        let json = r#"{
            "description": "Groceries",
            "amount": "50.00",
            "group_id": "flat",
            "paid_by": "alice",
            "splits": [
                {"participant_id": "alice", "amount": "20.00"},
                {"participant_id": "bob", "amount": "30.00"}
            ]
        }"#;

        let expense: NewExpense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.category, "general");
        assert!(expense.notes.is_empty());
        assert_eq!(expense.splits[1].amount, dec("30.00"));
    }

    #[test]
    fn test_from_new_assigns_distinct_ids() {
        let new_expense = NewExpense {
            description: "Taxi".to_string(),
            amount: dec("12.00"),
            group_id: "trip".to_string(),
            paid_by: "bob".to_string(),
            splits: vec![SplitLine::new("bob", dec("12.00"))],
            category: default_category(),
            notes: String::new(),
        };

        let first = Expense::from_new(new_expense.clone());
        let second = Expense::from_new(new_expense);
        assert_ne!(first.id, second.id);
        assert_eq!(first.description, "Taxi");
        assert_eq!(first.splits, second.splits);
    }
}
