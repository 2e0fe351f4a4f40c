//! Expense storage.
//!
//! Only validated splits reach the store; it performs no split checks of its own.

use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Expense, NewExpense};

/// Persistence for finalized expenses.
pub trait ExpenseStore: Send + Sync {
    /// Stores a new expense, assigning its id and timestamp.
    fn insert(&self, expense: NewExpense) -> EngineResult<Expense>;

    /// Lists a group's expenses in insertion order.
    fn list_for_group(&self, group_id: &str) -> EngineResult<Vec<Expense>>;

    /// Gets an expense by id.
    fn get(&self, expense_id: Uuid) -> EngineResult<Expense>;

    /// Removes an expense and returns it.
    fn remove(&self, expense_id: Uuid) -> EngineResult<Expense>;
}

/// Process-local store for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryExpenseStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::StoreUnavailable {
        message: "expense store lock poisoned".to_string(),
    }
}

fn not_found(expense_id: Uuid) -> EngineError {
    EngineError::ExpenseNotFound {
        expense_id: expense_id.to_string(),
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn insert(&self, expense: NewExpense) -> EngineResult<Expense> {
        let expense = Expense::from_new(expense);
        let mut expenses = self.expenses.write().map_err(poisoned)?;
        expenses.push(expense.clone());
        Ok(expense)
    }

    fn list_for_group(&self, group_id: &str) -> EngineResult<Vec<Expense>> {
        let expenses = self.expenses.read().map_err(poisoned)?;
        Ok(expenses
            .iter()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect())
    }

    fn get(&self, expense_id: Uuid) -> EngineResult<Expense> {
        let expenses = self.expenses.read().map_err(poisoned)?;
        expenses
            .iter()
            .find(|e| e.id == expense_id)
            .cloned()
            .ok_or_else(|| not_found(expense_id))
    }

    fn remove(&self, expense_id: Uuid) -> EngineResult<Expense> {
        let mut expenses = self.expenses.write().map_err(poisoned)?;
        let position = expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| not_found(expense_id))?;
        Ok(expenses.remove(position))
    }
}
