//! Implements an expense store that only lives as long as the process.
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Error, Expense, StoredExpense,
    stores::{ExpenseQuery, ExpenseStore},
};

/// Stores expenses in memory.
///
/// Clones share the same underlying records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpenseStore {
    expenses: Arc<Mutex<Vec<StoredExpense>>>,
}

impl InMemoryExpenseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<StoredExpense>>, Error> {
        self.expenses.lock().map_err(|error| {
            tracing::error!("could not acquire expense store lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn insert(&self, expense: &Expense) -> Result<StoredExpense, Error> {
        let mut expenses = self.lock()?;

        // Records are never removed, so the length only grows and the next
        // ID is always fresh.
        let id = expenses.len() as i64 + 1;
        let stored = StoredExpense::new(id, expense.clone());
        expenses.push(stored.clone());

        Ok(stored)
    }

    fn most_recent(&self) -> Result<Option<StoredExpense>, Error> {
        Ok(self.lock()?.last().cloned())
    }

    fn count(&self) -> Result<usize, Error> {
        Ok(self.lock()?.len())
    }

    fn query(&self, query: &ExpenseQuery) -> Result<Vec<StoredExpense>, Error> {
        Ok(self
            .lock()?
            .iter()
            .filter(|expense| query.matches(expense))
            .cloned()
            .collect())
    }
}
