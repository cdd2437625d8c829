//! Defines the expense store trait.

use time::Date;

use crate::{Category, Error, Expense, StoredExpense};

/// Handles the creation and retrieval of expenses.
///
/// Implementers synchronise internally so a store can be shared between
/// request handlers. IDs must be unique and strictly increasing, even when
/// inserts happen concurrently.
pub trait ExpenseStore {
    /// Save `expense` and assign it a fresh ID, greater than every ID
    /// assigned before.
    fn insert(&self, expense: &Expense) -> Result<StoredExpense, Error>;

    /// The expense with the highest ID, or `None` if the store is empty.
    fn most_recent(&self) -> Result<Option<StoredExpense>, Error>;

    /// The number of expenses in the store.
    fn count(&self) -> Result<usize, Error>;

    /// Retrieve the expenses matching `query` in the order they were inserted.
    fn query(&self, query: &ExpenseQuery) -> Result<Vec<StoredExpense>, Error>;
}

/// Defines which expenses should be fetched from [ExpenseStore::query].
///
/// A record matches when it satisfies every condition that is set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpenseQuery {
    /// Include expenses dated on or after `from_date`.
    pub from_date: Option<Date>,
    /// Include expenses dated on or before `to_date`.
    pub to_date: Option<Date>,
    /// Include expenses in `category`.
    pub category: Option<Category>,
}

impl ExpenseQuery {
    /// Whether `expense` satisfies all the set conditions of the query.
    pub fn matches(&self, expense: &StoredExpense) -> bool {
        self.from_date.is_none_or(|from_date| expense.date >= from_date)
            && self.to_date.is_none_or(|to_date| expense.date <= to_date)
            && self
                .category
                .is_none_or(|category| expense.category == category)
    }
}
