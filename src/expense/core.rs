//! Defines the core data models for expenses.

use rust_decimal::Decimal;
use time::Date;

use crate::Category;

/// The maximum number of characters allowed in an expense description.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Alias for the integer type used for expense IDs assigned by a store.
pub type ExpenseId = i64;

/// A record of money spent.
///
/// An `Expense` has no identity until it is persisted, see [StoredExpense].
/// Use [ExpenseService::create](crate::ExpenseService::create) to validate and
/// store a new expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    /// How much was spent. Valid expenses have strictly positive amounts.
    pub amount: Decimal,
    /// The day the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub category: Category,
    /// Free text detailing the expense, at most [MAX_DESCRIPTION_LENGTH] characters.
    pub description: Option<String>,
}

impl Expense {
    /// Create a new expense without a description.
    pub fn new(amount: Decimal, date: Date, category: Category) -> Self {
        Self {
            amount,
            date,
            category,
            description: None,
        }
    }

    /// Set the description for the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }
}

/// An expense that has been saved to a [store](crate::stores::ExpenseStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredExpense {
    /// The ID assigned by the store.
    pub id: ExpenseId,
    /// How much was spent.
    pub amount: Decimal,
    /// The day the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub category: Category,
    /// Free text detailing the expense.
    pub description: Option<String>,
}

impl StoredExpense {
    /// Attach a store assigned `id` to `expense`.
    pub fn new(id: ExpenseId, expense: Expense) -> Self {
        Self {
            id,
            amount: expense.amount,
            date: expense.date,
            category: expense.category,
            description: expense.description,
        }
    }
}

impl From<StoredExpense> for Expense {
    fn from(stored: StoredExpense) -> Self {
        Self {
            amount: stored.amount,
            date: stored.date,
            category: stored.category,
            description: stored.description,
        }
    }
}
