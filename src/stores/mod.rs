//! Contains the expense store trait and its implementations.

mod expense;
mod memory;

pub mod sqlite;

pub use expense::{ExpenseQuery, ExpenseStore};
pub use memory::InMemoryExpenseStore;
