//! Contains the SQLite backed stores.

mod expense;

pub use expense::SQLiteExpenseStore;
