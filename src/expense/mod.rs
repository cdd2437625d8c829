//! Expense management.
//!
//! This module contains everything related to expenses:
//! - The `Expense` and `StoredExpense` models and the `ExpenseFilter` query type
//! - The `ExpenseService` that validates and queries expenses
//! - The JSON/CSV presenter and the HTTP handlers built on top of the service

mod core;
mod create_endpoint;
mod filter;
mod list_endpoint;
mod presenter;
mod service;

pub use core::{Expense, ExpenseId, MAX_DESCRIPTION_LENGTH, StoredExpense};
pub use create_endpoint::{CreateExpenseRequest, create_expense_endpoint};
pub use filter::ExpenseFilter;
pub use list_endpoint::{ExpenseQueryParams, list_expenses_endpoint};
pub use presenter::{CSV_HEADER, CreatedExpenseView, ExpenseView, render_csv};
pub use service::ExpenseService;
