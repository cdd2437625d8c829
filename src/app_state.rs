//! Implements a struct that holds the state of the REST server.

use crate::{ExpenseService, clock::Clock, stores::ExpenseStore};

/// The state of the REST server.
///
/// The clock and store are built once at start up and injected into the
/// [ExpenseService]; handlers reach them only through this state.
#[derive(Debug, Clone)]
pub struct AppState<C, S>
where
    C: Clock,
    S: ExpenseStore,
{
    /// The service for creating and querying [expenses](crate::Expense).
    pub expense_service: ExpenseService<C, S>,
}

impl<C, S> AppState<C, S>
where
    C: Clock,
    S: ExpenseStore,
{
    /// Create a new [AppState].
    pub fn new(expense_service: ExpenseService<C, S>) -> Self {
        Self { expense_service }
    }
}
