//! The API endpoints URIs.

/// The route to create and list expenses.
pub const EXPENSES: &str = "/expenses";
