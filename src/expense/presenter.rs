//! Formats expenses for transport as JSON or CSV.

use serde::{Deserialize, Serialize};

use crate::{Category, Error, Expense, StoredExpense, expense::ExpenseId};

/// The header row of the CSV export.
pub const CSV_HEADER: [&str; 4] = ["Amount", "Date", "Category", "Description"];

/// The JSON representation of an expense returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseView {
    /// The amount as a decimal string, e.g. "50.00".
    pub amount: String,
    /// The ISO-8601 date, e.g. "2024-10-10".
    pub date: String,
    /// The category label.
    pub category: Category,
    /// The description, `null` if the expense has none.
    pub description: Option<String>,
}

impl From<&Expense> for ExpenseView {
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            date: expense.date.to_string(),
            category: expense.category,
            description: expense.description.clone(),
        }
    }
}

/// The JSON representation of a newly created expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedExpenseView {
    /// The ID assigned by the store.
    pub id: ExpenseId,
    /// The amount as a decimal string, e.g. "50.00".
    pub amount: String,
    /// The ISO-8601 date, e.g. "2024-10-10".
    pub date: String,
    /// The category label.
    pub category: Category,
    /// The description, `null` if the expense has none.
    pub description: Option<String>,
}

impl From<StoredExpense> for CreatedExpenseView {
    fn from(expense: StoredExpense) -> Self {
        Self {
            id: expense.id,
            amount: expense.amount.to_string(),
            date: expense.date.to_string(),
            category: expense.category,
            description: expense.description,
        }
    }
}

/// Convert `expenses` to their JSON views.
pub fn to_views(expenses: &[Expense]) -> Vec<ExpenseView> {
    expenses.iter().map(ExpenseView::from).collect()
}

/// Render `expenses` as a CSV document with a header row.
///
/// Records end with CRLF and a missing description is written as an empty field.
///
/// # Errors
/// Returns [Error::CsvError] if the CSV writer fails.
pub fn render_csv(expenses: &[Expense]) -> Result<String, Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for expense in expenses {
        writer
            .write_record([
                expense.amount.to_string().as_str(),
                expense.date.to_string().as_str(),
                expense.category.as_str(),
                expense.description.as_deref().unwrap_or_default(),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}
