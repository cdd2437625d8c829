//! Defines the endpoint for creating a new expense.

use std::str::FromStr;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Category, Error, Expense,
    clock::Clock,
    dates::parse_iso_date,
    expense::presenter::CreatedExpenseView,
    stores::ExpenseStore,
};

/// The JSON body for creating an expense.
///
/// Every field is text so that malformed values are reported with the same
/// error format as the validation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// The amount spent as a decimal string, e.g. "12.50".
    pub amount: String,
    /// The ISO-8601 date the money was spent.
    pub date: String,
    /// The category label, e.g. "Food".
    pub category: String,
    /// Optional text detailing the expense.
    pub description: Option<String>,
}

impl TryFrom<CreateExpenseRequest> for Expense {
    type Error = Error;

    fn try_from(request: CreateExpenseRequest) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str_exact(request.amount.trim())
            .map_err(|_| Error::InvalidAmountFormat(request.amount.clone()))?;
        let date = parse_iso_date(&request.date)?;
        let category = Category::from_str(&request.category)?;

        Ok(Expense {
            amount,
            date,
            category,
            description: request.description,
        })
    }
}

/// A route handler for creating a new expense.
///
/// Responds with 201 and the stored expense on success, or 400 and an error
/// message if the request is malformed or the expense is invalid.
pub async fn create_expense_endpoint<C, S>(
    State(state): State<AppState<C, S>>,
    body: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Response
where
    C: Clock + Clone + Send + Sync + 'static,
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return Error::InvalidRequestBody(rejection.body_text()).into_response(),
    };

    let result = Expense::try_from(request)
        .and_then(|expense| state.expense_service.create(expense))
        .map(CreatedExpenseView::from);

    match result {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => error.into_response(),
    }
}
