//! Defines the endpoint for listing expenses as JSON or CSV.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Category, Error, ExpenseFilter,
    clock::Clock,
    dates::parse_optional_iso_date,
    expense::presenter::{render_csv, to_views},
    stores::ExpenseStore,
};

/// The media type that selects the CSV export.
const CSV_MEDIA_TYPE: &str = "text/csv";

/// The query parameters for listing expenses.
///
/// Empty values are treated the same as missing ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseQueryParams {
    /// Only include expenses on or after this ISO-8601 date.
    pub from_date: Option<String>,
    /// Only include expenses on or before this ISO-8601 date.
    pub to_date: Option<String>,
    /// Only include expenses with this category label.
    pub category: Option<String>,
}

impl TryFrom<ExpenseQueryParams> for ExpenseFilter {
    type Error = Error;

    fn try_from(params: ExpenseQueryParams) -> Result<Self, Self::Error> {
        let category = match params.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => Some(label.parse::<Category>()?),
        };

        Ok(ExpenseFilter {
            from_date: parse_optional_iso_date(params.from_date.as_deref())?,
            to_date: parse_optional_iso_date(params.to_date.as_deref())?,
            category,
        })
    }
}

/// A route handler for listing the expenses that match the query parameters.
///
/// The response is CSV if the request's `Content-Type` is `text/csv`,
/// otherwise it is a JSON array.
pub async fn list_expenses_endpoint<C, S>(
    State(state): State<AppState<C, S>>,
    headers: HeaderMap,
    params: Result<Query<ExpenseQueryParams>, QueryRejection>,
) -> Response
where
    C: Clock + Clone + Send + Sync + 'static,
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return Error::InvalidRequestBody(rejection.body_text()).into_response(),
    };

    let expenses = match ExpenseFilter::try_from(params)
        .and_then(|filter| state.expense_service.query(&filter))
    {
        Ok(expenses) => expenses,
        Err(error) => return error.into_response(),
    };

    if !wants_csv(&headers) {
        return (StatusCode::OK, Json(to_views(&expenses))).into_response();
    }

    match render_csv(&expenses) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (
                    CONTENT_TYPE,
                    HeaderValue::from_static("text/csv; charset=utf-8"),
                ),
                (
                    CONTENT_DISPOSITION,
                    HeaderValue::from_static("attachment; filename=expenses.csv"),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Whether the media type of the request's `Content-Type` header is CSV.
///
/// Parameters such as `charset` are ignored and the comparison is case-insensitive.
fn wants_csv(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(CSV_MEDIA_TYPE))
}
