//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;
use time::Date;

use crate::expense::MAX_DESCRIPTION_LENGTH;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An expense was given an amount that is zero or negative.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// A date in the future was used to create an expense.
    ///
    /// Expenses record spending that has already happened, therefore future
    /// dates are not allowed.
    #[error("Date cannot be in the future, got {0}")]
    FutureDate(Date),

    /// The description of an expense is longer than [MAX_DESCRIPTION_LENGTH]
    /// characters. Holds the length of the rejected description.
    #[error("Description cannot be longer than {MAX_DESCRIPTION_LENGTH} characters, got {0}")]
    DescriptionTooLong(usize),

    /// The text could not be matched to a [Category](crate::Category) label.
    #[error("Invalid category \"{0}\"")]
    InvalidCategory(String),

    /// A filter was given a start date that is later than its end date.
    #[error("from_date cannot be after to_date, got {from_date} > {to_date}")]
    InvalidDateRange {
        /// The start of the rejected range.
        from_date: Date,
        /// The end of the rejected range.
        to_date: Date,
    },

    /// The amount in a request could not be parsed as a decimal number.
    #[error("Invalid amount \"{0}\", expected a decimal number such as \"12.50\"")]
    InvalidAmountFormat(String),

    /// A date in a request could not be parsed as an ISO-8601 date.
    #[error("Invalid date \"{0}\", expected an ISO-8601 date such as \"2024-10-10\"")]
    InvalidDateFormat(String),

    /// The request body was not valid JSON or was missing required fields.
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The CSV writer failed while rendering expenses.
    #[error("could not write CSV: {0}")]
    CsvError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl Error {
    /// Whether the error was caused by the caller's input, as opposed to a
    /// fault on the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::InvalidAmount(_)
            | Error::FutureDate(_)
            | Error::DescriptionTooLong(_)
            | Error::InvalidCategory(_)
            | Error::InvalidDateRange { .. }
            | Error::InvalidAmountFormat(_)
            | Error::InvalidDateFormat(_)
            | Error::InvalidRequestBody(_) => true,
            Error::InvalidTimezoneError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::CsvError(_) => false,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::debug!("rejected request: {self}");
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() })))
                .into_response();
        }

        // Server faults are logged in full but not shown to the client.
        tracing::error!("An unexpected error occurred: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "An unexpected error occurred, check the server logs for more details."
            })),
        )
            .into_response()
    }
}
