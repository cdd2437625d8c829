//! Parsing of the ISO-8601 dates sent by API clients.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{BorrowedFormatItem, well_known::Iso8601},
    macros::format_description,
};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parse a calendar date from `text`.
///
/// Accepts a plain date (`2024-10-10`) or a date-time with or without an
/// offset (`2024-10-10T08:00:00`, `2024-10-10T08:00:00Z`). For date-times only
/// the calendar date as written is kept; the time and offset are discarded.
///
/// # Errors
/// Returns [Error::InvalidDateFormat] if `text` is none of the above.
pub fn parse_iso_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    Date::parse(text, DATE_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(text, &Iso8601::DEFAULT).map(|dt| dt.date()))
        .or_else(|_| OffsetDateTime::parse(text, &Iso8601::DEFAULT).map(|dt| dt.date()))
        .map_err(|_| Error::InvalidDateFormat(text.to_owned()))
}

/// Parse an optional date where an empty string means no date.
///
/// # Errors
/// Returns [Error::InvalidDateFormat] if `text` is not empty and not a valid date.
pub fn parse_optional_iso_date(text: Option<&str>) -> Result<Option<Date>, Error> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_iso_date(text).map(Some),
    }
}
