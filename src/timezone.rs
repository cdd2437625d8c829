//! Resolves canonical timezone names to UTC offsets.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the offset from UTC of `canonical_timezone` at the instant `at`.
///
/// Returns `None` if `canonical_timezone` is not a known timezone name, e.g.
/// "Pacific/Auckland".
pub fn get_offset_at(canonical_timezone: &str, at: &OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone).map(|tz| tz.get_offset_utc(at).to_utc())
}

/// Whether `canonical_timezone` is a known timezone name.
pub fn is_valid_timezone(canonical_timezone: &str) -> bool {
    time_tz::timezones::get_by_name(canonical_timezone).is_some()
}
