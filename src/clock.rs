//! Sources of the current time.
//!
//! The expense service only needs "now" to reject future dates. Taking the
//! time from a [Clock] lets tests pin it with a [FixedClock].

use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    timezone::{get_offset_at, is_valid_timezone},
};

/// Supplies the current instant.
pub trait Clock {
    /// The current date and time.
    fn now(&self) -> OffsetDateTime;
}

/// Reads the system time and expresses it in a configured timezone.
#[derive(Debug, Clone)]
pub struct SystemClock {
    local_timezone: String,
}

impl SystemClock {
    /// Create a clock for the canonical timezone name `local_timezone`, e.g.
    /// "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(local_timezone: &str) -> Result<Self, Error> {
        if !is_valid_timezone(local_timezone) {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
        })
    }

    /// The canonical name of the timezone this clock reports in.
    pub fn local_timezone(&self) -> &str {
        &self.local_timezone
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();

        // The offset is looked up on every call so that daylight saving
        // transitions are picked up without a restart.
        let offset = get_offset_at(&self.local_timezone, &now).unwrap_or_else(|| {
            tracing::warn!(
                "could not resolve timezone {}, falling back to UTC",
                self.local_timezone
            );
            UtcOffset::UTC
        });

        now.to_offset(offset)
    }
}

/// A clock that is stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        Error,
        clock::{Clock, FixedClock, SystemClock},
    };

    #[test]
    fn fixed_clock_always_returns_same_instant() {
        let instant = datetime!(2024-10-10 08:00 UTC);
        let clock = FixedClock(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn system_clock_rejects_unknown_timezone() {
        let result = SystemClock::new("Not/AZone");

        assert_eq!(
            result.map(|clock| clock.local_timezone().to_owned()),
            Err(Error::InvalidTimezoneError("Not/AZone".to_owned()))
        );
    }

    #[test]
    fn system_clock_reports_current_time() {
        let clock = SystemClock::new("Pacific/Auckland").unwrap();

        let before = OffsetDateTime::now_utc();
        let now = clock.now();
        let after = OffsetDateTime::now_utc();

        assert!(before <= now && now <= after);
    }

    #[test]
    fn utc_clock_has_zero_offset() {
        let clock = SystemClock::new("Etc/UTC").unwrap();

        assert!(clock.now().offset().is_utc());
    }
}
