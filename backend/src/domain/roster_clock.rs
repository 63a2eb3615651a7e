//! Wall-clock access in the roster's fixed UTC offset.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};
use mockable::Clock;

use crate::domain::Error;

/// Offset used when none is configured (UTC+05:30).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Clock bound to the roster's fixed offset.
///
/// "Today" for leave entries and the save timestamp are both derived here so
/// they always agree on the calendar day.
#[derive(Clone)]
pub struct RosterClock {
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl RosterClock {
    /// Wrap a clock with a fixed offset.
    pub fn new(clock: Arc<dyn Clock>, offset: FixedOffset) -> Self {
        Self { clock, offset }
    }

    /// Wrap a clock with an offset given in minutes east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when the offset is out of range.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use ward_ops::domain::RosterClock;
    ///
    /// let clock = RosterClock::from_minutes(Arc::new(DefaultClock), 330).expect("valid offset");
    /// assert_eq!(clock.offset().local_minus_utc(), 19_800);
    /// ```
    pub fn from_minutes(clock: Arc<dyn Clock>, minutes: i32) -> Result<Self, Error> {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| Error::invalid_request(format!("utc offset {minutes}m is out of range")))?;
        Ok(Self::new(clock, offset))
    }

    /// The configured offset.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date in the roster's offset.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().with_timezone(&self.offset).date_naive()
    }

    /// Save timestamp for the current instant.
    #[must_use]
    pub fn timestamp(&self) -> String {
        roster::format_timestamp(self.clock.utc(), self.offset)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::rstest;

    use super::*;

    fn clock_at(hour: u32) -> RosterClock {
        let mut clock = MockClock::new();
        clock.expect_utc().returning(move || {
            Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
                .single()
                .expect("valid instant")
        });
        RosterClock::from_minutes(Arc::new(clock), DEFAULT_UTC_OFFSET_MINUTES).expect("offset")
    }

    #[rstest]
    #[case(2, "2026-03-01")]
    #[case(20, "2026-03-02")]
    fn today_follows_the_offset(#[case] hour: u32, #[case] expected: &str) {
        assert_eq!(clock_at(hour).today().to_string(), expected);
    }

    #[test]
    fn timestamp_uses_the_offset() {
        assert_eq!(clock_at(20).timestamp(), "2026-03-02 01:30:00+05:30");
    }

    #[test]
    fn out_of_range_offsets_are_rejected() {
        let result = RosterClock::from_minutes(Arc::new(MockClock::new()), 24 * 60);
        assert!(result.is_err());
    }
}
