//! Error type shared by all fallible calendar operations.

use crate::lunar::Month;

/// Error returned when a date cannot be built or converted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when Gregorian fields do not name a real day.
    #[error("invalid solar date {year:04}-{month:02}-{day:02}")]
    InvalidSolarDate {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: i32,
        /// Requested day.
        day: i32,
    },

    /// Returned when lunar fields are out of range whatever the year: a month
    /// outside `1..=12` or a day outside `1..=30`.
    #[error("invalid lunar date: year {year}, month {month}, day {day}")]
    InvalidLunarDate {
        /// Lunar year.
        year: i32,
        /// Requested month.
        month: Month,
        /// Requested day.
        day: u32,
    },

    /// Returned when a lunar year has no such month, e.g. a leap month the
    /// year never inserts.
    #[error("lunar year {year} has no month {month}")]
    NoSuchLunarMonth {
        /// Lunar year.
        year: i32,
        /// Requested month.
        month: Month,
    },

    /// Returned when the day is past the end of the lunar month.
    #[error("lunar month {month} of year {year} has {len} days, got day {day}")]
    LunarDayOutOfRange {
        /// Lunar year.
        year: i32,
        /// Lunar month.
        month: Month,
        /// Requested day.
        day: u32,
        /// Actual length of the month.
        len: u32,
    },

    /// Returned when an instant falls outside the days a [`Date`] can hold.
    ///
    /// [`Date`]: crate::Date
    #[error("instant {timestamp} (Unix seconds) is outside the supported dates")]
    InstantOutOfRange {
        /// Unix timestamp of the instant.
        timestamp: i64,
    },

    /// Returned when no calendar data is available for the annus.
    #[error("cannot resolve lunar calendar for annus {annus}")]
    UnresolvedConversion {
        /// Annus (Gregorian year of its later winter solstice).
        annus: i32,
    },
}

impl CalendarError {
    /// `true` for errors caused by caller-supplied fields, which a UI can
    /// recover from by clamping.
    pub fn is_invalid_date(&self) -> bool {
        !matches!(
            self,
            Self::InstantOutOfRange { .. } | Self::UnresolvedConversion { .. }
        )
    }
}
