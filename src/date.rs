//! Civil dates, counted by Julian day number.

use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::VIETNAM_UTC_OFFSET_MINUTES;
use crate::error::CalendarError;

/// JDN of 1970-01-01.
const UNIX_EPOCH_JDN: i64 = 2440588;

/// A day, independent of any calendar.
///
/// Stored as its Julian day number (JDN), so day 0 is January 1, 4713 BC
/// of the proleptic Julian calendar and no earlier day can be held.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Date {
    jdn: u32,
}

impl Date {
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Julian day number of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Builds a date from the proleptic Gregorian calendar, with astronomical
    /// year numbering (year `0` is 1 BC).
    ///
    /// Fails with [`CalendarError::InvalidSolarDate`] if the fields do not
    /// name a real day, e.g. February 29 of a common year, or the day lies
    /// before JDN 0.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let tet = Date::from_gregorian(2024, 2, 10).unwrap();
    /// assert_eq!(2460351, tet.jdn());
    /// assert!(Date::from_gregorian(2023, 2, 29).is_err());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidSolarDate { year, month, day };
        let len = days_in_solar_month(year, month).map_err(|_| invalid)?;
        if day < 1 || day as u32 > len {
            return Err(invalid);
        }
        // Count from March 4801 BC so that leap days close each year.
        let shift = i64::from((14 - month) / 12);
        let y = i64::from(year) + 4800 - shift;
        let m = i64::from(month) + 12 * shift - 3;
        let jdn = i64::from(day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4)
            - y.div_euclid(100)
            + y.div_euclid(400)
            - 32045;
        u32::try_from(jdn).map(Self::from_jdn).map_err(|_| invalid)
    }
    /// Proleptic Gregorian `(year, month, day)` of the date.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// assert_eq!((1984, 2, 2), Date::from_jdn(2445733).gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let a = i64::from(self.jdn) + 32044;
        let b = (4 * a + 3) / 146097;
        let c = a - 146097 * b / 4;
        let d = (4 * c + 3) / 1461;
        let e = c - 1461 * d / 4;
        let m = (5 * e + 2) / 153;
        let day = e - (153 * m + 2) / 5 + 1;
        let month = m + 3 - 12 * (m / 10);
        let year = 100 * b + d - 4800 + m / 10;
        (year as i32, month as i32, day as i32)
    }
    /// ISO 8601 form of the date, `YYYY-MM-DD`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2024, 9, 5).unwrap();
    /// assert_eq!("2024-09-05", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{y:04}-{m:02}-{d:02}")
    }

    /// ISO weekday, `1` for Monday to `7` for Sunday.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let tet = Date::from_gregorian(2024, 2, 10).unwrap();
    /// assert_eq!(6, tet.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        (self.jdn % 7 + 1) as i32
    }

    /// Returns the civil date in Vietnam (UTC+7) at the instant `time`.
    ///
    /// Fails with [`CalendarError::InstantOutOfRange`] for instants whose
    /// Vietnamese date falls before JDN 0 (-4713-11-24) or past `u32::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use chrono::{TimeZone, Utc};
    ///
    /// // 17:30 UTC is already past midnight in Hanoi.
    /// let time = Utc.with_ymd_and_hms(2024, 2, 9, 17, 30, 0).unwrap();
    /// assert_eq!("2024-02-10", Date::from_instant(&time)?.iso_gregorian());
    /// # Ok::<(), amlich::CalendarError>(())
    /// ```
    pub fn from_instant<Tz: TimeZone>(time: &DateTime<Tz>) -> Result<Self, CalendarError> {
        let timestamp = time.timestamp();
        let local = timestamp + i64::from(VIETNAM_UTC_OFFSET_MINUTES) * 60;
        u32::try_from(local.div_euclid(86400) + UNIX_EPOCH_JDN)
            .map(Self::from_jdn)
            .map_err(|_| CalendarError::InstantOutOfRange { timestamp })
    }

    /// Returns today's civil date in Vietnam.
    pub fn today() -> Result<Self, CalendarError> {
        Self::from_instant(&Utc::now())
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = CalendarError;
    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_gregorian(date.year(), date.month() as i32, date.day() as i32)
    }
}

/// Moves a date by a number of days.
///
/// # Panics
///
/// Panics if the result falls before JDN 0 or past `u32::MAX`.
impl Add<i32> for Date {
    type Output = Date;
    fn add(self, days: i32) -> Self::Output {
        match self.jdn.checked_add_signed(days) {
            Some(jdn) => Date::from_jdn(jdn),
            None => panic!("date out of range: JDN {} + {days}", self.jdn),
        }
    }
}

/// Number of days from `rhs` to `self`.
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        (i64::from(self.jdn) - i64::from(rhs.jdn)) as i32
    }
}

/// Whether a Gregorian year has February 29.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Leap if divisible by 4, except centuries not divisible by 400.
    pub fn from_gregorian(year: i32) -> Self {
        if year.rem_euclid(400) == 0 || year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    pub fn is_leap(&self) -> bool {
        *self == YearType::Leap
    }
}

/// Returns the number of days (28 to 31) of a Gregorian month.
///
/// Fails with [`CalendarError::InvalidSolarDate`] if `month` is not in
/// `1..=12`.
///
/// # Example
///
/// ```
/// use amlich::date::days_in_solar_month;
///
/// assert_eq!(Ok(29), days_in_solar_month(2024, 2));
/// assert_eq!(Ok(28), days_in_solar_month(2023, 2));
/// ```
pub fn days_in_solar_month(year: i32, month: i32) -> Result<u32, CalendarError> {
    match month {
        2 if YearType::from_gregorian(year).is_leap() => Ok(29),
        2 => Ok(28),
        4 | 6 | 9 | 11 => Ok(30),
        1..=12 => Ok(31),
        _ => Err(CalendarError::InvalidSolarDate {
            year,
            month,
            day: 1,
        }),
    }
}
