//! Vietnamese lunisolar calendar (âm lịch).
//!
//! The calendar is laid out one annus at a time from the ephemeris in
//! [`ephemeris`], at Vietnam's standard time (UTC+7). A month begins on the
//! day of a new moon; month 11 is the month holding the winter solstice; in
//! an annus of thirteen months the first month without a principal solar
//! term is the leap month and repeats the number of the month before it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::VIETNAM_UTC_OFFSET_MINUTES;
use crate::date::Date;
use crate::error::CalendarError;
use crate::time_scales::Ut;

pub mod ephemeris;
pub mod fmt;

/// Annus, the span from the month holding one winter solstice up to the
/// month holding the next (that is, from month 11 to month 10 or leap 10).
///
/// Supported anni depend on the ephemeris, see [`ephemeris`].
///
/// Note that an annus is not a lunar year: the lunar year begins with month
/// 1, but the calendar can only be laid out between winter solstices.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::lunar::{Annus, LunarDate, Month::*};
///
/// let date = Date::from_gregorian(2000, 1, 1).unwrap();
/// let annus = Annus::from_date(date).unwrap();
///
/// assert_eq!(Ok(LunarDate::new(1999, Common(11), 25).unwrap()), annus.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    /// Gregorian year in which most of the annus falls.
    pub annus: i32,
    /// Ephemeris of this annus.
    pub ephemeris: &'static ephemeris::Annus,
    /// Start of every month, including the first month of the next annus to
    /// mark the end of this one.
    pub months: Vec<NewMoon>,
}
/// Start of a month.
#[derive(Debug, Copy, Clone)]
pub struct NewMoon {
    /// Month name.
    pub month: Month,
    /// Date of the first day.
    pub date: Date,
}
/// Month name, `Common` for a regular month and `Leap` for a leap month
/// (tháng nhuận).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// Builds a month from its number and leap flag.
    pub fn new(num: u32, is_leap: bool) -> Self {
        if is_leap {
            Self::Leap(num)
        } else {
            Self::Common(num)
        }
    }
    /// Returns the month number, leap or not.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// `true` for a leap month.
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// Returns the Vietnamese month name, e.g. "Tháng Giêng", or `None` if
    /// the number is not in `1..=12`.
    pub fn name(&self) -> Option<String> {
        fmt::lunar_month(*self)
    }
}
impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Month::Common(n) => write!(f, "{n}"),
            Month::Leap(n) => write!(f, "{n} (nhuận)"),
        }
    }
}

/// A date in the lunar calendar.
///
/// The year is numbered after the Gregorian year in which its month 1
/// begins, so Tết 2024 opens lunar year 2024 (Giáp Thìn).
///
/// The month is always in `1..=12` and the day in `1..=30`. Whether the
/// month exists in that year, and has that many days, is only known from the
/// calendar: see [`from_lunar`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LunarFields")]
pub struct LunarDate {
    year: i32,
    month: Month,
    day: u32,
}

#[derive(Deserialize)]
struct LunarFields {
    year: i32,
    month: Month,
    day: u32,
}

impl TryFrom<LunarFields> for LunarDate {
    type Error = CalendarError;
    fn try_from(fields: LunarFields) -> Result<Self, Self::Error> {
        Self::new(fields.year, fields.month, fields.day)
    }
}

impl LunarDate {
    /// Fails with [`CalendarError::InvalidLunarDate`] if the month is not in
    /// `1..=12` or the day not in `1..=30`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::lunar::{LunarDate, Month::*};
    ///
    /// let date = LunarDate::new(2020, Leap(4), 1).unwrap();
    /// assert_eq!((2020, Leap(4), 1), (date.year(), date.month(), date.day()));
    /// assert!(LunarDate::new(2024, Common(13), 1).is_err());
    /// assert!(LunarDate::new(2024, Common(1), 31).is_err());
    /// ```
    pub fn new(year: i32, month: Month, day: u32) -> Result<Self, CalendarError> {
        if (1..=12).contains(&month.num()) && (1..=30).contains(&day) {
            Ok(Self { year, month, day })
        } else {
            Err(CalendarError::InvalidLunarDate { year, month, day })
        }
    }
    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> Month {
        self.month
    }
    pub fn day(&self) -> u32 {
        self.day
    }
    /// `true` if the date lies in a leap month.
    pub fn is_leap_month(&self) -> bool {
        self.month.is_leap()
    }
    /// Position of the year in the sexagenary cycle, `1` (Giáp Tý, e.g. 1984)
    /// to `60` (Quý Hợi).
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::lunar::{LunarDate, Month::*};
    ///
    /// assert_eq!(1, LunarDate::new(1984, Common(1), 1)?.cycle_year());
    /// assert_eq!(41, LunarDate::new(2024, Common(1), 1)?.cycle_year());
    /// assert_eq!(60, LunarDate::new(1983, Common(1), 1)?.cycle_year());
    /// # Ok::<(), amlich::CalendarError>(())
    /// ```
    pub fn cycle_year(&self) -> u32 {
        ((self.year - 1984).rem_euclid(60) + 1) as u32
    }
}

impl Annus {
    /// Lays out the annus closing with the winter solstice of Gregorian year
    /// `annus`.
    ///
    /// Returns [`CalendarError::UnresolvedConversion`] if the ephemeris has no
    /// data for that annus.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::lunar::Annus;
    ///
    /// let annus = Annus::new(2000).unwrap();
    /// assert_eq!(13, annus.months.len());
    /// ```
    pub fn new(annus: i32) -> Result<Self, CalendarError> {
        use Month::*;

        let unresolved = CalendarError::UnresolvedConversion { annus };
        let ephemeris = ephemeris::Annus::get(annus).ok_or(unresolved)?;
        let new_moon_dates: Vec<_> = ephemeris.new_moon.iter().map(|&ut| date_ict(ut)).collect();
        let ws = date_ict(ephemeris.solar_term[0]);
        let ws_next = date_ict(ephemeris.solar_term[24]);
        let m11_idx = new_moon_dates.partition_point(|date| date <= &ws) - 1;
        let m11n_idx = new_moon_dates.partition_point(|date| date <= &ws_next) - 1;
        let mut needs_leap = match m11n_idx - m11_idx {
            12 => false,
            13 => true,
            n => {
                debug!(annus, months = n, "months between winter solstices");
                return Err(unresolved);
            }
        };

        let mut months = Vec::with_capacity(m11n_idx - m11_idx + 1);
        let mut month = 10;
        let mut term = 0;
        for i in m11_idx..=m11n_idx {
            if needs_leap && new_moon_dates[i + 1] <= date_ict(ephemeris.solar_term[term]) {
                months.push(NewMoon {
                    month: Leap(month),
                    date: new_moon_dates[i],
                });
                needs_leap = false;
                continue;
            }
            month = month % 12 + 1;
            months.push(NewMoon {
                month: Common(month),
                date: new_moon_dates[i],
            });
            term += 2;
        }
        if needs_leap {
            debug!(annus, "no month without principal term");
            return Err(unresolved);
        }

        Ok(Annus {
            annus,
            ephemeris,
            months,
        })
    }
    /// Finds the annus a date falls in.
    ///
    /// Returns [`CalendarError::UnresolvedConversion`] if the ephemeris has no
    /// data for it.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::lunar::Annus;
    ///
    /// let date = Date::from_gregorian(1999, 12, 31).unwrap();
    /// let annus = Annus::from_date(date).unwrap();
    ///
    /// assert_eq!(2000, annus.annus);
    /// ```
    pub fn from_date(date: Date) -> Result<Self, CalendarError> {
        let year = date.gregorian().0;
        // An annus starts in November or December of the year before its
        // solstice, so a date belongs to the annus of its own year or the next.
        for y in [year, year + 1] {
            let annus = Self::new(y)?;
            if (annus.first_day()..annus.end()).contains(&date) {
                return Ok(annus);
            }
        }
        Err(CalendarError::UnresolvedConversion { annus: year })
    }

    /// Lunar date of `date` within this annus.
    ///
    /// If `date` is not in this annus, reports whether it lies before or
    /// after.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::lunar::{Annus, LunarDate, Month::*};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date).unwrap();
    ///
    /// assert_eq!(Ok(LunarDate::new(1999, Common(11), 25).unwrap()), annus.ymd_for(date));
    /// ```
    pub fn ymd_for(&self, date: Date) -> Result<LunarDate, OtherAnnus> {
        if date < self.first_day() {
            return Err(OtherAnnus::Before);
        } else if date >= self.end() {
            return Err(OtherAnnus::After);
        }

        let idx = self.months.partition_point(|m| m.date <= date) - 1;
        let m = self.months[idx];
        let d = (date - m.date + 1) as u32;
        Ok(LunarDate {
            year: self.year_of(m.month),
            month: m.month,
            day: d,
        })
    }

    /// First day and length of `month` of lunar year `year`, which must be
    /// laid out in this annus.
    fn month_span(&self, year: i32, month: Month) -> Result<(Date, u32), CalendarError> {
        let no_such = CalendarError::NoSuchLunarMonth { year, month };
        let idx = self.months[..self.months.len() - 1]
            .iter()
            .position(|m| m.month == month && self.year_of(m.month) == year)
            .ok_or(no_such)?;
        let start = self.months[idx].date;
        Ok((start, (self.months[idx + 1].date - start) as u32))
    }

    /// Lunar year a month of this annus belongs to: months 11 and 12 close
    /// the previous lunar year.
    fn year_of(&self, month: Month) -> i32 {
        if month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        }
    }

    fn first_day(&self) -> Date {
        self.months[0].date
    }

    fn end(&self) -> Date {
        self.months[self.months.len() - 1].date
    }

    /// Finds the solar term in effect on `date`. Returns:
    ///
    /// - `.0`: annus of that solar term (Đại tuyết of the previous annus may
    ///   still be in effect early in this annus)
    /// - `.1`: number of the term, `1..=24` for Lập xuân through Đại hàn
    /// - `.2`: days since the term began, `0` if it begins on `date`
    ///
    /// Supports dates from the first day of the annus to the day before the
    /// next winter solstice.
    ///
    /// Fails if `date` is outside that range or if the previous annus has no
    /// ephemeris.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::lunar::Annus;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date).unwrap();
    ///
    /// assert_eq!(Ok((2000, 22, 10)), annus.solar_term_for(date)); // Đông chí + 10 days
    /// ```
    pub fn solar_term_for(&self, date: Date) -> Result<(i32, u32, u32), SolarTermErr> {
        use self::OtherAnnus::*;
        use SolarTermErr::*;
        if date < self.first_day() {
            return Err(OtherAnnus(Before));
        } else if date >= date_ict(self.ephemeris.solar_term[24]) {
            return Err(OtherAnnus(After));
        }
        if date < date_ict(self.ephemeris.solar_term[0]) {
            let last_annus = ephemeris::Annus::get(self.annus - 1).ok_or(NoData)?;
            let (idx, term_start) = (22..24)
                .zip(&last_annus.solar_term[22..24])
                .rev()
                .map(|(idx, &ut)| (idx, date_ict(ut)))
                .find(|&(_, term_start)| date >= term_start)
                .ok_or(NoData)?;
            return Ok((
                self.annus - 1,
                (idx + 21) % 24 + 1,
                (date - term_start) as u32,
            ));
        }
        let idx = self.ephemeris.solar_term[..24].partition_point(|&ut| date_ict(ut) <= date) - 1;
        let off = date - date_ict(self.ephemeris.solar_term[idx]);
        Ok((self.annus, (idx as u32 + 21) % 24 + 1, off as u32))
    }
}

/// Tells that a date is not in the annus, and on which side it lies.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// Tells that a date is not in the annus, or the ephemeris lacks the solar
/// terms for it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolarTermErr {
    NoData,
    OtherAnnus(OtherAnnus),
}

/// Converts an instant into the date in Vietnam (UTC+7).
pub fn date_ict(ut: Ut) -> Date {
    ut.date_in_timezone(VIETNAM_UTC_OFFSET_MINUTES)
}

/// Annus in which `month` of lunar year `year` is laid out.
fn annus_of(year: i32, month: Month) -> i32 {
    if month.num() >= 11 { year + 1 } else { year }
}

fn check_month(year: i32, month: Month) -> Result<(), CalendarError> {
    if (1..=12).contains(&month.num()) {
        Ok(())
    } else {
        Err(CalendarError::NoSuchLunarMonth { year, month })
    }
}

/// Converts a civil date into the lunar calendar.
///
/// Fails with [`CalendarError::UnresolvedConversion`] outside the ephemeris
/// range (civil years 1900 to 2100 are always covered).
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::lunar::{self, LunarDate, Month::*};
///
/// let tet = Date::from_gregorian(2024, 2, 10).unwrap();
/// assert_eq!(LunarDate::new(2024, Common(1), 1), lunar::to_lunar(tet));
/// ```
#[tracing::instrument(level = "trace")]
pub fn to_lunar(date: Date) -> Result<LunarDate, CalendarError> {
    let annus = Annus::from_date(date)?;
    annus
        .ymd_for(date)
        .map_err(|_| CalendarError::UnresolvedConversion { annus: annus.annus })
}

/// Converts a lunar date into the civil calendar.
///
/// Fails with [`CalendarError::NoSuchLunarMonth`] if the year has no such
/// month (typically a leap month it never inserts), and with
/// [`CalendarError::LunarDayOutOfRange`] if `day` is `0` or past the end of
/// the month. Never clamps.
///
/// # Example
///
/// ```
/// use amlich::lunar;
///
/// let date = lunar::from_lunar(2020, 4, 1, true).unwrap();
/// assert_eq!("2020-05-23", date.iso_gregorian());
/// assert!(lunar::from_lunar(2024, 4, 1, true).is_err());
/// ```
#[tracing::instrument(level = "trace")]
pub fn from_lunar(year: i32, month: u32, day: u32, is_leap: bool) -> Result<Date, CalendarError> {
    let month = Month::new(month, is_leap);
    check_month(year, month)?;
    let (start, len) = Annus::new(annus_of(year, month))?.month_span(year, month)?;
    if !(1..=len).contains(&day) {
        return Err(CalendarError::LunarDayOutOfRange {
            year,
            month,
            day,
            len,
        });
    }
    Ok(start + (day - 1) as i32)
}

/// Returns the number of days (29 or 30) of a lunar month.
///
/// Fails with [`CalendarError::NoSuchLunarMonth`] if `is_leap` is set but
/// `month` is not the leap month of `year`.
///
/// # Example
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!(Ok(29), lunar::days_in_lunar_month(2023, 2, true));
/// assert!(lunar::days_in_lunar_month(2024, 2, true).is_err());
/// ```
pub fn days_in_lunar_month(year: i32, month: u32, is_leap: bool) -> Result<u32, CalendarError> {
    let month = Month::new(month, is_leap);
    check_month(year, month)?;
    let (_, len) = Annus::new(annus_of(year, month))?.month_span(year, month)?;
    Ok(len)
}

/// Returns the leap month of lunar year `year`, or `None` if it has none.
///
/// # Example
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!(Ok(Some(6)), lunar::leap_month(2025));
/// assert_eq!(Ok(None), lunar::leap_month(2024));
/// ```
pub fn leap_month(year: i32) -> Result<Option<u32>, CalendarError> {
    // Leap 1 to 10 are laid out in the annus `year`, leap 11 and 12 in the
    // next one.
    let mut found = None;
    for annus in [Annus::new(year)?, Annus::new(year + 1)?] {
        found = found.or_else(|| {
            annus.months[..annus.months.len() - 1]
                .iter()
                .map(|m| m.month)
                .find(|&month| month.is_leap() && annus.year_of(month) == year)
        });
    }
    Ok(found.map(|month| month.num()))
}
