//! Deals with different time scales, specifically, conversion from TT into
//! UT.
//!
//! Only conversions necessary for other computations in this crate are
//! included for now.

use chrono::{DateTime, TimeZone};

use crate::date::Date;

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Lunar phase series are computed in this time scale, and should be
/// converted to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// The difference between UT1 and UTC (under a second) does not matter at
/// the precision of the lunar and solar series in this crate, so the two are
/// not distinguished.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Converts a TT into UT by subtracting ΔT.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::{Tt, Ut};
    /// let tt = Tt(2451543.166666667);
    /// let ut = Ut::convert(tt);
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// ```
    pub fn convert(tt: Tt) -> Self {
        Ut(tt.0 - delta_t(tt))
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes`minutes.
    ///
    /// For Vietnam (UTC+7), `tz_offset_minutes` should be +420.
    ///
    /// # Panics
    ///
    /// Panics if the local date falls before JDN 0 or past `u32::MAX`, or if
    /// the time point is not finite. The ephemeris only produces time points
    /// well inside that range.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::Ut;
    /// let ut = Ut(2451543.25); // 1999-12-30T18:00Z
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((1999, 12, 31), ut.date_in_timezone(420).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jd = (self.0 + f64::from(tz_offset_minutes) / 1440.0).round();
        assert!(
            (0.0..=f64::from(u32::MAX)).contains(&jd),
            "Julian day {jd} outside the date range"
        );
        Date::from_jdn(jd as u32)
    }
}

/// Julian date of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2440587.5;

impl<Tz: TimeZone> From<&DateTime<Tz>> for Ut {
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::Ut;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let time = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    /// assert_eq!(Ut(2451545.0), Ut::from(&time));
    /// ```
    fn from(time: &DateTime<Tz>) -> Self {
        let secs = time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) * 1e-9;
        Ut(UNIX_EPOCH_JD + secs / 86400.0)
    }
}

/// ΔT = TT − UT, in days.
///
/// Coarse quadratic over Julian centuries since 1900 (a polynomial for
/// earlier epochs). Published Vietnamese calendars are computed with this
/// fit, so it is kept even where it drifts from observed ΔT.
pub fn delta_t(tt: Tt) -> f64 {
    let t = (tt.0 - 2415020.0) / 36525.0;
    let t2 = t * t;
    if t < -11.0 {
        0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t2 * t - 0.000000081 * t2 * t2
    } else {
        -0.000278 + 0.000265 * t + 0.000262 * t2
    }
}
