//! Vietnamese lunisolar calendar (âm lịch).
//!
//! Converts civil dates into the lunar calendar as observed in Vietnam and
//! back, names days, months and years in the sexagenary (Can Chi) cycle, and
//! lists the auspicious hours (giờ Hoàng Đạo) of a day.
//!
//! The lunar calendar is computed from new moons and solar terms at Vietnam's
//! standard time, UTC+7, for lunar years 1900 to 2100.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use amlich::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Lunar calendar:
//!
//! ```
//! use amlich::{Date, LunarDate, Month::*};
//!
//! let date = Date::from_gregorian(2024, 9, 17).unwrap();
//! let lunar = amlich::to_lunar(date).unwrap();
//! assert_eq!(Ok(lunar), LunarDate::new(2024, Common(8), 15));
//!
//! assert_eq!(Ok(date), amlich::from_lunar(2024, 8, 15, false));
//! ```
//!
//! Can Chi and auspicious hours:
//!
//! ```
//! use amlich::Date;
//! use amlich::can_chi::{day_can_chi, year_can_chi};
//!
//! let date = Date::from_gregorian(1984, 2, 2).unwrap();
//! assert_eq!("Giáp Tý", day_can_chi(date).to_string());
//! assert_eq!("Giáp Tý", year_can_chi(1984).to_string());
//! assert_eq!("Tý (23h-1h)", amlich::hoang_dao_hours(date)[0].to_string());
//! ```
//!
//! Conversions fail with a [`CalendarError`] rather than clamp: a caller
//! picking dates from a form decides how to correct an invalid field.

pub mod can_chi;
pub mod date;
pub mod error;
pub mod hoang_dao;
pub mod lunar;
pub mod time_scales;

/// Offset of Vietnam's standard time (Asia/Ho_Chi_Minh) from UTC.
///
/// Lunar days begin at midnight in this time zone.
pub const VIETNAM_UTC_OFFSET_MINUTES: i32 = 420;

pub use can_chi::CanChi;
pub use date::{Date, YearType, days_in_solar_month};
pub use error::CalendarError;
pub use hoang_dao::{HourWindow, hoang_dao_hours};
pub use lunar::{LunarDate, Month, days_in_lunar_month, from_lunar, leap_month, to_lunar};
