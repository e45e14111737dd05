//! Vietnamese text for dates.

use super::{LunarDate, Month};
use crate::can_chi;
use crate::date::Date;

/// Traditional lunar month names; index 0 is unused.
const LUNAR_MONTHS: &[&str] = &[
    "", "Giêng", "Hai", "Ba", "Tư", "Năm", "Sáu", "Bảy", "Tám", "Chín", "Mười", "Mười Một",
    "Chạp",
];

/// Returns the lunar month name. Month 1 is "Giêng" and month 12 "Chạp".
///
/// Returns `None` if the month number is not in `1..=12`.
///
/// # Example
///
/// ```
/// use amlich::lunar::{self, Month::*};
///
/// assert_eq!(Some("Tháng Chạp".into()), lunar::fmt::lunar_month(Common(12)));
/// assert_eq!(Some("Tháng Tư Nhuận".into()), lunar::fmt::lunar_month(Leap(4)));
/// assert_eq!(None, lunar::fmt::lunar_month(Common(13)));
/// ```
pub fn lunar_month(m: Month) -> Option<String> {
    let name = LUNAR_MONTHS.get(m.num() as usize).filter(|name| !name.is_empty())?;
    let leap = if m.is_leap() { " Nhuận" } else { "" };
    Some(format!("Tháng {name}{leap}"))
}

/// Returns the lunar day name. The first ten days are "Mùng 1" to "Mùng 10".
///
/// Returns `None` if the day is not in `1..=30`.
///
/// # Example
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!(Some("Mùng 1".into()), lunar::fmt::lunar_day(1));
/// assert_eq!(Some("15".into()), lunar::fmt::lunar_day(15));
/// assert_eq!(None, lunar::fmt::lunar_day(45));
/// ```
pub fn lunar_day(d: u32) -> Option<String> {
    match d {
        1..=10 => Some(format!("Mùng {d}")),
        11..=30 => Some(d.to_string()),
        _ => None,
    }
}

/// Solar term name. `1..=24` are Lập xuân through Đại hàn.
///
/// # Example
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!("Cốc vũ", lunar::fmt::solar_term(6));
/// assert_eq!("Đông chí", lunar::fmt::solar_term(22));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    const NAMES: &[&str] = &[
        "Đại hàn", "Lập xuân", "Vũ thủy", "Kinh trập", "Xuân phân", "Thanh minh", "Cốc vũ",
        "Lập hạ", "Tiểu mãn", "Mang chủng", "Hạ chí", "Tiểu thử", "Đại thử", "Lập thu",
        "Xử thử", "Bạch lộ", "Thu phân", "Hàn lộ", "Sương giáng", "Lập đông", "Tiểu tuyết",
        "Đại tuyết", "Đông chí", "Tiểu hàn",
    ];
    NAMES[term.rem_euclid(24) as usize]
}

/// Weekday name, capitalized.
///
/// # Example
///
/// ```
/// use amlich::{Date, lunar};
///
/// let date = Date::from_gregorian(2024, 2, 10).unwrap();
/// assert_eq!("Thứ Bảy", lunar::fmt::weekday(date));
/// ```
pub fn weekday(date: Date) -> &'static str {
    const NAMES: &[&str] = &[
        "Thứ Hai", "Thứ Ba", "Thứ Tư", "Thứ Năm", "Thứ Sáu", "Thứ Bảy", "Chủ Nhật",
    ];
    NAMES[(date.day_of_week() - 1) as usize]
}

/// Abbreviated weekday name, as in month grid headers.
pub fn weekday_short(date: Date) -> &'static str {
    const NAMES: &[&str] = &["Th 2", "Th 3", "Th 4", "Th 5", "Th 6", "Th 7", "CN"];
    NAMES[(date.day_of_week() - 1) as usize]
}

/// Gregorian month name, e.g. "Tháng 9".
pub fn month_name(month: i32) -> String {
    format!("Tháng {month}")
}

/// Gregorian month and year of `date`, e.g. "Tháng 9 2024".
pub fn month_year(date: Date) -> String {
    let (y, m, _) = date.gregorian();
    format!("{} {y}", month_name(m))
}

/// Short form of a lunar date with the Can Chi of its year, e.g.
/// "1/4 (nhuận), Canh Tý".
///
/// # Example
///
/// ```
/// use amlich::lunar::{self, LunarDate, Month::*};
///
/// let date = LunarDate::new(2024, Common(8), 15).unwrap();
/// assert_eq!("15/8, Giáp Thìn", lunar::fmt::lunar_summary(&date));
/// ```
pub fn lunar_summary(date: &LunarDate) -> String {
    let leap = if date.is_leap_month() { " (nhuận)" } else { "" };
    format!(
        "{}/{}{leap}, {}",
        date.day(),
        date.month().num(),
        can_chi::year_can_chi(date.year())
    )
}

/// Civil date as "dd/mm/yyyy".
pub fn solar_summary(date: Date) -> String {
    let (y, m, d) = date.gregorian();
    format!("{d:02}/{m:02}/{y:04}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;

    #[test]
    fn test_lunar_month() {
        for (std, m) in [
            ("Tháng Giêng", Common(1)),
            ("Tháng Mười", Common(10)),
            ("Tháng Mười Một", Common(11)),
            ("Tháng Chạp", Common(12)),
            ("Tháng Sáu Nhuận", Leap(6)),
        ] {
            assert_eq!(Some(std.to_owned()), lunar_month(m));
            assert_eq!(Some(std.to_owned()), m.name());
        }
    }

    #[test]
    fn test_lunar_month_out_of_range() {
        for m in [Common(0), Common(13), Leap(0), Leap(13), Common(u32::MAX)] {
            assert_eq!(None, lunar_month(m), "{m}");
        }
    }

    #[test]
    fn test_lunar_day() {
        for (std, d) in [("Mùng 1", 1), ("Mùng 10", 10), ("11", 11), ("30", 30)] {
            assert_eq!(Some(std.to_owned()), lunar_day(d));
        }
        for d in [0, 31, 45] {
            assert_eq!(None, lunar_day(d), "{d}");
        }
    }

    #[test]
    fn test_solar_term() {
        for (std, n) in [("Lập xuân", 1), ("Hạ chí", 10), ("Đại hàn", 24), ("Đại hàn", 0)] {
            assert_eq!(std, solar_term(n));
        }
    }

    #[test]
    fn test_weekday() {
        let monday = Date::from_gregorian(2024, 9, 2).unwrap();
        for (i, (long, short)) in [
            ("Thứ Hai", "Th 2"),
            ("Thứ Ba", "Th 3"),
            ("Thứ Tư", "Th 4"),
            ("Thứ Năm", "Th 5"),
            ("Thứ Sáu", "Th 6"),
            ("Thứ Bảy", "Th 7"),
            ("Chủ Nhật", "CN"),
        ]
        .into_iter()
        .enumerate()
        {
            let date = monday + i as i32;
            assert_eq!(long, weekday(date));
            assert_eq!(short, weekday_short(date));
        }
    }

    #[test]
    fn test_month_year() {
        let date = Date::from_gregorian(2024, 9, 5).unwrap();
        assert_eq!("Tháng 9 2024", month_year(date));
        assert_eq!("Tháng 12", month_name(12));
    }

    #[test]
    fn test_summaries() {
        let date = LunarDate::new(2020, Leap(4), 1).unwrap();
        assert_eq!("1/4 (nhuận), Canh Tý", lunar_summary(&date));
        let date = Date::from_gregorian(2024, 9, 5).unwrap();
        assert_eq!("05/09/2024", solar_summary(date));
    }
}
