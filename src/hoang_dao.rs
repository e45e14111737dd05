//! Auspicious hours (giờ Hoàng Đạo).
//!
//! A day is split into twelve two-hour periods named after the branches,
//! starting with Tý at 23:00. Six of them are auspicious, chosen by the
//! branch of the day.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::can_chi::{self, Branch};
use crate::date::Date;

/// A two-hour period of the day.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HourWindow {
    pub branch: Branch,
    /// Starting hour, `0..=23`.
    pub start_hour: u8,
    /// Ending hour, `0..=23`. Smaller than `start_hour` for Tý, which spans
    /// midnight.
    pub end_hour: u8,
}

impl HourWindow {
    /// The period named by `branch`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::can_chi::Branch;
    /// use amlich::hoang_dao::HourWindow;
    ///
    /// let ty = HourWindow::of(Branch::Ty);
    /// assert_eq!((23, 1), (ty.start_hour, ty.end_hour));
    /// let ngo = HourWindow::of(Branch::Ngo);
    /// assert_eq!((11, 13), (ngo.start_hour, ngo.end_hour));
    /// ```
    pub fn of(branch: Branch) -> Self {
        let start_hour = ((2 * branch.index() + 23) % 24) as u8;
        Self {
            branch,
            start_hour,
            end_hour: (start_hour + 2) % 24,
        }
    }
    /// `true` if the period covers `hour` (`0..=23`).
    pub fn contains(&self, hour: u8) -> bool {
        if self.start_hour < self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}h-{}h)", self.branch, self.start_hour, self.end_hour)
    }
}

/// Auspicious branches per day branch, indexed by the day's branch.
const AUSPICIOUS: [[Branch; 6]; 12] = {
    use Branch::*;
    [
        [Ty, Suu, Mao, Ngo, Than, Dau],
        [Dan, Mao, Ti, Than, Tuat, Hoi],
        [Ty, Dan, Mao, Ngo, Mui, Dau],
        [Suu, Thin, Ti, Than, Dau, Hoi],
        [Ty, Mao, Thin, Ngo, Than, Hoi],
        [Dan, Thin, Ti, Mui, Tuat, Hoi],
        [Ty, Suu, Thin, Ngo, Mui, Tuat],
        [Suu, Mao, Ngo, Mui, Dau, Hoi],
        [Ty, Dan, Mao, Ti, Than, Tuat],
        [Suu, Thin, Ngo, Mui, Dau, Hoi],
        [Ty, Mao, Thin, Ngo, Than, Tuat],
        [Dan, Ti, Mui, Than, Tuat, Hoi],
    ]
};

/// Returns the six auspicious periods of `date`, from Tý to Hợi.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::hoang_dao::hoang_dao_hours;
///
/// let date = Date::from_gregorian(1984, 2, 2).unwrap(); // a Tý day
/// let hours: Vec<_> = hoang_dao_hours(date).iter().map(|h| h.to_string()).collect();
/// assert_eq!(
///     vec!["Tý (23h-1h)", "Sửu (1h-3h)", "Mão (5h-7h)", "Ngọ (11h-13h)", "Thân (15h-17h)", "Dậu (17h-19h)"],
///     hours
/// );
/// ```
pub fn hoang_dao_hours(date: Date) -> [HourWindow; 6] {
    let mut windows = AUSPICIOUS[can_chi::day_branch(date).index()].map(HourWindow::of);
    windows.sort_by_key(|w| w.branch);
    windows
}
