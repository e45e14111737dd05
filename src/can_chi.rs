//! Can Chi, the sexagenary naming of days, months and years.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::lunar::LunarDate;

/// Heavenly stem (Can).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Stem {
    Giap,
    At,
    Binh,
    Dinh,
    Mau,
    Ky,
    Canh,
    Tan,
    Nham,
    Quy,
}

/// Earthly branch (Chi). Branches also name the twelve two-hour periods of a
/// day, see [`crate::hoang_dao`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Branch {
    Ty,
    Suu,
    Dan,
    Mao,
    Thin,
    Ti,
    Ngo,
    Mui,
    Than,
    Dau,
    Tuat,
    Hoi,
}

impl Stem {
    /// All stems in cycle order, from Giáp.
    pub const ALL: [Stem; 10] = [
        Stem::Giap,
        Stem::At,
        Stem::Binh,
        Stem::Dinh,
        Stem::Mau,
        Stem::Ky,
        Stem::Canh,
        Stem::Tan,
        Stem::Nham,
        Stem::Quy,
    ];

    /// Stem at `index` in the cycle, wrapping around (floor modulo).
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }
    /// Position in the cycle, `0..=9`.
    pub fn index(&self) -> usize {
        *self as usize
    }
    pub fn name(&self) -> &'static str {
        const NAMES: [&str; 10] = [
            "Giáp", "Ất", "Bính", "Đinh", "Mậu", "Kỷ", "Canh", "Tân", "Nhâm", "Quý",
        ];
        NAMES[self.index()]
    }
}

impl Branch {
    /// All branches in cycle order, from Tý.
    pub const ALL: [Branch; 12] = [
        Branch::Ty,
        Branch::Suu,
        Branch::Dan,
        Branch::Mao,
        Branch::Thin,
        Branch::Ti,
        Branch::Ngo,
        Branch::Mui,
        Branch::Than,
        Branch::Dau,
        Branch::Tuat,
        Branch::Hoi,
    ];

    /// Branch at `index` in the cycle, wrapping around (floor modulo).
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }
    /// Position in the cycle, `0..=11`.
    pub fn index(&self) -> usize {
        *self as usize
    }
    pub fn name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Tý", "Sửu", "Dần", "Mão", "Thìn", "Tỵ", "Ngọ", "Mùi", "Thân", "Dậu", "Tuất", "Hợi",
        ];
        NAMES[self.index()]
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stem and branch pair, displayed as e.g. "Giáp Tý".
///
/// Any combination can be held: the month formula of [`month_can_chi`]
/// yields pairs outside the sixty-pair cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CanChi {
    pub stem: Stem,
    pub branch: Branch,
}

impl CanChi {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }
    /// Pair at `offset` steps from Giáp Tý.
    fn at_offset(offset: i64) -> Self {
        Self::new(Stem::from_index(offset), Branch::from_index(offset))
    }
    /// Position in the sixty-pair cycle, numbered from 1 (Giáp Tý) to 60
    /// (Quý Hợi).
    ///
    /// Returns `None` when stem and branch differ in parity, which never
    /// happens in the real cycle.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::can_chi::{Branch, CanChi, Stem};
    ///
    /// assert_eq!(Some(1), CanChi::new(Stem::Giap, Branch::Ty).cycle_index());
    /// assert_eq!(Some(60), CanChi::new(Stem::Quy, Branch::Hoi).cycle_index());
    /// assert_eq!(None, CanChi::new(Stem::Giap, Branch::Suu).cycle_index());
    /// ```
    pub fn cycle_index(&self) -> Option<u32> {
        let (s, b) = (self.stem.index(), self.branch.index());
        if s % 2 != b % 2 {
            return None;
        }
        (0..6)
            .map(|i| s + 10 * i)
            .find(|n| n % 12 == b)
            .map(|n| n as u32 + 1)
    }
}

impl fmt::Display for CanChi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stem, self.branch)
    }
}

/// Day counted as Giáp Tý for the day cycle.
pub const DAY_ANCHOR_JDN: u32 = 2445733; // 1984-02-02

/// Can Chi of a day, counted from 1984-02-02 as Giáp Tý.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::can_chi::day_can_chi;
///
/// let date = Date::from_gregorian(1984, 2, 2).unwrap();
/// assert_eq!("Giáp Tý", day_can_chi(date).to_string());
/// ```
pub fn day_can_chi(date: Date) -> CanChi {
    CanChi::at_offset(day_offset(date))
}

/// Branch of a day, as used for its auspicious hours.
pub fn day_branch(date: Date) -> Branch {
    Branch::from_index(day_offset(date))
}

fn day_offset(date: Date) -> i64 {
    i64::from(date.jdn()) - i64::from(DAY_ANCHOR_JDN)
}

/// Can Chi of a lunar month.
///
/// The branch runs from Dần for month 1 to Sửu for month 12. The stem is
/// taken as `(cycle year + month - 1) mod 10`, which does not follow the
/// traditional rule deriving it from the year's stem; a leap month is named
/// like the month it repeats.
///
/// # Example
///
/// ```
/// use amlich::can_chi::month_can_chi;
/// use amlich::lunar::{LunarDate, Month::*};
///
/// let date = LunarDate::new(2024, Common(1), 1).unwrap();
/// assert_eq!("Ất Dần", month_can_chi(&date).to_string());
/// ```
pub fn month_can_chi(date: &LunarDate) -> CanChi {
    let month = i64::from(date.month().num());
    let stem = i64::from(date.cycle_year() % 10) + month - 1;
    CanChi::new(Stem::from_index(stem), Branch::from_index(month - 1 + 2))
}

/// Can Chi of a year.
///
/// # Example
///
/// ```
/// use amlich::can_chi::year_can_chi;
///
/// assert_eq!("Giáp Thìn", year_can_chi(2024).to_string());
/// ```
pub fn year_can_chi(year: i32) -> CanChi {
    let year = i64::from(year);
    CanChi::new(Stem::from_index(year + 6), Branch::from_index(year + 8))
}
