//! Ephemeris of new moons and solar terms.
//!
//! New moons are computed with the series Ho Ngoc Duc derived from Meeus'
//! *Astronomical Algorithms*, and the sun's longitude with the matching
//! low-precision series. Published Vietnamese calendars are built from these
//! same series, so dates near midnight agree with them even where a more
//! precise ephemeris would disagree.
//!
//! The whole table for [`FIRST_ANNUS`]`..=`[`LAST_ANNUS`] is computed once on
//! first use and shared read-only afterwards.

use std::f64::consts::PI;
use std::time::Instant;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::time_scales::{Tt, Ut};

/// First annus in the table.
pub const FIRST_ANNUS: i32 = 1900;
/// Last annus in the table.
pub const LAST_ANNUS: i32 = 2101;

/// Mean synodic month in days.
const SYNODIC_MONTH: f64 = 29.530588853;
/// Mean tropical year in days.
const TROPICAL_YEAR: f64 = 365.2422;
/// Julian date near lunation 0 of [`new_moon`] (1900-01-01).
const LUNATION_EPOCH: f64 = 2415021.076998695;

/// Ephemeris of one annus.
#[derive(Debug)]
pub struct Annus {
    /// Gregorian year of the annus' closing winter solstice.
    pub annus: i32,
    /// Solar terms every 15° from the opening winter solstice, including the
    /// closing one.
    pub solar_term: [Ut; 25],
    /// Sixteen consecutive new moons, the first being the last one at or
    /// before the opening winter solstice.
    pub new_moon: [Ut; 16],
}

static DATA: Lazy<Vec<Annus>> = Lazy::new(|| {
    let started = Instant::now();
    let data: Vec<_> = (FIRST_ANNUS..=LAST_ANNUS).map(Annus::compute).collect();
    debug!(
        anni = data.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "ephemeris table built"
    );
    data
});

impl Annus {
    /// Returns the ephemeris of `annus`.
    ///
    /// Returns `None` outside [`FIRST_ANNUS`]`..=`[`LAST_ANNUS`].
    pub fn get(annus: i32) -> Option<&'static Self> {
        let idx = usize::try_from(annus.checked_sub(FIRST_ANNUS)?).ok()?;
        DATA.get(idx)
    }

    fn compute(annus: i32) -> Self {
        // Around December 21 of the previous year.
        let guess = 2451544.5 + (annus - 2001) as f64 * TROPICAL_YEAR + 354.0;
        let solstice = sun_longitude_crossing(270.0, Ut(guess));
        let solar_term = std::array::from_fn(|i| {
            let target = (270.0 + 15.0 * i as f64) % 360.0;
            sun_longitude_crossing(target, Ut(solstice.0 + i as f64 * TROPICAL_YEAR / 24.0))
        });

        let mut k = ((solstice.0 - LUNATION_EPOCH) / SYNODIC_MONTH).floor() as i32;
        while new_moon(k) > solstice {
            k -= 1;
        }
        while new_moon(k + 1) <= solstice {
            k += 1;
        }
        let new_moons = std::array::from_fn(|i| new_moon(k + i as i32));

        Annus {
            annus,
            solar_term,
            new_moon: new_moons,
        }
    }
}

/// Instant of the `k`-th new moon counted from January 1900.
pub fn new_moon(k: i32) -> Ut {
    let dr = PI / 180.0;
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let mut jd = 2415020.75933 + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * dr).sin();
    let m = (359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3) * dr;
    let mpr = (306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3) * dr;
    let f = (21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3) * dr;
    let c1 = (0.1734 - 0.000393 * t) * m.sin() + 0.0021 * (2.0 * m).sin()
        - 0.4068 * mpr.sin()
        + 0.0161 * (2.0 * mpr).sin()
        - 0.0004 * (3.0 * mpr).sin()
        + 0.0104 * (2.0 * f).sin()
        - 0.0051 * (m + mpr).sin()
        - 0.0074 * (m - mpr).sin()
        + 0.0004 * (2.0 * f + m).sin()
        - 0.0004 * (2.0 * f - m).sin()
        - 0.0006 * (2.0 * f + mpr).sin()
        + 0.0010 * (2.0 * f - mpr).sin()
        + 0.0005 * (2.0 * mpr + m).sin();
    Ut::convert(Tt(jd + c1))
}

/// Sun's ecliptic longitude at `ut`, in degrees within `0.0..360.0`.
pub fn sun_longitude(ut: Ut) -> f64 {
    let dr = PI / 180.0;
    let t = (ut.0 - 2451545.0) / 36525.0;
    let t2 = t * t;
    let m = (357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2) * dr;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    let dl = (1.914600 - 0.004817 * t - 0.000014 * t2) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000290 * (3.0 * m).sin();
    (l0 + dl).rem_euclid(360.0)
}

/// Finds when the sun reaches `target` degrees, starting near `guess`.
fn sun_longitude_crossing(target: f64, guess: Ut) -> Ut {
    let mut jd = guess.0;
    for _ in 0..50 {
        let mut diff = (target - sun_longitude(Ut(jd))).rem_euclid(360.0);
        if diff > 180.0 {
            diff -= 360.0;
        }
        let step = diff / 360.0 * TROPICAL_YEAR;
        jd += step;
        if step.abs() < 1e-9 {
            break;
        }
    }
    Ut(jd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    fn date_ict(ut: Ut) -> Date {
        ut.date_in_timezone(420)
    }

    #[test]
    fn solar_terms() {
        let annus = Annus::get(2000).unwrap();
        let date = date_ict(annus.solar_term[0]);
        assert_eq!("1999-12-22", date.iso_gregorian());
        let date = date_ict(annus.solar_term[3]); // Lập xuân
        assert_eq!("2000-02-04", date.iso_gregorian());
        let date = date_ict(annus.solar_term[6]); // Xuân phân
        assert_eq!("2000-03-20", date.iso_gregorian());
        let date = date_ict(annus.solar_term[24]);
        assert_eq!("2000-12-21", date.iso_gregorian());
    }

    #[test]
    fn new_moons() {
        let annus = Annus::get(2000).unwrap();
        let date = date_ict(annus.new_moon[0]);
        assert_eq!("1999-12-08", date.iso_gregorian());
    }

    #[test]
    fn solstice_before_midnight_in_1984() {
        // Falls on December 21 in Vietnam but December 22 in China.
        let annus = Annus::get(1985).unwrap();
        assert_eq!("1984-12-21", date_ict(annus.solar_term[0]).iso_gregorian());
        assert_eq!("1984-11-23", date_ict(annus.new_moon[0]).iso_gregorian());
        assert_eq!("1984-12-22", date_ict(annus.new_moon[1]).iso_gregorian());
    }

    #[test]
    fn table_is_ordered() {
        for annus in FIRST_ANNUS..=LAST_ANNUS {
            let eph = Annus::get(annus).unwrap();
            assert_eq!(annus, eph.annus);
            assert!(eph.new_moon[0] <= eph.solar_term[0], "annus {annus}");
            assert!(eph.new_moon[1] > eph.solar_term[0], "annus {annus}");
            for pair in eph.solar_term.windows(2) {
                assert!(pair[0] < pair[1], "annus {annus}");
            }
            for pair in eph.new_moon.windows(2) {
                let gap = pair[1].0 - pair[0].0;
                assert!((29.2..29.9).contains(&gap), "annus {annus}: {gap}");
            }
        }
    }

    #[test]
    fn out_of_range() {
        assert!(Annus::get(FIRST_ANNUS - 1).is_none());
        assert!(Annus::get(LAST_ANNUS + 1).is_none());
        assert!(Annus::get(i32::MIN).is_none());
    }

    #[test]
    fn longitude_at_crossing() {
        let annus = Annus::get(2024).unwrap();
        for (i, term) in annus.solar_term.iter().enumerate() {
            let target = (270.0 + 15.0 * i as f64) % 360.0;
            let mut diff = (sun_longitude(*term) - target).abs();
            if diff > 180.0 {
                diff = 360.0 - diff;
            }
            assert!(diff < 1e-6, "term {i}: {diff}");
        }
    }
}
