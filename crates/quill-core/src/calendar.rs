//! Gregorian to Jalali (Persian solar hijri) date conversion.
//!
//! Uses the 33-year break table arithmetic; valid for Jalali years
//! -61 through 3177. Anything outside that range converts to `None`.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Jalali years at which the 33-year leap cycle restarts.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// A date in the Jalali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    pub fn from_gregorian(date: NaiveDate) -> Option<Self> {
        let gregorian_year = date.year();
        let mut year = gregorian_year - 621;
        let info = year_info(year)?;

        // First of Farvardin falls in March of the same Gregorian year.
        let nowruz = NaiveDate::from_ymd_opt(gregorian_year, 3, info.march_day)?;
        let mut k = (date - nowruz).num_days() as i32;

        if k >= 0 {
            if k <= 185 {
                return Some(Self {
                    year,
                    month: (1 + k / 31) as u32,
                    day: (k % 31 + 1) as u32,
                });
            }
            k -= 186;
        } else {
            year -= 1;
            k += 179;
            if info.years_since_leap == 1 {
                k += 1;
            }
        }

        Some(Self {
            year,
            month: (7 + k / 30) as u32,
            day: (k % 30 + 1) as u32,
        })
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// `Some(true)` when the Jalali year has 366 days.
pub fn is_leap_jalali_year(year: i32) -> Option<bool> {
    year_info(year).map(|info| info.years_since_leap == 0)
}

struct YearInfo {
    /// 0 for a leap year, otherwise years elapsed since the last one.
    years_since_leap: i32,
    /// Day of March on which the year begins.
    march_day: u32,
}

fn year_info(year: i32) -> Option<YearInfo> {
    if year < BREAKS[0] || year >= BREAKS[BREAKS.len() - 1] {
        return None;
    }

    let gregorian_year = year + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if year < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = year - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut years_since_leap = ((n + 1) % 33 - 1) % 4;
    if years_since_leap == -1 {
        years_since_leap = 4;
    }

    Some(YearInfo {
        years_since_leap,
        march_day: u32::try_from(march_day).ok()?,
    })
}
