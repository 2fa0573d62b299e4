//! Indian national (Saka) calendar, anchored to the Gregorian vernal equinox.

use super::gregorian;

const ERA_START: i32 = 78;
const YEAR_START: i64 = 80;

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 if gregorian::is_leap_year(year + ERA_START) => 31,
        2..=6 => 31,
        _ => 30,
    }
}

pub(crate) fn to_day_number(year: i32, month: u8, day: u8) -> i64 {
    let gregorian_year = year + ERA_START;
    let (leap_month, start) = if gregorian::is_leap_year(gregorian_year) {
        (31, gregorian::to_day_number(gregorian_year, 3, 21))
    } else {
        (30, gregorian::to_day_number(gregorian_year, 3, 22))
    };
    let day = i64::from(day);
    if month == 1 {
        return start + day - 1;
    }
    let month = i64::from(month);
    let mut jdn = start + leap_month + (month - 2).min(5) * 31;
    if month >= 8 {
        jdn += (month - 7) * 30;
    }
    jdn + day - 1
}

#[expect(clippy::cast_possible_truncation, reason = "month and day indices are bounded")]
pub(crate) fn from_day_number(jdn: i64) -> (i32, u8, u8) {
    let (gregorian_year, ..) = gregorian::from_day_number(jdn);
    let mut year = gregorian_year - ERA_START;
    let mut year_day = jdn - gregorian::to_day_number(gregorian_year, 1, 1);
    let leap_month: i64;
    if year_day < YEAR_START {
        year -= 1;
        leap_month = if gregorian::is_leap_year(gregorian_year - 1) { 31 } else { 30 };
        year_day += leap_month + 31 * 5 + 30 * 3 + 10;
    } else {
        leap_month = if gregorian::is_leap_year(gregorian_year) { 31 } else { 30 };
        year_day -= YEAR_START;
    }

    let (month, day) = if year_day < leap_month {
        (1, year_day + 1)
    } else {
        let month_day = year_day - leap_month;
        if month_day < 31 * 5 {
            (month_day / 31 + 2, month_day % 31 + 1)
        } else {
            let month_day = month_day - 31 * 5;
            (month_day / 30 + 7, month_day % 30 + 1)
        }
    };
    (year, month as u8, day as u8)
}
