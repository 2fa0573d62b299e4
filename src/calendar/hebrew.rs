//! Hebrew lunisolar calendar.
//!
//! Months are numbered 1 (Tishri) through 13 in leap years; common years skip
//! the leap month so month 6 is Adar and month 12 is Elul.

const EPOCH: i64 = 347_997;
const HOUR_PARTS: i64 = 1080;
const DAY_PARTS: i64 = 24 * HOUR_PARTS;
const MONTH_DAYS: i64 = 29;
const MONTH_FRACT: i64 = 12 * HOUR_PARTS + 793;
const MONTH_PARTS: i64 = MONTH_DAYS * DAY_PARTS + MONTH_FRACT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearType {
    Deficient,
    Regular,
    Complete,
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (i64::from(year) * 7 + 1).rem_euclid(19) < 7
}

/// Molad of Tishri with the dehiyyot that avoid Sunday, Wednesday and Friday.
fn delay_one(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months;
    let mut day = months * 29 + parts.div_euclid(25_920);
    if (3 * (day + 1)).rem_euclid(7) < 3 {
        day += 1;
    }
    day
}

/// Postponement caused by the lengths of the adjacent years.
fn delay_two(year: i64) -> i64 {
    let last = delay_one(year - 1);
    let present = delay_one(year);
    let next = delay_one(year + 1);
    if next - present == 356 {
        2
    } else if present - last == 382 {
        1
    } else {
        0
    }
}

fn start_of_year(year: i64) -> i64 {
    delay_one(year) + delay_two(year)
}

pub(crate) fn days_in_year(year: i32) -> i64 {
    let year = i64::from(year);
    start_of_year(year + 1) - start_of_year(year)
}

fn year_type(year: i32) -> YearType {
    let mut length = days_in_year(year);
    if length > 380 {
        length -= 30;
    }
    match length {
        353 => YearType::Deficient,
        355 => YearType::Complete,
        _ => YearType::Regular,
    }
}

pub(crate) fn months_in_year(year: i32) -> u8 {
    if is_leap_year(year) { 13 } else { 12 }
}

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    let leap = is_leap_year(year);
    let month = if month >= 6 && !leap { month + 1 } else { month };
    match month {
        4 | 7 | 9 | 11 | 13 => 29,
        2 if year_type(year) == YearType::Complete => 30,
        2 => 29,
        3 if year_type(year) == YearType::Deficient => 29,
        6 if !leap => 0,
        _ => 30,
    }
}

pub(crate) fn to_day_number(year: i32, month: u8, day: u8) -> i64 {
    let mut jdn = start_of_year(i64::from(year));
    for m in 1..month {
        jdn += i64::from(days_in_month(year, m));
    }
    jdn + i64::from(day) + EPOCH
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "approximate year guess is corrected below; month and day are bounded"
)]
pub(crate) fn from_day_number(jdn: i64) -> (i32, u8, u8) {
    let d = jdn - EPOCH;
    let months = (d * DAY_PARTS) as f64 / MONTH_PARTS as f64;
    let mut year = ((19.0 * months + 234.0) / 235.0).floor() as i64 + 1;
    let mut day_of_year = d - start_of_year(year);
    while day_of_year < 1 {
        year -= 1;
        day_of_year = d - start_of_year(year);
    }
    loop {
        let length = start_of_year(year + 1) - start_of_year(year);
        if day_of_year <= length {
            break;
        }
        day_of_year -= length;
        year += 1;
    }

    let year = year as i32;
    let mut month = 1u8;
    let mut month_start = 0i64;
    while month <= months_in_year(year) {
        let length = i64::from(days_in_month(year, month));
        if day_of_year <= month_start + length {
            break;
        }
        month_start += length;
        month += 1;
    }
    (year, month, (day_of_year - month_start) as u8)
}
