//! Tabular Islamic calendars (civil and astronomical epochs).

/// 622-07-16 (Julian), Friday epoch used by the civil variant.
pub(crate) const CIVIL_EPOCH: i64 = 1_948_440;
/// One day earlier, used by the `islamic-tbla` variant.
pub(crate) const ASTRONOMICAL_EPOCH: i64 = 1_948_439;

pub(crate) fn is_leap_year(year: i32) -> bool {
    (14 + 11 * i64::from(year)).rem_euclid(30) < 11
}

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    let length = 29 + month % 2;
    if month == 12 && is_leap_year(year) {
        length + 1
    } else {
        length
    }
}

pub(crate) fn to_day_number(epoch: i64, year: i32, month: u8, day: u8) -> i64 {
    let year = i64::from(year);
    let elapsed_months = i64::from(month) - 1;
    i64::from(day) + (59 * elapsed_months + 1) / 2 + (year - 1) * 354 + (3 + 11 * year).div_euclid(30) + epoch
        - 1
}

#[expect(clippy::cast_possible_truncation, reason = "month and day indices are bounded")]
pub(crate) fn from_day_number(epoch: i64, jdn: i64) -> (i32, u8, u8) {
    let year = (30 * (jdn - epoch) + 10_646).div_euclid(10_631) as i32;
    // ceil(x / 29.5) == ceil(2x / 59)
    let since_first = jdn - (29 + to_day_number(epoch, year, 1, 1));
    let month = ((2 * since_first + 58).div_euclid(59) + 1).clamp(1, 12) as u8;
    let day = (jdn - to_day_number(epoch, year, month, 1) + 1) as u8;
    (year, month, day)
}
