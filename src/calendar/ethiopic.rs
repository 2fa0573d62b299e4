//! Coptic and Ethiopic calendars: twelve 30-day months plus a short
//! thirteenth month of 5 or 6 days.

pub(crate) const ETHIOPIC_EPOCH: i64 = 1_723_856;
pub(crate) const COPTIC_EPOCH: i64 = 1_824_665;
/// Years between the Amete Alem and Amete Mihret epochs.
pub(crate) const AMETE_MIHRET_DELTA: i32 = 5500;

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    if month % 13 != 0 {
        30
    } else if year.rem_euclid(4) == 3 {
        6
    } else {
        5
    }
}

pub(crate) fn to_day_number(epoch: i64, year: i32, month: u8, day: u8) -> i64 {
    let year = i64::from(year);
    epoch + 365 * year + year.div_euclid(4) + 30 * (i64::from(month) - 1) + i64::from(day) - 1
}

#[expect(clippy::cast_possible_truncation, reason = "month and day indices are bounded")]
pub(crate) fn from_day_number(epoch: i64, jdn: i64) -> (i32, u8, u8) {
    let year = (4 * (jdn - epoch) + 3).div_euclid(1461) as i32;
    let month = (1 + (jdn - to_day_number(epoch, year, 1, 1)).div_euclid(30)) as u8;
    let day = (jdn + 1 - to_day_number(epoch, year, month, 1)) as u8;
    (year, month, day)
}
