//! Arithmetic Persian (Solar Hijri) calendar using the 33-year cycle.

const EPOCH: i64 = 1_948_320;
const MONTH_START: [i64; 12] = [0, 31, 62, 93, 124, 155, 186, 216, 246, 276, 306, 336];

pub(crate) fn is_leap_year(year: i32) -> bool {
    (25 * i64::from(year) + 11).rem_euclid(33) < 8
}

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        _ if is_leap_year(year) => 30,
        _ => 29,
    }
}

fn farvardin_first(year: i64) -> i64 {
    365 * (year - 1) + (8 * year + 21).div_euclid(33)
}

pub(crate) fn to_day_number(year: i32, month: u8, day: u8) -> i64 {
    EPOCH - 1 + farvardin_first(i64::from(year)) + MONTH_START[usize::from(month.clamp(1, 12)) - 1] + i64::from(day)
}

#[expect(clippy::cast_possible_truncation, reason = "month and day indices are bounded")]
pub(crate) fn from_day_number(jdn: i64) -> (i32, u8, u8) {
    let days = jdn - EPOCH;
    let year = 1 + (33 * days + 3).div_euclid(12_053);
    let day_of_year = days - farvardin_first(year);
    let month = if day_of_year < 216 {
        day_of_year.div_euclid(31)
    } else {
        (day_of_year - 6).div_euclid(30)
    }
    .clamp(0, 11);
    let day = day_of_year - MONTH_START[month as usize] + 1;
    (year as i32, month as u8 + 1, day as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nowruz_1403() {
        // 1 Farvardin 1403 is 2024-03-20.
        assert_eq!(to_day_number(1403, 1, 1), 2_460_390);
        assert_eq!(from_day_number(2_460_390), (1403, 1, 1));
        assert_eq!(from_day_number(2_460_389), (1402, 12, 29));
    }

    #[test]
    fn test_esfand_length_follows_leap_cycle() {
        assert!(is_leap_year(1403));
        assert_eq!(days_in_month(1403, 12), 30);
        assert_eq!(days_in_month(1402, 12), 29);
    }
}
