//! Proleptic Gregorian arithmetic.
//!
//! Years are extended years: `1` is 1 AD, `0` is 1 BC, `-1` is 2 BC.

/// Julian Day Number of 0001-01-01.
pub(crate) const EPOCH: i64 = 1_721_426;

/// Whether `year` is a Gregorian leap year.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub(crate) fn to_day_number(year: i32, month: u8, day: u8) -> i64 {
    let y1 = i64::from(year) - 1;
    let month_offset = if month <= 2 {
        0
    } else if is_leap_year(year) {
        -1
    } else {
        -2
    };
    EPOCH - 1 + 365 * y1 + y1.div_euclid(4) - y1.div_euclid(100)
        + y1.div_euclid(400)
        + (367 * i64::from(month) - 362) / 12
        + month_offset
        + i64::from(day)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "month and day are bounded by the algorithm, years by the supported range"
)]
pub(crate) fn from_day_number(jdn: i64) -> (i32, u8, u8) {
    let depoch = jdn - EPOCH;
    let quadricent = depoch.div_euclid(146_097);
    let dqc = depoch.rem_euclid(146_097);
    let cent = dqc / 36_524;
    let dcent = dqc % 36_524;
    let quad = dcent / 1461;
    let dquad = dcent % 1461;
    let yindex = dquad / 365;
    let year = (quadricent * 400 + cent * 100 + quad * 4 + yindex + i64::from(cent != 4 && yindex != 4))
        as i32;

    let year_day = jdn - to_day_number(year, 1, 1);
    let leap_adjust = if jdn < to_day_number(year, 3, 1) {
        0
    } else if is_leap_year(year) {
        1
    } else {
        2
    };
    let month = (((year_day + leap_adjust) * 12 + 373) / 367) as u8;
    let day = (jdn - to_day_number(year, month, 1) + 1) as u8;
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_first_of_january_year_one() {
        assert_eq!(to_day_number(1, 1, 1), EPOCH);
        assert_eq!(from_day_number(EPOCH), (1, 1, 1));
    }

    #[test]
    fn test_known_day_numbers() {
        assert_eq!(to_day_number(2000, 1, 1), 2_451_545);
        assert_eq!(to_day_number(1970, 1, 1), 2_440_588);
        assert_eq!(to_day_number(2024, 3, 20), 2_460_390);
    }

    #[test]
    fn test_round_trip_across_leap_boundaries() {
        for (y, m, d) in [(2024, 2, 29), (2023, 2, 28), (2000, 12, 31), (1900, 3, 1), (0, 2, 29), (-44, 3, 15)] {
            assert_eq!(from_day_number(to_day_number(y, m, d)), (y, m, d));
        }
    }

    #[test]
    fn test_leap_rules() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(0));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
    }
}
