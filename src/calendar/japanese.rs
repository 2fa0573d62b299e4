//! Japanese imperial calendar: Gregorian months with era-relative years.
//!
//! Dates before the Meiji era are expressed with the Gregorian `bc`/`ad` eras.

use super::gregorian;

pub(crate) const ERAS: &[&str] = &["bc", "ad", "meiji", "taisho", "showa", "heisei", "reiwa"];

/// (era, first Gregorian year, month, day)
const ERA_STARTS: [(&str, i32, u8, u8); 5] = [
    ("meiji", 1868, 9, 8),
    ("taisho", 1912, 7, 30),
    ("showa", 1926, 12, 25),
    ("heisei", 1989, 1, 8),
    ("reiwa", 2019, 5, 1),
];

fn era_start_year(era: &str) -> Option<i32> {
    ERA_STARTS
        .iter()
        .find(|(name, ..)| *name == era)
        .map(|&(_, year, ..)| year)
}

pub(crate) fn extended_year(era: &str, year: i32) -> i32 {
    match era {
        "bc" => 1 - year,
        "ad" => year,
        _ => era_start_year(era).map_or(year, |start| start + year - 1),
    }
}

pub(crate) fn years_in_era(era: &str) -> i32 {
    match era {
        "bc" => 9999,
        "ad" => 1868,
        _ => {
            let Some(index) = ERA_STARTS.iter().position(|(name, ..)| *name == era) else {
                return 9999;
            };
            let start = ERA_STARTS[index].1;
            let end = ERA_STARTS.get(index + 1).map_or(9999, |next| next.1);
            end - start + 1
        }
    }
}

pub(crate) fn from_day_number(jdn: i64) -> (&'static str, i32, u8, u8) {
    let (year, month, day) = gregorian::from_day_number(jdn);
    let era = ERA_STARTS
        .iter()
        .rev()
        .find(|&&(_, y, m, d)| (year, month, day) >= (y, m, d));
    match era {
        Some(&(name, start, ..)) => (name, year - start + 1, month, day),
        None if year < 1 => ("bc", 1 - year, month, day),
        None => ("ad", year, month, day),
    }
}
