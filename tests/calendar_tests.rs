//! Cross-calendar conversion and calendar metadata tests.
//!
//! Run with: RUST_LOG=debug cargo test --test calendar_tests -- --nocapture

mod common;

use common::{date, init_test_logging, test_phase};
use picker_values::calendar::{CalendarSystem, UNIX_EPOCH_DAY};
use picker_values::prelude::*;

fn fields(date: &CalendarDate) -> (&'static str, i32, u8, u8) {
    (date.era(), date.year(), date.month(), date.day())
}

#[test]
fn test_known_new_years() {
    init_test_logging();
    let cases = [
        (CalendarSystem::Persian, date(2024, 3, 20), ("ap", 1403, 1, 1)),
        (CalendarSystem::Indian, date(2024, 3, 21), ("saka", 1946, 1, 1)),
        (CalendarSystem::Hebrew, date(2024, 10, 3), ("am", 5785, 1, 1)),
        (CalendarSystem::IslamicCivil, date(2023, 7, 19), ("ah", 1445, 1, 1)),
        (CalendarSystem::Ethiopic, date(2024, 9, 11), ("am", 2017, 1, 1)),
        (CalendarSystem::Coptic, date(2024, 9, 11), ("ce", 1741, 1, 1)),
    ];
    for (calendar, gregorian, expected) in cases {
        let converted = gregorian.to_calendar(calendar);
        tracing::debug!(calendar = %calendar, converted = %converted, "converted");
        assert_eq!(fields(&converted), expected, "{calendar}");
        assert_eq!(converted.to_calendar(CalendarSystem::Gregorian), gregorian);
    }
}

/// Walks every day of years 1-9999 in each calendar, checking each
/// conversion against a cursor advanced by the calendar's own month lengths.
#[test]
fn test_every_day_in_supported_range() {
    init_test_logging();
    let first = date(1, 1, 1).day_number();
    let last = date(9999, 12, 31).day_number();
    for calendar in CalendarSystem::ALL {
        let _phase = test_phase(calendar.identifier());
        let start = CalendarDate::from_day_number(calendar, first);
        let mut cursor = (start.extended_year(), start.month(), start.day());
        for jdn in first..=last {
            let (year, month, day) = cursor;
            let converted = CalendarDate::from_day_number(calendar, jdn);
            assert_eq!(
                (converted.extended_year(), converted.month(), converted.day()),
                cursor,
                "{calendar} day {jdn}"
            );
            assert!(month >= 1 && month <= calendar.months_in_year(year), "{calendar} day {jdn}");
            assert!(day >= 1 && day <= calendar.days_in_month(year, month), "{calendar} day {jdn}");
            if day == 1 || jdn == last {
                assert_eq!(converted.day_number(), jdn, "{calendar} day {jdn}");
            }
            cursor = if day < calendar.days_in_month(year, month) {
                (year, month, day + 1)
            } else if month < calendar.months_in_year(year) {
                (year, month + 1, 1)
            } else {
                (year + 1, 1, 1)
            };
        }
    }
}

#[test]
fn test_year_offset_calendars() {
    let day = date(2024, 3, 20);
    assert_eq!(fields(&day.to_calendar(CalendarSystem::Buddhist)), ("be", 2567, 3, 20));
    assert_eq!(fields(&day.to_calendar(CalendarSystem::Roc)), ("minguo", 113, 3, 20));
    assert_eq!(fields(&day.to_calendar(CalendarSystem::Japanese)), ("reiwa", 6, 3, 20));
    assert_eq!(
        fields(&date(1900, 1, 1).to_calendar(CalendarSystem::Roc)),
        ("before_minguo", 12, 1, 1)
    );
}

#[test]
fn test_japanese_era_boundaries() {
    let last_heisei = date(2019, 4, 30).to_calendar(CalendarSystem::Japanese);
    let first_reiwa = date(2019, 5, 1).to_calendar(CalendarSystem::Japanese);
    assert_eq!(fields(&last_heisei), ("heisei", 31, 4, 30));
    assert_eq!(fields(&first_reiwa), ("reiwa", 1, 5, 1));
    assert!(CalendarDate::new(CalendarSystem::Japanese, "heisei", 31, 5, 1).is_err());
    assert!(CalendarDate::new(CalendarSystem::Japanese, "taisho", 1, 7, 30).is_ok());
}

#[test]
fn test_islamic_epochs_differ_by_one_day() {
    let ramadan = date(2024, 3, 11);
    assert_eq!(fields(&ramadan.to_calendar(CalendarSystem::IslamicCivil)), ("ah", 1445, 9, 1));
    assert_eq!(fields(&ramadan.to_calendar(CalendarSystem::IslamicTabular)), ("ah", 1445, 9, 2));
}

#[test]
fn test_hebrew_leap_years_have_thirteen_months() {
    let hebrew = CalendarSystem::Hebrew;
    assert_eq!(hebrew.months_in_year(5784), 13);
    assert_eq!(hebrew.months_in_year(5785), 12);
    assert!(hebrew.is_leap_year(5784));
    assert!(!hebrew.is_leap_year(5785));
    let year_length = hebrew.days_in_year(5785);
    assert!((353..=355).contains(&year_length));
}

#[test]
fn test_leap_rules() {
    let gregorian = CalendarSystem::Gregorian;
    assert!(gregorian.is_leap_year(2000));
    assert!(!gregorian.is_leap_year(1900));
    assert!(gregorian.is_leap_year(2024));
    assert_eq!(gregorian.days_in_month(2024, 2), 29);
    assert_eq!(gregorian.days_in_month(2023, 2), 28);
    assert_eq!(CalendarSystem::Ethiopic.days_in_month(2015, 13), 6);
    assert_eq!(CalendarSystem::Ethiopic.days_in_month(2016, 13), 5);
    assert_eq!(CalendarSystem::Persian.days_in_month(1403, 1), 31);
    assert_eq!(CalendarSystem::Persian.days_in_month(1403, 12), 30);
}

#[test]
fn test_epoch_day_number() {
    assert_eq!(date(1970, 1, 1).day_number(), UNIX_EPOCH_DAY);
    assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
}

#[test]
fn test_resolve_identifiers() {
    for calendar in CalendarSystem::ALL {
        assert_eq!(CalendarSystem::resolve(calendar.identifier()).unwrap(), calendar);
    }
    assert_eq!(CalendarSystem::resolve("ISLAMICC").unwrap(), CalendarSystem::IslamicCivil);
    assert!(matches!(
        CalendarSystem::resolve("chinese"),
        Err(DateError::UnknownCalendar(_))
    ));
    assert_eq!(CalendarSystem::resolve_or_default("chinese"), CalendarSystem::Gregorian);
}

#[test]
fn test_cross_calendar_ordering() {
    let persian = date(2024, 3, 20).to_calendar(CalendarSystem::Persian);
    let hebrew = date(2024, 3, 21).to_calendar(CalendarSystem::Hebrew);
    assert_eq!(persian.compare(&hebrew), std::cmp::Ordering::Less);
    assert!(is_equal_day(&persian, &date(2024, 3, 20)));
    assert_eq!(persian.partial_cmp(&hebrew), None);
}
