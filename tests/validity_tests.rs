//! Validity checks driven from raw input, as a form control would run them.
//!
//! Run with: RUST_LOG=debug cargo test --test validity_tests -- --nocapture

mod common;

use common::{date, init_test_logging};
use picker_values::calendar::CalendarSystem;
use picker_values::prelude::*;

fn check_raw(raw: &str, constraints: &Constraints, config: &EngineConfig) -> Validity {
    let value = parse(raw, ValueKind::Date, config);
    let options = FormatOptions::from_config(ValueKind::Date, config);
    Validity::check(raw, value.as_ref(), constraints, &options)
}

fn year_2020() -> Constraints {
    Constraints::new().min(date(2020, 1, 1)).max(date(2020, 12, 31))
}

#[test]
fn test_overflow_from_raw_input() {
    init_test_logging();
    let validity = check_raw("2021-01-01", &year_2020(), &EngineConfig::default());
    assert_eq!(validity.flags, ValidityFlags::RANGE_OVERFLOW);
    assert_eq!(validity.messages, ["Value must be Dec 31, 2020 or earlier."]);
}

#[test]
fn test_underflow_from_free_form_input() {
    let validity = check_raw("December 31, 2019", &year_2020(), &EngineConfig::default());
    assert_eq!(validity.flags, ValidityFlags::RANGE_UNDERFLOW);
    assert_eq!(validity.messages, ["Value must be Jan 1, 2020 or later."]);
}

#[test]
fn test_missing_and_bad_input() {
    let required = year_2020().required(true);
    let missing = check_raw("   ", &required, &EngineConfig::default());
    assert_eq!(missing.flags, ValidityFlags::VALUE_MISSING);

    let bad = check_raw("2020-13-01", &required, &EngineConfig::default());
    assert_eq!(bad.flags, ValidityFlags::BAD_INPUT);
    assert_eq!(bad.messages, ["Please enter a valid value."]);

    let optional = check_raw("", &year_2020(), &EngineConfig::default());
    assert!(optional.is_valid());
}

#[test]
fn test_messages_follow_locale_and_calendar() {
    let german = EngineConfig::builder().locale("de-DE").build();
    let validity = check_raw("2021-01-01", &year_2020(), &german);
    assert_eq!(validity.messages, ["Value must be 31. Dez. 2020 or earlier."]);

    let persian = EngineConfig::builder().calendar_system(CalendarSystem::Persian).build();
    let constraints = Constraints::new().min(date(2024, 3, 20));
    let validity = check_raw("2024-03-19", &constraints, &persian);
    assert_eq!(validity.flags, ValidityFlags::RANGE_UNDERFLOW);
    assert_eq!(validity.messages, ["Value must be Farvardin 1, 1403 AP or later."]);
}

#[test]
fn test_zoned_values_compare_as_instants() {
    let config = EngineConfig::default();
    let bound = parse("2024-06-01T12:00Z[UTC]", ValueKind::DateTime, &config).unwrap();
    let constraints = Constraints::new().max(bound);
    let options = FormatOptions::from_config(ValueKind::DateTime, &config);

    // 07:30 in New York is 11:30 UTC.
    let earlier = parse("2024-06-01T07:30[America/New_York]", ValueKind::DateTime, &config).unwrap();
    assert!(Validity::check("", Some(&earlier), &constraints, &options).is_valid());

    let later = parse("2024-06-01T08:30[America/New_York]", ValueKind::DateTime, &config).unwrap();
    let validity = Validity::check("", Some(&later), &constraints, &options);
    assert_eq!(validity.flags, ValidityFlags::RANGE_OVERFLOW);
}

#[test]
fn test_bounds_are_inclusive() {
    for raw in ["2020-01-01", "2020-06-15", "2020-12-31"] {
        assert!(check_raw(raw, &year_2020(), &EngineConfig::default()).is_valid(), "{raw}");
    }
}
