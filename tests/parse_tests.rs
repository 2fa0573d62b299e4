//! End-to-end parsing tests across kinds, calendars, zones and locales.
//!
//! Run with: RUST_LOG=debug cargo test --test parse_tests -- --nocapture

mod common;

use common::{init_test_logging, parse_default, test_phase};
use picker_values::calendar::CalendarSystem;
use picker_values::prelude::*;

fn machine(value: Option<DateValue>) -> Option<String> {
    value.map(|value| value.to_iso_string())
}

#[test]
fn test_leap_day_acceptance() {
    init_test_logging();
    assert_eq!(
        machine(parse_default("2024-02-29", ValueKind::Date)).as_deref(),
        Some("2024-02-29")
    );
    assert_eq!(parse_default("2023-02-29", ValueKind::Date), None);
    assert!(matches!(
        parse_detailed("2023-02-29", ValueKind::Date, &EngineConfig::default()),
        Err(DateError::Range { field: DateField::Day, .. })
    ));
}

#[test]
fn test_each_kind_accepts_its_machine_form() {
    init_test_logging();
    let cases = [
        ("2024", ValueKind::Year, "2024-01-01"),
        ("2024-03", ValueKind::Month, "2024-03-01"),
        ("2024-W12-3", ValueKind::Week, "2024-03-18"),
        ("2024-03-20", ValueKind::Date, "2024-03-20"),
        ("2024-03-20T13:05", ValueKind::DateTime, "2024-03-20T13:05:00"),
        ("13:05:09", ValueKind::Time, "13:05:09"),
    ];
    for (input, kind, expected) in cases {
        let _phase = test_phase(input);
        assert_eq!(machine(parse_default(input, kind)).as_deref(), Some(expected), "{input}");
    }
}

#[test]
fn test_bc_dates_use_expanded_years() {
    let value = parse_default("-000043-03-15", ValueKind::Date).unwrap();
    let date = value.date().unwrap();
    assert_eq!((date.era(), date.year()), ("bc", 44));
    assert_eq!(value.to_iso_string(), "-000043-03-15");
}

#[test]
fn test_reject_policy_surfaces_gap() {
    let config = EngineConfig::builder()
        .disambiguation(Disambiguation::Reject)
        .build();
    assert!(matches!(
        parse_detailed("2024-03-10T02:30[America/Los_Angeles]", ValueKind::DateTime, &config),
        Err(DateError::NonexistentTime(_))
    ));
    assert!(matches!(
        parse_detailed("2024-11-03T01:30[America/Los_Angeles]", ValueKind::DateTime, &config),
        Err(DateError::AmbiguousTime(_))
    ));
    let explicit = parse("2024-11-03T01:30-08:00[America/Los_Angeles]", ValueKind::DateTime, &config);
    assert!(explicit.is_some());
}

#[test]
fn test_compatible_policy_moves_forward_through_gap() {
    let value = parse_default("2024-03-10T02:30[America/Los_Angeles]", ValueKind::DateTime).unwrap();
    assert_eq!(
        value.to_iso_string(),
        "2024-03-10T03:30:00-07:00[America/Los_Angeles]"
    );
}

#[test]
fn test_hebrew_configuration() {
    let config = EngineConfig::builder().calendar("hebrew").build();
    let value = parse("2024-10-03", ValueKind::Date, &config).unwrap();
    let date = value.date().unwrap();
    assert_eq!(date.calendar(), CalendarSystem::Hebrew);
    assert_eq!((date.year(), date.month(), date.day()), (5785, 1, 1));
}

#[test]
fn test_locale_month_names() {
    let de = EngineConfig::builder().locale("de-DE").build();
    assert_eq!(
        machine(parse("5. März 2024", ValueKind::Date, &de)).as_deref(),
        Some("2024-03-05")
    );
    let fr = EngineConfig::builder().locale("fr-FR").build();
    assert_eq!(
        machine(parse("5 mars 2024", ValueKind::Date, &fr)).as_deref(),
        Some("2024-03-05")
    );
    // English names are understood in any locale.
    assert_eq!(
        machine(parse("March 5, 2024", ValueKind::Date, &de)).as_deref(),
        Some("2024-03-05")
    );
}

#[test]
fn test_whitespace_is_trimmed() {
    assert_eq!(
        machine(parse_default("  2024-03-20  ", ValueKind::Date)).as_deref(),
        Some("2024-03-20")
    );
}

#[test]
fn test_unparseable_inputs() {
    for input in ["", "yesterday-ish", "2024-02-30", "25:00", "2024-W60", "#ff0000"] {
        assert!(parse_default(input, ValueKind::Date).is_none(), "{input}");
    }
    assert!(parse_default("2024-W60", ValueKind::Week).is_none());
    assert!(parse_default("25:00", ValueKind::Time).is_none());
}
