//! Form-style validity flags for a picker value.
//!
//! [`Validity::check`] mirrors the constraint-validation contract of a form
//! control: a raw input string, the value parsed from it (if any) and the
//! min/max/required constraints produce a set of flags plus messages. It
//! never fails.

use std::cmp::Ordering;

use bitflags::bitflags;

use crate::date::DateValue;
use crate::format::{FormatOptions, format_value};

bitflags! {
    /// Reasons a value is invalid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ValidityFlags: u8 {
        /// Later than `max`.
        const RANGE_OVERFLOW  = 1 << 0;
        /// Earlier than `min`.
        const RANGE_UNDERFLOW = 1 << 1;
        /// Text was entered but could not be parsed.
        const BAD_INPUT       = 1 << 2;
        /// Nothing entered for a required field.
        const VALUE_MISSING   = 1 << 3;
    }
}

/// Bounds and requiredness.
///
/// A `Time` bound is compared on time of day only. A date-only bound or
/// value compares by calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constraints {
    pub min: Option<DateValue>,
    pub max: Option<DateValue>,
    pub required: bool,
}

impl Constraints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min(mut self, min: impl Into<DateValue>) -> Self {
        self.min = Some(min.into());
        self
    }

    #[must_use]
    pub fn max(mut self, max: impl Into<DateValue>) -> Self {
        self.max = Some(max.into());
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Result of a validity check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validity {
    pub flags: ValidityFlags,
    pub messages: Vec<String>,
}

impl Validity {
    /// Check `value` (parsed from `raw`) against `constraints`.
    ///
    /// Bounds in messages are rendered with `options`.
    #[must_use]
    pub fn check(raw: &str, value: Option<&DateValue>, constraints: &Constraints, options: &FormatOptions) -> Self {
        let mut validity = Self::default();
        let Some(value) = value else {
            if !raw.trim().is_empty() {
                validity.push(ValidityFlags::BAD_INPUT, "Please enter a valid value.".to_string());
            } else if constraints.required {
                validity.push(ValidityFlags::VALUE_MISSING, "Please fill out this field.".to_string());
            }
            return validity;
        };

        if let Some(min) = &constraints.min
            && compare_to_bound(value, min) == Some(Ordering::Less)
        {
            let message = format!("Value must be {} or later.", bound_label(min, options));
            validity.push(ValidityFlags::RANGE_UNDERFLOW, message);
        }
        if let Some(max) = &constraints.max
            && compare_to_bound(value, max) == Some(Ordering::Greater)
        {
            let message = format!("Value must be {} or earlier.", bound_label(max, options));
            validity.push(ValidityFlags::RANGE_OVERFLOW, message);
        }
        validity
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.flags.is_empty()
    }

    fn push(&mut self, flag: ValidityFlags, message: String) {
        self.flags |= flag;
        self.messages.push(message);
    }
}

/// Order of `value` relative to `bound`, or `None` when they share no
/// comparable component (a time against a date-only bound).
fn compare_to_bound(value: &DateValue, bound: &DateValue) -> Option<Ordering> {
    match (value, bound) {
        (DateValue::Time(_), _) | (_, DateValue::Time(_)) => Some(value.time()?.cmp(&bound.time()?)),
        (DateValue::Date(_), _) | (_, DateValue::Date(_)) => {
            Some(value.date()?.day_number().cmp(&bound.date()?.day_number()))
        }
        (DateValue::Zoned(a), DateValue::Zoned(b)) => Some(a.compare(b)),
        _ => Some(value.date_time()?.local_millis().cmp(&bound.date_time()?.local_millis())),
    }
}

fn bound_label(bound: &DateValue, options: &FormatOptions) -> String {
    let formatted = format_value(bound, options);
    formatted.display.unwrap_or(formatted.machine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{CalendarDate, CalendarDateTime, Time, ValueKind};

    fn date(y: i32, m: u8, d: u8) -> DateValue {
        DateValue::Date(CalendarDate::gregorian(y, m, d).unwrap())
    }

    fn year_2020() -> Constraints {
        Constraints::new().min(date(2020, 1, 1)).max(date(2020, 12, 31))
    }

    fn options() -> FormatOptions {
        FormatOptions::new(ValueKind::Date)
    }

    #[test]
    fn test_overflow() {
        let validity = Validity::check("2021-01-01", Some(&date(2021, 1, 1)), &year_2020(), &options());
        assert_eq!(validity.flags, ValidityFlags::RANGE_OVERFLOW);
        assert_eq!(validity.messages, vec!["Value must be Dec 31, 2020 or earlier.".to_string()]);
    }

    #[test]
    fn test_underflow() {
        let validity = Validity::check("2019-12-31", Some(&date(2019, 12, 31)), &year_2020(), &options());
        assert_eq!(validity.flags, ValidityFlags::RANGE_UNDERFLOW);
        assert_eq!(validity.messages, vec!["Value must be Jan 1, 2020 or later.".to_string()]);
    }

    #[test]
    fn test_in_range_and_bounds_inclusive() {
        for value in [date(2020, 1, 1), date(2020, 6, 15), date(2020, 12, 31)] {
            assert!(Validity::check("x", Some(&value), &year_2020(), &options()).is_valid());
        }
    }

    #[test]
    fn test_missing_and_bad_input() {
        let required = Constraints::new().required(true);
        let missing = Validity::check("  ", None, &required, &options());
        assert_eq!(missing.flags, ValidityFlags::VALUE_MISSING);
        assert_eq!(missing.messages, vec!["Please fill out this field.".to_string()]);

        let bad = Validity::check("tomorrowish", None, &required, &options());
        assert_eq!(bad.flags, ValidityFlags::BAD_INPUT);
        assert!(Validity::check("", None, &Constraints::new(), &options()).is_valid());
    }

    #[test]
    fn test_time_bounds_compare_time_of_day() {
        let constraints = Constraints::new()
            .min(Time::hms(9, 0, 0).unwrap())
            .max(Time::hms(17, 0, 0).unwrap());
        let evening = CalendarDateTime::new(
            CalendarDate::gregorian(1999, 1, 1).unwrap(),
            Time::hms(18, 30, 0).unwrap(),
        );
        let options = FormatOptions::new(ValueKind::Time);
        let validity = Validity::check("x", Some(&DateValue::DateTime(evening)), &constraints, &options);
        assert_eq!(validity.flags, ValidityFlags::RANGE_OVERFLOW);
        assert_eq!(validity.messages, vec!["Value must be 5:00 PM or earlier.".to_string()]);
    }

    #[test]
    fn test_date_bound_against_date_time_value() {
        let constraints = Constraints::new().max(date(2020, 12, 31));
        let late = CalendarDateTime::new(
            CalendarDate::gregorian(2020, 12, 31).unwrap(),
            Time::hms(23, 59, 0).unwrap(),
        );
        let validity = Validity::check("x", Some(&DateValue::DateTime(late)), &constraints, &options());
        assert!(validity.is_valid());
    }
}
