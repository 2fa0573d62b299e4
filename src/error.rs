//! Error taxonomy for the calendar/time engine.
//!
//! Parsing entry points never surface these to UI callers directly; they
//! return `Option` and keep the detailed error for `parse_detailed` and logs.

use std::fmt;

use crate::date::DateField;

/// Errors produced while constructing, converting or parsing date values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input matched none of the grammars for the requested value kind.
    Parse(String),
    /// A field was outside its valid range.
    Range {
        field: DateField,
        value: i64,
        min: i64,
        max: i64,
    },
    /// The era does not belong to the calendar or does not contain the date.
    InvalidEra { calendar: &'static str, era: String },
    /// Unsupported calendar identifier.
    UnknownCalendar(String),
    /// Unresolvable IANA time zone identifier.
    UnknownTimeZone(String),
    /// The UTC offset is not valid for the zone at that local time.
    InvalidOffset { offset: String, zone: String },
    /// The local time falls in a DST gap and the policy rejects it.
    NonexistentTime(String),
    /// The local time occurs twice and the policy rejects it.
    AmbiguousTime(String),
}

impl DateError {
    pub(crate) fn range(field: DateField, value: impl Into<i64>, min: impl Into<i64>, max: impl Into<i64>) -> Self {
        Self::Range {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(input) => write!(f, "Invalid date/time string: {input:?}"),
            Self::Range { field, value, min, max } => {
                write!(f, "{field} {value} out of range {min}..={max}")
            }
            Self::InvalidEra { calendar, era } => write!(f, "Invalid era {era:?} for calendar {calendar}"),
            Self::UnknownCalendar(id) => write!(f, "Unknown calendar: {id}"),
            Self::UnknownTimeZone(id) => write!(f, "Unknown time zone: {id}"),
            Self::InvalidOffset { offset, zone } => write!(f, "Offset {offset} is not valid for {zone}"),
            Self::NonexistentTime(local) => write!(f, "Local time {local} does not exist in this time zone"),
            Self::AmbiguousTime(local) => write!(f, "Local time {local} is ambiguous in this time zone"),
        }
    }
}

impl std::error::Error for DateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_display() {
        let err = DateError::range(DateField::Month, 13, 1, 12);
        assert_eq!(err.to_string(), "month 13 out of range 1..=12");
    }

    #[test]
    fn test_parse_error_display_quotes_input() {
        assert_eq!(
            DateError::Parse("2023-02-30".into()).to_string(),
            "Invalid date/time string: \"2023-02-30\""
        );
    }
}
