//! # picker_values
//!
//! The value engines behind date and color picker controls: calendar-aware
//! date/time values with parsing, formatting and arithmetic, and canonical
//! CSS colors.
//!
//! ## Quick Start
//!
//! ```rust
//! use picker_values::prelude::*;
//!
//! let config = EngineConfig::builder().time_zone("America/New_York").build();
//! let value = parse("March 20, 2024", ValueKind::Date, &config).unwrap();
//! let next = value.add(&DateDuration::months(1));
//! let formatted = format_value(&next, &FormatOptions::from_config(ValueKind::Date, &config));
//! assert_eq!(formatted.machine, "2024-04-20");
//! assert_eq!(formatted.display.as_deref(), Some("Apr 20, 2024"));
//!
//! let red = Color::parse("rgb(255 0 0)").unwrap();
//! assert_eq!(red.keyword(), Some("red"));
//! ```
//!
//! ## Core Concepts
//!
//! - **CalendarSystem**: the supported calendars and their month/year rules
//! - **DateValue**: a date, date-time, zoned date-time or time of day
//! - **EngineConfig**: default calendar, zone, locale and DST policy
//! - **FormattedValue**: machine, display and short-label renderings
//! - **Color**: RGB, HSL and alpha computed once at construction

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod arithmetic;
pub mod calendar;
pub mod color;
pub mod config;
pub mod date;
pub mod error;
pub mod format;
pub mod locale;
pub mod logging;
pub mod parse;
pub mod sync;
pub mod validity;
pub mod zone;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::arithmetic::{CycleOptions, DateFields, IsoWeek, is_equal_day, is_same_month, is_same_year};
    pub use crate::calendar::CalendarSystem;
    pub use crate::color::{Color, ColorParseError};
    pub use crate::config::EngineConfig;
    pub use crate::date::{
        CalendarDate, CalendarDateTime, DateDuration, DateField, DateValue, Time, ValueKind, Weekday,
        ZonedDateTime,
    };
    pub use crate::error::DateError;
    pub use crate::format::{FormatOptions, FormattedValue, format_value};
    pub use crate::locale::{HourCycle, Locale};
    pub use crate::parse::{parse, parse_detailed};
    pub use crate::validity::{Constraints, Validity, ValidityFlags};
    pub use crate::zone::{Disambiguation, Tz};
}

// Re-export key types at crate root
pub use calendar::CalendarSystem;
pub use color::Color;
pub use config::EngineConfig;
pub use date::{CalendarDate, CalendarDateTime, DateValue, Time, ValueKind, ZonedDateTime};
pub use error::DateError;
