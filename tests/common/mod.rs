//! Common test utilities and logging infrastructure
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=picker_values::parse=trace` - Module-specific tracing
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use picker_values::prelude::*;

static INIT: Once = Once::new();

/// Initialize test logging. Idempotent.
///
/// `log` records from the library reach the subscriber through
/// `tracing-subscriber`'s `tracing-log` bridge.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("picker_values=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_file(true)
                        .with_line_number(true)
                        .with_thread_ids(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A span guard marking a test phase.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Run `f` with environment variables set (`None` removes), restoring the
/// previous values afterwards. Callers must be `#[serial]`.
pub fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let originals: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        // SAFETY: Test-only code, serialized with #[serial]
        match value {
            Some(value) => unsafe { std::env::set_var(key, value) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    let result = f();

    for (key, original) in originals {
        // SAFETY: Test-only code, serialized with #[serial]
        match original {
            Some(value) => unsafe { std::env::set_var(&key, value) },
            None => unsafe { std::env::remove_var(&key) },
        }
    }
    result
}

/// Gregorian date shorthand.
pub fn date(year: i32, month: u8, day: u8) -> CalendarDate {
    CalendarDate::gregorian(year, month, day).unwrap()
}

/// Gregorian date-time shorthand.
pub fn date_time(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> CalendarDateTime {
    CalendarDateTime::new(date(year, month, day), Time::hms(hour, minute, 0).unwrap())
}

/// Gregorian, UTC and `en-US`, independent of the host.
pub fn utc_config() -> EngineConfig {
    EngineConfig::builder().tz(Tz::UTC).build()
}

/// Parse with [`utc_config`].
pub fn parse_default(input: &str, kind: ValueKind) -> Option<DateValue> {
    parse(input, kind, &utc_config())
}
