//! Engine-wide defaults: calendar, time zone, locale and DST policy.
//!
//! [`EngineConfig`] is a plain value built with a consuming builder or read
//! from the process environment.
//!
//! # Environment
//!
//! - `TZ`: IANA zone id (a leading `:` is ignored). Missing or unknown
//!   zones fall back to the host's zone, then UTC.
//! - `LC_ALL`, `LC_TIME`, `LANG`: first non-empty one wins, POSIX form
//!   (`en_US.UTF-8`) accepted
//!
//! # Examples
//!
//! ```
//! use picker_values::calendar::CalendarSystem;
//! use picker_values::config::EngineConfig;
//!
//! let config = EngineConfig::builder()
//!     .calendar("hebrew")
//!     .time_zone("Asia/Jerusalem")
//!     .locale("he-IL")
//!     .build();
//! assert_eq!(config.calendar(), CalendarSystem::Hebrew);
//! assert_eq!(config.time_zone().name(), "Asia/Jerusalem");
//! ```

use chrono_tz::Tz;

use crate::calendar::CalendarSystem;
use crate::locale::Locale;
use crate::zone::{self, Disambiguation};

/// Defaults shared by parsing, formatting and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    calendar: CalendarSystem,
    time_zone: Tz,
    locale: Locale,
    disambiguation: Disambiguation,
}

/// Gregorian, the host's time zone, `en-US` and compatible DST handling.
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarSystem::Gregorian,
            time_zone: zone::system_time_zone(),
            locale: Locale::default(),
            disambiguation: Disambiguation::Compatible,
        }
    }
}

struct EnvSettings {
    tz: Option<String>,
    lc_all: Option<String>,
    lc_time: Option<String>,
    lang: Option<String>,
}

fn read_env_settings() -> EnvSettings {
    EnvSettings {
        tz: std::env::var("TZ").ok(),
        lc_all: std::env::var("LC_ALL").ok(),
        lc_time: std::env::var("LC_TIME").ok(),
        lang: std::env::var("LANG").ok(),
    }
}

impl EngineConfig {
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Defaults taken from `TZ` and the locale variables.
    ///
    /// Missing or unknown zones fall back to the host's zone. A `-u-ca-`
    /// extension in the locale selects the calendar.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_settings(&read_env_settings())
    }

    fn from_env_settings(env: &EnvSettings) -> Self {
        let mut builder = Self::builder();
        if let Some(tz) = env.tz.as_deref().map(|tz| tz.trim().trim_start_matches(':'))
            && !tz.is_empty()
        {
            builder = builder.time_zone(tz);
        }
        let locale = [&env.lc_all, &env.lc_time, &env.lang]
            .into_iter()
            .flatten()
            .map(|value| value.trim())
            .find(|value| !value.is_empty());
        if let Some(locale) = locale {
            let locale = Locale::parse(locale);
            if let Some(calendar) = locale.calendar() {
                builder = builder.calendar_system(calendar);
            }
            builder = builder.locale(locale);
        }
        builder.build()
    }

    #[must_use]
    pub const fn calendar(&self) -> CalendarSystem {
        self.calendar
    }

    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.time_zone
    }

    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub const fn disambiguation(&self) -> Disambiguation {
        self.disambiguation
    }

    /// A copy with a different locale.
    #[must_use]
    pub fn with_locale(&self, locale: impl Into<Locale>) -> Self {
        Self {
            locale: locale.into(),
            ..self.clone()
        }
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Calendar by identifier; unknown ids fall back to Gregorian.
    #[must_use]
    pub fn calendar(mut self, identifier: &str) -> Self {
        self.config.calendar = CalendarSystem::resolve_or_default(identifier);
        self
    }

    #[must_use]
    pub const fn calendar_system(mut self, calendar: CalendarSystem) -> Self {
        self.config.calendar = calendar;
        self
    }

    /// Zone by IANA id; unknown ids fall back to the host's zone.
    #[must_use]
    pub fn time_zone(mut self, identifier: &str) -> Self {
        self.config.time_zone = zone::resolve_time_zone_or_system(identifier);
        self
    }

    #[must_use]
    pub const fn tz(mut self, time_zone: Tz) -> Self {
        self.config.time_zone = time_zone;
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<Locale>) -> Self {
        self.config.locale = locale.into();
        self
    }

    #[must_use]
    pub const fn disambiguation(mut self, disambiguation: Disambiguation) -> Self {
        self.config.disambiguation = disambiguation;
        self
    }

    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}
