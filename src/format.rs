//! Rendering [`DateValue`]s as machine, display and short-label strings.
//!
//! The machine string never depends on locale or calendar: dates are always
//! the Gregorian ISO form so they can be parsed back. The display string is
//! built from the value converted into the requested calendar and zone.
//!
//! # Examples
//!
//! ```
//! use picker_values::date::{CalendarDate, DateValue, ValueKind};
//! use picker_values::format::{FormatOptions, format_value};
//!
//! let value = DateValue::Date(CalendarDate::gregorian(2024, 3, 20).unwrap());
//! let formatted = format_value(&value, &FormatOptions::new(ValueKind::Date));
//! assert_eq!(formatted.machine, "2024-03-20");
//! assert_eq!(formatted.display.as_deref(), Some("Mar 20, 2024"));
//! assert_eq!(formatted.short_label.as_deref(), Some("Wed 20"));
//! ```

use chrono_tz::Tz;

use crate::calendar::CalendarSystem;
use crate::config::EngineConfig;
use crate::date::{CalendarDate, DateValue, Time, ValueKind, format_iso_year};
use crate::locale::{HourCycle, Locale};
use crate::zone;

/// What to render and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub kind: ValueKind,
    pub locale: Locale,
    /// Calendar used for the display string.
    pub calendar: CalendarSystem,
    /// Zone zoned values are shown in; `None` keeps their own zone.
    pub time_zone: Option<Tz>,
    pub has_date: bool,
    pub has_time: bool,
    pub show_seconds: bool,
    pub show_time_zone: bool,
    /// Overrides the locale's hour cycle.
    pub hour_cycle: Option<HourCycle>,
}

impl FormatOptions {
    /// Defaults for `kind`: Gregorian, `en-US`, date/time parts per kind.
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            locale: Locale::default(),
            calendar: CalendarSystem::Gregorian,
            time_zone: None,
            has_date: kind.has_date(),
            has_time: kind.has_time(),
            show_seconds: false,
            show_time_zone: false,
            hour_cycle: None,
        }
    }

    /// Defaults for `kind` taken from an engine configuration.
    #[must_use]
    pub fn from_config(kind: ValueKind, config: &EngineConfig) -> Self {
        Self {
            locale: config.locale().clone(),
            calendar: config.calendar(),
            time_zone: Some(config.time_zone()),
            ..Self::new(kind)
        }
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub const fn calendar(mut self, calendar: CalendarSystem) -> Self {
        self.calendar = calendar;
        self
    }

    #[must_use]
    pub const fn time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    #[must_use]
    pub const fn has_date(mut self, has_date: bool) -> Self {
        self.has_date = has_date;
        self
    }

    #[must_use]
    pub const fn has_time(mut self, has_time: bool) -> Self {
        self.has_time = has_time;
        self
    }

    #[must_use]
    pub const fn show_seconds(mut self, show_seconds: bool) -> Self {
        self.show_seconds = show_seconds;
        self
    }

    #[must_use]
    pub const fn show_time_zone(mut self, show_time_zone: bool) -> Self {
        self.show_time_zone = show_time_zone;
        self
    }

    #[must_use]
    pub const fn hour_cycle(mut self, hour_cycle: HourCycle) -> Self {
        self.hour_cycle = Some(hour_cycle);
        self
    }

    fn effective_hour_cycle(&self) -> HourCycle {
        self.hour_cycle.unwrap_or_else(|| self.locale.hour_cycle())
    }
}

/// The three renderings of a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedValue {
    /// Locale-independent, round-trips through the parser.
    pub machine: String,
    pub display: Option<String>,
    pub short_label: Option<String>,
}

/// Render `value` per `options`. Pure: the same inputs give the same output.
#[must_use]
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(options)))]
pub fn format_value(value: &DateValue, options: &FormatOptions) -> FormattedValue {
    let shown = displayed(value, options);
    let locale = &options.locale;
    match (options.kind, value.date(), shown.date()) {
        (ValueKind::Year, Some(date), Some(local)) => FormattedValue {
            machine: format_iso_year(date.to_calendar(CalendarSystem::Gregorian).extended_year()),
            display: Some(year_label(locale, &local)),
            short_label: None,
        },
        (ValueKind::Month, Some(date), Some(local)) => {
            let gregorian = date.to_calendar(CalendarSystem::Gregorian);
            FormattedValue {
                machine: format!("{}-{:02}", format_iso_year(gregorian.extended_year()), gregorian.month()),
                display: Some(month_label(locale, &local)),
                short_label: Some(
                    locale
                        .month_name(local.calendar(), local.extended_year(), local.month(), true)
                        .to_string(),
                ),
            }
        }
        (ValueKind::Week, Some(date), _) => {
            let week = date.week();
            let weekday = locale.weekday_name(week.weekday, true);
            let year = format_iso_year(week.week_year);
            let display = if locale.language() == "ja" {
                format!("{year}年 第{}週", week.week)
            } else {
                format!("{} {}, {year}", locale.names().week, week.week)
            };
            FormattedValue {
                machine: format!("{week}-{}", week.weekday.number()),
                display: Some(display),
                short_label: Some(format!("W{} {weekday}", week.week)),
            }
        }
        _ => FormattedValue {
            machine: value.to_iso_string(),
            display: full_display(&shown, options),
            short_label: shown.date().map(|date| {
                format!("{} {}", locale.weekday_name(date.weekday(), true), date.day())
            }),
        },
    }
}

/// The value as it should appear on screen: display calendar and zone.
fn displayed(value: &DateValue, options: &FormatOptions) -> DateValue {
    let value = match (value, options.time_zone) {
        (DateValue::Zoned(zdt), Some(time_zone)) => DateValue::Zoned(zdt.to_time_zone(time_zone)),
        _ => *value,
    };
    value.to_calendar(options.calendar)
}

fn full_display(value: &DateValue, options: &FormatOptions) -> Option<String> {
    let locale = &options.locale;
    let date = value.date().filter(|_| options.has_date).map(|date| date_label(locale, &date));
    let time = value
        .time()
        .filter(|_| options.has_time)
        .map(|time| time_label(locale, &time, options.effective_hour_cycle(), options.show_seconds));
    let zone = match value {
        DateValue::Zoned(zdt) if options.show_time_zone && time.is_some() => Some(zone::gmt_label(zdt.offset_seconds())),
        _ => None,
    };
    let time = match (time, zone) {
        (Some(time), Some(zone)) => Some(format!("{time} {zone}")),
        (time, _) => time,
    };
    match (date, time) {
        (Some(date), Some(time)) if locale.language() == "ja" => Some(format!("{date} {time}")),
        (Some(date), Some(time)) => Some(format!("{date}, {time}")),
        (date, time) => date.or(time),
    }
}

fn shows_era(date: &CalendarDate) -> bool {
    date.calendar() != CalendarSystem::Gregorian || date.era() == "bc"
}

/// Year with its era where the era is informative.
fn year_label(locale: &Locale, date: &CalendarDate) -> String {
    let year = date.year();
    let era = locale.era_name(date.calendar(), date.era());
    let japanese_era = date.calendar() == CalendarSystem::Japanese && !matches!(date.era(), "bc" | "ad");
    match (locale.language(), shows_era(date)) {
        ("ja", false) => format!("{year}年"),
        ("ja", true) => format!("{era}{year}年"),
        (_, false) => year.to_string(),
        (_, true) if japanese_era => format!("{era} {year}"),
        (_, true) => format!("{year} {era}"),
    }
}

fn month_label(locale: &Locale, date: &CalendarDate) -> String {
    let year = year_label(locale, date);
    if locale.language() == "ja" {
        return format!("{year}{}月", date.month());
    }
    let month = locale.month_name(date.calendar(), date.extended_year(), date.month(), true);
    format!("{month} {year}")
}

fn date_label(locale: &Locale, date: &CalendarDate) -> String {
    let year = year_label(locale, date);
    let day = date.day();
    if locale.language() == "ja" {
        return format!("{year}{}月{day}日", date.month());
    }
    let month = locale.month_name(date.calendar(), date.extended_year(), date.month(), true);
    match locale.language() {
        "de" => format!("{day}. {month} {year}"),
        "fr" | "es" => format!("{day} {month} {year}"),
        _ => format!("{month} {day}, {year}"),
    }
}

fn time_label(locale: &Locale, time: &Time, cycle: HourCycle, show_seconds: bool) -> String {
    let hour = cycle.display_hour(time.hour());
    let mut clock = if cycle.is_12_hour() {
        format!("{hour}:{:02}", time.minute())
    } else {
        format!("{hour:02}:{:02}", time.minute())
    };
    if show_seconds {
        clock.push_str(&format!(":{:02}", time.second()));
    }
    if !cycle.is_12_hour() {
        return clock;
    }
    let period = locale.names().day_periods[usize::from(time.hour() >= 12)];
    if locale.language() == "ja" {
        format!("{period}{clock}")
    } else {
        format!("{clock} {period}")
    }
}
