//! Turning raw text into [`DateValue`]s.
//!
//! Grammars are tried in order, the first that matches wins:
//!
//! 1. kind-specific forms: `YYYY` for years, `YYYY-MM` for months,
//!    `YYYY-Www[-D]` for weeks
//! 2. zoned `YYYY-MM-DDTHH:mm[:ss[.fff]][±HH:MM][Zone]`
//! 3. absolute `YYYY-MM-DDTHH:mm[:ss[.fff]]Z` or `...±HH:MM`, moved into the
//!    configured zone
//! 4. local `YYYY-MM-DD[T| ]HH:mm[:ss[.fff]]`, a bare ISO date, or `HH:mm[:ss]`
//! 5. a permissive tokenizer for free-form input (`March 5, 2024 3:30 pm`,
//!    `5/3/24`, `14.03.2024 09:00 Europe/Berlin`)
//!
//! A grammar that matches but describes an impossible value (`2023-02-29`)
//! fails the whole parse. Numeric fields are always read as Gregorian;
//! results are converted to the configured calendar at the end.
//!
//! # Examples
//!
//! ```
//! use picker_values::config::EngineConfig;
//! use picker_values::date::ValueKind;
//! use picker_values::parse::parse;
//!
//! let config = EngineConfig::default();
//! let value = parse("March 5, 2024 3:30 pm", ValueKind::DateTime, &config).unwrap();
//! assert_eq!(value.to_string(), "2024-03-05T15:30:00");
//!
//! assert!(parse("2023-02-29", ValueKind::Date, &config).is_none());
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use chrono_tz::Tz;
use regex::{Captures, Regex};
use smallvec::SmallVec;

use crate::arithmetic::IsoWeek;
use crate::config::EngineConfig;
use crate::date::{CalendarDate, CalendarDateTime, DateValue, Time, ValueKind, Weekday, ZonedDateTime};
use crate::error::DateError;
use crate::zone;

/// Years written with two digits below this pivot land in the 2000s.
const TWO_DIGIT_YEAR_PIVOT: u32 = 50;

const DATE_TIME_PATTERN: &str =
    r"([+-]\d{6}|\d{4})-(\d{2})-(\d{2})(?:[Tt ](\d{2}):(\d{2})(?::(\d{2})(?:[.,](\d{1,9}))?)?)?";
const OFFSET_PATTERN: &str = r"(Z|z|[+-]\d{2}(?::?\d{2}(?::?\d{2})?)?)";

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:[+-]\d{6}|\d{1,4})$").expect("valid regex"));
static MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]\d{6}|\d{4})-(\d{2})$").expect("valid regex"));
static WEEK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]\d{6}|\d{4})-[Ww](\d{2})(?:-([1-7]))?$").expect("valid regex"));
static ZONED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{DATE_TIME_PATTERN}{OFFSET_PATTERN}?\[([^\]]+)\]$")).expect("valid regex")
});
static ABSOLUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{DATE_TIME_PATTERN}{OFFSET_PATTERN}$")).expect("valid regex"));
static LOCAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{DATE_TIME_PATTERN}$")).expect("valid regex"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2}):(\d{2})(?::(\d{2})(?:[.,](\d{1,9}))?)?$").expect("valid regex"));

static NUMERIC_DATE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})([/.-])(\d{1,2})[/.-](\d{1,4})$").expect("valid regex"));
static TIME_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::(\d{2})(?:[.,](\d{1,9}))?)?(am|pm|a\.m\.|p\.m\.|a|p)?$")
        .expect("valid regex")
});
static HOUR_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,2})(am|pm|a\.m\.|p\.m\.)$").expect("valid regex"));
static NUMBER_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,4})(?:st|nd|rd|th)?\.?$").expect("valid regex"));
static GMT_OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:utc|gmt)([+-])(\d{1,2})$").expect("valid regex"));

const FILLER_WORDS: &[&str] = &["at", "on", "the", "of", "de", "del", "le", "um", "à", "t"];

/// Parse `input` as a value of `kind`, or `None` if no grammar accepts it.
#[must_use]
pub fn parse(input: &str, kind: ValueKind, config: &EngineConfig) -> Option<DateValue> {
    match parse_detailed(input, kind, config) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("{err} (kind {kind:?})");
            None
        }
    }
}

/// Like [`parse`], keeping the reason for failure.
///
/// # Errors
///
/// `Parse` when nothing matches or the match is the wrong kind, `Range` for
/// impossible fields, and zone errors for bad zoned strings.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(config)))]
pub fn parse_detailed(input: &str, kind: ValueKind, config: &EngineConfig) -> Result<DateValue, DateError> {
    let trimmed = input.trim();
    let fail = || DateError::Parse(input.to_string());
    if trimmed.is_empty() {
        return Err(fail());
    }

    let specific = match kind {
        ValueKind::Year => parse_year(trimmed),
        ValueKind::Month => parse_month(trimmed),
        ValueKind::Week => parse_week(trimmed),
        ValueKind::Date | ValueKind::Time | ValueKind::DateTime => None,
    };
    if let Some(result) = specific {
        let value = coerce(result?, kind).ok_or_else(fail)?;
        return Ok(value.to_calendar(config.calendar()));
    }

    let general = parse_zoned(trimmed, config)
        .or_else(|| parse_absolute(trimmed, config))
        .or_else(|| parse_local(trimmed))
        .or_else(|| parse_strict_time(trimmed));
    let value = match general {
        Some(result) => result?,
        None => {
            log::debug!("strict grammars rejected {trimmed:?}; trying free-form");
            parse_free_form(trimmed, kind, config).ok_or_else(fail)??
        }
    };
    let value = coerce(value, kind).ok_or_else(fail)?;
    Ok(value.to_calendar(config.calendar()))
}

/// Fit a parsed value to the requested kind.
///
/// Week values are always the Monday of their ISO week.
fn coerce(value: DateValue, kind: ValueKind) -> Option<DateValue> {
    match kind {
        ValueKind::Time => value.time().map(DateValue::Time),
        ValueKind::DateTime => match value {
            DateValue::Date(date) => Some(DateValue::DateTime(CalendarDateTime::new(date, Time::MIDNIGHT))),
            DateValue::Time(_) => None,
            other => Some(other),
        },
        ValueKind::Date => value.date().map(DateValue::Date),
        ValueKind::Year => value.date().map(|date| DateValue::Date(date.start_of_year())),
        ValueKind::Month => value.date().map(|date| DateValue::Date(date.start_of_month())),
        ValueKind::Week => value.date().map(|date| {
            let monday = date.day_number() - i64::from(date.weekday().days_since(Weekday::Monday));
            DateValue::Date(CalendarDate::from_day_number(date.calendar(), monday))
        }),
    }
}

fn number<T: FromStr>(text: &str) -> Result<T, DateError> {
    text.parse().map_err(|_| DateError::Parse(text.to_string()))
}

/// Milliseconds from a fractional-seconds string, truncated to 3 digits.
fn fraction_millis(fraction: &str) -> Result<u16, DateError> {
    let digits: String = fraction.chars().take(3).collect();
    number(&format!("{digits:0<3}"))
}

// ============================================================================
// Strict grammars
// ============================================================================

type Grammar = Option<Result<DateValue, DateError>>;

fn parse_year(input: &str) -> Grammar {
    YEAR_RE.is_match(input).then(|| year_value(input))
}

fn year_value(input: &str) -> Result<DateValue, DateError> {
    Ok(DateValue::Date(CalendarDate::gregorian(number(input)?, 1, 1)?))
}

fn parse_month(input: &str) -> Grammar {
    MONTH_RE.captures(input).map(|caps| month_value(&caps))
}

fn month_value(caps: &Captures<'_>) -> Result<DateValue, DateError> {
    Ok(DateValue::Date(CalendarDate::gregorian(
        number(&caps[1])?,
        number(&caps[2])?,
        1,
    )?))
}

fn parse_week(input: &str) -> Grammar {
    WEEK_RE.captures(input).map(|caps| week_value(&caps))
}

fn week_value(caps: &Captures<'_>) -> Result<DateValue, DateError> {
    let weekday = match caps.get(3) {
        Some(day) => Weekday::from_number(number(day.as_str())?)
            .ok_or_else(|| DateError::Parse(caps[0].to_string()))?,
        None => Weekday::Monday,
    };
    let week = IsoWeek {
        week_year: number(&caps[1])?,
        week: number(&caps[2])?,
        weekday,
    };
    Ok(DateValue::Date(week.to_date()?))
}

fn captured_date(caps: &Captures<'_>) -> Result<CalendarDate, DateError> {
    CalendarDate::gregorian(number(&caps[1])?, number(&caps[2])?, number(&caps[3])?)
}

/// Time from four consecutive capture groups starting at `first`.
fn captured_time(caps: &Captures<'_>, first: usize) -> Result<Option<Time>, DateError> {
    let Some(hour) = caps.get(first) else {
        return Ok(None);
    };
    let minute = caps.get(first + 1).map_or(Ok(0), |m| number(m.as_str()))?;
    let second = caps.get(first + 2).map_or(Ok(0), |m| number(m.as_str()))?;
    let millis = caps.get(first + 3).map_or(Ok(0), |m| fraction_millis(m.as_str()))?;
    Time::new(number(hour.as_str())?, minute, second, millis).map(Some)
}

fn captured_offset(caps: &Captures<'_>, group: usize) -> Result<Option<i32>, DateError> {
    caps.get(group)
        .map(|offset| zone::parse_offset(offset.as_str()).ok_or_else(|| DateError::Parse(caps[0].to_string())))
        .transpose()
}

fn parse_zoned(input: &str, config: &EngineConfig) -> Grammar {
    ZONED_RE.captures(input).map(|caps| zoned_value(&caps, config))
}

fn zoned_value(caps: &Captures<'_>, config: &EngineConfig) -> Result<DateValue, DateError> {
    let date = captured_date(caps)?;
    let time = captured_time(caps, 4)?.unwrap_or(Time::MIDNIGHT);
    let time_zone = zone::resolve_time_zone(&caps[9])?;
    let wall = CalendarDateTime::new(date, time);
    let zoned = match captured_offset(caps, 8)? {
        Some(seconds) => ZonedDateTime::with_offset(wall, time_zone, seconds)?,
        None => ZonedDateTime::from_local(wall, time_zone, config.disambiguation())?,
    };
    log::trace!("zoned grammar matched {:?}", &caps[0]);
    Ok(DateValue::Zoned(zoned))
}

fn parse_absolute(input: &str, config: &EngineConfig) -> Grammar {
    let caps = ABSOLUTE_RE.captures(input)?;
    caps.get(4)?;
    Some(absolute_value(&caps, config))
}

fn absolute_value(caps: &Captures<'_>, config: &EngineConfig) -> Result<DateValue, DateError> {
    let date = captured_date(caps)?;
    let time = captured_time(caps, 4)?.unwrap_or(Time::MIDNIGHT);
    let offset = captured_offset(caps, 8)?.unwrap_or(0);
    let epoch = CalendarDateTime::new(date, time).local_millis() - i64::from(offset) * 1000;
    log::trace!("absolute grammar matched {:?}", &caps[0]);
    Ok(DateValue::Zoned(ZonedDateTime::from_epoch_millis(
        epoch,
        config.time_zone(),
        date.calendar(),
    )))
}

fn parse_local(input: &str) -> Grammar {
    LOCAL_RE.captures(input).map(|caps| local_value(&caps))
}

fn local_value(caps: &Captures<'_>) -> Result<DateValue, DateError> {
    let date = captured_date(caps)?;
    Ok(match captured_time(caps, 4)? {
        Some(time) => DateValue::DateTime(CalendarDateTime::new(date, time)),
        None => DateValue::Date(date),
    })
}

fn parse_strict_time(input: &str) -> Grammar {
    let caps = TIME_RE.captures(input)?;
    Some(captured_time(&caps, 1).map(|time| DateValue::Time(time.unwrap_or(Time::MIDNIGHT))))
}

// ============================================================================
// Free-form tokenizer
// ============================================================================

#[derive(Debug, Default)]
struct Tokens {
    /// Fully specified numeric date (year, month, day); year may be two-digit.
    date: Option<(u32, usize, u8, u8)>,
    month_name: Option<u8>,
    /// Bare numbers with their digit counts.
    numbers: SmallVec<[(u32, usize); 4]>,
    time: Option<(u8, u8, u8, u16)>,
    pm: Option<bool>,
    time_zone: Option<Tz>,
}

fn meridiem(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "am" | "a.m." | "a" => Some(false),
        "pm" | "p.m." | "p" => Some(true),
        _ => None,
    }
}

fn expand_year(value: u32, digits: usize) -> u32 {
    match digits {
        1 | 2 if value < TWO_DIGIT_YEAR_PIVOT => 2000 + value,
        1 | 2 => 1900 + value,
        _ => value,
    }
}

/// `None` when the tokenizer cannot make sense of the input.
fn parse_free_form(input: &str, kind: ValueKind, config: &EngineConfig) -> Grammar {
    let tokens = tokenize(input, config)?;
    Some(assemble(input, tokens, kind, config))
}

fn tokenize(input: &str, config: &EngineConfig) -> Option<Tokens> {
    let locale = config.locale();
    let mut tokens = Tokens::default();
    let words = input.split(|c: char| c.is_whitespace() || c == ',').filter(|w| !w.is_empty());

    for word in words {
        let lower = word.to_lowercase();
        if FILLER_WORDS.contains(&lower.as_str()) || locale.is_weekday_name(word) {
            continue;
        }
        if let Some(pm) = meridiem(word) {
            tokens.pm = Some(pm);
            continue;
        }
        if let Some(caps) = TIME_TOKEN_RE.captures(word) {
            let hour = caps[1].parse().ok()?;
            let minute = caps[2].parse().ok()?;
            let second = caps.get(3).map_or(Some(0), |s| s.as_str().parse().ok())?;
            let millis = caps.get(4).map_or(Some(0), |f| fraction_millis(f.as_str()).ok())?;
            tokens.time = Some((hour, minute, second, millis));
            if let Some(suffix) = caps.get(5) {
                tokens.pm = meridiem(suffix.as_str());
            }
            continue;
        }
        if let Some(caps) = HOUR_TOKEN_RE.captures(word) {
            tokens.time = Some((caps[1].parse().ok()?, 0, 0, 0));
            tokens.pm = meridiem(&caps[2]);
            continue;
        }
        if let Some(caps) = NUMERIC_DATE_TOKEN_RE.captures(word) {
            let (first, second, third) = (&caps[1], &caps[3], &caps[4]);
            let parts = if first.len() >= 3 {
                (first.parse().ok()?, first.len(), second.parse().ok()?, third.parse().ok()?)
            } else if locale.month_first() && &caps[2] == "/" {
                (third.parse().ok()?, third.len(), first.parse().ok()?, second.parse().ok()?)
            } else {
                (third.parse().ok()?, third.len(), second.parse().ok()?, first.parse().ok()?)
            };
            tokens.date = Some(parts);
            continue;
        }
        if let Some(caps) = NUMBER_TOKEN_RE.captures(word) {
            tokens.numbers.push((caps[1].parse().ok()?, caps[1].len()));
            continue;
        }
        if let Some(month) = locale.month_from_name(word) {
            tokens.month_name = Some(month);
            continue;
        }
        if let Some(caps) = GMT_OFFSET_RE.captures(word) {
            // Etc/GMT zones use inverted signs.
            let sign = if &caps[1] == "+" { '-' } else { '+' };
            tokens.time_zone = Some(zone::resolve_time_zone(&format!("Etc/GMT{sign}{}", &caps[2])).ok()?);
            continue;
        }
        if let Ok(time_zone) = zone::resolve_time_zone(word) {
            tokens.time_zone = Some(time_zone);
            continue;
        }
        log::debug!("unrecognized token {word:?} in {input:?}");
        return None;
    }
    Some(tokens)
}

fn assemble(input: &str, mut tokens: Tokens, kind: ValueKind, config: &EngineConfig) -> Result<DateValue, DateError> {
    let fail = || DateError::Parse(input.to_string());

    if tokens.time.is_none()
        && tokens.pm.is_some()
        && let Some(&(hour, digits)) = tokens.numbers.last()
        && digits <= 2
        && hour <= 12
    {
        tokens.numbers.pop();
        #[expect(clippy::cast_possible_truncation, reason = "hour checked above")]
        let hour = hour as u8;
        tokens.time = Some((hour, 0, 0, 0));
    }

    let time = match tokens.time {
        Some((hour, minute, second, millis)) => {
            let hour = match tokens.pm {
                Some(_) if hour == 0 || hour > 12 => return Err(fail()),
                Some(true) if hour == 12 => 12,
                Some(true) => hour + 12,
                Some(false) if hour == 12 => 0,
                _ => hour,
            };
            Some(Time::new(hour, minute, second, millis)?)
        }
        None if tokens.pm.is_some() => return Err(fail()),
        None => None,
    };

    let date = if let Some((year, digits, month, day)) = tokens.date {
        if !tokens.numbers.is_empty() || tokens.month_name.is_some() {
            return Err(fail());
        }
        Some(gregorian(expand_year(year, digits), month, day)?)
    } else if let Some(month) = tokens.month_name {
        let (day, year) = split_day_and_year(&tokens.numbers, kind).ok_or_else(fail)?;
        let year = match year {
            Some((value, digits)) => expand_year(value, digits),
            None => current_year(config),
        };
        Some(gregorian(year, month, day)?)
    } else if tokens.numbers.is_empty() {
        None
    } else {
        return Err(fail());
    };

    Ok(match (date, time, tokens.time_zone) {
        (Some(date), time, Some(time_zone)) => DateValue::Zoned(ZonedDateTime::from_local(
            CalendarDateTime::new(date, time.unwrap_or(Time::MIDNIGHT)),
            time_zone,
            config.disambiguation(),
        )?),
        (Some(date), Some(time), None) => DateValue::DateTime(CalendarDateTime::new(date, time)),
        (Some(date), None, None) => DateValue::Date(date),
        (None, Some(time), _) => DateValue::Time(time),
        (None, None, _) => return Err(fail()),
    })
}

/// Day and optional year from the numbers next to a month name.
fn split_day_and_year(numbers: &[(u32, usize)], kind: ValueKind) -> Option<(u8, Option<(u32, usize)>)> {
    let day_only = |value: u32| u8::try_from(value).ok().filter(|day| (1..=31).contains(day));
    match numbers {
        [] if matches!(kind, ValueKind::Month | ValueKind::Year) => Some((1, None)),
        [(value, digits)] if *digits >= 3 && matches!(kind, ValueKind::Month | ValueKind::Year) => {
            Some((1, Some((*value, *digits))))
        }
        [(value, digits)] if *digits <= 2 => Some((day_only(*value)?, None)),
        [(a, a_digits), (b, b_digits)] => {
            if *a_digits >= 3 {
                Some((day_only(*b)?, Some((*a, *a_digits))))
            } else {
                Some((day_only(*a)?, Some((*b, *b_digits))))
            }
        }
        _ => None,
    }
}

fn gregorian(year: u32, month: u8, day: u8) -> Result<CalendarDate, DateError> {
    let year = i32::try_from(year).map_err(|_| DateError::Parse(year.to_string()))?;
    CalendarDate::gregorian(year, month, day)
}

fn current_year(config: &EngineConfig) -> u32 {
    let today = zone::today(config.time_zone(), crate::calendar::CalendarSystem::Gregorian);
    u32::try_from(today.extended_year()).unwrap_or(1970)
}
