//! IANA time zone resolution and DST disambiguation.
//!
//! Zone rules come from `chrono-tz`. Wall times are passed around as
//! "local milliseconds": milliseconds since 1970-01-01T00:00 on the wall
//! clock, before any offset is applied.

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone};
use smallvec::{SmallVec, smallvec};

use crate::calendar::CalendarSystem;
use crate::date::{CalendarDate, CalendarDateTime, MILLIS_PER_DAY, MILLIS_PER_SECOND, ZonedDateTime};
use crate::error::DateError;

pub use chrono_tz::Tz;

/// How to pick an instant for a wall time that a DST transition skips or repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disambiguation {
    /// Earlier instant for repeated times; push skipped times forward.
    #[default]
    Compatible,
    /// Always the earlier candidate instant.
    Earlier,
    /// Always the later candidate instant.
    Later,
    /// Fail on skipped or repeated times.
    Reject,
}

impl Disambiguation {
    /// Parse a policy name (`compatible`, `earlier`, `later`, `reject`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "compatible" => Some(Self::Compatible),
            "earlier" => Some(Self::Earlier),
            "later" => Some(Self::Later),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Look up an IANA zone identifier. `UTC`, `GMT` and `Z` map to UTC.
///
/// # Errors
///
/// `UnknownTimeZone` if the identifier is not in the tz database.
pub fn resolve_time_zone(identifier: &str) -> Result<Tz, DateError> {
    let trimmed = identifier.trim();
    if ["utc", "gmt", "z", "etc/utc"]
        .iter()
        .any(|alias| trimmed.eq_ignore_ascii_case(alias))
    {
        return Ok(Tz::UTC);
    }
    trimmed
        .parse::<Tz>()
        .map_err(|_| DateError::UnknownTimeZone(identifier.to_string()))
}

/// The host's zone: `TZ` (a leading `:` is ignored), then the platform
/// setting, then UTC.
#[must_use]
pub fn system_time_zone() -> Tz {
    if let Ok(tz) = std::env::var("TZ") {
        let tz = tz.trim().trim_start_matches(':');
        if !tz.is_empty() {
            match resolve_time_zone(tz) {
                Ok(time_zone) => return time_zone,
                Err(err) => log::debug!("{err} in TZ; asking the platform"),
            }
        }
    }
    match iana_time_zone::get_timezone() {
        Ok(name) => resolve_time_zone(&name).unwrap_or_else(|err| {
            log::warn!("{err}; using UTC");
            Tz::UTC
        }),
        Err(err) => {
            log::warn!("no system time zone ({err}); using UTC");
            Tz::UTC
        }
    }
}

/// Look up a zone, falling back to the system zone with a warning.
#[must_use]
pub fn resolve_time_zone_or_system(identifier: &str) -> Tz {
    resolve_time_zone(identifier).unwrap_or_else(|err| {
        let fallback = system_time_zone();
        log::warn!("{err}; falling back to {}", fallback.name());
        fallback
    })
}

fn naive_from_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

/// UTC offset in seconds that `time_zone` uses at an absolute instant.
#[must_use]
pub fn offset_at(time_zone: Tz, epoch_millis: i64) -> i32 {
    naive_from_millis(epoch_millis).map_or(0, |naive| {
        time_zone.offset_from_utc_datetime(&naive).fix().local_minus_utc()
    })
}

/// Every offset the zone uses for a wall time, earliest instant first.
///
/// Empty inside a DST gap; two entries inside an overlap.
#[must_use]
pub fn possible_offsets(time_zone: Tz, local_millis: i64) -> SmallVec<[i32; 2]> {
    let Some(naive) = naive_from_millis(local_millis) else {
        return smallvec![0];
    };
    match time_zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => smallvec![dt.offset().fix().local_minus_utc()],
        LocalResult::Ambiguous(a, b) => {
            let a = a.offset().fix().local_minus_utc();
            let b = b.offset().fix().local_minus_utc();
            // A larger offset maps the same wall time to an earlier instant.
            smallvec![a.max(b), a.min(b)]
        }
        LocalResult::None => SmallVec::new(),
    }
}

/// Convert a wall time to epoch milliseconds under a disambiguation policy.
///
/// # Errors
///
/// `AmbiguousTime` or `NonexistentTime` under [`Disambiguation::Reject`].
pub fn local_to_epoch(time_zone: Tz, local_millis: i64, disambiguation: Disambiguation) -> Result<i64, DateError> {
    let to_epoch = |offset: i32| local_millis - i64::from(offset) * MILLIS_PER_SECOND;
    let offsets = possible_offsets(time_zone, local_millis);
    match (offsets.as_slice(), disambiguation) {
        ([only], _) => Ok(to_epoch(*only)),
        ([_, _], Disambiguation::Reject) => Err(DateError::AmbiguousTime(describe(time_zone, local_millis))),
        ([_, later], Disambiguation::Later) => Ok(to_epoch(*later)),
        ([earlier, ..], _) => Ok(to_epoch(*earlier)),
        ([], Disambiguation::Reject) => Err(DateError::NonexistentTime(describe(time_zone, local_millis))),
        ([], Disambiguation::Earlier) => {
            let after = offset_at(time_zone, local_millis + MILLIS_PER_DAY);
            log::debug!("{} skipped by DST; using offset {after}s", describe(time_zone, local_millis));
            Ok(to_epoch(after))
        }
        ([], Disambiguation::Compatible | Disambiguation::Later) => {
            let before = offset_at(time_zone, local_millis - MILLIS_PER_DAY);
            log::debug!("{} skipped by DST; using offset {before}s", describe(time_zone, local_millis));
            Ok(to_epoch(before))
        }
    }
}

/// The current instant in `time_zone`.
#[must_use]
pub fn now(time_zone: Tz, calendar: CalendarSystem) -> ZonedDateTime {
    ZonedDateTime::from_epoch_millis(chrono::Utc::now().timestamp_millis(), time_zone, calendar)
}

/// Today's date in `time_zone`.
#[must_use]
pub fn today(time_zone: Tz, calendar: CalendarSystem) -> CalendarDate {
    now(time_zone, calendar).date()
}

fn describe(time_zone: Tz, local_millis: i64) -> String {
    let wall = CalendarDateTime::from_local_millis(CalendarSystem::Gregorian, local_millis);
    format!("{wall} in {}", time_zone.name())
}

/// `+HH:MM`, with `:SS` appended for historical second-level offsets.
#[must_use]
pub fn format_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, abs % 3600 / 60, abs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Short display label such as `GMT`, `GMT-8` or `GMT+5:30`.
#[must_use]
pub fn gmt_label(offset_seconds: i32) -> String {
    if offset_seconds == 0 {
        return "GMT".to_string();
    }
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    let (hours, minutes) = (abs / 3600, abs % 3600 / 60);
    if minutes == 0 {
        format!("GMT{sign}{hours}")
    } else {
        format!("GMT{sign}{hours}:{minutes:02}")
    }
}

/// Parse `Z`, `±HH`, `±HHMM`, `±HH:MM` or `±HH:MM:SS` into seconds.
#[must_use]
pub fn parse_offset(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("z") {
        return Some(0);
    }
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes, seconds) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?, 0),
        6 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..4].parse::<i32>().ok()?,
            digits[4..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60 + seconds))
}
