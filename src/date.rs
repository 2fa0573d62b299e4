//! Immutable calendar, time and zoned values.
//!
//! A [`DateValue`] is exactly one of four kinds:
//!
//! - [`CalendarDate`]: era, year, month and day in a [`CalendarSystem`]
//! - [`CalendarDateTime`]: a date plus a wall-clock [`Time`]
//! - [`ZonedDateTime`]: a date-time anchored to an IANA zone and UTC offset
//! - [`Time`]: a time of day with no date
//!
//! Constructors validate every field and return [`DateError::Range`] instead
//! of clamping. Arithmetic lives in [`crate::arithmetic`].
//!
//! # Examples
//!
//! ```
//! use picker_values::calendar::CalendarSystem;
//! use picker_values::date::CalendarDate;
//!
//! let leap_day = CalendarDate::gregorian(2024, 2, 29).unwrap();
//! assert_eq!(leap_day.to_string(), "2024-02-29");
//! assert!(CalendarDate::gregorian(2023, 2, 29).is_err());
//!
//! let hebrew = leap_day.to_calendar(CalendarSystem::Hebrew);
//! assert_eq!(hebrew.to_calendar(CalendarSystem::Gregorian), leap_day);
//! ```

use std::cmp::Ordering;
use std::fmt;

use chrono_tz::Tz;

use crate::calendar::{CalendarSystem, UNIX_EPOCH_DAY};
use crate::error::DateError;
use crate::zone::{self, Disambiguation};

pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;
pub(crate) const MILLIS_PER_HOUR: i64 = 3_600_000;
pub(crate) const MILLIS_PER_MINUTE: i64 = 60_000;
pub(crate) const MILLIS_PER_SECOND: i64 = 1000;

/// Bound on extended years while carrying month overflow.
pub(crate) const MAX_EXTENDED_YEAR: i64 = 20_000;
/// Day numbers of Gregorian -20000-01-01 and 20000-12-31.
const MIN_BALANCED_DAY: i64 = -5_583_790;
const MAX_BALANCED_DAY: i64 = 9_026_275;
/// Day numbers of 9999 BC January 1 and 9999-12-31 (Gregorian), the ends of
/// the widest eras.
pub(crate) const MIN_DAY_NUMBER: i64 = -1_930_634;
pub(crate) const MAX_DAY_NUMBER: i64 = 5_373_484;

/// A single field of a date or time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Era,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DateField {
    /// Lowercase field name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Era => "era",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
        }
    }

    /// Whether the field belongs to the time of day.
    #[must_use]
    pub const fn is_time_field(self) -> bool {
        matches!(self, Self::Hour | Self::Minute | Self::Second | Self::Millisecond)
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The granularity a caller asks for when parsing or formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueKind {
    Year,
    Month,
    Week,
    #[default]
    Date,
    Time,
    DateTime,
}

impl ValueKind {
    /// Map an input-type style name (`"datetime-local"`, `"week"`, ...) to a kind.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "week" => Some(Self::Week),
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "datetime" | "datetime-local" | "date-time" => Some(Self::DateTime),
            _ => None,
        }
    }

    /// Whether values of this kind carry a calendar date.
    #[must_use]
    pub const fn has_date(self) -> bool {
        !matches!(self, Self::Time)
    }

    /// Whether values of this kind carry a time of day.
    #[must_use]
    pub const fn has_time(self) -> bool {
        matches!(self, Self::Time | Self::DateTime)
    }
}

/// ISO weekday, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// ISO number, 1 (Monday) through 7 (Sunday).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Weekday from its ISO number.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Weekday of a proleptic day count.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "rem_euclid(7) is 0..7")]
    pub fn from_day_number(jdn: i64) -> Self {
        Self::ALL[jdn.rem_euclid(7) as usize]
    }

    /// Days from `start` forward to `self` (0..=6).
    #[must_use]
    pub const fn days_since(self, start: Self) -> u8 {
        (self as u8 + 7 - start as u8) % 7
    }
}

/// A signed duration broken into calendar and clock fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateDuration {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl DateDuration {
    #[must_use]
    pub const fn years(years: i64) -> Self {
        Self { years, ..Self::zero() }
    }

    #[must_use]
    pub const fn months(months: i64) -> Self {
        Self { months, ..Self::zero() }
    }

    #[must_use]
    pub const fn weeks(weeks: i64) -> Self {
        Self { weeks, ..Self::zero() }
    }

    #[must_use]
    pub const fn days(days: i64) -> Self {
        Self { days, ..Self::zero() }
    }

    #[must_use]
    pub const fn hours(hours: i64) -> Self {
        Self { hours, ..Self::zero() }
    }

    #[must_use]
    pub const fn minutes(minutes: i64) -> Self {
        Self { minutes, ..Self::zero() }
    }

    #[must_use]
    pub const fn seconds(seconds: i64) -> Self {
        Self { seconds, ..Self::zero() }
    }

    #[must_use]
    pub const fn milliseconds(milliseconds: i64) -> Self {
        Self { milliseconds, ..Self::zero() }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self {
            years: 0,
            months: 0,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            milliseconds: 0,
        }
    }

    /// The same duration pointing the other way.
    #[must_use]
    pub const fn negate(self) -> Self {
        Self {
            years: self.years.saturating_neg(),
            months: self.months.saturating_neg(),
            weeks: self.weeks.saturating_neg(),
            days: self.days.saturating_neg(),
            hours: self.hours.saturating_neg(),
            minutes: self.minutes.saturating_neg(),
            seconds: self.seconds.saturating_neg(),
            milliseconds: self.milliseconds.saturating_neg(),
        }
    }

    /// Whether any of years, months, weeks or days is non-zero.
    #[must_use]
    pub const fn has_date_fields(&self) -> bool {
        self.years != 0 || self.months != 0 || self.weeks != 0 || self.days != 0
    }

    /// Weeks and days folded into days, saturating.
    #[must_use]
    pub const fn day_count(&self) -> i64 {
        self.weeks.saturating_mul(7).saturating_add(self.days)
    }

    /// Clock fields folded into milliseconds, saturating.
    #[must_use]
    pub const fn time_millis(&self) -> i64 {
        self.hours
            .saturating_mul(MILLIS_PER_HOUR)
            .saturating_add(self.minutes.saturating_mul(MILLIS_PER_MINUTE))
            .saturating_add(self.seconds.saturating_mul(MILLIS_PER_SECOND))
            .saturating_add(self.milliseconds)
    }

    /// Clock fields folded into milliseconds modulo one day.
    #[must_use]
    pub const fn time_millis_of_day(&self) -> i64 {
        (self.hours.rem_euclid(24) * MILLIS_PER_HOUR
            + self.minutes.rem_euclid(24 * 60) * MILLIS_PER_MINUTE
            + self.seconds.rem_euclid(24 * 60 * 60) * MILLIS_PER_SECOND
            + self.milliseconds.rem_euclid(MILLIS_PER_DAY))
        .rem_euclid(MILLIS_PER_DAY)
    }
}

// ============================================================================
// CalendarDate
// ============================================================================

/// A date in a specific calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    calendar: CalendarSystem,
    era: &'static str,
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Build a validated date from era-relative fields.
    ///
    /// # Errors
    ///
    /// `InvalidEra` if the era does not belong to the calendar or the date
    /// falls outside it, `Range` for out-of-range year, month or day.
    pub fn new(calendar: CalendarSystem, era: &str, year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        let era = calendar.era(era).ok_or_else(|| DateError::InvalidEra {
            calendar: calendar.identifier(),
            era: era.to_string(),
        })?;
        let max_year = calendar.years_in_era(era);
        if !(1..=max_year).contains(&year) {
            return Err(DateError::range(DateField::Year, year, 1, max_year));
        }
        let extended = calendar.extended_year(era, year);
        let date = Self::from_extended(calendar, extended, month, day)?;
        if date.era != era || date.year != year {
            return Err(DateError::InvalidEra {
                calendar: calendar.identifier(),
                era: era.to_string(),
            });
        }
        Ok(date)
    }

    /// Build a validated date from the calendar's extended year.
    ///
    /// # Errors
    ///
    /// `Range` when month or day is invalid for that year.
    pub fn from_extended(calendar: CalendarSystem, extended_year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        let months = calendar.months_in_year(extended_year);
        if !(1..=months).contains(&month) {
            return Err(DateError::range(DateField::Month, month, 1, months));
        }
        let days = calendar.days_in_month(extended_year, month);
        if !(1..=days).contains(&day) {
            return Err(DateError::range(DateField::Day, day, 1, days));
        }
        Ok(Self::from_day_number(
            calendar,
            calendar.to_day_number(extended_year, month, day),
        ))
    }

    /// Proleptic Gregorian date; `year` is an extended year (0 is 1 BC).
    ///
    /// # Errors
    ///
    /// `Range` when month or day is invalid.
    pub fn gregorian(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        Self::from_extended(CalendarSystem::Gregorian, year, month, day)
    }

    /// The date with the given proleptic day count.
    #[must_use]
    pub fn from_day_number(calendar: CalendarSystem, jdn: i64) -> Self {
        let (era, year, month, day) = calendar.from_day_number(jdn);
        Self {
            calendar,
            era,
            year,
            month,
            day,
        }
    }

    /// Clamp fields into range, then normalize the era.
    pub(crate) fn constrained(calendar: CalendarSystem, era: &'static str, year: i64, month: i64, day: i64) -> Self {
        let max_year = calendar.years_in_era(era);
        #[expect(clippy::cast_possible_truncation, reason = "clamped into i32 range")]
        let year = year.clamp(1, i64::from(max_year)) as i32;
        let extended = calendar.extended_year(era, year);
        let months = calendar.months_in_year(extended);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 1..=13")]
        let month = month.clamp(1, i64::from(months)) as u8;
        let days = calendar.days_in_month(extended, month);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 1..=31")]
        let day = day.clamp(1, i64::from(days)) as u8;
        Self::from_day_number(calendar, calendar.to_day_number(extended, month, day))
    }

    /// Carry month and day overflow into coarser fields.
    ///
    /// `month` and `day` may be any signed value; day offsets are applied as
    /// whole days after the month is balanced. The result is not clamped to
    /// its era.
    pub(crate) fn balanced(calendar: CalendarSystem, extended_year: i64, month: i64, day: i64) -> Self {
        let mut year = extended_year.clamp(-MAX_EXTENDED_YEAR, MAX_EXTENDED_YEAR);
        let mut month = month.saturating_sub(1);
        if calendar != CalendarSystem::Hebrew {
            let months = i64::from(calendar.months_in_year(0));
            year += month.div_euclid(months);
            month = month.rem_euclid(months) + 1;
        } else {
            // Every 19-year cycle has 235 months.
            year += 19 * month.div_euclid(235);
            month = month.rem_euclid(235) + 1;
            while month > i64::from(calendar.months_in_year(clamp_year(year))) {
                month -= i64::from(calendar.months_in_year(clamp_year(year)));
                year += 1;
            }
        }
        let year = clamp_year(year);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "balanced to 1..=13")]
        let first = calendar.to_day_number(year, month as u8, 1);
        let jdn = (first.saturating_add(day) - 1).clamp(MIN_BALANCED_DAY, MAX_BALANCED_DAY);
        Self::from_day_number(calendar, jdn)
    }

    /// Pin dates past the edge of an era to that era's first or last day.
    pub(crate) fn clamp_to_era(self) -> Self {
        let max_year = self.calendar.years_in_era(self.era);
        if self.year <= max_year {
            return self;
        }
        if self.calendar.is_inverse_era(self.era) {
            Self::constrained(self.calendar, self.era, i64::from(max_year), 1, 1)
        } else {
            Self::constrained(self.calendar, self.era, i64::from(max_year), i64::MAX, i64::MAX)
        }
    }

    #[must_use]
    pub const fn calendar(&self) -> CalendarSystem {
        self.calendar
    }

    #[must_use]
    pub const fn era(&self) -> &'static str {
        self.era
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// The year on the calendar's single signed axis.
    #[must_use]
    pub fn extended_year(&self) -> i32 {
        self.calendar.extended_year(self.era, self.year)
    }

    /// Proleptic day count (Julian Day Number).
    #[must_use]
    pub fn day_number(&self) -> i64 {
        self.calendar.to_day_number(self.extended_year(), self.month, self.day)
    }

    /// ISO weekday.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        Weekday::from_day_number(self.day_number())
    }

    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        self.calendar.days_in_month(self.extended_year(), self.month)
    }

    #[must_use]
    pub fn months_in_year(&self) -> u8 {
        self.calendar.months_in_year(self.extended_year())
    }

    #[must_use]
    pub fn years_in_era(&self) -> i32 {
        self.calendar.years_in_era(self.era)
    }

    /// Reinterpret this date in another calendar.
    #[must_use]
    pub fn to_calendar(&self, calendar: CalendarSystem) -> Self {
        if calendar == self.calendar {
            return *self;
        }
        Self::from_day_number(calendar, self.day_number())
    }

    /// Compare by day count, across calendars.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.day_number().cmp(&other.day_number())
    }

    /// Canonical `YYYY-MM-DD` form of the Gregorian equivalent.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        let gregorian = self.to_calendar(CalendarSystem::Gregorian);
        format!(
            "{}-{:02}-{:02}",
            format_iso_year(gregorian.extended_year()),
            gregorian.month,
            gregorian.day
        )
    }
}

pub(crate) fn clamp_year(year: i64) -> i32 {
    #[expect(clippy::cast_possible_truncation, reason = "clamped into i32 range")]
    let year = year.clamp(-MAX_EXTENDED_YEAR, MAX_EXTENDED_YEAR) as i32;
    year
}

pub(crate) fn clamp_day_number(jdn: i64) -> i64 {
    jdn.clamp(MIN_DAY_NUMBER, MAX_DAY_NUMBER)
}

pub(crate) fn format_iso_year(year: i32) -> String {
    if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", year.unsigned_abs())
    } else {
        format!("+{year:06}")
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.calendar == other.calendar).then(|| self.compare(other))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

// ============================================================================
// Time
// ============================================================================

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Time {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) millisecond: u16,
}

impl Time {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
    };

    /// # Errors
    ///
    /// `Range` for hour > 23, minute > 59, second > 59 or millisecond > 999.
    pub fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> Result<Self, DateError> {
        if hour > 23 {
            return Err(DateError::range(DateField::Hour, hour, 0, 23));
        }
        if minute > 59 {
            return Err(DateError::range(DateField::Minute, minute, 0, 59));
        }
        if second > 59 {
            return Err(DateError::range(DateField::Second, second, 0, 59));
        }
        if millisecond > 999 {
            return Err(DateError::range(DateField::Millisecond, millisecond, 0, 999));
        }
        Ok(Self {
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// # Errors
    ///
    /// See [`Time::new`].
    pub fn hms(hour: u8, minute: u8, second: u8) -> Result<Self, DateError> {
        Self::new(hour, minute, second, 0)
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[must_use]
    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    /// Milliseconds since midnight.
    #[must_use]
    pub fn millis_of_day(&self) -> i64 {
        i64::from(self.hour) * MILLIS_PER_HOUR
            + i64::from(self.minute) * MILLIS_PER_MINUTE
            + i64::from(self.second) * MILLIS_PER_SECOND
            + i64::from(self.millisecond)
    }

    /// Split a millisecond count into whole days and the remaining time.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "components are bounded by the modulus")]
    pub fn from_millis(millis: i64) -> (i64, Self) {
        let days = millis.div_euclid(MILLIS_PER_DAY);
        let rest = millis.rem_euclid(MILLIS_PER_DAY);
        let time = Self {
            hour: (rest / MILLIS_PER_HOUR) as u8,
            minute: (rest % MILLIS_PER_HOUR / MILLIS_PER_MINUTE) as u8,
            second: (rest % MILLIS_PER_MINUTE / MILLIS_PER_SECOND) as u8,
            millisecond: (rest % MILLIS_PER_SECOND) as u16,
        };
        (days, time)
    }

    /// `HH:mm:ss` with a `.mmm` suffix when milliseconds are non-zero.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        let mut out = format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        if self.millisecond != 0 {
            out.push_str(&format!(".{:03}", self.millisecond));
        }
        out
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

// ============================================================================
// CalendarDateTime
// ============================================================================

/// A date and wall-clock time with no time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDateTime {
    date: CalendarDate,
    time: Time,
}

impl CalendarDateTime {
    #[must_use]
    pub const fn new(date: CalendarDate, time: Time) -> Self {
        Self { date, time }
    }

    /// Rebuild from milliseconds since 1970-01-01T00:00 wall time.
    #[must_use]
    pub fn from_local_millis(calendar: CalendarSystem, millis: i64) -> Self {
        let (days, time) = Time::from_millis(millis);
        Self {
            date: CalendarDate::from_day_number(calendar, days + UNIX_EPOCH_DAY),
            time,
        }
    }

    #[must_use]
    pub const fn date(&self) -> CalendarDate {
        self.date
    }

    #[must_use]
    pub const fn time(&self) -> Time {
        self.time
    }

    /// Wall-clock milliseconds since 1970-01-01T00:00, ignoring zones.
    #[must_use]
    pub fn local_millis(&self) -> i64 {
        (self.date.day_number() - UNIX_EPOCH_DAY) * MILLIS_PER_DAY + self.time.millis_of_day()
    }

    #[must_use]
    pub fn to_calendar(&self, calendar: CalendarSystem) -> Self {
        Self {
            date: self.date.to_calendar(calendar),
            time: self.time,
        }
    }

    /// Anchor this wall time in a zone.
    ///
    /// # Errors
    ///
    /// Only under [`Disambiguation::Reject`], for skipped or repeated times.
    pub fn in_time_zone(&self, time_zone: Tz, disambiguation: Disambiguation) -> Result<ZonedDateTime, DateError> {
        ZonedDateTime::from_local(*self, time_zone, disambiguation)
    }

    /// Compare wall times across calendars.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.local_millis().cmp(&other.local_millis())
    }

    #[must_use]
    pub fn to_iso_string(&self) -> String {
        format!("{}T{}", self.date.to_iso_string(), self.time.to_iso_string())
    }
}

impl PartialOrd for CalendarDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.date.calendar == other.date.calendar).then(|| self.compare(other))
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

// ============================================================================
// ZonedDateTime
// ============================================================================

/// A date-time anchored to an IANA time zone.
///
/// The offset always matches the zone's rules for the stored wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedDateTime {
    date_time: CalendarDateTime,
    time_zone: Tz,
    offset_seconds: i32,
}

impl ZonedDateTime {
    /// Resolve a wall time in `time_zone` using `disambiguation` for DST
    /// gaps and overlaps.
    ///
    /// # Errors
    ///
    /// Only under [`Disambiguation::Reject`].
    pub fn from_local(
        date_time: CalendarDateTime,
        time_zone: Tz,
        disambiguation: Disambiguation,
    ) -> Result<Self, DateError> {
        let epoch = zone::local_to_epoch(time_zone, date_time.local_millis(), disambiguation)?;
        Ok(Self::from_epoch_millis(epoch, time_zone, date_time.date.calendar))
    }

    /// Build from an explicit offset, which must be valid for the zone.
    ///
    /// # Errors
    ///
    /// `InvalidOffset` if the zone never uses `offset_seconds` at that wall time.
    pub fn with_offset(date_time: CalendarDateTime, time_zone: Tz, offset_seconds: i32) -> Result<Self, DateError> {
        let offsets = zone::possible_offsets(time_zone, date_time.local_millis());
        if offsets.contains(&offset_seconds) {
            Ok(Self {
                date_time,
                time_zone,
                offset_seconds,
            })
        } else {
            Err(DateError::InvalidOffset {
                offset: zone::format_offset(offset_seconds),
                zone: time_zone.name().to_string(),
            })
        }
    }

    /// The wall time in `time_zone` at an absolute instant.
    #[must_use]
    pub fn from_epoch_millis(epoch_millis: i64, time_zone: Tz, calendar: CalendarSystem) -> Self {
        let offset_seconds = zone::offset_at(time_zone, epoch_millis);
        let local = epoch_millis + i64::from(offset_seconds) * MILLIS_PER_SECOND;
        Self {
            date_time: CalendarDateTime::from_local_millis(calendar, local),
            time_zone,
            offset_seconds,
        }
    }

    #[must_use]
    pub const fn date_time(&self) -> CalendarDateTime {
        self.date_time
    }

    #[must_use]
    pub const fn date(&self) -> CalendarDate {
        self.date_time.date
    }

    #[must_use]
    pub const fn time(&self) -> Time {
        self.date_time.time
    }

    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.time_zone
    }

    #[must_use]
    pub const fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        self.date_time.local_millis() - i64::from(self.offset_seconds) * MILLIS_PER_SECOND
    }

    /// The same instant seen from another zone.
    #[must_use]
    pub fn to_time_zone(&self, time_zone: Tz) -> Self {
        if time_zone == self.time_zone {
            return *self;
        }
        Self::from_epoch_millis(self.epoch_millis(), time_zone, self.date_time.date.calendar)
    }

    #[must_use]
    pub fn to_calendar(&self, calendar: CalendarSystem) -> Self {
        Self {
            date_time: self.date_time.to_calendar(calendar),
            ..*self
        }
    }

    /// Compare instants.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.epoch_millis().cmp(&other.epoch_millis())
    }

    /// `YYYY-MM-DDTHH:mm:ss±HH:MM[Zone]`.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        format!(
            "{}{}[{}]",
            self.date_time.to_iso_string(),
            zone::format_offset(self.offset_seconds),
            self.time_zone.name()
        )
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

// ============================================================================
// DateValue
// ============================================================================

/// Exactly one of the four value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    Date(CalendarDate),
    DateTime(CalendarDateTime),
    Zoned(ZonedDateTime),
    Time(Time),
}

impl DateValue {
    /// The calendar date, if this value has one (wall date for zoned values).
    #[must_use]
    pub const fn date(&self) -> Option<CalendarDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::DateTime(dt) => Some(dt.date),
            Self::Zoned(zdt) => Some(zdt.date_time.date),
            Self::Time(_) => None,
        }
    }

    /// The time of day, if this value has one.
    #[must_use]
    pub const fn time(&self) -> Option<Time> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(dt) => Some(dt.time),
            Self::Zoned(zdt) => Some(zdt.date_time.time),
            Self::Time(time) => Some(*time),
        }
    }

    /// The wall date-time; dates are promoted to midnight.
    #[must_use]
    pub const fn date_time(&self) -> Option<CalendarDateTime> {
        match self {
            Self::Date(date) => Some(CalendarDateTime::new(*date, Time::MIDNIGHT)),
            Self::DateTime(dt) => Some(*dt),
            Self::Zoned(zdt) => Some(zdt.date_time),
            Self::Time(_) => None,
        }
    }

    #[must_use]
    pub const fn calendar(&self) -> Option<CalendarSystem> {
        match self.date() {
            Some(date) => Some(date.calendar),
            None => None,
        }
    }

    #[must_use]
    pub const fn has_date(&self) -> bool {
        !matches!(self, Self::Time(_))
    }

    #[must_use]
    pub const fn has_time(&self) -> bool {
        !matches!(self, Self::Date(_))
    }

    /// Convert the date portion to another calendar; time and zone untouched.
    #[must_use]
    pub fn to_calendar(&self, calendar: CalendarSystem) -> Self {
        match self {
            Self::Date(date) => Self::Date(date.to_calendar(calendar)),
            Self::DateTime(dt) => Self::DateTime(dt.to_calendar(calendar)),
            Self::Zoned(zdt) => Self::Zoned(zdt.to_calendar(calendar)),
            Self::Time(time) => Self::Time(*time),
        }
    }

    /// Canonical machine-readable string.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        match self {
            Self::Date(date) => date.to_iso_string(),
            Self::DateTime(dt) => dt.to_iso_string(),
            Self::Zoned(zdt) => zdt.to_iso_string(),
            Self::Time(time) => time.to_iso_string(),
        }
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl From<CalendarDate> for DateValue {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

impl From<CalendarDateTime> for DateValue {
    fn from(dt: CalendarDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<ZonedDateTime> for DateValue {
    fn from(zdt: ZonedDateTime) -> Self {
        Self::Zoned(zdt)
    }
}

impl From<Time> for DateValue {
    fn from(time: Time) -> Self {
        Self::Time(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gregorian_leap_day_validation() {
        assert!(CalendarDate::gregorian(2024, 2, 29).is_ok());
        assert_eq!(
            CalendarDate::gregorian(2023, 2, 29),
            Err(DateError::range(DateField::Day, 29, 1, 28))
        );
        assert_eq!(
            CalendarDate::gregorian(2023, 13, 1),
            Err(DateError::range(DateField::Month, 13, 1, 12))
        );
    }

    #[test]
    fn test_new_with_era() {
        let date = CalendarDate::new(CalendarSystem::Gregorian, "bc", 44, 3, 15).unwrap();
        assert_eq!(date.extended_year(), -43);
        assert_eq!(date.to_string(), "-000043-03-15");
        assert!(matches!(
            CalendarDate::new(CalendarSystem::Gregorian, "xx", 1, 1, 1),
            Err(DateError::InvalidEra { .. })
        ));
    }

    #[test]
    fn test_japanese_era_must_contain_date() {
        assert!(CalendarDate::new(CalendarSystem::Japanese, "heisei", 31, 4, 30).is_ok());
        assert!(matches!(
            CalendarDate::new(CalendarSystem::Japanese, "heisei", 31, 5, 1),
            Err(DateError::InvalidEra { .. })
        ));
    }

    #[test]
    fn test_calendar_conversion_round_trip() {
        let date = CalendarDate::gregorian(2024, 3, 20).unwrap();
        for calendar in CalendarSystem::ALL {
            let converted = date.to_calendar(calendar);
            assert_eq!(converted.day_number(), date.day_number());
            assert_eq!(converted.to_calendar(CalendarSystem::Gregorian), date);
        }
        let persian = date.to_calendar(CalendarSystem::Persian);
        assert_eq!((persian.year(), persian.month(), persian.day()), (1403, 1, 1));
    }

    #[test]
    fn test_partial_ord_only_within_calendar() {
        let a = CalendarDate::gregorian(2024, 1, 1).unwrap();
        let b = CalendarDate::gregorian(2024, 1, 2).unwrap();
        assert!(a < b);
        let hebrew = b.to_calendar(CalendarSystem::Hebrew);
        assert_eq!(a.partial_cmp(&hebrew), None);
        assert_eq!(a.compare(&hebrew), Ordering::Less);
    }

    #[test]
    fn test_time_validation_and_iso() {
        assert!(Time::new(24, 0, 0, 0).is_err());
        assert!(Time::new(23, 60, 0, 0).is_err());
        assert_eq!(Time::hms(9, 5, 3).unwrap().to_string(), "09:05:03");
        assert_eq!(Time::new(9, 5, 3, 40).unwrap().to_string(), "09:05:03.040");
    }

    #[test]
    fn test_time_from_millis_carries_days() {
        let (days, time) = Time::from_millis(-1);
        assert_eq!(days, -1);
        assert_eq!(time, Time::new(23, 59, 59, 999).unwrap());
    }

    #[test]
    fn test_weekday() {
        let date = CalendarDate::gregorian(2024, 3, 20).unwrap();
        assert_eq!(date.weekday(), Weekday::Wednesday);
        assert_eq!(Weekday::Sunday.days_since(Weekday::Monday), 6);
        assert_eq!(Weekday::Monday.days_since(Weekday::Sunday), 1);
        assert_eq!(Weekday::from_number(7), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_number(0), None);
    }

    #[test]
    fn test_balanced_carries_months_and_days() {
        let date = CalendarDate::balanced(CalendarSystem::Gregorian, 2024, 14, 0);
        assert_eq!(date.to_string(), "2025-01-31");
        let date = CalendarDate::balanced(CalendarSystem::Hebrew, 5784, 14, 1);
        assert_eq!((date.year(), date.month(), date.day()), (5785, 1, 1));
    }

    #[test]
    fn test_value_kind_names() {
        assert_eq!(ValueKind::from_name("datetime-local"), Some(ValueKind::DateTime));
        assert_eq!(ValueKind::from_name("WEEK"), Some(ValueKind::Week));
        assert_eq!(ValueKind::from_name("color"), None);
    }
}
