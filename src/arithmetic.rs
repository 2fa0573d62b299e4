//! Calendar-aware arithmetic and navigation.
//!
//! `add`/`subtract` carry overflow into coarser fields, `set` replaces
//! fields with validation, and `cycle` wraps a single field without
//! carrying. The boundary helpers (`start_of_month`, `start_of_week`, ...)
//! drive a navigable calendar grid.
//!
//! # Examples
//!
//! ```
//! use picker_values::arithmetic::IsoWeek;
//! use picker_values::date::{CalendarDate, DateDuration};
//!
//! let jan31 = CalendarDate::gregorian(2024, 1, 31).unwrap();
//! assert_eq!(jan31.add(&DateDuration::months(1)).to_string(), "2024-02-29");
//!
//! let week = CalendarDate::gregorian(2021, 1, 1).unwrap().week();
//! assert_eq!(week.to_string(), "2020-W53");
//! ```

use std::fmt;

use crate::calendar::{CalendarSystem, UNIX_EPOCH_DAY};
use crate::date::{
    CalendarDate, CalendarDateTime, DateDuration, DateField, DateValue, MAX_DAY_NUMBER, MILLIS_PER_DAY,
    MILLIS_PER_SECOND, MIN_DAY_NUMBER, Time, Weekday, ZonedDateTime, clamp_day_number, clamp_year,
};
use crate::error::DateError;
use crate::locale::Locale;
use crate::zone::{self, Disambiguation};

/// Replacement values for `set`. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFields {
    pub era: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
    pub millisecond: Option<u16>,
}

impl DateFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn era(mut self, era: impl Into<String>) -> Self {
        self.era = Some(era.into());
        self
    }

    #[must_use]
    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub const fn month(mut self, month: u8) -> Self {
        self.month = Some(month);
        self
    }

    #[must_use]
    pub const fn day(mut self, day: u8) -> Self {
        self.day = Some(day);
        self
    }

    #[must_use]
    pub const fn hour(mut self, hour: u8) -> Self {
        self.hour = Some(hour);
        self
    }

    #[must_use]
    pub const fn minute(mut self, minute: u8) -> Self {
        self.minute = Some(minute);
        self
    }

    #[must_use]
    pub const fn second(mut self, second: u8) -> Self {
        self.second = Some(second);
        self
    }

    #[must_use]
    pub const fn millisecond(mut self, millisecond: u16) -> Self {
        self.millisecond = Some(millisecond);
        self
    }

    const fn has_time_fields(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some() || self.millisecond.is_some()
    }
}

/// Options for `cycle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOptions {
    /// Snap to the next multiple of the step instead of adding it.
    pub round: bool,
    /// Cycle hours within the current AM/PM half of the day.
    pub hour12: bool,
}

/// Wrap `value + amount` into `min..=max`.
pub(crate) fn cycle_value(value: i64, amount: i64, min: i64, max: i64, round: bool) -> i64 {
    let span = max - min + 1;
    if !round || amount == 0 {
        return min + (value - min + amount.rem_euclid(span)).rem_euclid(span);
    }
    let mut value = value + amount.signum();
    if value < min {
        value = max;
    }
    // Any step past `max` rounds the same way as `max + 1`.
    let step = i64::try_from(amount.unsigned_abs()).unwrap_or(i64::MAX).min(max + 1);
    value = if amount > 0 {
        (value + step - 1).div_euclid(step) * step
    } else {
        value.div_euclid(step) * step
    };
    if value > max {
        value = min;
    }
    value.clamp(min, max)
}

fn check(field: DateField, value: impl Into<i64> + Copy, min: impl Into<i64>, max: impl Into<i64>) -> Result<(), DateError> {
    let (v, lo, hi) = (value.into(), min.into(), max.into());
    if (lo..=hi).contains(&v) {
        Ok(())
    } else {
        Err(DateError::range(field, v, lo, hi))
    }
}

// ============================================================================
// CalendarDate
// ============================================================================

impl CalendarDate {
    /// Add a duration; clock fields are ignored.
    #[must_use]
    pub fn add(&self, duration: &DateDuration) -> Self {
        self.add_parts(duration.years, duration.months, duration.day_count())
    }

    #[must_use]
    pub fn subtract(&self, duration: &DateDuration) -> Self {
        self.add(&duration.negate())
    }

    pub(crate) fn add_parts(&self, years: i64, months: i64, days: i64) -> Self {
        let calendar = self.calendar();
        let original_year = self.extended_year();
        let year = i64::from(original_year).saturating_add(years);
        let mut month = i64::from(self.month());
        if calendar == CalendarSystem::Hebrew && years != 0 && month > 6 {
            let target_leap = calendar.is_leap_year(clamp_year(year));
            match (calendar.is_leap_year(original_year), target_leap) {
                (true, false) => month -= 1,
                (false, true) => month += 1,
                _ => {}
            }
        }
        let first = Self::balanced(calendar, year, month.saturating_add(months), 1);
        let day = i64::from(self.day().min(first.days_in_month()));
        let jdn = clamp_day_number((first.day_number() + day - 1).saturating_add(days));
        Self::from_day_number(calendar, jdn).clamp_to_era()
    }

    /// Replace fields, validating each against the resulting year and month.
    ///
    /// An unset day that no longer fits the month is clamped to its last day.
    ///
    /// # Errors
    ///
    /// `InvalidEra` or `Range` for provided fields outside their ranges.
    pub fn set(&self, fields: &DateFields) -> Result<Self, DateError> {
        let calendar = self.calendar();
        let era = match &fields.era {
            Some(name) => calendar.era(name).ok_or_else(|| DateError::InvalidEra {
                calendar: calendar.identifier(),
                era: name.clone(),
            })?,
            None => self.era(),
        };
        let max_year = calendar.years_in_era(era);
        let year = match fields.year {
            Some(year) => {
                check(DateField::Year, year, 1, max_year)?;
                year
            }
            None => self.year().min(max_year),
        };
        let extended = calendar.extended_year(era, year);
        let months = calendar.months_in_year(extended);
        let month = match fields.month {
            Some(month) => {
                check(DateField::Month, month, 1, months)?;
                month
            }
            None => self.month().min(months),
        };
        let days = calendar.days_in_month(extended, month);
        let day = match fields.day {
            Some(day) => {
                check(DateField::Day, day, 1, days)?;
                day
            }
            None => self.day().min(days),
        };
        Ok(Self::constrained(
            calendar,
            era,
            i64::from(year),
            i64::from(month),
            i64::from(day),
        ))
    }

    /// Wrap one date field; clock fields leave the date unchanged.
    #[must_use]
    pub fn cycle(&self, field: DateField, amount: i64, options: CycleOptions) -> Self {
        let calendar = self.calendar();
        let (year, month, day) = (i64::from(self.year()), i64::from(self.month()), i64::from(self.day()));
        match field {
            DateField::Era => {
                let eras = calendar.eras();
                let index = eras.iter().position(|era| *era == self.era()).unwrap_or(0);
                #[expect(clippy::cast_possible_wrap, reason = "era tables are tiny")]
                let len = eras.len() as i64;
                #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "era tables are tiny")]
                let next = (index as i64 + amount.rem_euclid(len)).rem_euclid(len) as usize;
                Self::constrained(calendar, eras[next], year, month, day)
            }
            DateField::Year => {
                let amount = if calendar.is_inverse_era(self.era()) { -amount } else { amount };
                let max = i64::from(self.years_in_era());
                let year = cycle_value(year, amount, 1, max, options.round);
                Self::constrained(calendar, self.era(), year, month, day)
            }
            DateField::Month => {
                let max = i64::from(self.months_in_year());
                let month = cycle_value(month, amount, 1, max, options.round);
                Self::constrained(calendar, self.era(), year, month, day)
            }
            DateField::Day => {
                let max = i64::from(self.days_in_month());
                let day = cycle_value(day, amount, 1, max, options.round);
                Self::constrained(calendar, self.era(), year, month, day)
            }
            DateField::Hour | DateField::Minute | DateField::Second | DateField::Millisecond => *self,
        }
    }

    #[must_use]
    pub fn start_of_month(&self) -> Self {
        Self::from_day_number(self.calendar(), self.day_number() - i64::from(self.day()) + 1)
    }

    #[must_use]
    pub fn end_of_month(&self) -> Self {
        Self::from_day_number(
            self.calendar(),
            self.day_number() + i64::from(self.days_in_month() - self.day()),
        )
    }

    #[must_use]
    pub fn start_of_year(&self) -> Self {
        let calendar = self.calendar();
        Self::from_day_number(calendar, calendar.to_day_number(self.extended_year(), 1, 1))
    }

    #[must_use]
    pub fn end_of_year(&self) -> Self {
        let calendar = self.calendar();
        let extended = self.extended_year();
        let last_month = calendar.months_in_year(extended);
        let last_day = calendar.days_in_month(extended, last_month);
        Self::from_day_number(calendar, calendar.to_day_number(extended, last_month, last_day))
    }

    /// Position in the locale's week, 0 for its first day.
    #[must_use]
    pub fn day_of_week(&self, locale: &Locale) -> u8 {
        self.weekday().days_since(locale.first_day_of_week())
    }

    #[must_use]
    pub fn start_of_week(&self, locale: &Locale) -> Self {
        Self::from_day_number(
            self.calendar(),
            self.day_number() - i64::from(self.day_of_week(locale)),
        )
    }

    #[must_use]
    pub fn end_of_week(&self, locale: &Locale) -> Self {
        Self::from_day_number(self.calendar(), self.start_of_week(locale).day_number() + 6)
    }

    /// Rows a month grid needs under the locale's week start.
    #[must_use]
    pub fn weeks_in_month(&self, locale: &Locale) -> u8 {
        let leading = self.start_of_month().day_of_week(locale);
        (leading + self.days_in_month()).div_ceil(7)
    }

    /// ISO 8601 week of the Gregorian equivalent.
    #[must_use]
    pub fn week(&self) -> IsoWeek {
        IsoWeek::from_day_number(self.day_number())
    }

    /// Step the year to the next (or previous) multiple of `step`, staying
    /// inside the era.
    #[must_use]
    pub fn jump_years(&self, step: u32, forward: bool) -> Self {
        let step = i64::from(step.max(1));
        let year = i64::from(self.year());
        let forward = forward != self.calendar().is_inverse_era(self.era());
        let target = if forward {
            (year.div_euclid(step) + 1) * step
        } else {
            (year - 1).div_euclid(step) * step
        };
        Self::constrained(
            self.calendar(),
            self.era(),
            target,
            i64::from(self.month()),
            i64::from(self.day()),
        )
    }

    /// First and last year of the `step`-sized page containing this year,
    /// clamped to the era.
    #[must_use]
    pub fn year_range(&self, step: u32) -> (i32, i32) {
        let step = i64::from(step.max(1));
        let start = i64::from(self.year()).div_euclid(step) * step;
        let max = i64::from(self.years_in_era());
        #[expect(clippy::cast_possible_truncation, reason = "clamped to the era's year range")]
        let range = (start.clamp(1, max) as i32, (start + step - 1).clamp(1, max) as i32);
        range
    }
}

/// Same proleptic day, regardless of calendar.
#[must_use]
pub fn is_equal_day(a: &CalendarDate, b: &CalendarDate) -> bool {
    a.day_number() == b.day_number()
}

/// Same era, year and month, viewed in `a`'s calendar.
#[must_use]
pub fn is_same_month(a: &CalendarDate, b: &CalendarDate) -> bool {
    let b = b.to_calendar(a.calendar());
    a.era() == b.era() && a.year() == b.year() && a.month() == b.month()
}

/// Same era and year, viewed in `a`'s calendar.
#[must_use]
pub fn is_same_year(a: &CalendarDate, b: &CalendarDate) -> bool {
    let b = b.to_calendar(a.calendar());
    a.era() == b.era() && a.year() == b.year()
}

// ============================================================================
// ISO weeks
// ============================================================================

/// An ISO 8601 week date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsoWeek {
    pub week_year: i32,
    pub week: u8,
    pub weekday: Weekday,
}

impl IsoWeek {
    fn from_day_number(jdn: i64) -> Self {
        let weekday = Weekday::from_day_number(jdn);
        let thursday = jdn + 4 - i64::from(weekday.number());
        let week_year = CalendarDate::from_day_number(CalendarSystem::Gregorian, thursday).extended_year();
        let jan1 = CalendarSystem::Gregorian.to_day_number(week_year, 1, 1);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "week index is 0..53")]
        let week = ((thursday - jan1) / 7 + 1) as u8;
        Self {
            week_year,
            week,
            weekday,
        }
    }

    /// 52 or 53.
    #[must_use]
    pub fn weeks_in_year(week_year: i32) -> u8 {
        let jan1 = Weekday::from_day_number(CalendarSystem::Gregorian.to_day_number(week_year, 1, 1));
        let long = jan1 == Weekday::Thursday
            || (jan1 == Weekday::Wednesday && CalendarSystem::Gregorian.is_leap_year(week_year));
        if long { 53 } else { 52 }
    }

    /// The Gregorian date of this week day.
    ///
    /// # Errors
    ///
    /// `Range` if the week does not exist in `week_year`.
    pub fn to_date(&self) -> Result<CalendarDate, DateError> {
        check(DateField::Day, self.week, 1, Self::weeks_in_year(self.week_year))?;
        let jan4 = CalendarSystem::Gregorian.to_day_number(self.week_year, 1, 4);
        let monday = jan4 - i64::from(Weekday::from_day_number(jan4).number()) + 1;
        let jdn = monday + (i64::from(self.week) - 1) * 7 + i64::from(self.weekday.number()) - 1;
        Ok(CalendarDate::from_day_number(CalendarSystem::Gregorian, jdn))
    }
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", crate::date::format_iso_year(self.week_year), self.week)
    }
}

// ============================================================================
// Time
// ============================================================================

impl Time {
    /// Add clock fields, wrapping around midnight; date fields are ignored.
    #[must_use]
    pub fn add(&self, duration: &DateDuration) -> Self {
        Self::from_millis(self.millis_of_day() + duration.time_millis_of_day()).1
    }

    #[must_use]
    pub fn subtract(&self, duration: &DateDuration) -> Self {
        self.add(&duration.negate())
    }

    /// # Errors
    ///
    /// `Range` for provided fields outside their ranges.
    pub fn set(&self, fields: &DateFields) -> Result<Self, DateError> {
        Self::new(
            fields.hour.unwrap_or(self.hour()),
            fields.minute.unwrap_or(self.minute()),
            fields.second.unwrap_or(self.second()),
            fields.millisecond.unwrap_or(self.millisecond()),
        )
    }

    /// Wrap one clock field; date fields leave the time unchanged.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "cycled values stay in field range")]
    pub fn cycle(&self, field: DateField, amount: i64, options: CycleOptions) -> Self {
        let mut next = *self;
        match field {
            DateField::Hour if options.hour12 => {
                let pm = self.hour() >= 12;
                let hour = cycle_value(i64::from(self.hour() % 12), amount, 0, 11, options.round);
                next.hour = hour as u8 + if pm { 12 } else { 0 };
            }
            DateField::Hour => {
                next.hour = cycle_value(i64::from(self.hour()), amount, 0, 23, options.round) as u8;
            }
            DateField::Minute => {
                next.minute = cycle_value(i64::from(self.minute()), amount, 0, 59, options.round) as u8;
            }
            DateField::Second => {
                next.second = cycle_value(i64::from(self.second()), amount, 0, 59, options.round) as u8;
            }
            DateField::Millisecond => {
                next.millisecond = cycle_value(i64::from(self.millisecond()), amount, 0, 999, options.round) as u16;
            }
            DateField::Era | DateField::Year | DateField::Month | DateField::Day => {}
        }
        next
    }
}

// ============================================================================
// CalendarDateTime
// ============================================================================

impl CalendarDateTime {
    /// Add a duration; clock overflow carries into days.
    #[must_use]
    pub fn add(&self, duration: &DateDuration) -> Self {
        let (carry, time) = Time::from_millis(self.time().millis_of_day().saturating_add(duration.time_millis()));
        let date = self
            .date()
            .add_parts(duration.years, duration.months, duration.day_count().saturating_add(carry));
        Self::new(date, time)
    }

    #[must_use]
    pub fn subtract(&self, duration: &DateDuration) -> Self {
        self.add(&duration.negate())
    }

    /// # Errors
    ///
    /// See [`CalendarDate::set`] and [`Time::set`].
    pub fn set(&self, fields: &DateFields) -> Result<Self, DateError> {
        Ok(Self::new(self.date().set(fields)?, self.time().set(fields)?))
    }

    #[must_use]
    pub fn cycle(&self, field: DateField, amount: i64, options: CycleOptions) -> Self {
        if field.is_time_field() {
            Self::new(self.date(), self.time().cycle(field, amount, options))
        } else {
            Self::new(self.date().cycle(field, amount, options), self.time())
        }
    }
}

// ============================================================================
// ZonedDateTime
// ============================================================================

impl ZonedDateTime {
    /// Add date fields in wall time, then clock fields in absolute time.
    #[must_use]
    pub fn add(&self, duration: &DateDuration) -> Self {
        let epoch = if duration.has_date_fields() {
            let wall = self.date_time().add(&DateDuration {
                years: duration.years,
                months: duration.months,
                weeks: duration.weeks,
                days: duration.days,
                ..DateDuration::zero()
            });
            zone::local_to_epoch(self.time_zone(), wall.local_millis(), Disambiguation::Compatible)
                .unwrap_or_else(|_| wall.local_millis() - i64::from(self.offset_seconds()) * MILLIS_PER_SECOND)
        } else {
            self.epoch_millis()
        };
        // A day inside the supported range, so any offset keeps the wall date in range.
        let epoch = epoch.saturating_add(duration.time_millis()).clamp(
            (MIN_DAY_NUMBER + 1 - UNIX_EPOCH_DAY) * MILLIS_PER_DAY,
            (MAX_DAY_NUMBER - UNIX_EPOCH_DAY) * MILLIS_PER_DAY - 1,
        );
        Self::from_epoch_millis(epoch, self.time_zone(), self.date().calendar())
    }

    #[must_use]
    pub fn subtract(&self, duration: &DateDuration) -> Self {
        self.add(&duration.negate())
    }

    /// Replace fields in wall time, keeping the current offset when the zone
    /// still allows it.
    ///
    /// # Errors
    ///
    /// See [`CalendarDate::set`]; also DST errors under `Reject`.
    pub fn set(&self, fields: &DateFields, disambiguation: Disambiguation) -> Result<Self, DateError> {
        let wall = self.date_time().set(fields)?;
        self.reanchor(wall, disambiguation, fields.has_time_fields())
    }

    #[must_use]
    pub fn cycle(&self, field: DateField, amount: i64, options: CycleOptions) -> Self {
        let wall = self.date_time().cycle(field, amount, options);
        self.reanchor(wall, Disambiguation::Compatible, field.is_time_field())
            .unwrap_or(*self)
    }

    fn reanchor(&self, wall: CalendarDateTime, disambiguation: Disambiguation, keep_offset: bool) -> Result<Self, DateError> {
        if keep_offset && let Ok(same) = Self::with_offset(wall, self.time_zone(), self.offset_seconds()) {
            return Ok(same);
        }
        Self::from_local(wall, self.time_zone(), disambiguation)
    }
}

// ============================================================================
// DateValue
// ============================================================================

impl DateValue {
    #[must_use]
    pub fn add(&self, duration: &DateDuration) -> Self {
        match self {
            Self::Date(date) => Self::Date(date.add(duration)),
            Self::DateTime(dt) => Self::DateTime(dt.add(duration)),
            Self::Zoned(zdt) => Self::Zoned(zdt.add(duration)),
            Self::Time(time) => Self::Time(time.add(duration)),
        }
    }

    #[must_use]
    pub fn subtract(&self, duration: &DateDuration) -> Self {
        self.add(&duration.negate())
    }

    /// # Errors
    ///
    /// `Range` or `InvalidEra` for out-of-range fields.
    pub fn set(&self, fields: &DateFields) -> Result<Self, DateError> {
        Ok(match self {
            Self::Date(date) => Self::Date(date.set(fields)?),
            Self::DateTime(dt) => Self::DateTime(dt.set(fields)?),
            Self::Zoned(zdt) => Self::Zoned(zdt.set(fields, Disambiguation::Compatible)?),
            Self::Time(time) => Self::Time(time.set(fields)?),
        })
    }

    #[must_use]
    pub fn cycle(&self, field: DateField, amount: i64, options: CycleOptions) -> Self {
        match self {
            Self::Date(date) => Self::Date(date.cycle(field, amount, options)),
            Self::DateTime(dt) => Self::DateTime(dt.cycle(field, amount, options)),
            Self::Zoned(zdt) => Self::Zoned(zdt.cycle(field, amount, options)),
            Self::Time(time) => Self::Time(time.cycle(field, amount, options)),
        }
    }
}
