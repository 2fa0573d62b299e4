//! Calendar systems supported by the value engine.
//!
//! Every calendar converts to and from a shared proleptic day count (the
//! Julian Day Number), which is what makes cross-calendar comparison and
//! conversion lossless. Internally each calendar works on *extended years*:
//! a single signed year axis per calendar, with eras only applied at the
//! edges.
//!
//! # Examples
//!
//! ```
//! use picker_values::calendar::CalendarSystem;
//!
//! let hebrew = CalendarSystem::resolve("hebrew").unwrap();
//! assert_eq!(hebrew.months_in_year(5784), 13);
//!
//! // Unsupported identifiers fall back to Gregorian.
//! assert_eq!(CalendarSystem::resolve_or_default("klingon"), CalendarSystem::Gregorian);
//! ```

mod ethiopic;
mod gregorian;
mod hebrew;
mod indian;
mod islamic;
mod japanese;
mod persian;

use std::fmt;
use std::str::FromStr;

use crate::error::DateError;
use crate::locale::Locale;

pub use gregorian::is_leap_year as is_gregorian_leap_year;

/// Julian Day Number of 1970-01-01.
pub const UNIX_EPOCH_DAY: i64 = 2_440_588;

const BUDDHIST_OFFSET: i32 = 543;
const ROC_OFFSET: i32 = 1911;

/// A calendrical system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalendarSystem {
    /// Proleptic Gregorian (`gregory`).
    #[default]
    Gregorian,
    /// Thai Buddhist (`buddhist`).
    Buddhist,
    /// Japanese imperial (`japanese`).
    Japanese,
    /// Republic of China / Minguo (`roc`).
    Roc,
    /// Solar Hijri (`persian`).
    Persian,
    /// Indian national / Saka (`indian`).
    Indian,
    /// Tabular Islamic, civil epoch (`islamic-civil`).
    IslamicCivil,
    /// Tabular Islamic, astronomical epoch (`islamic-tbla`).
    IslamicTabular,
    /// Hebrew (`hebrew`).
    Hebrew,
    /// Coptic (`coptic`).
    Coptic,
    /// Ethiopic, Amete Mihret (`ethiopic`).
    Ethiopic,
    /// Ethiopic, Amete Alem (`ethioaa`).
    EthiopicAmeteAlem,
}

impl CalendarSystem {
    /// Every supported calendar.
    pub const ALL: [Self; 12] = [
        Self::Gregorian,
        Self::Buddhist,
        Self::Japanese,
        Self::Roc,
        Self::Persian,
        Self::Indian,
        Self::IslamicCivil,
        Self::IslamicTabular,
        Self::Hebrew,
        Self::Coptic,
        Self::Ethiopic,
        Self::EthiopicAmeteAlem,
    ];

    /// The BCP-47 (`-u-ca-`) identifier of this calendar.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Gregorian => "gregory",
            Self::Buddhist => "buddhist",
            Self::Japanese => "japanese",
            Self::Roc => "roc",
            Self::Persian => "persian",
            Self::Indian => "indian",
            Self::IslamicCivil => "islamic-civil",
            Self::IslamicTabular => "islamic-tbla",
            Self::Hebrew => "hebrew",
            Self::Coptic => "coptic",
            Self::Ethiopic => "ethiopic",
            Self::EthiopicAmeteAlem => "ethioaa",
        }
    }

    /// Look up a calendar by identifier (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DateError::UnknownCalendar` for identifiers outside the
    /// supported set.
    pub fn resolve(identifier: &str) -> Result<Self, DateError> {
        let normalized = identifier.trim().to_ascii_lowercase();
        let calendar = match normalized.as_str() {
            "gregory" | "gregorian" | "iso8601" => Self::Gregorian,
            "buddhist" => Self::Buddhist,
            "japanese" => Self::Japanese,
            "roc" => Self::Roc,
            "persian" => Self::Persian,
            "indian" => Self::Indian,
            "islamic-civil" | "islamicc" => Self::IslamicCivil,
            "islamic-tbla" => Self::IslamicTabular,
            "hebrew" => Self::Hebrew,
            "coptic" => Self::Coptic,
            "ethiopic" => Self::Ethiopic,
            "ethioaa" | "ethiopic-amete-alem" => Self::EthiopicAmeteAlem,
            _ => return Err(DateError::UnknownCalendar(identifier.to_string())),
        };
        Ok(calendar)
    }

    /// Look up a calendar, falling back to Gregorian for unknown identifiers.
    #[must_use]
    pub fn resolve_or_default(identifier: &str) -> Self {
        Self::resolve(identifier).unwrap_or_else(|err| {
            log::warn!("{err}; falling back to gregory");
            Self::Gregorian
        })
    }

    /// The calendar a locale asks for through `-u-ca-`, else Gregorian.
    #[must_use]
    pub fn from_locale(locale: &Locale) -> Self {
        locale.calendar().unwrap_or(Self::Gregorian)
    }

    /// Era identifiers, oldest first.
    #[must_use]
    pub const fn eras(self) -> &'static [&'static str] {
        match self {
            Self::Gregorian => &["bc", "ad"],
            Self::Buddhist => &["be"],
            Self::Japanese => japanese::ERAS,
            Self::Roc => &["before_minguo", "minguo"],
            Self::Persian => &["ap"],
            Self::Indian => &["saka"],
            Self::IslamicCivil | Self::IslamicTabular => &["ah"],
            Self::Hebrew => &["am"],
            Self::Coptic => &["bce", "ce"],
            Self::Ethiopic => &["aa", "am"],
            Self::EthiopicAmeteAlem => &["aa"],
        }
    }

    /// The era used when a caller supplies a bare year.
    #[must_use]
    pub const fn default_era(self) -> &'static str {
        match self {
            Self::Japanese => "reiwa",
            _ => {
                let eras = self.eras();
                eras[eras.len() - 1]
            }
        }
    }

    /// Resolve an era name to its static identifier.
    #[must_use]
    pub fn era(self, name: &str) -> Option<&'static str> {
        let name = name.trim().to_ascii_lowercase();
        self.eras().iter().copied().find(|era| *era == name)
    }

    /// Whether years in `era` count backwards in time (BC, BCE, before Minguo).
    #[must_use]
    pub fn is_inverse_era(self, era: &str) -> bool {
        matches!(
            (self, era),
            (Self::Gregorian | Self::Japanese, "bc") | (Self::Roc, "before_minguo") | (Self::Coptic, "bce")
        )
    }

    /// Number of years in an era; used to bound year navigation.
    #[must_use]
    pub fn years_in_era(self, era: &str) -> i32 {
        match self {
            Self::Japanese => japanese::years_in_era(era),
            Self::Roc if era == "minguo" => 9999 - ROC_OFFSET,
            Self::Persian => 9377,
            Self::Indian => 9919,
            Self::IslamicCivil | Self::IslamicTabular => 9665,
            Self::Coptic if era == "ce" => 9715,
            Self::Ethiopic if era == "am" => 9991,
            _ => 9999,
        }
    }

    /// Map an (era, year) pair to this calendar's extended year.
    #[must_use]
    pub fn extended_year(self, era: &str, year: i32) -> i32 {
        match self {
            Self::Japanese => japanese::extended_year(era, year),
            Self::Buddhist => year - BUDDHIST_OFFSET,
            Self::Roc if era == "before_minguo" => 1 - year + ROC_OFFSET,
            Self::Roc => year + ROC_OFFSET,
            Self::Ethiopic | Self::EthiopicAmeteAlem if era == "aa" => year - ethiopic::AMETE_MIHRET_DELTA,
            _ if self.is_inverse_era(era) => 1 - year,
            _ => year,
        }
    }

    /// Months in the given extended year (13 in Hebrew leap years and in the
    /// Coptic/Ethiopic calendars).
    #[must_use]
    pub fn months_in_year(self, extended_year: i32) -> u8 {
        match self {
            Self::Hebrew => hebrew::months_in_year(extended_year),
            Self::Coptic | Self::Ethiopic | Self::EthiopicAmeteAlem => 13,
            _ => 12,
        }
    }

    /// Days in a month of the given extended year.
    #[must_use]
    pub fn days_in_month(self, extended_year: i32, month: u8) -> u8 {
        match self {
            Self::Gregorian | Self::Buddhist | Self::Japanese | Self::Roc => {
                gregorian::days_in_month(extended_year, month)
            }
            Self::Persian => persian::days_in_month(extended_year, month),
            Self::Indian => indian::days_in_month(extended_year, month),
            Self::IslamicCivil | Self::IslamicTabular => islamic::days_in_month(extended_year, month),
            Self::Hebrew => hebrew::days_in_month(extended_year, month),
            Self::Coptic | Self::Ethiopic | Self::EthiopicAmeteAlem => ethiopic::days_in_month(extended_year, month),
        }
    }

    /// Days in the given extended year.
    #[must_use]
    pub fn days_in_year(self, extended_year: i32) -> u16 {
        (1..=self.months_in_year(extended_year))
            .map(|month| u16::from(self.days_in_month(extended_year, month)))
            .sum()
    }

    /// Whether the extended year contains a leap day or leap month.
    #[must_use]
    pub fn is_leap_year(self, extended_year: i32) -> bool {
        match self {
            Self::Hebrew => hebrew::is_leap_year(extended_year),
            Self::Persian => persian::is_leap_year(extended_year),
            Self::IslamicCivil | Self::IslamicTabular => islamic::is_leap_year(extended_year),
            Self::Indian => gregorian::is_leap_year(extended_year + 78),
            Self::Coptic | Self::Ethiopic | Self::EthiopicAmeteAlem => extended_year.rem_euclid(4) == 3,
            _ => gregorian::is_leap_year(extended_year),
        }
    }

    /// Proleptic day count of an (extended year, month, day) triple.
    #[must_use]
    pub fn to_day_number(self, extended_year: i32, month: u8, day: u8) -> i64 {
        match self {
            Self::Gregorian | Self::Buddhist | Self::Japanese | Self::Roc => {
                gregorian::to_day_number(extended_year, month, day)
            }
            Self::Persian => persian::to_day_number(extended_year, month, day),
            Self::Indian => indian::to_day_number(extended_year, month, day),
            Self::IslamicCivil => islamic::to_day_number(islamic::CIVIL_EPOCH, extended_year, month, day),
            Self::IslamicTabular => islamic::to_day_number(islamic::ASTRONOMICAL_EPOCH, extended_year, month, day),
            Self::Hebrew => hebrew::to_day_number(extended_year, month, day),
            Self::Coptic => ethiopic::to_day_number(ethiopic::COPTIC_EPOCH, extended_year, month, day),
            Self::Ethiopic | Self::EthiopicAmeteAlem => {
                ethiopic::to_day_number(ethiopic::ETHIOPIC_EPOCH, extended_year, month, day)
            }
        }
    }

    /// Break a day count into (era, year-of-era, month, day).
    #[must_use]
    pub fn from_day_number(self, jdn: i64) -> (&'static str, i32, u8, u8) {
        match self {
            Self::Gregorian => {
                let (year, month, day) = gregorian::from_day_number(jdn);
                if year < 1 {
                    ("bc", 1 - year, month, day)
                } else {
                    ("ad", year, month, day)
                }
            }
            Self::Buddhist => {
                let (year, month, day) = gregorian::from_day_number(jdn);
                ("be", year + BUDDHIST_OFFSET, month, day)
            }
            Self::Japanese => japanese::from_day_number(jdn),
            Self::Roc => {
                let (year, month, day) = gregorian::from_day_number(jdn);
                if year > ROC_OFFSET {
                    ("minguo", year - ROC_OFFSET, month, day)
                } else {
                    ("before_minguo", 1 - year + ROC_OFFSET, month, day)
                }
            }
            Self::Persian => {
                let (year, month, day) = persian::from_day_number(jdn);
                ("ap", year, month, day)
            }
            Self::Indian => {
                let (year, month, day) = indian::from_day_number(jdn);
                ("saka", year, month, day)
            }
            Self::IslamicCivil | Self::IslamicTabular => {
                let epoch = if self == Self::IslamicCivil {
                    islamic::CIVIL_EPOCH
                } else {
                    islamic::ASTRONOMICAL_EPOCH
                };
                let (year, month, day) = islamic::from_day_number(epoch, jdn);
                ("ah", year, month, day)
            }
            Self::Hebrew => {
                let (year, month, day) = hebrew::from_day_number(jdn);
                ("am", year, month, day)
            }
            Self::Coptic => {
                let (year, month, day) = ethiopic::from_day_number(ethiopic::COPTIC_EPOCH, jdn);
                if year <= 0 {
                    ("bce", 1 - year, month, day)
                } else {
                    ("ce", year, month, day)
                }
            }
            Self::Ethiopic => {
                let (year, month, day) = ethiopic::from_day_number(ethiopic::ETHIOPIC_EPOCH, jdn);
                if year <= 0 {
                    ("aa", year + ethiopic::AMETE_MIHRET_DELTA, month, day)
                } else {
                    ("am", year, month, day)
                }
            }
            Self::EthiopicAmeteAlem => {
                let (year, month, day) = ethiopic::from_day_number(ethiopic::ETHIOPIC_EPOCH, jdn);
                ("aa", year + ethiopic::AMETE_MIHRET_DELTA, month, day)
            }
        }
    }

    /// Whether months line up with Gregorian months (only years differ).
    #[must_use]
    pub const fn has_gregorian_months(self) -> bool {
        matches!(self, Self::Gregorian | Self::Buddhist | Self::Japanese | Self::Roc)
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for CalendarSystem {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl TryFrom<&str> for CalendarSystem {
    type Error = DateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::resolve(value)
    }
}
