//! Locale handling: BCP-47 tag parsing, week conventions, hour cycles and
//! the bundled name tables used for display strings.
//!
//! Name tables cover `en`, `de`, `fr`, `es` and `ja`; any other language
//! falls back to English. Month names of non-Gregorian calendars are only
//! bundled in English.

use std::fmt;
use std::str::FromStr;

use crate::calendar::CalendarSystem;
use crate::date::Weekday;

/// How hours are numbered on a clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourCycle {
    /// 0-11 with AM/PM.
    H11,
    /// 1-12 with AM/PM.
    H12,
    /// 0-23.
    H23,
    /// 1-24.
    H24,
}

impl HourCycle {
    #[must_use]
    pub const fn is_12_hour(self) -> bool {
        matches!(self, Self::H11 | Self::H12)
    }

    /// Parse a `-u-hc-` value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "h11" => Some(Self::H11),
            "h12" => Some(Self::H12),
            "h23" => Some(Self::H23),
            "h24" => Some(Self::H24),
            _ => None,
        }
    }

    /// Displayed hour number for a 0-23 hour.
    #[must_use]
    pub const fn display_hour(self, hour: u8) -> u8 {
        match self {
            Self::H11 => hour % 12,
            Self::H12 => {
                if hour % 12 == 0 {
                    12
                } else {
                    hour % 12
                }
            }
            Self::H23 => hour,
            Self::H24 => {
                if hour == 0 {
                    24
                } else {
                    hour
                }
            }
        }
    }
}

/// A parsed BCP-47 locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: String,
    language: String,
    region: Option<String>,
    calendar: Option<CalendarSystem>,
    hour_cycle: Option<HourCycle>,
    first_day: Option<Weekday>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::parse("en-US")
    }
}

impl Locale {
    /// Parse a BCP-47 tag; POSIX forms like `en_US.UTF-8` are accepted.
    ///
    /// Never fails: unusable input yields `en-US`.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let cleaned = tag
            .trim()
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('_', "-");
        let mut subtags = cleaned.split('-').filter(|s| !s.is_empty()).peekable();

        let language = match subtags.next() {
            Some(lang)
                if (2..=3).contains(&lang.len())
                    && lang.bytes().all(|b| b.is_ascii_alphabetic())
                    && !lang.eq_ignore_ascii_case("c") =>
            {
                lang.to_ascii_lowercase()
            }
            _ => return Self::english(),
        };

        let mut region = None;
        let mut calendar = None;
        let mut hour_cycle = None;
        let mut first_day = None;

        while let Some(subtag) = subtags.next() {
            if subtag.eq_ignore_ascii_case("u") {
                while let Some(key) = subtags.next() {
                    let mut values = Vec::new();
                    while let Some(value) = subtags.peek() {
                        if value.len() == 2 {
                            break;
                        }
                        values.push(value.to_ascii_lowercase());
                        subtags.next();
                    }
                    let value = values.join("-");
                    match key.to_ascii_lowercase().as_str() {
                        "ca" => calendar = Some(CalendarSystem::resolve_or_default(&value)),
                        "hc" => hour_cycle = HourCycle::from_name(&value),
                        "fw" => first_day = weekday_from_code(&value),
                        _ => {}
                    }
                }
                break;
            }
            let is_region = (subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic()))
                || (subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit()));
            if region.is_none() && is_region {
                region = Some(subtag.to_ascii_uppercase());
            }
        }

        let tag = match &region {
            Some(region) => format!("{language}-{region}"),
            None => language.clone(),
        };
        Self {
            tag,
            language,
            region,
            calendar,
            hour_cycle,
            first_day,
        }
    }

    fn english() -> Self {
        Self {
            tag: "en-US".to_string(),
            language: "en".to_string(),
            region: Some("US".to_string()),
            calendar: None,
            hour_cycle: None,
            first_day: None,
        }
    }

    /// Canonical `language[-REGION]` tag, without extensions.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Region, or the most likely region for the language.
    #[must_use]
    pub fn effective_region(&self) -> &str {
        self.region.as_deref().unwrap_or_else(|| likely_region(&self.language))
    }

    /// Calendar requested through `-u-ca-`.
    #[must_use]
    pub const fn calendar(&self) -> Option<CalendarSystem> {
        self.calendar
    }

    #[must_use]
    pub fn first_day_of_week(&self) -> Weekday {
        if let Some(day) = self.first_day {
            return day;
        }
        let region = self.effective_region();
        if SUNDAY_START_REGIONS.contains(&region) {
            Weekday::Sunday
        } else if SATURDAY_START_REGIONS.contains(&region) {
            Weekday::Saturday
        } else if region == "MV" {
            Weekday::Friday
        } else {
            Weekday::Monday
        }
    }

    #[must_use]
    pub fn hour_cycle(&self) -> HourCycle {
        if let Some(cycle) = self.hour_cycle {
            return cycle;
        }
        if TWELVE_HOUR_REGIONS.contains(&self.effective_region()) {
            HourCycle::H12
        } else {
            HourCycle::H23
        }
    }

    /// Whether numeric dates read month first (`m/d/y`).
    #[must_use]
    pub fn month_first(&self) -> bool {
        matches!(self.effective_region(), "US" | "PH" | "FM" | "MH" | "PW")
    }

    pub(crate) fn names(&self) -> &'static LocaleNames {
        names_for(&self.language)
    }

    /// Month name in the given calendar.
    #[must_use]
    pub fn month_name(&self, calendar: CalendarSystem, extended_year: i32, month: u8, short: bool) -> &'static str {
        let index = usize::from(month.saturating_sub(1));
        let table: &[&str] = match calendar {
            CalendarSystem::Gregorian | CalendarSystem::Buddhist | CalendarSystem::Japanese | CalendarSystem::Roc => {
                let names = self.names();
                if short { &names.months_short } else { &names.months }
            }
            CalendarSystem::Hebrew if calendar.is_leap_year(extended_year) => &HEBREW_LEAP_MONTHS,
            CalendarSystem::Hebrew => &HEBREW_MONTHS,
            CalendarSystem::IslamicCivil | CalendarSystem::IslamicTabular => &ISLAMIC_MONTHS,
            CalendarSystem::Persian => &PERSIAN_MONTHS,
            CalendarSystem::Indian => &INDIAN_MONTHS,
            CalendarSystem::Coptic => &COPTIC_MONTHS,
            CalendarSystem::Ethiopic | CalendarSystem::EthiopicAmeteAlem => &ETHIOPIC_MONTHS,
        };
        table.get(index).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn weekday_name(&self, weekday: Weekday, short: bool) -> &'static str {
        let names = self.names();
        let index = usize::from(weekday.number() - 1);
        if short {
            names.weekdays_short[index]
        } else {
            names.weekdays[index]
        }
    }

    /// Display name of an era.
    #[must_use]
    pub fn era_name(&self, calendar: CalendarSystem, era: &str) -> &'static str {
        let japanese = self.language == "ja";
        match (calendar, era) {
            (CalendarSystem::Gregorian, "bc") => self.names().eras[0],
            (CalendarSystem::Gregorian, _) => self.names().eras[1],
            (CalendarSystem::Japanese, "bc") if japanese => "紀元前",
            (CalendarSystem::Japanese, "ad") if japanese => "西暦",
            (CalendarSystem::Japanese, "meiji") if japanese => "明治",
            (CalendarSystem::Japanese, "taisho") if japanese => "大正",
            (CalendarSystem::Japanese, "showa") if japanese => "昭和",
            (CalendarSystem::Japanese, "heisei") if japanese => "平成",
            (CalendarSystem::Japanese, "reiwa") if japanese => "令和",
            (CalendarSystem::Japanese, "bc") => "BC",
            (CalendarSystem::Japanese, "ad") => "AD",
            (CalendarSystem::Japanese, "meiji") => "Meiji",
            (CalendarSystem::Japanese, "taisho") => "Taishō",
            (CalendarSystem::Japanese, "showa") => "Shōwa",
            (CalendarSystem::Japanese, "heisei") => "Heisei",
            (CalendarSystem::Japanese, _) => "Reiwa",
            (CalendarSystem::Buddhist, _) => "BE",
            (CalendarSystem::Roc, "before_minguo") => "Before R.O.C.",
            (CalendarSystem::Roc, _) => "Minguo",
            (CalendarSystem::Persian, _) => "AP",
            (CalendarSystem::Indian, _) => "Saka",
            (CalendarSystem::IslamicCivil | CalendarSystem::IslamicTabular, _) => "AH",
            (CalendarSystem::Hebrew, _) => "AM",
            (CalendarSystem::Coptic, "bce") => "ERA0",
            (CalendarSystem::Coptic, _) => "ERA1",
            (CalendarSystem::Ethiopic | CalendarSystem::EthiopicAmeteAlem, "aa") => "ERA0",
            (CalendarSystem::Ethiopic | CalendarSystem::EthiopicAmeteAlem, _) => "ERA1",
        }
    }

    /// Look up a month by (possibly abbreviated) name in this locale or English.
    #[must_use]
    pub fn month_from_name(&self, token: &str) -> Option<u8> {
        let token = token.trim_end_matches('.').to_lowercase();
        if token.is_empty() {
            return None;
        }
        [self.names(), &EN].into_iter().find_map(|names| {
            let exact = names.months.iter().chain(names.months_short.iter()).position(|name| {
                name.trim_end_matches('.').to_lowercase() == token
            });
            let found = exact.or_else(|| {
                (token.chars().count() >= 3)
                    .then(|| names.months.iter().position(|name| name.to_lowercase().starts_with(&token)))
                    .flatten()
            });
            #[expect(clippy::cast_possible_truncation, reason = "index into a 12 or 24 entry table")]
            let month = found.map(|index| (index % 12) as u8 + 1);
            month
        })
    }

    /// Whether a token names a weekday in this locale or English.
    #[must_use]
    pub fn is_weekday_name(&self, token: &str) -> bool {
        let token = token.trim_end_matches('.').to_lowercase();
        !token.is_empty()
            && [self.names(), &EN].into_iter().any(|names| {
                names
                    .weekdays
                    .iter()
                    .chain(names.weekdays_short.iter())
                    .any(|name| name.trim_end_matches('.').to_lowercase() == token)
            })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

fn weekday_from_code(code: &str) -> Option<Weekday> {
    let number = match code {
        "mon" => 1,
        "tue" => 2,
        "wed" => 3,
        "thu" => 4,
        "fri" => 5,
        "sat" => 6,
        "sun" => 7,
        _ => return None,
    };
    Weekday::from_number(number)
}

fn likely_region(language: &str) -> &'static str {
    match language {
        "ja" => "JP",
        "zh" => "CN",
        "ko" => "KR",
        "he" => "IL",
        "fa" => "IR",
        "ar" => "EG",
        "pt" => "BR",
        "hi" => "IN",
        "th" => "TH",
        "de" => "DE",
        "fr" => "FR",
        "es" => "ES",
        "it" => "IT",
        "ru" => "RU",
        "am" => "ET",
        _ => "US",
    }
}

// ============================================================================
// Tables
// ============================================================================

const SUNDAY_START_REGIONS: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO", "ET", "GT", "GU", "HK", "HN",
    "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO", "MT", "MX", "MZ", "NI", "NP", "PA",
    "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV", "TH", "TT", "TW", "UM", "US", "VE", "VI", "WS", "YE",
    "ZA", "ZW",
];

const SATURDAY_START_REGIONS: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

const TWELVE_HOUR_REGIONS: &[&str] = &[
    "US", "CA", "AU", "NZ", "IN", "PH", "PK", "EG", "SA", "MX", "CO", "KR", "BD", "MY",
];

pub(crate) struct LocaleNames {
    pub(crate) months: [&'static str; 12],
    pub(crate) months_short: [&'static str; 12],
    /// Monday first.
    pub(crate) weekdays: [&'static str; 7],
    pub(crate) weekdays_short: [&'static str; 7],
    /// Before and after the epoch.
    pub(crate) eras: [&'static str; 2],
    pub(crate) day_periods: [&'static str; 2],
    pub(crate) week: &'static str,
}

fn names_for(language: &str) -> &'static LocaleNames {
    match language {
        "de" => &DE,
        "fr" => &FR,
        "es" => &ES,
        "ja" => &JA,
        _ => &EN,
    }
}

static EN: LocaleNames = LocaleNames {
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September", "October",
        "November", "December",
    ],
    months_short: ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
    weekdays: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"],
    weekdays_short: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    eras: ["BC", "AD"],
    day_periods: ["AM", "PM"],
    week: "Week",
};

static DE: LocaleNames = LocaleNames {
    months: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober", "November",
        "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez.",
    ],
    weekdays: ["Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag"],
    weekdays_short: ["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."],
    eras: ["v. Chr.", "n. Chr."],
    day_periods: ["AM", "PM"],
    week: "Woche",
};

static FR: LocaleNames = LocaleNames {
    months: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre", "octobre",
        "novembre", "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
    ],
    weekdays: ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"],
    weekdays_short: ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
    eras: ["av. J.-C.", "ap. J.-C."],
    day_periods: ["AM", "PM"],
    week: "Semaine",
};

static ES: LocaleNames = LocaleNames {
    months: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre", "octubre",
        "noviembre", "diciembre",
    ],
    months_short: ["ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic"],
    weekdays: ["lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo"],
    weekdays_short: ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
    eras: ["a. C.", "d. C."],
    day_periods: ["a. m.", "p. m."],
    week: "Semana",
};

static JA: LocaleNames = LocaleNames {
    months: ["1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月"],
    months_short: ["1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月"],
    weekdays: ["月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日", "日曜日"],
    weekdays_short: ["月", "火", "水", "木", "金", "土", "日"],
    eras: ["紀元前", "西暦"],
    day_periods: ["午前", "午後"],
    week: "週",
};

const HEBREW_MONTHS: [&str; 12] = [
    "Tishri", "Heshvan", "Kislev", "Tevet", "Shevat", "Adar", "Nisan", "Iyar", "Sivan", "Tamuz", "Av", "Elul",
];

const HEBREW_LEAP_MONTHS: [&str; 13] = [
    "Tishri", "Heshvan", "Kislev", "Tevet", "Shevat", "Adar I", "Adar II", "Nisan", "Iyar", "Sivan", "Tamuz", "Av",
    "Elul",
];

const ISLAMIC_MONTHS: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabiʻ I",
    "Rabiʻ II",
    "Jumada I",
    "Jumada II",
    "Rajab",
    "Shaʻban",
    "Ramadan",
    "Shawwal",
    "Dhuʻl-Qiʻdah",
    "Dhuʻl-Hijjah",
];

const PERSIAN_MONTHS: [&str; 12] = [
    "Farvardin", "Ordibehesht", "Khordad", "Tir", "Mordad", "Shahrivar", "Mehr", "Aban", "Azar", "Dey", "Bahman",
    "Esfand",
];

const INDIAN_MONTHS: [&str; 12] = [
    "Chaitra", "Vaisakha", "Jyaistha", "Asadha", "Sravana", "Bhadra", "Asvina", "Kartika", "Agrahayana", "Pausa",
    "Magha", "Phalguna",
];

const COPTIC_MONTHS: [&str; 13] = [
    "Tout", "Baba", "Hator", "Kiahk", "Toba", "Amshir", "Baramhat", "Baramouda", "Bashans", "Paona", "Epep", "Mesra",
    "Nasie",
];

const ETHIOPIC_MONTHS: [&str; 13] = [
    "Meskerem", "Tekemt", "Hedar", "Tahsas", "Ter", "Yekatit", "Megabit", "Miazia", "Genbot", "Sene", "Hamle",
    "Nehasse", "Pagumen",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let locale = Locale::parse("en_GB.UTF-8");
        assert_eq!(locale.tag(), "en-GB");
        assert_eq!(locale.region(), Some("GB"));

        let locale = Locale::parse("zh-Hant-TW");
        assert_eq!(locale.language(), "zh");
        assert_eq!(locale.region(), Some("TW"));

        assert_eq!(Locale::parse("").tag(), "en-US");
        assert_eq!(Locale::parse("C").tag(), "en-US");
        assert_eq!(Locale::parse("de").effective_region(), "DE");
    }

    #[test]
    fn test_unicode_extensions() {
        let locale = Locale::parse("th-TH-u-ca-buddhist-hc-h23");
        assert_eq!(locale.calendar(), Some(CalendarSystem::Buddhist));
        assert_eq!(locale.hour_cycle(), HourCycle::H23);

        let locale = Locale::parse("ar-SA-u-ca-islamic-civil-fw-mon");
        assert_eq!(locale.calendar(), Some(CalendarSystem::IslamicCivil));
        assert_eq!(locale.first_day_of_week(), Weekday::Monday);
    }

    #[test]
    fn test_first_day_of_week() {
        assert_eq!(Locale::parse("en-US").first_day_of_week(), Weekday::Sunday);
        assert_eq!(Locale::parse("en-GB").first_day_of_week(), Weekday::Monday);
        assert_eq!(Locale::parse("fa-IR").first_day_of_week(), Weekday::Saturday);
        assert_eq!(Locale::parse("ja").first_day_of_week(), Weekday::Sunday);
        assert_eq!(Locale::parse("dv-MV").first_day_of_week(), Weekday::Friday);
    }

    #[test]
    fn test_hour_cycle_defaults() {
        assert!(Locale::parse("en-US").hour_cycle().is_12_hour());
        assert!(!Locale::parse("en-GB").hour_cycle().is_12_hour());
        assert_eq!(HourCycle::H12.display_hour(0), 12);
        assert_eq!(HourCycle::H12.display_hour(13), 1);
        assert_eq!(HourCycle::H24.display_hour(0), 24);
    }

    #[test]
    fn test_month_lookup() {
        let en = Locale::parse("en-US");
        assert_eq!(en.month_from_name("Mar"), Some(3));
        assert_eq!(en.month_from_name("sept"), Some(9));
        assert_eq!(en.month_from_name("December"), Some(12));
        assert_eq!(en.month_from_name("ma"), None);

        let de = Locale::parse("de-DE");
        assert_eq!(de.month_from_name("März"), Some(3));
        assert_eq!(de.month_from_name("Okt."), Some(10));
        assert_eq!(de.month_from_name("march"), Some(3));
    }

    #[test]
    fn test_names() {
        let en = Locale::default();
        assert_eq!(en.month_name(CalendarSystem::Hebrew, 5784, 7, false), "Adar II");
        assert_eq!(en.month_name(CalendarSystem::Hebrew, 5785, 6, false), "Adar");
        assert_eq!(en.month_name(CalendarSystem::Gregorian, 2024, 3, true), "Mar");
        assert_eq!(en.weekday_name(Weekday::Sunday, true), "Sun");
        assert_eq!(en.era_name(CalendarSystem::Japanese, "reiwa"), "Reiwa");
        assert_eq!(Locale::parse("ja-JP").era_name(CalendarSystem::Japanese, "reiwa"), "令和");
        assert!(en.is_weekday_name("thu"));
        assert!(!en.is_weekday_name("march"));
    }
}
