//! CSS color values.
//!
//! A [`Color`] holds RGB, HSL and alpha at once, all computed when the value
//! is constructed. Parsing accepts the CSS forms a color picker sees:
//! keywords, `#`-optional hex, and the functional `rgb()`/`rgba()`/`hsl()`/
//! `hsla()` notations with comma or space separators and an optional `/`
//! alpha.
//!
//! # Examples
//!
//! ```
//! use picker_values::color::Color;
//!
//! let red = Color::parse("#ff0000").unwrap();
//! assert_eq!((red.hue(), red.saturation(), red.lightness()), (0, 100, 50));
//! assert_eq!(red.keyword(), Some("red"));
//!
//! let green = Color::from_hsl(120.0, 100.0, 50.0);
//! assert_eq!(green.hex6().as_deref(), Some("#00ff00"));
//!
//! let faded = Color::parse("rgb(255 0 0 / 50%)").unwrap();
//! assert_eq!(faded.hex6(), None);
//! assert_eq!(faded.css_rgba(), "rgba(255,0,0,0.50)");
//! ```

use lru::LruCache;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use crate::sync::lock_recover_debug;

/// An immutable color with every representation precomputed.
///
/// Equality compares the RGB channels and the alpha byte. The HSL view and
/// the exact float alpha are not compared, so a gray built from any hue
/// equals the same gray parsed from hex.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
    alpha_float: f64,
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl Color {
    /// Fully opaque color from RGB bytes.
    #[must_use]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba(red, green, blue, u8::MAX)
    }

    /// Color from RGB bytes and an alpha byte.
    #[must_use]
    pub fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        let (hue, saturation, lightness) = rgb_to_hsl(red, green, blue);
        Self {
            red,
            green,
            blue,
            alpha,
            alpha_float: f64::from(alpha) / 255.0,
            hue,
            saturation,
            lightness,
        }
    }

    /// Color from RGB bytes and a 0-1 alpha (clamped).
    #[must_use]
    pub fn from_rgba_float(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        let alpha = clamp_alpha(alpha);
        Self {
            alpha: channel(alpha * 255.0),
            alpha_float: alpha,
            ..Self::from_rgb(red, green, blue)
        }
    }

    /// Fully opaque color from hue degrees and saturation/lightness percents.
    #[must_use]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self::from_hsla(hue, saturation, lightness, 1.0)
    }

    /// Color from hue degrees (wrapped), saturation and lightness percents
    /// (clamped to 0-100) and a 0-1 alpha (clamped).
    #[must_use]
    pub fn from_hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let hue = hue.rem_euclid(360.0);
        let saturation = saturation.clamp(0.0, 100.0);
        let lightness = lightness.clamp(0.0, 100.0);
        let (red, green, blue) = hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0);
        let alpha = clamp_alpha(alpha);
        Self {
            red,
            green,
            blue,
            alpha: channel(alpha * 255.0),
            alpha_float: alpha,
            hue: degrees(hue),
            saturation: percent(saturation),
            lightness: percent(lightness),
        }
    }

    /// Parse a CSS color string.
    ///
    /// Input is trimmed and lowercased; results are cached per normalized
    /// input.
    ///
    /// # Errors
    ///
    /// Returns a [`ColorParseError`] describing which form failed.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Color>>> =
            LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

        let normalized = color.trim().to_lowercase();

        let cached = lock_recover_debug(&CACHE, "color parse cache").get(&normalized).copied();
        if let Some(cached) = cached {
            log::trace!("color cache hit for {normalized:?}");
            return Ok(cached);
        }

        let result = Self::parse_uncached(&normalized)?;
        lock_recover_debug(&CACHE, "color parse cache").put(normalized, result);
        Ok(result)
    }

    fn parse_uncached(color: &str) -> Result<Self, ColorParseError> {
        static FUNCTION_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^(rgba?|hsla?)\(\s*([^()]*?)\s*\)$").expect("valid regex"));

        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if color == "transparent" {
            return Ok(Self::from_rgba(0, 0, 0, 0));
        }
        if let Some(&(red, green, blue)) = KEYWORDS_BY_NAME.get(color) {
            return Ok(Self::from_rgb(red, green, blue));
        }
        if let Some(caps) = FUNCTION_RE.captures(color) {
            return parse_function(&caps[1], &caps[2], color);
        }
        parse_hex(color)
    }

    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Alpha as a byte, 255 is opaque.
    #[must_use]
    pub const fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Alpha in 0-1.
    #[must_use]
    pub const fn alpha_float(&self) -> f64 {
        self.alpha_float
    }

    /// Hue in degrees, 0-359.
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Saturation percent, 0-100.
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Lightness percent, 0-100.
    #[must_use]
    pub const fn lightness(&self) -> u8 {
        self.lightness
    }

    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        self.alpha == u8::MAX
    }

    // ========================================================================
    // Output formats
    // ========================================================================

    /// `#rrggbb`, only for opaque colors.
    #[must_use]
    pub fn hex6(&self) -> Option<String> {
        self.is_opaque()
            .then(|| format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue))
    }

    /// `#rrggbbaa`.
    #[must_use]
    pub fn hex8(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.red, self.green, self.blue, self.alpha)
    }

    /// The shortest lossless hex form.
    #[must_use]
    pub fn hex_compact(&self) -> String {
        self.hex6().unwrap_or_else(|| self.hex8())
    }

    /// `rgb(r,g,b)`, only for opaque colors.
    #[must_use]
    pub fn css_rgb(&self) -> Option<String> {
        self.is_opaque()
            .then(|| format!("rgb({},{},{})", self.red, self.green, self.blue))
    }

    /// `rgba(r,g,b,a)` with alpha to two decimals.
    #[must_use]
    pub fn css_rgba(&self) -> String {
        format!("rgba({},{},{},{:.2})", self.red, self.green, self.blue, self.alpha_float)
    }

    #[must_use]
    pub fn css_rgb_compact(&self) -> String {
        self.css_rgb().unwrap_or_else(|| self.css_rgba())
    }

    /// `hsl(h,s%,l%)`, only for opaque colors.
    #[must_use]
    pub fn css_hsl(&self) -> Option<String> {
        self.is_opaque()
            .then(|| format!("hsl({},{}%,{}%)", self.hue, self.saturation, self.lightness))
    }

    /// `hsla(h,s%,l%,a)` with alpha to two decimals.
    #[must_use]
    pub fn css_hsla(&self) -> String {
        format!(
            "hsla({},{}%,{}%,{:.2})",
            self.hue, self.saturation, self.lightness, self.alpha_float
        )
    }

    #[must_use]
    pub fn css_hsl_compact(&self) -> String {
        self.css_hsl().unwrap_or_else(|| self.css_hsla())
    }

    /// CSS keyword naming exactly this color.
    ///
    /// Fully transparent colors are `transparent`. Partially transparent
    /// colors have no keyword. Aliased RGB values (`aqua`/`cyan`,
    /// `gray`/`grey`) resolve to the alphabetically first name.
    #[must_use]
    pub fn keyword(&self) -> Option<&'static str> {
        match self.alpha {
            0 => Some("transparent"),
            u8::MAX => KEYWORDS_BY_RGB.get(&(self.red, self.green, self.blue)).copied(),
            _ => None,
        }
    }
}

impl Color {
    const fn key(&self) -> (u8, u8, u8, u8) {
        (self.red, self.green, self.blue, self.alpha)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_compact())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidFunction(String),
    InvalidComponent(String),
    UnknownKeyword(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidFunction(s) => write!(f, "Invalid color function: {s}"),
            Self::InvalidComponent(s) => write!(f, "Invalid color component: {s}"),
            Self::UnknownKeyword(s) => write!(f, "Unknown color keyword: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse_hex(color: &str) -> Result<Color, ColorParseError> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(if color.starts_with('#') {
            ColorParseError::InvalidHex(color.to_string())
        } else if color.contains('(') {
            ColorParseError::InvalidFunction(color.to_string())
        } else {
            ColorParseError::UnknownKeyword(color.to_string())
        });
    }
    if !matches!(hex.len(), 3 | 4 | 6 | 8) {
        return Err(ColorParseError::InvalidHex(color.to_string()));
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::InvalidHex(color.to_string()))?;
    let [b0, b1, b2, b3] = value.to_be_bytes();
    Ok(match hex.len() {
        3 => Color::from_rgb((b2 & 0x0f) * 17, (b3 >> 4) * 17, (b3 & 0x0f) * 17),
        4 => Color::from_rgba((b2 >> 4) * 17, (b2 & 0x0f) * 17, (b3 >> 4) * 17, (b3 & 0x0f) * 17),
        6 => Color::from_rgb(b1, b2, b3),
        _ => Color::from_rgba(b0, b1, b2, b3),
    })
}

fn parse_function(name: &str, body: &str, color: &str) -> Result<Color, ColorParseError> {
    let args = split_arguments(body).ok_or_else(|| ColorParseError::InvalidFunction(color.to_string()))?;
    let alpha = args.get(3).map(|token| alpha_component(token)).transpose()?.unwrap_or(1.0);
    if name.starts_with("rgb") {
        let red = rgb_component(args[0])?;
        let green = rgb_component(args[1])?;
        let blue = rgb_component(args[2])?;
        Ok(Color::from_rgba_float(red, green, blue, alpha))
    } else {
        let hue = number(args[0].strip_suffix("deg").unwrap_or(args[0]))?;
        let saturation = number(args[1].strip_suffix('%').unwrap_or(args[1]))?;
        let lightness = number(args[2].strip_suffix('%').unwrap_or(args[2]))?;
        Ok(Color::from_hsla(hue, saturation, lightness, alpha))
    }
}

/// Three channels plus optional alpha, comma or space separated, alpha
/// optionally after `/`.
fn split_arguments(body: &str) -> Option<SmallVec<[&str; 4]>> {
    let (channels, slash_alpha) = match body.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (body, None),
    };
    let mut args: SmallVec<[&str; 4]> = if channels.contains(',') {
        channels.split(',').map(str::trim).collect()
    } else {
        channels.split_whitespace().collect()
    };
    if let Some(alpha) = slash_alpha {
        if args.len() != 3 {
            return None;
        }
        args.push(alpha);
    }
    matches!(args.len(), 3 | 4).then_some(args)
}

fn number(token: &str) -> Result<f64, ColorParseError> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ColorParseError::InvalidComponent(token.to_string()))
}

fn rgb_component(token: &str) -> Result<u8, ColorParseError> {
    match token.strip_suffix('%') {
        Some(percent) => Ok(channel(number(percent)? * 2.55)),
        None => Ok(channel(number(token)?)),
    }
}

fn alpha_component(token: &str) -> Result<f64, ColorParseError> {
    match token.strip_suffix('%') {
        Some(percent) => Ok(clamp_alpha(number(percent)? / 100.0)),
        None => Ok(clamp_alpha(number(token)?)),
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 0..=255")]
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 0..=100")]
fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Whole degrees, with 359.5 and above wrapping to 0.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 0..=360")]
fn degrees(value: f64) -> u16 {
    (value.round().clamp(0.0, 360.0) as u16) % 360
}

fn rgb_to_hsl(red: u8, green: u8, blue: u8) -> (u16, u8, u8) {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let (r, g, b) = (f64::from(red) / 255.0, f64::from(green) / 255.0, f64::from(blue) / 255.0);
    let (hi, lo) = (f64::from(max) / 255.0, f64::from(min) / 255.0);
    let lightness = (hi + lo) / 2.0;
    if max == min {
        return (0, 0, percent(lightness * 100.0));
    }
    let chroma = hi - lo;
    let saturation = if lightness > 0.5 {
        chroma / (2.0 - hi - lo)
    } else {
        chroma / (hi + lo)
    };
    let sector = if max == red {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if max == green {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };
    (degrees(sector * 60.0), percent(saturation * 100.0), percent(lightness * 100.0))
}

/// `hue` in degrees, `saturation` and `lightness` in 0-1.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    if saturation <= 0.0 {
        let gray = channel(lightness * 255.0);
        return (gray, gray, gray);
    }
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let second = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = if sector < 1.0 {
        (chroma, second, 0.0)
    } else if sector < 2.0 {
        (second, chroma, 0.0)
    } else if sector < 3.0 {
        (0.0, chroma, second)
    } else if sector < 4.0 {
        (0.0, second, chroma)
    } else if sector < 5.0 {
        (second, 0.0, chroma)
    } else {
        (chroma, 0.0, second)
    };
    let base = lightness - chroma / 2.0;
    (channel((r + base) * 255.0), channel((g + base) * 255.0), channel((b + base) * 255.0))
}

// ============================================================================
// Keyword table
// ============================================================================

static KEYWORDS_BY_NAME: LazyLock<HashMap<&'static str, (u8, u8, u8)>> =
    LazyLock::new(|| KEYWORDS.iter().map(|&(name, r, g, b)| (name, (r, g, b))).collect());

static KEYWORDS_BY_RGB: LazyLock<HashMap<(u8, u8, u8), &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(KEYWORDS.len());
    for &(name, r, g, b) in KEYWORDS {
        map.entry((r, g, b)).or_insert(name);
    }
    map
});

/// Every CSS named color in alphabetical order, without `transparent`.
pub fn named_colors() -> impl Iterator<Item = (&'static str, Color)> {
    KEYWORDS.iter().map(|&(name, r, g, b)| (name, Color::from_rgb(r, g, b)))
}

/// CSS named colors, alphabetical.
#[rustfmt::skip]
const KEYWORDS: &[(&str, u8, u8, u8)] = &[
    ("aliceblue", 240, 248, 255),
    ("antiquewhite", 250, 235, 215),
    ("aqua", 0, 255, 255),
    ("aquamarine", 127, 255, 212),
    ("azure", 240, 255, 255),
    ("beige", 245, 245, 220),
    ("bisque", 255, 228, 196),
    ("black", 0, 0, 0),
    ("blanchedalmond", 255, 235, 205),
    ("blue", 0, 0, 255),
    ("blueviolet", 138, 43, 226),
    ("brown", 165, 42, 42),
    ("burlywood", 222, 184, 135),
    ("cadetblue", 95, 158, 160),
    ("chartreuse", 127, 255, 0),
    ("chocolate", 210, 105, 30),
    ("coral", 255, 127, 80),
    ("cornflowerblue", 100, 149, 237),
    ("cornsilk", 255, 248, 220),
    ("crimson", 220, 20, 60),
    ("cyan", 0, 255, 255),
    ("darkblue", 0, 0, 139),
    ("darkcyan", 0, 139, 139),
    ("darkgoldenrod", 184, 134, 11),
    ("darkgray", 169, 169, 169),
    ("darkgreen", 0, 100, 0),
    ("darkgrey", 169, 169, 169),
    ("darkkhaki", 189, 183, 107),
    ("darkmagenta", 139, 0, 139),
    ("darkolivegreen", 85, 107, 47),
    ("darkorange", 255, 140, 0),
    ("darkorchid", 153, 50, 204),
    ("darkred", 139, 0, 0),
    ("darksalmon", 233, 150, 122),
    ("darkseagreen", 143, 188, 143),
    ("darkslateblue", 72, 61, 139),
    ("darkslategray", 47, 79, 79),
    ("darkslategrey", 47, 79, 79),
    ("darkturquoise", 0, 206, 209),
    ("darkviolet", 148, 0, 211),
    ("deeppink", 255, 20, 147),
    ("deepskyblue", 0, 191, 255),
    ("dimgray", 105, 105, 105),
    ("dimgrey", 105, 105, 105),
    ("dodgerblue", 30, 144, 255),
    ("firebrick", 178, 34, 34),
    ("floralwhite", 255, 250, 240),
    ("forestgreen", 34, 139, 34),
    ("fuchsia", 255, 0, 255),
    ("gainsboro", 220, 220, 220),
    ("ghostwhite", 248, 248, 255),
    ("gold", 255, 215, 0),
    ("goldenrod", 218, 165, 32),
    ("gray", 128, 128, 128),
    ("green", 0, 128, 0),
    ("greenyellow", 173, 255, 47),
    ("grey", 128, 128, 128),
    ("honeydew", 240, 255, 240),
    ("hotpink", 255, 105, 180),
    ("indianred", 205, 92, 92),
    ("indigo", 75, 0, 130),
    ("ivory", 255, 255, 240),
    ("khaki", 240, 230, 140),
    ("lavender", 230, 230, 250),
    ("lavenderblush", 255, 240, 245),
    ("lawngreen", 124, 252, 0),
    ("lemonchiffon", 255, 250, 205),
    ("lightblue", 173, 216, 230),
    ("lightcoral", 240, 128, 128),
    ("lightcyan", 224, 255, 255),
    ("lightgoldenrodyellow", 250, 250, 210),
    ("lightgray", 211, 211, 211),
    ("lightgreen", 144, 238, 144),
    ("lightgrey", 211, 211, 211),
    ("lightpink", 255, 182, 193),
    ("lightsalmon", 255, 160, 122),
    ("lightseagreen", 32, 178, 170),
    ("lightskyblue", 135, 206, 250),
    ("lightslategray", 119, 136, 153),
    ("lightslategrey", 119, 136, 153),
    ("lightsteelblue", 176, 196, 222),
    ("lightyellow", 255, 255, 224),
    ("lime", 0, 255, 0),
    ("limegreen", 50, 205, 50),
    ("linen", 250, 240, 230),
    ("magenta", 255, 0, 255),
    ("maroon", 128, 0, 0),
    ("mediumaquamarine", 102, 205, 170),
    ("mediumblue", 0, 0, 205),
    ("mediumorchid", 186, 85, 211),
    ("mediumpurple", 147, 112, 219),
    ("mediumseagreen", 60, 179, 113),
    ("mediumslateblue", 123, 104, 238),
    ("mediumspringgreen", 0, 250, 154),
    ("mediumturquoise", 72, 209, 204),
    ("mediumvioletred", 199, 21, 133),
    ("midnightblue", 25, 25, 112),
    ("mintcream", 245, 255, 250),
    ("mistyrose", 255, 228, 225),
    ("moccasin", 255, 228, 181),
    ("navajowhite", 255, 222, 173),
    ("navy", 0, 0, 128),
    ("oldlace", 253, 245, 230),
    ("olive", 128, 128, 0),
    ("olivedrab", 107, 142, 35),
    ("orange", 255, 165, 0),
    ("orangered", 255, 69, 0),
    ("orchid", 218, 112, 214),
    ("palegoldenrod", 238, 232, 170),
    ("palegreen", 152, 251, 152),
    ("paleturquoise", 175, 238, 238),
    ("palevioletred", 219, 112, 147),
    ("papayawhip", 255, 239, 213),
    ("peachpuff", 255, 218, 185),
    ("peru", 205, 133, 63),
    ("pink", 255, 192, 203),
    ("plum", 221, 160, 221),
    ("powderblue", 176, 224, 230),
    ("purple", 128, 0, 128),
    ("rebeccapurple", 102, 51, 153),
    ("red", 255, 0, 0),
    ("rosybrown", 188, 143, 143),
    ("royalblue", 65, 105, 225),
    ("saddlebrown", 139, 69, 19),
    ("salmon", 250, 128, 114),
    ("sandybrown", 244, 164, 96),
    ("seagreen", 46, 139, 87),
    ("seashell", 255, 245, 238),
    ("sienna", 160, 82, 45),
    ("silver", 192, 192, 192),
    ("skyblue", 135, 206, 235),
    ("slateblue", 106, 90, 205),
    ("slategray", 112, 128, 144),
    ("slategrey", 112, 128, 144),
    ("snow", 255, 250, 250),
    ("springgreen", 0, 255, 127),
    ("steelblue", 70, 130, 180),
    ("tan", 210, 180, 140),
    ("teal", 0, 128, 128),
    ("thistle", 216, 191, 216),
    ("tomato", 255, 99, 71),
    ("turquoise", 64, 224, 208),
    ("violet", 238, 130, 238),
    ("wheat", 245, 222, 179),
    ("white", 255, 255, 255),
    ("whitesmoke", 245, 245, 245),
    ("yellow", 255, 255, 0),
    ("yellowgreen", 154, 205, 50),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_size() {
        assert_eq!(KEYWORDS.len(), 148);
        assert!(KEYWORDS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_parse_red_hex() {
        let red = Color::parse("#ff0000").unwrap();
        assert_eq!((red.red(), red.green(), red.blue(), red.alpha()), (255, 0, 0, 255));
        assert_eq!((red.hue(), red.saturation(), red.lightness()), (0, 100, 50));
        assert_eq!(red.keyword(), Some("red"));
    }

    #[test]
    fn test_from_hsl_green() {
        assert_eq!(Color::from_hsl(120.0, 100.0, 50.0).hex6().as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(Color::parse("f80").unwrap().hex8(), "#ff8800ff");
        assert_eq!(Color::parse("#f808").unwrap().hex8(), "#ff880088");
        assert_eq!(Color::parse("  #FF880080 ").unwrap().alpha(), 0x80);
        assert!(matches!(Color::parse("#12345"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(Color::parse("#ggg"), Err(ColorParseError::InvalidHex(_))));
    }

    #[test]
    fn test_functional_forms() {
        let expected = Color::from_rgb(255, 128, 0);
        assert_eq!(Color::parse("rgb(255, 128, 0)").unwrap(), expected);
        assert_eq!(Color::parse("rgb(255 128 0)").unwrap(), expected);
        assert_eq!(Color::parse("rgb(100%, 50.2%, 0%)").unwrap(), expected);

        let translucent = Color::parse("rgba(255,128,0,0.5)").unwrap();
        assert_eq!(translucent.alpha(), 128);
        assert_eq!(Color::parse("rgb(255 128 0 / 50%)").unwrap(), translucent);

        let hsl = Color::parse("hsl(240deg 100% 50%)").unwrap();
        assert_eq!(hsl.hex6().as_deref(), Some("#0000ff"));
        assert_eq!(hsl.hue(), 240);
        assert_eq!(Color::parse("hsla(0, 0%, 50%, 2)").unwrap().alpha(), 255);
    }

    #[test]
    fn test_function_errors() {
        assert!(matches!(Color::parse("rgb(1, 2)"), Err(ColorParseError::InvalidFunction(_))));
        assert!(matches!(Color::parse("rgb(1, x, 2)"), Err(ColorParseError::InvalidComponent(_))));
        assert!(matches!(Color::parse("hsl(nan, 1%, 1%)"), Err(ColorParseError::InvalidComponent(_))));
        assert!(matches!(Color::parse("cmyk(1,2,3,4)"), Err(ColorParseError::InvalidFunction(_))));
        assert!(matches!(Color::parse("reddish"), Err(ColorParseError::UnknownKeyword(_))));
        assert_eq!(Color::parse("   "), Err(ColorParseError::Empty));
    }

    #[test]
    fn test_output_formats() {
        let opaque = Color::from_rgb(0, 128, 255);
        assert_eq!(opaque.css_rgb().as_deref(), Some("rgb(0,128,255)"));
        assert_eq!(opaque.css_rgb_compact(), "rgb(0,128,255)");
        assert_eq!(opaque.css_hsl().as_deref(), Some("hsl(210,100%,50%)"));
        assert_eq!(opaque.css_rgba(), "rgba(0,128,255,1.00)");
        assert_eq!(opaque.to_string(), "#0080ff");

        let half = Color::from_rgba_float(0, 128, 255, 0.5);
        assert_eq!(half.css_rgb(), None);
        assert_eq!(half.css_hsl(), None);
        assert_eq!(half.css_rgb_compact(), "rgba(0,128,255,0.50)");
        assert_eq!(half.css_hsl_compact(), "hsla(210,100%,50%,0.50)");
        assert_eq!(half.hex_compact(), "#0080ff80");
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(Color::parse("cyan").unwrap().keyword(), Some("aqua"));
        assert_eq!(Color::parse("GREY").unwrap().keyword(), Some("gray"));
        assert_eq!(Color::parse("transparent").unwrap().keyword(), Some("transparent"));
        assert_eq!(Color::from_rgba(255, 0, 0, 128).keyword(), None);
        assert_eq!(Color::from_rgb(1, 2, 3).keyword(), None);
    }

    #[test]
    fn test_gray_has_zero_hue_and_saturation() {
        let gray = Color::from_rgb(128, 128, 128);
        assert_eq!((gray.hue(), gray.saturation(), gray.lightness()), (0, 0, 50));
        let from_hsl = Color::from_hsl(200.0, 0.0, 50.0);
        assert_eq!(from_hsl.hex6().as_deref(), Some("#808080"));
    }

    #[test]
    fn test_equality_ignores_derived_components() {
        let gray = Color::from_hsl(200.0, 0.0, 50.0);
        assert_eq!(gray.hue(), 200);
        let parsed = Color::parse(&gray.hex8()).unwrap();
        assert_eq!(parsed.hue(), 0);
        assert_eq!(parsed, gray);

        let half = Color::from_rgba_float(0, 128, 255, 0.5);
        let reparsed = Color::parse(&half.hex8()).unwrap();
        assert!((reparsed.alpha_float() - 0.5).abs() > f64::EPSILON);
        assert_eq!(reparsed, half);

        assert_ne!(Color::from_rgba(1, 2, 3, 4), Color::from_rgba(1, 2, 3, 5));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(Color::from_hsl(360.0, 100.0, 50.0).hue(), 0);
        assert_eq!(Color::from_hsl(-120.0, 100.0, 50.0).hex6().as_deref(), Some("#0000ff"));
    }
}
