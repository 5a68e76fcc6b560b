use std::fmt;
use std::str::FromStr;

/// Raised when a setting given on the command line is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {setting} '{value}' (expected one of: {expected})")]
pub struct ParseSettingError {
    pub setting: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Which grammar the phrase generator speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Us,
    Uk,
}

/// Word lists and template switches for one locale.
///
/// Both locales run through the same generator; everything that differs
/// between them lives here as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    /// Descriptor for a fifteen minute offset, e.g. "a quarter".
    pub quarter: &'static str,
    pub half: &'static str,
    pub past: &'static str,
    pub to: &'static str,
    pub oclock: &'static str,
    /// Whether the half hour keeps its direction word ("half past ten")
    /// or elides it ("half ten").
    pub half_past: bool,
    /// Replaces "twelve o'clock" at hour 0.
    pub midnight: Option<&'static str>,
    /// Replaces "twelve o'clock" at hour 12.
    pub noon: Option<&'static str>,
}

pub const US: Grammar = Grammar {
    quarter: "a quarter",
    half: "half",
    past: "past",
    to: "to",
    oclock: "o'clock",
    half_past: true,
    midnight: None,
    noon: None,
};

pub const UK: Grammar = Grammar {
    quarter: "quarter",
    half: "half",
    past: "past",
    to: "to",
    oclock: "o'clock",
    half_past: false,
    midnight: Some("midnight"),
    noon: Some("noon"),
};

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Us, Locale::Uk];

    pub fn grammar(self) -> &'static Grammar {
        match self {
            Locale::Us => &US,
            Locale::Uk => &UK,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Us
    }
}

impl FromStr for Locale {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "us" | "en-us" => Ok(Locale::Us),
            "uk" | "gb" | "en-gb" => Ok(Locale::Uk),
            _ => Err(ParseSettingError {
                setting: "locale",
                value: s.to_string(),
                expected: "us, uk",
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Us => write!(f, "us"),
            Locale::Uk => write!(f, "uk"),
        }
    }
}

/// How the hour name is presented.
///
/// `Twelve` reduces the hour modulo 12 (so 13:58 reads "two o'clock"),
/// `TwentyFour` names the hour as-is ("fourteen o'clock").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourStyle {
    Twelve,
    TwentyFour,
}

impl HourStyle {
    pub fn display_hour(self, hour: u8) -> u8 {
        match self {
            HourStyle::Twelve => match hour % 12 {
                0 => 12,
                h => h,
            },
            HourStyle::TwentyFour => hour % 24,
        }
    }
}

impl Default for HourStyle {
    fn default() -> Self {
        HourStyle::Twelve
    }
}

impl FromStr for HourStyle {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12" => Ok(HourStyle::Twelve),
            "24" => Ok(HourStyle::TwentyFour),
            _ => Err(ParseSettingError {
                setting: "hour style",
                value: s.to_string(),
                expected: "12, 24",
            }),
        }
    }
}

/// How a minute is snapped to its five minute bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Nearest bucket, halves rounded up: 2 -> 0, 3 -> 5, 58 -> 60.
    Nearest,
    /// Start of the current bucket: 4 -> 0, 59 -> 55.
    Down,
}

impl Rounding {
    /// Returns a multiple of 5 in `0..=60`. 60 means "the next hour".
    pub fn bucket(self, minute: u8) -> u8 {
        match self {
            Rounding::Nearest => (minute + 2) / 5 * 5,
            Rounding::Down => minute / 5 * 5,
        }
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Rounding::Nearest
    }
}

impl FromStr for Rounding {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Rounding::Nearest),
            "down" => Ok(Rounding::Down),
            _ => Err(ParseSettingError {
                setting: "rounding",
                value: s.to_string(),
                expected: "nearest, down",
            }),
        }
    }
}
