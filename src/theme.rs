//! Temperature themes.
//!
//! A temperature sample picks one bracket from a descending threshold table
//! and every bracket carries a fixed background, foreground ("high") and
//! shadow ("dark") colour. The three are always taken together from the same
//! bracket.

use colors_transform::{Color as _, Rgb};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("'{0}' is not a hex color")]
    InvalidColor(String),

    #[error("'{0}' is not a palette (expected background,foreground,shadow)")]
    InvalidPalette(String),

    #[error("threshold {above} at position {index} does not descend")]
    BoundsNotDescending { index: usize, above: i32 },

    #[error("bracket {bracket:?} at position {index} is out of order")]
    BracketsOutOfOrder { index: usize, bracket: Bracket },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    // Named after the watch's 64-colour palette.
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const DARK_GRAY: Color = Color::new(0x55, 0x55, 0x55);
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
    pub const SUNSET_ORANGE: Color = Color::new(0xFF, 0x55, 0x55);
    pub const ORANGE: Color = Color::new(0xFF, 0x55, 0x00);
    pub const CHROME_YELLOW: Color = Color::new(0xFF, 0xAA, 0x00);
    pub const RAJAH: Color = Color::new(0xFF, 0xAA, 0x55);
    pub const PASTEL_YELLOW: Color = Color::new(0xFF, 0xFF, 0xAA);
    pub const SCREAMIN_GREEN: Color = Color::new(0x55, 0xFF, 0x55);
    pub const KELLY_GREEN: Color = Color::new(0x55, 0xAA, 0x00);
    pub const BLUE_MOON: Color = Color::new(0x00, 0x55, 0xFF);
    pub const CELESTE: Color = Color::new(0xAA, 0xFF, 0xFF);
    pub const OXFORD_BLUE: Color = Color::new(0x00, 0x00, 0x55);
    pub const VERY_LIGHT_BLUE: Color = Color::new(0x55, 0x55, 0xFF);
    pub const PICTON_BLUE: Color = Color::new(0x55, 0xAA, 0xFF);

    /// WCAG relative luminance, 0.0 (black) to 1.0 (white).
    pub fn relative_luminance(self) -> f32 {
        fn srgb_component(value: u8) -> f32 {
            let channel = value as f32 / 255.0;
            if channel <= 0.03928 {
                channel / 12.92
            } else {
                ((channel + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * srgb_component(self.red)
            + 0.7152 * srgb_component(self.green)
            + 0.0722 * srgb_component(self.blue)
    }

    pub fn contrast_ratio(self, other: Color) -> f32 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        (a.max(b) + 0.05) / (a.min(b) + 0.05)
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rgb = Rgb::from_hex_str(s).map_err(|_| ThemeError::InvalidColor(s.to_string()))?;
        Ok(Color::new(
            rgb.get_red().round() as u8,
            rgb.get_green().round() as u8,
            rgb.get_blue().round() as u8,
        ))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    pub background: Color,
    /// Text color, the "high" color.
    pub foreground: Color,
    /// Drop shadow behind the text, the "dark" color.
    pub shadow: Color,
}

impl Palette {
    /// The default idle palette: shown before any sample arrives, and for
    /// every sample in monochrome mode.
    pub const MONOCHROME: Palette = Palette {
        background: Color::BLACK,
        foreground: Color::WHITE,
        shadow: Color::BLACK,
    };
}

impl Default for Palette {
    fn default() -> Self {
        Palette::MONOCHROME
    }
}

/// Parses `background,foreground,shadow` hex colors, e.g.
/// `#000000,#ffffff,#000000`.
impl FromStr for Palette {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors = s
            .split(',')
            .map(|part| part.trim().parse::<Color>())
            .collect::<Result<Vec<_>, _>>()?;
        match colors.as_slice() {
            [background, foreground, shadow] => Ok(Palette {
                background: *background,
                foreground: *foreground,
                shadow: *shadow,
            }),
            _ => Err(ThemeError::InvalidPalette(s.to_string())),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.background, self.foreground, self.shadow)
    }
}

/// A temperature range with its own palette, coldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bracket {
    Freezing,
    NearFreezing,
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
    /// Above any plausible reading: a sensor error, or the apocalypse.
    Extreme,
}

impl Bracket {
    pub fn palette(self) -> Palette {
        let (background, foreground, shadow) = match self {
            Bracket::Extreme => (Color::DARK_GRAY, Color::WHITE, Color::BLACK),
            Bracket::Hot => (Color::SUNSET_ORANGE, Color::PASTEL_YELLOW, Color::RED),
            Bracket::Warm => (Color::CHROME_YELLOW, Color::PASTEL_YELLOW, Color::ORANGE),
            Bracket::Mild => (Color::RAJAH, Color::PASTEL_YELLOW, Color::ORANGE),
            Bracket::Cool => (Color::SCREAMIN_GREEN, Color::WHITE, Color::KELLY_GREEN),
            Bracket::Cold => (Color::BLUE_MOON, Color::CELESTE, Color::OXFORD_BLUE),
            Bracket::NearFreezing => {
                (Color::VERY_LIGHT_BLUE, Color::WHITE, Color::OXFORD_BLUE)
            }
            Bracket::Freezing => (Color::PICTON_BLUE, Color::WHITE, Color::OXFORD_BLUE),
        };
        Palette {
            background,
            foreground,
            shadow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    /// Exclusive lower bound in degrees Celsius.
    pub above: i32,
    pub bracket: Bracket,
}

/// Thresholds evaluated from the highest bound down; the first bound the
/// sample exceeds wins, and anything left over falls to `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdTable<'a> {
    steps: &'a [Threshold],
    floor: Bracket,
}

const STANDARD_STEPS: [Threshold; 7] = [
    Threshold {
        above: 100,
        bracket: Bracket::Extreme,
    },
    Threshold {
        above: 25,
        bracket: Bracket::Hot,
    },
    Threshold {
        above: 20,
        bracket: Bracket::Warm,
    },
    Threshold {
        above: 15,
        bracket: Bracket::Mild,
    },
    Threshold {
        above: 10,
        bracket: Bracket::Cool,
    },
    Threshold {
        above: 5,
        bracket: Bracket::Cold,
    },
    Threshold {
        above: 0,
        bracket: Bracket::NearFreezing,
    },
];

impl<'a> ThresholdTable<'a> {
    pub const STANDARD: ThresholdTable<'static> = ThresholdTable {
        steps: &STANDARD_STEPS,
        floor: Bracket::Freezing,
    };

    /// Builds a table, rejecting bounds or brackets that do not strictly
    /// descend. The floor must be colder than every step.
    pub fn new(steps: &'a [Threshold], floor: Bracket) -> Result<Self, ThemeError> {
        for (index, pair) in steps.windows(2).enumerate() {
            if pair[1].above >= pair[0].above {
                return Err(ThemeError::BoundsNotDescending {
                    index: index + 1,
                    above: pair[1].above,
                });
            }
            if pair[1].bracket >= pair[0].bracket {
                return Err(ThemeError::BracketsOutOfOrder {
                    index: index + 1,
                    bracket: pair[1].bracket,
                });
            }
        }
        if let Some(last) = steps.last() {
            if floor >= last.bracket {
                return Err(ThemeError::BracketsOutOfOrder {
                    index: steps.len(),
                    bracket: floor,
                });
            }
        }
        Ok(ThresholdTable { steps, floor })
    }

    pub fn steps(&self) -> &'a [Threshold] {
        self.steps
    }

    pub fn bracket(&self, celsius: i32) -> Bracket {
        self.steps
            .iter()
            .find(|step| celsius > step.above)
            .map(|step| step.bracket)
            .unwrap_or(self.floor)
    }
}

impl Default for ThresholdTable<'static> {
    fn default() -> Self {
        ThresholdTable::STANDARD
    }
}

/// Whether the display can show colour at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Color,
    Monochrome,
}

impl ColorMode {
    /// In monochrome mode every bracket shows the `idle` palette.
    pub fn palette(self, bracket: Bracket, idle: Palette) -> Palette {
        match self {
            ColorMode::Color => bracket.palette(),
            ColorMode::Monochrome => idle,
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Color
    }
}

/// Maps a temperature to its palette using the standard table.
pub fn map_temperature(celsius: i32) -> Palette {
    ThresholdTable::STANDARD.bracket(celsius).palette()
}
