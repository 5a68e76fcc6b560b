use chrono::NaiveTime;
use fuzzy_weather_face::{ColorMode, HourStyle, Locale, Palette, Rounding, WatchSettings};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Fuzzy Weather Face",
    about = "\nTells the time in words and colours the screen by temperature.\n\
             Press 'r' to refresh the weather, 'q' to quit."
)]
pub struct CliOptions {
    /// Phrase grammar: "us" ("a quarter past ten", "half past ten") or
    /// "uk" ("quarter past ten", "half ten", "midnight", "noon").
    #[structopt(short, long, default_value = "us")]
    pub locale: Locale,

    /// Name hours on a 12 or 24 hour clock.
    #[structopt(long, default_value = "12")]
    pub hour_style: HourStyle,

    /// Snap minutes to the "nearest" five minute mark, or "down" to the last one.
    #[structopt(long, default_value = "nearest")]
    pub rounding: Rounding,

    /// Ignore the temperature and stay black and white.
    #[structopt(long)]
    pub monochrome: bool,

    /// Colours shown before the first reading arrives, and always with
    /// --monochrome, as "background,foreground,shadow" hex.
    #[structopt(long, default_value = "#000000,#ffffff,#000000")]
    pub idle_palette: Palette,

    /// Answer every weather request with this reading, in degrees Celsius (0-255).
    #[structopt(short, long, conflicts_with = "weather-file")]
    pub temperature: Option<u8>,

    /// Answer weather requests with the reading stored in this file.
    #[structopt(short, long, parse(from_os_str))]
    pub weather_file: Option<PathBuf>,

    /// How often to check the clock and the keyboard, in milliseconds.
    #[structopt(long, default_value = "1000")]
    pub tick: u64,

    /// Print the face once and exit.
    #[structopt(long)]
    pub print: bool,

    /// Time of day to print (HH:MM) instead of now.
    #[structopt(long, requires = "print", parse(try_from_str = parse_time))]
    pub at: Option<NaiveTime>,

    /// Write logs here. The interactive face owns the terminal, so without
    /// this flag it logs nothing.
    #[structopt(long, parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

impl CliOptions {
    pub fn settings(&self) -> WatchSettings {
        WatchSettings {
            locale: self.locale,
            hour_style: self.hour_style,
            rounding: self.rounding,
            color_mode: if self.monochrome {
                ColorMode::Monochrome
            } else {
                ColorMode::Color
            },
            idle_palette: self.idle_palette,
        }
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M")
}
