//! A fuzzy-time watchface core: clock readings become phrases such as
//! "twenty five past three", and temperature samples become a three-colour
//! palette.

pub mod locale;
pub mod phrase;
pub mod theme;
pub mod transport;
pub mod watch;
pub mod weather;

pub use locale::{HourStyle, Locale, Rounding};
pub use phrase::{ClockReading, Phrase, PhraseGenerator};
pub use theme::{map_temperature, Bracket, Color, ColorMode, Palette, ThresholdTable};
pub use watch::{Watch, WatchFace, WatchSettings};
pub use weather::{TemperatureSample, WeatherSampleChannel, WeatherTransport};
