//! Fuzzy time: turns an hour and minute into words like "twenty five past
//! three" or "quarter to ten".

use chrono::{Datelike, NaiveDate, Timelike};
use std::fmt;

use crate::locale::{Grammar, HourStyle, Locale, Rounding};

const HOURS: [&str; 24] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
    "twenty",
    "twenty one",
    "twenty two",
    "twenty three",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("hour {0} is out of range (expected 0..=23)")]
    HourOutOfRange(u32),

    #[error("minute {0} is out of range (expected 0..=59)")]
    MinuteOutOfRange(u32),
}

/// A wall-clock reading, always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockReading {
    hour: u8,
    minute: u8,
}

impl ClockReading {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ClockError> {
        if hour > 23 {
            return Err(ClockError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ClockError::MinuteOutOfRange(minute));
        }
        Ok(ClockReading {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Readings taken from chrono are in range by construction.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        ClockReading {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A finished, single-line phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phrase(String);

impl Phrase {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Phrase {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhraseGenerator {
    pub locale: Locale,
    pub hour_style: HourStyle,
    pub rounding: Rounding,
}

impl PhraseGenerator {
    pub fn new(locale: Locale, hour_style: HourStyle, rounding: Rounding) -> Self {
        PhraseGenerator {
            locale,
            hour_style,
            rounding,
        }
    }

    pub fn generate(&self, reading: ClockReading) -> Phrase {
        let grammar = self.locale.grammar();

        // A bucket of 60 belongs to the next hour.
        let (hour, bucket) = match self.rounding.bucket(reading.minute) {
            60 => ((reading.hour + 1) % 24, 0),
            bucket => (reading.hour, bucket),
        };
        let next_hour = (hour + 1) % 24;

        let mut words: Vec<&'static str> = Vec::with_capacity(5);
        match bucket {
            0 => self.push_oclock(grammar, hour, &mut words),
            30 => {
                words.push(grammar.half);
                if grammar.half_past {
                    words.push(grammar.past);
                }
                words.push(self.hour_name(hour));
            }
            5..=25 => {
                words.push(offset_name(grammar, bucket));
                words.push(grammar.past);
                words.push(self.hour_name(hour));
            }
            _ => {
                words.push(offset_name(grammar, 60 - bucket));
                words.push(grammar.to);
                words.push(self.hour_name(next_hour));
            }
        }

        Phrase(words.join(" "))
    }

    fn push_oclock(&self, grammar: &Grammar, hour: u8, words: &mut Vec<&'static str>) {
        let special = match hour {
            0 => grammar.midnight,
            12 => grammar.noon,
            _ => None,
        };
        match special {
            Some(name) => words.push(name),
            None => {
                words.push(self.hour_name(hour));
                words.push(grammar.oclock);
            }
        }
    }

    fn hour_name(&self, hour: u8) -> &'static str {
        HOURS[self.hour_style.display_hour(hour) as usize]
    }
}

/// Minutes either side of the hour; `minutes` is one of 5, 10, 15, 20, 25.
fn offset_name(grammar: &Grammar, minutes: u8) -> &'static str {
    match minutes {
        5 => "five",
        10 => "ten",
        15 => grammar.quarter,
        20 => "twenty",
        _ => "twenty five",
    }
}

/// The abbreviated date shown above the phrase, e.g. "Sat 18 Oct".
pub fn date_line<D: Datelike>(date: &D) -> String {
    // Datelike alone has no formatter, so go through NaiveDate.
    match NaiveDate::from_ymd_opt(date.year(), date.month(), date.day()) {
        Some(date) => date.format("%a %-d %b").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(hour: u32, minute: u32) -> ClockReading {
        ClockReading::new(hour, minute).unwrap()
    }

    fn us(hour: u32, minute: u32) -> String {
        PhraseGenerator::new(Locale::Us, HourStyle::Twelve, Rounding::Nearest)
            .generate(reading(hour, minute))
            .into_string()
    }

    fn uk(hour: u32, minute: u32) -> String {
        PhraseGenerator::new(Locale::Uk, HourStyle::Twelve, Rounding::Nearest)
            .generate(reading(hour, minute))
            .into_string()
    }

    fn all_generators() -> Vec<PhraseGenerator> {
        let mut generators = Vec::new();
        for locale in Locale::ALL.iter() {
            for style in [HourStyle::Twelve, HourStyle::TwentyFour].iter() {
                for rounding in [Rounding::Nearest, Rounding::Down].iter() {
                    generators.push(PhraseGenerator::new(*locale, *style, *rounding));
                }
            }
        }
        generators
    }

    #[test]
    fn rejects_out_of_range_readings() {
        assert_eq!(
            ClockReading::new(24, 0),
            Err(ClockError::HourOutOfRange(24))
        );
        assert_eq!(
            ClockReading::new(10, 60),
            Err(ClockError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn reading_from_chrono_time() {
        let time = chrono::NaiveTime::from_hms_opt(15, 47, 12).unwrap();
        assert_eq!(ClockReading::from_time(&time), reading(15, 47));
    }

    #[test]
    fn every_reading_gives_a_clean_single_line() {
        for generator in all_generators() {
            for hour in 0..24 {
                for minute in 0..60 {
                    let phrase = generator.generate(reading(hour, minute));
                    let text = phrase.as_str();
                    assert!(!text.is_empty());
                    assert!(!text.contains('\n'));
                    assert!(!text.contains("  "), "double space in '{}'", text);
                    assert_eq!(text.trim(), text);
                    assert!(!text.ends_with('.'));
                }
            }
        }
    }

    #[test]
    fn past_phrases() {
        assert_eq!(us(3, 5), "five past three");
        assert_eq!(us(3, 10), "ten past three");
        assert_eq!(us(3, 15), "a quarter past three");
        assert_eq!(us(3, 20), "twenty past three");
        assert_eq!(us(3, 25), "twenty five past three");
        assert_eq!(uk(3, 15), "quarter past three");
    }

    #[test]
    fn to_phrases_name_the_next_hour() {
        assert_eq!(us(9, 35), "twenty five to ten");
        assert_eq!(us(9, 40), "twenty to ten");
        assert_eq!(us(9, 45), "a quarter to ten");
        assert_eq!(us(9, 50), "ten to ten");
        assert_eq!(us(9, 55), "five to ten");
        assert_eq!(uk(9, 45), "quarter to ten");
    }

    #[test]
    fn twenty_five_either_side_of_the_half() {
        for minute in 23..=27 {
            assert_eq!(us(3, minute), "twenty five past three");
        }
        for minute in 33..=37 {
            assert_eq!(us(3, minute), "twenty five to four");
            assert_eq!(uk(3, minute), "twenty five to four");
        }
    }

    #[test]
    fn half_hour_grammar_differs_by_locale() {
        assert_eq!(us(10, 30), "half past ten");
        assert_eq!(uk(10, 30), "half ten");
    }

    #[test]
    fn exact_hour_is_oclock_not_zero_past() {
        assert_eq!(us(0, 0), "twelve o'clock");
        assert_eq!(us(12, 0), "twelve o'clock");
        assert_eq!(us(7, 0), "seven o'clock");
        assert_eq!(uk(0, 0), "midnight");
        assert_eq!(uk(12, 0), "noon");
        assert_eq!(uk(7, 1), "seven o'clock");
    }

    #[test]
    fn special_names_only_replace_the_exact_hour() {
        assert_eq!(uk(0, 15), "quarter past twelve");
        assert_eq!(uk(23, 45), "quarter to twelve");
        assert_eq!(uk(23, 58), "midnight");
    }

    #[test]
    fn rollover_wraps_into_the_next_hour() {
        assert_eq!(us(11, 58), "twelve o'clock");
        assert_eq!(us(12, 58), "one o'clock");
        assert_eq!(us(23, 59), "twelve o'clock");
        assert_eq!(us(13, 58), "two o'clock");
    }

    #[test]
    fn twenty_four_hour_style_keeps_the_full_hour() {
        let generator = PhraseGenerator::new(Locale::Us, HourStyle::TwentyFour, Rounding::Nearest);
        assert_eq!(
            generator.generate(reading(13, 58)).as_str(),
            "fourteen o'clock"
        );
        assert_eq!(
            generator.generate(reading(15, 47)).as_str(),
            "a quarter to sixteen"
        );
    }

    #[test]
    fn past_and_to_cross_over_after_the_half() {
        assert_eq!(us(2, 32), "half past two");
        assert_eq!(us(2, 34), "twenty five to three");
    }

    #[test]
    fn readings_in_one_bucket_share_a_phrase() {
        for hour in 0..24 {
            for minute in 0..60 {
                let same_bucket = (0..60).filter(|m| (m + 2) / 5 == (minute + 2) / 5);
                for other in same_bucket {
                    assert_eq!(us(hour, minute), us(hour, other));
                }
            }
        }
    }

    #[test]
    fn down_rounding_stays_in_the_current_hour() {
        let generator = PhraseGenerator::new(Locale::Us, HourStyle::Twelve, Rounding::Down);
        assert_eq!(generator.generate(reading(11, 58)).as_str(), "five to twelve");
        assert_eq!(generator.generate(reading(3, 4)).as_str(), "three o'clock");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let generator = PhraseGenerator::default();
        assert_eq!(
            generator.generate(reading(8, 21)),
            generator.generate(reading(8, 21))
        );
    }

    #[test]
    fn date_line_is_abbreviated() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(date_line(&date), "Sun 18 Oct");
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        assert_eq!(date_line(&date), "Mon 5 Oct");
    }
}
