use chrono::{Datelike, Local, Timelike};
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use fuzzy_weather_face::{
    ClockReading, Color, Palette, Phrase, Watch, WatchFace, WatchSettings, WeatherTransport,
};
use std::io::{self, Write};
use std::time::Duration;
use tracing::info;

pub struct RunClockOptions {
    pub settings: WatchSettings,

    /// Where weather requests go.
    pub transport: Box<dyn WeatherTransport>,

    /// How often the clock and keyboard are checked.
    pub tick_interval: Duration,
}

pub fn run_clock(options: RunClockOptions) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = event_loop(options, &mut stdout);

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn event_loop<W: Write>(options: RunClockOptions, out: &mut W) -> anyhow::Result<()> {
    let RunClockOptions {
        settings,
        mut transport,
        tick_interval,
    } = options;
    let mut watch = Watch::new(settings);
    let mut face = TerminalFace::default();

    let now = Local::now();
    watch.start(&now, &mut face, &mut transport);
    let mut last_reading = ClockReading::from_time(&now);

    loop {
        let now = Local::now();
        let reading = ClockReading::from_time(&now);
        if reading != last_reading {
            watch.on_tick(reading, &now, &mut face, &mut transport);
            last_reading = reading;
        }
        watch.pump(&mut transport, now, &mut face);

        if face.dirty {
            let (width, height) = term_size::dimensions().unwrap_or((40, 12));
            face.draw(out, width, height)?;
        }

        if !event::poll(tick_interval)? {
            continue;
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code: KeyCode::Char('q'),
                ..
            })
            | Event::Key(KeyEvent {
                code: KeyCode::Esc, ..
            }) => break,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => break,
            // Stands in for the wrist tap.
            Event::Key(KeyEvent {
                code: KeyCode::Char('r'),
                ..
            }) => {
                info!("refresh requested");
                watch.on_tap(&mut transport);
            }
            Event::Resize(_, _) => {
                face.dirty = true;
                watch.redisplay(&mut face);
            }
            _ => (),
        }
    }
    Ok(())
}

/// Renders the face once to stdout, for scripts and quick checks.
pub fn print_face<N, T>(settings: WatchSettings, now: &N, mut transport: T) -> anyhow::Result<()>
where
    N: Datelike + Timelike,
    T: WeatherTransport,
{
    let mut watch = Watch::new(settings);
    let mut face = TerminalFace::default();
    watch.start(now, &mut face, &mut transport);
    watch.pump(&mut transport, Local::now(), &mut face);

    let width = term_size::dimensions().map(|(width, _)| width).unwrap_or(40);
    for line in face.paint(width, 5) {
        println!("{}", line);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    text: String,
    color: Color,
    bold: bool,
}

/// A face drawn with true-colour text over a filled background.
#[derive(Debug)]
struct TerminalFace {
    phrase: String,
    date: String,
    palette: Palette,
    dirty: bool,
}

impl Default for TerminalFace {
    fn default() -> Self {
        TerminalFace {
            phrase: String::new(),
            date: String::new(),
            palette: Palette::MONOCHROME,
            dirty: true,
        }
    }
}

impl WatchFace for TerminalFace {
    fn set_phrase(&mut self, phrase: &Phrase) {
        if self.phrase != phrase.as_str() {
            self.phrase = phrase.to_string();
            self.dirty = true;
        }
    }

    fn set_date(&mut self, date: &str) {
        if self.date != date {
            self.date = date.to_string();
            self.dirty = true;
        }
    }

    fn set_palette(&mut self, palette: &Palette) {
        if self.palette != *palette {
            self.palette = *palette;
            self.dirty = true;
        }
    }
}

impl TerminalFace {
    /// Date, a rule, the phrase and its drop shadow, centred vertically.
    fn layout(&self, width: usize, height: usize) -> Vec<Row> {
        let blank = Row {
            text: String::new(),
            color: self.palette.foreground,
            bold: false,
        };
        let rule_width = self.phrase.chars().count().max(self.date.chars().count());
        let block = vec![
            Row {
                text: self.date.clone(),
                color: self.palette.foreground,
                bold: false,
            },
            Row {
                text: "─".repeat(rule_width),
                color: self.palette.foreground,
                bold: false,
            },
            Row {
                text: self.phrase.clone(),
                color: self.palette.foreground,
                bold: true,
            },
            Row {
                text: " ".to_string() + &"▀".repeat(self.phrase.chars().count()),
                color: self.palette.shadow,
                bold: false,
            },
        ];

        let top = height.saturating_sub(block.len()) / 2;
        let mut rows = vec![blank.clone(); top];
        rows.extend(block);
        rows.resize(height.max(rows.len()), blank);
        rows.into_iter()
            .map(|row| Row {
                text: format!("{:^width$}", row.text, width = width),
                ..row
            })
            .collect()
    }

    fn paint(&self, width: usize, height: usize) -> Vec<ColoredString> {
        let background = self.palette.background;
        self.layout(width, height)
            .into_iter()
            .map(|row| {
                let line = row
                    .text
                    .truecolor(row.color.red, row.color.green, row.color.blue)
                    .on_truecolor(background.red, background.green, background.blue);
                if row.bold {
                    line.bold()
                } else {
                    line
                }
            })
            .collect()
    }

    fn draw<W: Write>(&mut self, out: &mut W, width: usize, height: usize) -> io::Result<()> {
        for (y, line) in self.paint(width, height).into_iter().enumerate() {
            queue!(out, MoveTo(0, y as u16), Print(line))?;
        }
        out.flush()?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzy_weather_face::{map_temperature, ClockReading, PhraseGenerator};

    fn phrase(hour: u32, minute: u32) -> Phrase {
        PhraseGenerator::default().generate(ClockReading::new(hour, minute).unwrap())
    }

    #[test]
    fn setting_the_same_values_keeps_the_face_clean() {
        let mut face = TerminalFace::default();
        face.set_phrase(&phrase(3, 25));
        face.set_date("Sun 18 Oct");
        face.set_palette(&map_temperature(20));
        face.draw(&mut Vec::new(), 40, 10).unwrap();
        assert!(!face.dirty);

        face.set_phrase(&phrase(3, 25));
        face.set_date("Sun 18 Oct");
        face.set_palette(&map_temperature(20));
        assert!(!face.dirty);

        face.set_palette(&map_temperature(30));
        assert!(face.dirty);
    }

    #[test]
    fn layout_centres_the_phrase() {
        let mut face = TerminalFace::default();
        face.set_phrase(&phrase(3, 25));
        face.set_date("Sun 18 Oct");
        let rows = face.layout(40, 10);

        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| row.text.chars().count() == 40));
        let phrase_row = rows.iter().find(|row| row.bold).unwrap();
        assert_eq!(phrase_row.text.trim(), "twenty five past three");
        assert!(rows.iter().any(|row| row.text.trim() == "Sun 18 Oct"));
    }

    #[test]
    fn shadow_row_uses_the_shadow_color() {
        let mut face = TerminalFace::default();
        face.set_phrase(&phrase(9, 0));
        face.set_palette(&map_temperature(30));
        let rows = face.layout(30, 6);
        let shadow = rows.iter().find(|row| row.text.contains('▀')).unwrap();
        assert_eq!(shadow.color, map_temperature(30).shadow);
    }

    #[test]
    fn tiny_terminal_still_fits_the_block() {
        let face = TerminalFace::default();
        assert_eq!(face.layout(10, 2).len(), 4);
    }
}
