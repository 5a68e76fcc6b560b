//! Event adapters between the host and the core.
//!
//! The host owns the screen, the clock and the message layer. It calls into
//! [`Watch`] from a single thread: once per minute, once per inbound message,
//! and once per tap gesture. Each call runs to completion and hands finished
//! values to the [`WatchFace`].

use chrono::{DateTime, Datelike, Local, Timelike};
use tracing::info;

use crate::locale::{HourStyle, Locale, Rounding};
use crate::phrase::{date_line, ClockReading, Phrase, PhraseGenerator};
use crate::theme::{ColorMode, Palette};
use crate::weather::{
    is_request_minute, SyncTuple, TransportError, WeatherSampleChannel, WeatherTransport,
};

/// The display. Setting the same value twice must not change what is shown.
pub trait WatchFace {
    fn set_phrase(&mut self, phrase: &Phrase);

    fn set_date(&mut self, date: &str);

    fn set_palette(&mut self, palette: &Palette);
}

/// Fixed for the lifetime of a [`Watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchSettings {
    pub locale: Locale,
    pub hour_style: HourStyle,
    pub rounding: Rounding,
    pub color_mode: ColorMode,
    /// Shown before the first sample, and always in monochrome mode.
    pub idle_palette: Palette,
}

#[derive(Debug, Clone)]
pub struct Watch {
    generator: PhraseGenerator,
    channel: WeatherSampleChannel,
    last_tick: Option<ClockReading>,
}

impl Watch {
    pub fn new(settings: WatchSettings) -> Self {
        Watch {
            generator: PhraseGenerator::new(
                settings.locale,
                settings.hour_style,
                settings.rounding,
            ),
            channel: WeatherSampleChannel::new(settings.color_mode)
                .with_idle_palette(settings.idle_palette),
            last_tick: None,
        }
    }

    pub fn channel(&self) -> &WeatherSampleChannel {
        &self.channel
    }

    /// Paints the initial palette and the current time, then asks for the
    /// weather once.
    pub fn start<N, F, T>(&mut self, now: &N, face: &mut F, transport: &mut T)
    where
        N: Datelike + Timelike,
        F: WatchFace,
        T: WeatherTransport,
    {
        info!(
            locale = %self.generator.locale,
            hour_style = ?self.generator.hour_style,
            rounding = ?self.generator.rounding,
            "watch starting"
        );
        face.set_palette(&self.channel.palette());
        let requested = self.on_tick(ClockReading::from_time(now), now, face, transport);
        if !requested {
            self.channel.request(transport);
        }
    }

    /// Minute tick. Returns whether a weather request went out.
    ///
    /// A reading seen on the previous tick is redrawn but never requests
    /// the weather a second time.
    pub fn on_tick<D, F, T>(
        &mut self,
        reading: ClockReading,
        date: &D,
        face: &mut F,
        transport: &mut T,
    ) -> bool
    where
        D: Datelike,
        F: WatchFace,
        T: WeatherTransport,
    {
        face.set_phrase(&self.generator.generate(reading));
        face.set_date(&date_line(date));

        let fresh = self.last_tick != Some(reading);
        self.last_tick = Some(reading);
        fresh && is_request_minute(reading.minute()) && self.channel.request(transport)
    }

    /// Tap gesture: ask for the weather now.
    pub fn on_tap<T: WeatherTransport>(&mut self, transport: &mut T) -> bool {
        self.channel.request(transport)
    }

    pub fn on_inbound<F: WatchFace>(
        &mut self,
        inbound: Result<SyncTuple, TransportError>,
        observed_at: DateTime<Local>,
        face: &mut F,
    ) {
        if let Some(palette) = self.channel.receive(inbound, observed_at) {
            face.set_palette(&palette);
        }
    }

    /// Delivers everything the transport has received. Returns how many
    /// messages were handled.
    pub fn pump<F, T>(
        &mut self,
        transport: &mut T,
        observed_at: DateTime<Local>,
        face: &mut F,
    ) -> usize
    where
        F: WatchFace,
        T: WeatherTransport,
    {
        let mut handled = 0;
        while let Some(inbound) = transport.poll() {
            self.on_inbound(inbound, observed_at, face);
            handled += 1;
        }
        handled
    }

    /// Re-applies the palette of the last known sample.
    pub fn redisplay<F: WatchFace>(&self, face: &mut F) {
        face.set_palette(&self.channel.palette());
    }
}
