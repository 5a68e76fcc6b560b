//! Weather samples: when to ask for one, and what to do when one arrives.

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::theme::{ColorMode, Palette, ThresholdTable};

/// Key of the outbound request tuple.
pub const REQUEST_KEY: u32 = 1;
/// Value sent under [`REQUEST_KEY`]; the phone only checks that it is there.
pub const REQUEST_MARKER: i32 = 1;
/// Key the phone answers under.
pub const TEMPERATURE_KEY: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("could not open an outbound message")]
    OutboxUnavailable,

    #[error("send failed: {0}")]
    Send(String),

    #[error("sync error (dictionary result {dictionary}, app message result {app_message})")]
    Sync { dictionary: i32, app_message: i32 },

    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherRequest {
    pub key: u32,
    pub value: i32,
}

impl Default for WeatherRequest {
    fn default() -> Self {
        WeatherRequest {
            key: REQUEST_KEY,
            value: REQUEST_MARKER,
        }
    }
}

/// One key/value pair pushed by the phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTuple {
    pub key: u32,
    pub value: u8,
}

impl SyncTuple {
    pub fn temperature(celsius: u8) -> Self {
        SyncTuple {
            key: TEMPERATURE_KEY,
            value: celsius,
        }
    }
}

/// Message passing to whatever supplies the weather.
///
/// Sending never waits for the answer. Answers, and errors about them, are
/// collected later through [`WeatherTransport::poll`].
pub trait WeatherTransport {
    fn send(&mut self, request: WeatherRequest) -> Result<(), TransportError>;

    fn poll(&mut self) -> Option<Result<SyncTuple, TransportError>>;
}

impl<T: WeatherTransport + ?Sized> WeatherTransport for Box<T> {
    fn send(&mut self, request: WeatherRequest) -> Result<(), TransportError> {
        (**self).send(request)
    }

    fn poll(&mut self) -> Option<Result<SyncTuple, TransportError>> {
        (**self).poll()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureSample {
    pub celsius: i32,
    pub observed_at: DateTime<Local>,
}

/// Requests go out on the hour and on the half hour.
pub fn is_request_minute(minute: u8) -> bool {
    minute % 30 == 0
}

/// Holds the last known sample and the palette derived from it.
#[derive(Debug, Clone)]
pub struct WeatherSampleChannel {
    table: ThresholdTable<'static>,
    mode: ColorMode,
    idle: Palette,
    last: Option<TemperatureSample>,
    palette: Palette,
}

impl WeatherSampleChannel {
    pub fn new(mode: ColorMode) -> Self {
        WeatherSampleChannel {
            table: ThresholdTable::STANDARD,
            mode,
            idle: Palette::MONOCHROME,
            last: None,
            palette: Palette::MONOCHROME,
        }
    }

    /// Palette shown until the first sample, and for every sample in
    /// monochrome mode.
    pub fn with_idle_palette(self, idle: Palette) -> Self {
        WeatherSampleChannel {
            idle,
            palette: self.last.map_or(idle, |_| self.palette),
            ..self
        }
    }

    pub fn last_sample(&self) -> Option<&TemperatureSample> {
        self.last.as_ref()
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Fire and forget. Returns whether the request left.
    pub fn request<T: WeatherTransport>(&self, transport: &mut T) -> bool {
        match transport.send(WeatherRequest::default()) {
            Ok(()) => {
                debug!("weather requested");
                true
            }
            Err(error) => {
                warn!(%error, "weather request failed");
                false
            }
        }
    }

    /// Applies one inbound message. Returns the new palette when the
    /// message carried a temperature.
    pub fn receive(
        &mut self,
        inbound: Result<SyncTuple, TransportError>,
        observed_at: DateTime<Local>,
    ) -> Option<Palette> {
        let tuple = match inbound {
            Ok(tuple) => tuple,
            Err(error) => {
                warn!(%error, "weather sync error");
                return None;
            }
        };
        if tuple.key != TEMPERATURE_KEY {
            debug!(key = tuple.key, "ignoring unknown sync key");
            return None;
        }
        Some(self.apply(TemperatureSample {
            celsius: i32::from(tuple.value),
            observed_at,
        }))
    }

    fn apply(&mut self, sample: TemperatureSample) -> Palette {
        let bracket = self.table.bracket(sample.celsius);
        let palette = self.mode.palette(bracket, self.idle);
        debug!(
            celsius = sample.celsius,
            ?bracket,
            background = %palette.background,
            foreground = %palette.foreground,
            shadow = %palette.shadow,
            "setting temperature palette"
        );
        self.last = Some(sample);
        self.palette = palette;
        palette
    }
}
