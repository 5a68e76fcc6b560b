//! Weather transports for running the face away from a phone.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use crate::weather::{SyncTuple, TransportError, WeatherRequest, WeatherTransport};

/// Answers every request with the same reading.
#[derive(Debug)]
pub struct FixedTransport {
    celsius: u8,
    inbox: VecDeque<Result<SyncTuple, TransportError>>,
}

impl FixedTransport {
    pub fn new(celsius: u8) -> Self {
        FixedTransport {
            celsius,
            inbox: VecDeque::new(),
        }
    }
}

impl WeatherTransport for FixedTransport {
    fn send(&mut self, _request: WeatherRequest) -> Result<(), TransportError> {
        self.inbox.push_back(Ok(SyncTuple::temperature(self.celsius)));
        Ok(())
    }

    fn poll(&mut self) -> Option<Result<SyncTuple, TransportError>> {
        self.inbox.pop_front()
    }
}

/// Answers each request with the reading currently stored in a text file,
/// so another process can keep the file up to date.
#[derive(Debug)]
pub struct FileTransport {
    path: PathBuf,
    inbox: VecDeque<Result<SyncTuple, TransportError>>,
}

impl FileTransport {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileTransport {
            path: path.into(),
            inbox: VecDeque::new(),
        }
    }

    fn read(&self) -> Result<SyncTuple, TransportError> {
        let text = fs::read_to_string(&self.path)?;
        let text = text.trim();
        text.parse::<u8>()
            .map(SyncTuple::temperature)
            .map_err(|_| TransportError::Malformed(format!("'{}' is not a 0-255 reading", text)))
    }
}

impl WeatherTransport for FileTransport {
    // The reply is queued even when reading fails; the failure shows up as a
    // sync error, like a phone that could not fetch the weather.
    fn send(&mut self, _request: WeatherRequest) -> Result<(), TransportError> {
        let reply = self.read();
        self.inbox.push_back(reply);
        Ok(())
    }

    fn poll(&mut self) -> Option<Result<SyncTuple, TransportError>> {
        self.inbox.pop_front()
    }
}

/// Never answers. Used when no weather source is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTransport;

impl WeatherTransport for SilentTransport {
    fn send(&mut self, _request: WeatherRequest) -> Result<(), TransportError> {
        Err(TransportError::Send("no weather source configured".to_string()))
    }

    fn poll(&mut self) -> Option<Result<SyncTuple, TransportError>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reading_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("temperature");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn fixed_transport_answers_once_per_request() {
        let mut transport = FixedTransport::new(21);
        assert!(transport.poll().is_none());
        transport.send(WeatherRequest::default()).unwrap();
        transport.send(WeatherRequest::default()).unwrap();
        assert_eq!(transport.poll().unwrap().unwrap(), SyncTuple::temperature(21));
        assert_eq!(transport.poll().unwrap().unwrap(), SyncTuple::temperature(21));
        assert!(transport.poll().is_none());
    }

    #[test]
    fn file_transport_reads_the_current_value() {
        let dir = TempDir::new().unwrap();
        let path = reading_file(&dir, "17\n");
        let mut transport = FileTransport::new(&path);
        transport.send(WeatherRequest::default()).unwrap();
        fs::write(&path, "4").unwrap();
        transport.send(WeatherRequest::default()).unwrap();
        assert_eq!(transport.poll().unwrap().unwrap(), SyncTuple::temperature(17));
        assert_eq!(transport.poll().unwrap().unwrap(), SyncTuple::temperature(4));
    }

    #[test]
    fn file_transport_reports_bad_contents_as_reply_errors() {
        let dir = TempDir::new().unwrap();
        let mut transport = FileTransport::new(reading_file(&dir, "-5"));
        assert!(transport.send(WeatherRequest::default()).is_ok());
        match transport.poll() {
            Some(Err(TransportError::Malformed(_))) => {}
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn file_transport_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut transport = FileTransport::new(dir.path().join("missing"));
        transport.send(WeatherRequest::default()).unwrap();
        assert!(matches!(transport.poll(), Some(Err(TransportError::Io(_)))));
    }

    #[test]
    fn silent_transport_fails_sends() {
        let mut transport = SilentTransport;
        assert!(transport.send(WeatherRequest::default()).is_err());
        assert!(transport.poll().is_none());
    }
}
