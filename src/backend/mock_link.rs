//! Simulated serial link for testing without hardware
//!
//! Mirrors the shape of [`UsbSerialLink`](crate::backend::link::UsbSerialLink)
//! but reads from an in-memory byte queue and records sent commands. With
//! the `mock-serial` feature the port list offers a simulated device that
//! generates a sine-shaped force trace.

use crate::backend::link::SerialLink;
use crate::error::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Port name under which the simulated device appears
pub const MOCK_PORT_NAME: &str = "mock";

/// Shared state behind a mock link, accessible from tests
#[derive(Debug, Default)]
pub struct MockSerialState {
    /// Bytes waiting to be read by the worker
    pub incoming: VecDeque<u8>,
    /// Commands sent through the link, newline stripped
    pub sent: Vec<String>,
    /// When set, the next connect attempt fails
    pub fail_connect: bool,
    /// When set, every read attempt fails
    pub fail_reads: bool,
    /// Whether a port is currently "open"
    pub connected: bool,
    /// When set, `read_available` synthesizes a sine-shaped sample line
    pub simulate: bool,
    /// Tick counter for the simulated trace
    pub tick: u64,
}

/// A serial link backed by in-memory queues
#[derive(Clone, Default)]
pub struct MockSerialLink {
    state: Arc<Mutex<MockSerialState>>,
}

impl MockSerialLink {
    /// Create a mock link with empty queues
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock link that generates a sine trace while connected
    pub fn simulated() -> Self {
        let link = Self::default();
        link.state.lock().unwrap().simulate = true;
        link
    }

    /// Handle to the shared state, for scripting from tests
    pub fn handle(&self) -> Arc<Mutex<MockSerialState>> {
        self.state.clone()
    }

    /// Queue one incoming line, newline appended
    pub fn feed_line(&self, line: &str) {
        let mut state = self.state.lock().unwrap();
        state.incoming.extend(line.as_bytes());
        state.incoming.push_back(b'\n');
    }

    /// Queue raw incoming bytes without a terminator
    pub fn feed_bytes(&self, bytes: &[u8]) {
        self.state.lock().unwrap().incoming.extend(bytes);
    }

    /// Make the next connect attempt fail
    pub fn fail_next_connect(&self) {
        self.state.lock().unwrap().fail_connect = true;
    }

    /// Make every read attempt fail, as an unplugged device would
    pub fn fail_reads(&self) {
        self.state.lock().unwrap().fail_reads = true;
    }
}

impl SerialLink for MockSerialLink {
    fn connect(&mut self, _port: &str, _baud: u32) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_connect {
            state.fail_connect = false;
            return Err(serialport::Error::new(
                serialport::ErrorKind::NoDevice,
                "simulated connect failure",
            )
            .into());
        }
        state.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) {
        self.state.lock().unwrap().connected = false;
    }

    fn is_connected(&self) -> bool {
        self.state.lock().unwrap().connected
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        let mut state = self.state.lock().unwrap();

        if state.fail_reads {
            return Err(serialport::Error::new(
                serialport::ErrorKind::NoDevice,
                "simulated read failure",
            )
            .into());
        }

        if state.simulate && state.connected {
            state.tick += 1;
            let value = (100.0 * (state.tick as f64 / 20.0).sin()).round() as i64;
            let line = format!("force: {}\n", value);
            state.incoming.extend(line.as_bytes());
        }

        Ok(state.incoming.drain(..).collect())
    }

    fn send_line(&mut self, text: &str) -> Result<()> {
        self.state.lock().unwrap().sent.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_and_read() {
        let mut link = MockSerialLink::new();
        link.connect("mock", 115_200).unwrap();
        link.feed_line("val: 42");

        let bytes = link.read_available().unwrap();
        assert_eq!(bytes, b"val: 42\n");
        assert!(link.read_available().unwrap().is_empty());
    }

    #[test]
    fn test_fail_next_connect_fails_once() {
        let mut link = MockSerialLink::new();
        link.fail_next_connect();
        assert!(link.connect("mock", 115_200).is_err());
        assert!(!link.is_connected());

        assert!(link.connect("mock", 115_200).is_ok());
        assert!(link.is_connected());
    }

    #[test]
    fn test_sent_commands_recorded() {
        let mut link = MockSerialLink::new();
        link.connect("mock", 115_200).unwrap();
        link.send_line("cal 500").unwrap();

        assert_eq!(link.handle().lock().unwrap().sent, vec!["cal 500"]);
    }

    #[test]
    fn test_simulated_trace_produces_parseable_lines() {
        let mut link = MockSerialLink::simulated();
        link.connect(MOCK_PORT_NAME, 115_200).unwrap();

        let bytes = link.read_available().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(crate::backend::parser::extract_int(text.trim()).is_some());
    }
}
