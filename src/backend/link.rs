//! SerialLink trait and the real serialport-backed implementation
//!
//! This module provides a common trait for the serial transport, enabling
//! both the real hardware link (via serialport) and a simulated link for
//! testing and the `mock-serial` feature.

use crate::config::READ_TIMEOUT_MS;
use crate::error::{Result, TorqueError};
use std::io::{Read, Write};
use std::time::Duration;

/// Unified interface for the serial transport
///
/// Implementations must be `Send` so the backend worker can own them on
/// its own thread. At most one port is open per link at a time; `connect`
/// on an already-open link replaces the previous port.
pub trait SerialLink: Send {
    /// Open the named port at the given baud rate
    fn connect(&mut self, port: &str, baud: u32) -> Result<()>;

    /// Close the port, if open
    fn disconnect(&mut self);

    /// Whether a port is currently open
    fn is_connected(&self) -> bool;

    /// Read whatever bytes are buffered right now, without waiting for
    /// a newline. Returns an empty vector when nothing is pending.
    fn read_available(&mut self) -> Result<Vec<u8>>;

    /// Send one newline-terminated command
    fn send_line(&mut self, text: &str) -> Result<()>;
}

/// The real serial link over a USB/UART device
#[derive(Default)]
pub struct UsbSerialLink {
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl UsbSerialLink {
    /// Create a link with no port open
    pub fn new() -> Self {
        Self { port: None }
    }
}

impl SerialLink for UsbSerialLink {
    fn connect(&mut self, port: &str, baud: u32) -> Result<()> {
        let opened = serialport::new(port, baud)
            .timeout(Duration::from_millis(READ_TIMEOUT_MS))
            .open()?;
        self.port = Some(opened);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.port = None;
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        let port = self.port.as_mut().ok_or(TorqueError::NotConnected)?;

        let pending = port.bytes_to_read()?;
        if pending == 0 {
            return Ok(Vec::new());
        }

        let mut buf = vec![0u8; pending as usize];
        let n = port.read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    fn send_line(&mut self, text: &str) -> Result<()> {
        let port = self.port.as_mut().ok_or(TorqueError::NotConnected)?;
        port.write_all(text.as_bytes())?;
        port.write_all(b"\n")?;
        port.flush()?;
        Ok(())
    }
}

/// List available serial port paths
pub fn list_ports() -> Vec<String> {
    let mut ports: Vec<String> = match serialport::available_ports() {
        Ok(infos) => infos.into_iter().map(|p| p.port_name).collect(),
        Err(e) => {
            tracing::warn!("Failed to enumerate serial ports: {}", e);
            Vec::new()
        }
    };
    ports.sort();

    #[cfg(feature = "mock-serial")]
    ports.push(crate::backend::mock_link::MOCK_PORT_NAME.to_string());

    ports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_without_port_is_not_connected() {
        let mut link = UsbSerialLink::new();
        assert!(!link.is_connected());
        assert!(matches!(
            link.read_available(),
            Err(TorqueError::NotConnected)
        ));
    }

    #[test]
    fn test_send_without_port_is_not_connected() {
        let mut link = UsbSerialLink::new();
        assert!(matches!(
            link.send_line("tare"),
            Err(TorqueError::NotConnected)
        ));
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        let mut link = UsbSerialLink::new();
        link.disconnect();
        link.disconnect();
        assert!(!link.is_connected());
    }
}
