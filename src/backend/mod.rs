//! Serial acquisition backend
//!
//! The backend owns the serial port and runs on its own thread. The UI
//! communicates with it exclusively through bounded channels: commands go
//! down, messages come back up. The UI side holds a [`FrontendReceiver`].

pub mod link;
pub mod mock_link;
pub mod parser;
pub mod worker;

use crate::types::{ConnectionStatus, Sample};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use link::{list_ports, SerialLink, UsbSerialLink};
pub use worker::SerialWorker;

/// Commands the UI sends to the worker
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Connect { port: String, baud: u32 },
    Disconnect,
    /// Write a text command followed by a newline to the device
    SendCommand(String),
    RefreshPorts,
    /// Limit sample magnitude to the given value, `None` disables clamping
    SetClamp(Option<i64>),
    Shutdown,
}

/// Messages the worker sends back to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum BackendMessage {
    ConnectionStatus(ConnectionStatus),
    ConnectionError(String),
    Sample(Sample),
    /// A complete trimmed line as received from the device
    RawLine(String),
    PortList(Vec<String>),
    SendError(String),
    Shutdown,
}

/// UI-side handle to the backend channels
pub struct FrontendReceiver {
    command_tx: Sender<BackendCommand>,
    message_rx: Receiver<BackendMessage>,
    running: Arc<AtomicBool>,
}

impl FrontendReceiver {
    /// Pull all messages the worker produced since the last frame
    pub fn drain_messages(&self) -> Vec<BackendMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.message_rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    pub fn send_command(&self, command: BackendCommand) {
        if let Err(err) = self.command_tx.try_send(command) {
            tracing::warn!(error = %err, "failed to send backend command");
        }
    }

    pub fn connect(&self, port: String, baud: u32) {
        self.send_command(BackendCommand::Connect { port, baud });
    }

    pub fn disconnect(&self) {
        self.send_command(BackendCommand::Disconnect);
    }

    pub fn send_device_command(&self, text: String) {
        self.send_command(BackendCommand::SendCommand(text));
    }

    pub fn refresh_ports(&self) {
        self.send_command(BackendCommand::RefreshPorts);
    }

    pub fn set_clamp(&self, limit: Option<i64>) {
        self.send_command(BackendCommand::SetClamp(limit));
    }

    /// Signal the worker to stop. Safe to call more than once.
    pub fn shutdown(&self) {
        self.running.store(false, Ordering::Relaxed);
        let _ = self.command_tx.try_send(BackendCommand::Shutdown);
    }
}

/// Owns the worker half of the channel pair until it is moved onto a thread
pub struct SerialBackend {
    worker: SerialWorker,
    running: Arc<AtomicBool>,
}

impl SerialBackend {
    /// Build the worker and its UI-side handle, wired with bounded channels
    pub fn new() -> (Self, FrontendReceiver) {
        Self::with_link(Box::new(UsbSerialLink::new()))
    }

    /// Build the pair around an explicit link, used by integration tests
    pub fn with_link(link: Box<dyn SerialLink>) -> (Self, FrontendReceiver) {
        let (command_tx, command_rx) = crossbeam_channel::bounded(256);
        let (message_tx, message_rx) = crossbeam_channel::bounded(10_000);
        let running = Arc::new(AtomicBool::new(true));

        let worker = SerialWorker::with_link(command_rx, message_tx, running.clone(), link);
        let frontend = FrontendReceiver {
            command_tx,
            message_rx,
            running: running.clone(),
        };
        (Self { worker, running }, frontend)
    }

    /// Run the worker loop, blocking the current thread until shutdown
    pub fn run(mut self) {
        self.worker.run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empty_when_no_messages() {
        let (_backend, frontend) = SerialBackend::new();
        assert!(frontend.drain_messages().is_empty());
    }

    #[test]
    fn test_shutdown_clears_running_flag() {
        let (backend, frontend) = SerialBackend::new();
        frontend.shutdown();
        assert!(!backend.running.load(Ordering::Relaxed));
    }
}
