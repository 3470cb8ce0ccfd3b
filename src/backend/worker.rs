//! Serial polling worker
//!
//! Runs on a dedicated thread, polling the serial link at a fixed rate and
//! translating raw bytes into [`BackendMessage`]s for the UI thread.

use crate::backend::link::{list_ports, SerialLink, UsbSerialLink};
use crate::backend::parser::{clamp_symmetric, decode_line, extract_int};
use crate::backend::{BackendCommand, BackendMessage};
use crate::config::POLL_RATE_HZ;
use crate::types::{ConnectionStatus, Sample};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Most bytes kept while waiting for a line terminator. A device
/// streaming at a mismatched baud never produces a newline, so older
/// bytes are dropped rather than buffered forever.
const RESIDUAL_CAP: usize = 8 * 1024;

pub struct SerialWorker {
    command_rx: Receiver<BackendCommand>,
    message_tx: Sender<BackendMessage>,
    running: Arc<AtomicBool>,
    link: Box<dyn SerialLink>,
    status: ConnectionStatus,
    clamp: Option<i64>,
    /// Bytes of a partially received line, carried across polls
    residual: Vec<u8>,
    /// Whether the held link was swapped for the simulated device
    #[cfg(feature = "mock-serial")]
    using_mock_port: bool,
    start_time: Instant,
    last_poll_time: Instant,
}

impl SerialWorker {
    pub fn new(
        command_rx: Receiver<BackendCommand>,
        message_tx: Sender<BackendMessage>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self::with_link(command_rx, message_tx, running, Box::new(UsbSerialLink::new()))
    }

    /// Construct the worker around an explicit link implementation
    pub fn with_link(
        command_rx: Receiver<BackendCommand>,
        message_tx: Sender<BackendMessage>,
        running: Arc<AtomicBool>,
        link: Box<dyn SerialLink>,
    ) -> Self {
        Self {
            command_rx,
            message_tx,
            running,
            link,
            status: ConnectionStatus::Disconnected,
            clamp: None,
            residual: Vec::new(),
            #[cfg(feature = "mock-serial")]
            using_mock_port: false,
            start_time: Instant::now(),
            last_poll_time: Instant::now(),
        }
    }

    /// Main worker loop, returns after a Shutdown command or channel loss
    pub fn run(&mut self) {
        tracing::info!("serial worker started");
        self.send_port_list();

        while self.running.load(Ordering::Relaxed) {
            if !self.process_commands() {
                break;
            }

            if self.link.is_connected() {
                self.poll_serial();
            }

            self.rate_limit();
        }

        self.link.disconnect();
        let _ = self.message_tx.send(BackendMessage::Shutdown);
        tracing::info!("serial worker stopped");
    }

    /// Drain pending commands. Returns false when the loop should exit.
    fn process_commands(&mut self) -> bool {
        loop {
            match self.command_rx.try_recv() {
                Ok(command) => {
                    if !self.handle_command(command) {
                        return false;
                    }
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("command channel closed, stopping worker");
                    return false;
                }
            }
        }
    }

    fn handle_command(&mut self, command: BackendCommand) -> bool {
        match command {
            BackendCommand::Connect { port, baud } => self.connect(&port, baud),
            BackendCommand::Disconnect => self.disconnect(),
            BackendCommand::SendCommand(text) => self.send_command(&text),
            BackendCommand::RefreshPorts => self.send_port_list(),
            BackendCommand::SetClamp(limit) => self.clamp = limit,
            BackendCommand::Shutdown => {
                self.running.store(false, Ordering::Relaxed);
                return false;
            }
        }
        true
    }

    fn connect(&mut self, port: &str, baud: u32) {
        self.link.disconnect();
        self.residual.clear();

        // the simulated device needs its own link implementation; any
        // other port keeps whatever link the worker was built with
        #[cfg(feature = "mock-serial")]
        {
            use crate::backend::mock_link::{MockSerialLink, MOCK_PORT_NAME};
            if port == MOCK_PORT_NAME {
                self.link = Box::new(MockSerialLink::simulated());
                self.using_mock_port = true;
            } else if self.using_mock_port {
                self.link = Box::new(UsbSerialLink::new());
                self.using_mock_port = false;
            }
        }

        match self.link.connect(port, baud) {
            Ok(()) => {
                tracing::info!(port, baud, "serial port opened");
                self.status = ConnectionStatus::Connected;
                self.start_time = Instant::now();
                self.send_message(BackendMessage::ConnectionStatus(self.status));
            }
            Err(err) => {
                tracing::warn!(port, baud, error = %err, "failed to open serial port");
                self.status = ConnectionStatus::Disconnected;
                self.send_message(BackendMessage::ConnectionError(err.to_string()));
                self.send_message(BackendMessage::ConnectionStatus(self.status));
            }
        }
    }

    fn disconnect(&mut self) {
        if self.link.is_connected() {
            self.link.disconnect();
            tracing::info!("serial port closed");
        }
        self.residual.clear();
        self.status = ConnectionStatus::Disconnected;
        self.send_message(BackendMessage::ConnectionStatus(self.status));
    }

    fn send_command(&mut self, text: &str) {
        if !self.link.is_connected() {
            self.send_message(BackendMessage::SendError("Not connected".to_string()));
            return;
        }
        if let Err(err) = self.link.send_line(text) {
            tracing::warn!(error = %err, "failed to send command");
            self.send_message(BackendMessage::SendError(err.to_string()));
        }
    }

    fn send_port_list(&mut self) {
        let ports = list_ports();
        self.send_message(BackendMessage::PortList(ports));
    }

    /// Read whatever the device has produced and emit complete lines
    fn poll_serial(&mut self) {
        let bytes = match self.link.read_available() {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "serial read failed, disconnecting");
                self.link.disconnect();
                self.status = ConnectionStatus::Error;
                self.send_message(BackendMessage::ConnectionError(err.to_string()));
                self.send_message(BackendMessage::ConnectionStatus(self.status));
                return;
            }
        };

        if bytes.is_empty() {
            return;
        }

        self.residual.extend_from_slice(&bytes);
        while let Some(pos) = self.residual.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.residual.drain(..=pos).collect();
            self.handle_line(&line);
        }

        if self.residual.len() > RESIDUAL_CAP {
            let excess = self.residual.len() - RESIDUAL_CAP;
            self.residual.drain(..excess);
        }
    }

    fn handle_line(&mut self, raw: &[u8]) {
        let text = decode_line(raw);
        if text.is_empty() {
            return;
        }

        if let Some(value) = extract_int(&text) {
            let value = clamp_symmetric(value, self.clamp);
            let timestamp = self.start_time.elapsed().as_secs_f64();
            self.send_message(BackendMessage::Sample(Sample::new(timestamp, value)));
        }

        self.send_message(BackendMessage::RawLine(text));
    }

    /// Best-effort send. Dropping messages is preferable to blocking the
    /// poll loop when the UI falls behind.
    fn send_message(&self, message: BackendMessage) {
        if let Err(err) = self.message_tx.try_send(message) {
            tracing::trace!(error = %err, "dropping backend message");
        }
    }

    fn rate_limit(&mut self) {
        let period = Duration::from_secs_f64(1.0 / POLL_RATE_HZ as f64);
        let elapsed = self.last_poll_time.elapsed();
        if elapsed < period {
            std::thread::sleep(period - elapsed);
        }
        self.last_poll_time = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock_link::MockSerialLink;
    use crossbeam_channel::bounded;

    fn worker_with_mock() -> (
        SerialWorker,
        MockSerialLink,
        Sender<BackendCommand>,
        Receiver<BackendMessage>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(256);
        let (msg_tx, msg_rx) = bounded(10_000);
        let running = Arc::new(AtomicBool::new(true));
        let link = MockSerialLink::new();
        let worker = SerialWorker::with_link(cmd_rx, msg_tx, running, Box::new(link.clone()));
        (worker, link, cmd_tx, msg_rx)
    }

    fn drain(rx: &Receiver<BackendMessage>) -> Vec<BackendMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    #[test]
    fn test_connect_reports_status() {
        let (mut worker, _link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "mock".to_string(),
                baud: 115_200,
            })
            .unwrap();

        assert!(worker.process_commands());
        let messages = drain(&msg_rx);
        assert!(messages
            .iter()
            .any(|m| matches!(m, BackendMessage::ConnectionStatus(ConnectionStatus::Connected))));
    }

    #[test]
    fn test_failed_connect_sends_exactly_one_error() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        link.fail_next_connect();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "missing".to_string(),
                baud: 115_200,
            })
            .unwrap();

        assert!(worker.process_commands());
        let errors: Vec<_> = drain(&msg_rx)
            .into_iter()
            .filter(|m| matches!(m, BackendMessage::ConnectionError(_)))
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(worker.status, ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_failed_connect_reports_disconnected_status() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        link.fail_next_connect();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "missing".to_string(),
                baud: 115_200,
            })
            .unwrap();

        worker.process_commands();
        let messages = drain(&msg_rx);
        assert!(messages.iter().any(|m| matches!(
            m,
            BackendMessage::ConnectionStatus(ConnectionStatus::Disconnected)
        )));
    }

    #[test]
    fn test_read_failure_reports_error_status() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "mock".to_string(),
                baud: 115_200,
            })
            .unwrap();
        worker.process_commands();
        drain(&msg_rx);

        link.fail_reads();
        worker.poll_serial();

        let messages = drain(&msg_rx);
        assert!(messages
            .iter()
            .any(|m| matches!(m, BackendMessage::ConnectionError(_))));
        assert!(messages.iter().any(|m| matches!(
            m,
            BackendMessage::ConnectionStatus(ConnectionStatus::Error)
        )));
        assert!(!link.is_connected());
    }

    #[test]
    fn test_residual_bounded_without_newline() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "mock".to_string(),
                baud: 115_200,
            })
            .unwrap();
        worker.process_commands();
        drain(&msg_rx);

        // garbage from a mismatched baud rate never terminates a line
        link.feed_bytes(&vec![0xFFu8; 3 * RESIDUAL_CAP]);
        worker.poll_serial();
        assert!(worker.residual.len() <= RESIDUAL_CAP);
        assert!(drain(&msg_rx).is_empty());
    }

    #[test]
    fn test_poll_emits_sample_and_raw_line() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "mock".to_string(),
                baud: 115_200,
            })
            .unwrap();
        worker.process_commands();
        drain(&msg_rx);

        link.feed_line("force: -37 mN");
        worker.poll_serial();

        let messages = drain(&msg_rx);
        assert!(messages
            .iter()
            .any(|m| matches!(m, BackendMessage::Sample(s) if s.value == -37)));
        assert!(messages
            .iter()
            .any(|m| matches!(m, BackendMessage::RawLine(l) if l == "force: -37 mN")));
    }

    #[test]
    fn test_partial_line_carried_across_polls() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "mock".to_string(),
                baud: 115_200,
            })
            .unwrap();
        worker.process_commands();
        drain(&msg_rx);

        link.feed_bytes(b"force: 1");
        worker.poll_serial();
        assert!(drain(&msg_rx).is_empty());

        link.feed_bytes(b"23\n");
        worker.poll_serial();
        let messages = drain(&msg_rx);
        assert!(messages
            .iter()
            .any(|m| matches!(m, BackendMessage::Sample(s) if s.value == 123)));
    }

    #[test]
    fn test_non_numeric_line_is_raw_only() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "mock".to_string(),
                baud: 115_200,
            })
            .unwrap();
        worker.process_commands();
        drain(&msg_rx);

        link.feed_line("ready");
        worker.poll_serial();

        let messages = drain(&msg_rx);
        assert!(!messages.iter().any(|m| matches!(m, BackendMessage::Sample(_))));
        assert!(messages
            .iter()
            .any(|m| matches!(m, BackendMessage::RawLine(l) if l == "ready")));
    }

    #[test]
    fn test_clamp_applied_to_samples() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx.send(BackendCommand::SetClamp(Some(100))).unwrap();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "mock".to_string(),
                baud: 115_200,
            })
            .unwrap();
        worker.process_commands();
        drain(&msg_rx);

        link.feed_line("force: 5000");
        worker.poll_serial();

        let messages = drain(&msg_rx);
        assert!(messages
            .iter()
            .any(|m| matches!(m, BackendMessage::Sample(s) if s.value == 100)));
    }

    #[test]
    fn test_send_while_disconnected_reports_error() {
        let (mut worker, _link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx
            .send(BackendCommand::SendCommand("tare".to_string()))
            .unwrap();

        worker.process_commands();
        let messages = drain(&msg_rx);
        assert!(messages
            .iter()
            .any(|m| matches!(m, BackendMessage::SendError(e) if e == "Not connected")));
    }

    #[cfg(feature = "mock-serial")]
    #[test]
    fn test_injected_link_kept_for_non_simulated_ports() {
        let (mut worker, link, cmd_tx, msg_rx) = worker_with_mock();
        cmd_tx
            .send(BackendCommand::Connect {
                port: "/dev/ttyUSB0".to_string(),
                baud: 115_200,
            })
            .unwrap();

        worker.process_commands();
        drain(&msg_rx);
        assert!(link.handle().lock().unwrap().connected);
    }

    #[test]
    fn test_shutdown_stops_processing() {
        let (mut worker, _link, cmd_tx, _msg_rx) = worker_with_mock();
        cmd_tx.send(BackendCommand::Shutdown).unwrap();
        assert!(!worker.process_commands());
        assert!(!worker.running.load(Ordering::Relaxed));
    }
}
