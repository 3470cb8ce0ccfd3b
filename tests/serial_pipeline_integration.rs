//! End-to-end tests of the serial backend against a mock link

use std::time::{Duration, Instant};

use torque_wizard::backend::mock_link::MockSerialLink;
use torque_wizard::backend::{BackendMessage, FrontendReceiver, SerialBackend};
use torque_wizard::types::ConnectionStatus;

fn spawn_backend(link: MockSerialLink) -> (FrontendReceiver, std::thread::JoinHandle<()>) {
    let (backend, frontend) = SerialBackend::with_link(Box::new(link));
    let handle = std::thread::spawn(move || backend.run());
    (frontend, handle)
}

/// Drain messages until the predicate matches one, or the timeout expires
fn wait_for(
    frontend: &FrontendReceiver,
    timeout: Duration,
    mut predicate: impl FnMut(&BackendMessage) -> bool,
) -> Vec<BackendMessage> {
    let deadline = Instant::now() + timeout;
    let mut seen = Vec::new();
    loop {
        for message in frontend.drain_messages() {
            let hit = predicate(&message);
            seen.push(message);
            if hit {
                return seen;
            }
        }
        if Instant::now() > deadline {
            return seen;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn samples_flow_from_link_to_frontend() {
    let link = MockSerialLink::new();
    let (frontend, handle) = spawn_backend(link.clone());

    frontend.connect("mock".to_string(), 115_200);
    wait_for(&frontend, Duration::from_secs(2), |m| {
        matches!(m, BackendMessage::ConnectionStatus(ConnectionStatus::Connected))
    });

    link.feed_line("force: 42 mN");
    link.feed_line("ready");
    link.feed_line("force: -7");

    let seen = wait_for(&frontend, Duration::from_secs(2), |m| {
        matches!(m, BackendMessage::Sample(s) if s.value == -7)
    });

    let values: Vec<i64> = seen
        .iter()
        .filter_map(|m| match m {
            BackendMessage::Sample(s) => Some(s.value),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![42, -7]);

    let raw: Vec<&str> = seen
        .iter()
        .filter_map(|m| match m {
            BackendMessage::RawLine(l) => Some(l.as_str()),
            _ => None,
        })
        .collect();
    assert!(raw.contains(&"ready"));

    frontend.shutdown();
    handle.join().unwrap();
}

#[test]
fn failed_connect_reports_single_error() {
    let link = MockSerialLink::new();
    link.fail_next_connect();
    let (frontend, handle) = spawn_backend(link);

    frontend.connect("missing".to_string(), 115_200);
    let seen = wait_for(&frontend, Duration::from_secs(2), |m| {
        matches!(m, BackendMessage::ConnectionError(_))
    });

    let errors = seen
        .iter()
        .filter(|m| matches!(m, BackendMessage::ConnectionError(_)))
        .count();
    assert_eq!(errors, 1);
    assert!(!seen
        .iter()
        .any(|m| matches!(m, BackendMessage::ConnectionStatus(ConnectionStatus::Connected))));

    frontend.shutdown();
    handle.join().unwrap();
}

#[test]
fn send_while_disconnected_is_rejected() {
    let link = MockSerialLink::new();
    let (frontend, handle) = spawn_backend(link.clone());

    frontend.send_device_command("tare".to_string());
    let seen = wait_for(&frontend, Duration::from_secs(2), |m| {
        matches!(m, BackendMessage::SendError(_))
    });

    assert!(seen
        .iter()
        .any(|m| matches!(m, BackendMessage::SendError(e) if e == "Not connected")));
    assert!(link.handle().lock().unwrap().sent.is_empty());

    frontend.shutdown();
    handle.join().unwrap();
}

#[test]
fn commands_reach_the_device_when_connected() {
    let link = MockSerialLink::new();
    let (frontend, handle) = spawn_backend(link.clone());

    frontend.connect("mock".to_string(), 115_200);
    wait_for(&frontend, Duration::from_secs(2), |m| {
        matches!(m, BackendMessage::ConnectionStatus(ConnectionStatus::Connected))
    });

    frontend.send_device_command("cal 500".to_string());

    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if !link.handle().lock().unwrap().sent.is_empty() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(link.handle().lock().unwrap().sent, vec!["cal 500"]);

    frontend.shutdown();
    handle.join().unwrap();
}

#[test]
fn shutdown_terminates_worker() {
    let link = MockSerialLink::new();
    let (frontend, handle) = spawn_backend(link);

    frontend.shutdown();
    handle.join().unwrap();

    let seen = frontend.drain_messages();
    assert!(seen.iter().any(|m| matches!(m, BackendMessage::Shutdown)));
}
