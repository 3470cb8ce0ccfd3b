//! Core data types for Torque Wizard
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing force samples and their storage.
//!
//! # Main Types
//!
//! - [`Sample`] - One timestamped force reading parsed from a serial line
//! - [`SampleWindow`] - Bounded ring buffer feeding the live plot
//! - [`SessionRecording`] - Unbounded per-session sample list, the source
//!   of truth for CSV export
//! - [`ConnectionStatus`] - Current state of the serial connection
//!
//! # Memory Management
//!
//! The live plot only ever needs the most recent [`WINDOW_CAPACITY`]
//! samples; older entries are evicted automatically. The session recording
//! is never trimmed and is cleared only when the user starts a new session.

use std::collections::VecDeque;

/// Maximum number of samples retained for the live plot
pub const WINDOW_CAPACITY: usize = 100;

/// A single force reading parsed from one serial line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the backend worker started
    pub timestamp: f64,
    /// Parsed integer force value
    pub value: i64,
}

impl Sample {
    /// Create a new sample
    pub fn new(timestamp: f64, value: i64) -> Self {
        Self { timestamp, value }
    }
}

/// Current state of the serial connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No port is open
    #[default]
    Disconnected,
    /// A port is open and being polled
    Connected,
    /// The last connection attempt failed
    Error,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
            ConnectionStatus::Connected => write!(f, "Connected"),
            ConnectionStatus::Error => write!(f, "Error"),
        }
    }
}

/// Bounded sliding window of recent samples for the live plot
///
/// Holds at most `capacity` samples in arrival order; pushing beyond
/// capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    points: VecDeque<Sample>,
    capacity: usize,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(WINDOW_CAPACITY)
    }
}

impl SampleWindow {
    /// Create a window with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if at capacity
    pub fn push(&mut self, sample: Sample) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(sample);
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of samples this window holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate samples oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.points.iter()
    }

    /// Samples as `[x, y]` pairs for egui_plot
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|s| [s.timestamp, s.value as f64])
            .collect()
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Unbounded ordered list of every sample parsed this session
///
/// This is what CSV export serializes; it grows independently of the
/// live window's eviction.
#[derive(Debug, Clone, Default)]
pub struct SessionRecording {
    samples: Vec<Sample>,
}

impl SessionRecording {
    /// Create an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample in arrival order
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All recorded samples in arrival order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Recorded values in arrival order
    pub fn values(&self) -> Vec<i64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Drop all recorded samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
