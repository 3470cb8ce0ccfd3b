//! Transient toast notifications
//!
//! Notifications accumulate in a queue and are drawn in the lower-right
//! corner of the viewport. Each entry expires after a fixed lifetime.

use std::time::{Duration, Instant};

use egui::{Align2, Color32, Context};

const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotifyLevel {
    fn color(&self) -> Color32 {
        match self {
            NotifyLevel::Info => Color32::from_rgb(90, 150, 250),
            NotifyLevel::Success => Color32::from_rgb(80, 200, 120),
            NotifyLevel::Warning => Color32::from_rgb(240, 180, 60),
            NotifyLevel::Error => Color32::from_rgb(230, 80, 80),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotifyLevel,
    pub text: String,
    created: Instant,
}

/// Queue of pending notifications
#[derive(Debug, Default)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: NotifyLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            NotifyLevel::Error => tracing::warn!(text, "notification"),
            _ => tracing::debug!(text, "notification"),
        }
        self.entries.push(Notification {
            level,
            text,
            created: Instant::now(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NotifyLevel::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NotifyLevel::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(NotifyLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NotifyLevel::Error, text);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Drop entries older than the notification lifetime
    pub fn retain_fresh(&mut self) {
        self.entries
            .retain(|n| n.created.elapsed() < NOTIFICATION_TTL);
    }

    /// Draw pending notifications and expire old ones
    pub fn show(&mut self, ctx: &Context) {
        self.retain_fresh();
        if self.entries.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notifications"))
            .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for entry in &self.entries {
                    egui::Frame::popup(ui.style())
                        .fill(ui.visuals().extreme_bg_color)
                        .show(ui, |ui| {
                            ui.colored_label(entry.level.color(), &entry.text);
                        });
                }
            });

        // keep repainting so entries fade out on time
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_accumulates() {
        let mut notifications = Notifications::new();
        notifications.info("a");
        notifications.error("b");
        assert_eq!(notifications.len(), 2);
    }

    #[test]
    fn test_fresh_entries_survive_retain() {
        let mut notifications = Notifications::new();
        notifications.warning("still here");
        notifications.retain_fresh();
        assert_eq!(notifications.len(), 1);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let mut notifications = Notifications::new();
        notifications.info("old");
        notifications.entries[0].created = Instant::now() - NOTIFICATION_TTL - Duration::from_secs(1);
        notifications.retain_fresh();
        assert!(notifications.is_empty());
    }
}
