/// Transient user notifications
///
/// A single toast at a time; a newer notice replaces the current one and
/// every notice disappears after `NOTICE_LIFETIME`.

use std::time::{Duration, Instant};

pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    message: String,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing whatever is on screen
    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::info!("🔔 {}", message);
        self.current = Some(Notice {
            message,
            shown_at: now,
        });
    }

    /// Drop the current notice once it has been visible long enough
    pub fn tick(&mut self, now: Instant) {
        if let Some(notice) = &self.current {
            if now.saturating_duration_since(notice.shown_at) >= NOTICE_LIFETIME {
                self.current = None;
            }
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|notice| notice.message.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires() {
        let start = Instant::now();
        let mut notifier = Notifier::new();
        notifier.push("Proyecto guardado", start);

        notifier.tick(start + Duration::from_millis(2_999));
        assert_eq!(notifier.message(), Some("Proyecto guardado"));

        notifier.tick(start + NOTICE_LIFETIME);
        assert!(!notifier.is_active());
    }

    #[test]
    fn test_newer_notice_replaces_and_restarts_lifetime() {
        let start = Instant::now();
        let mut notifier = Notifier::new();
        notifier.push("Narrativa generada", start);
        notifier.push("Eliminado", start + Duration::from_secs(2));

        notifier.tick(start + Duration::from_secs(4));
        assert_eq!(notifier.message(), Some("Eliminado"));
    }
}
