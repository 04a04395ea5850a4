//! # Notification Channel
//!
//! A single-slot toast.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  t=0.0  show("Venda registada!")    slot = A, timer restarts           │
//! │  t=1.5  show("Factura descarregada!") slot = B, timer restarts         │
//! │  t=4.4  current() → B                                                   │
//! │  t=4.5  current() → None            (3 s after the last show)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expiry is checked on read against `tokio::time::Instant`, so nothing is
//! spawned and a paused test clock drives it deterministically. Messages
//! never queue.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

/// Default visibility window.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    shown_at: Instant,
}

/// Shell-managed toast slot.
#[derive(Debug)]
pub struct Notifier {
    slot: Mutex<Option<Toast>>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Notifier {
            slot: Mutex::new(None),
            duration,
        }
    }

    /// Shows `message`, replacing any visible toast.
    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        info!(toast = %message, "Toast");
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(Toast {
            message,
            shown_at: Instant::now(),
        });
    }

    /// The visible message, if its window has not elapsed.
    pub fn current(&self) -> Option<String> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            Some(toast) if toast.shown_at.elapsed() < self.duration => Some(toast.message.clone()),
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    /// Hides the toast immediately.
    pub fn dismiss(&self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new(DEFAULT_TOAST_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_window() {
        let toast = Notifier::default();
        toast.show("Venda registada!");
        advance(Duration::from_millis(2_999)).await;
        assert_eq!(toast.current().as_deref(), Some("Venda registada!"));
        advance(Duration::from_millis(1)).await;
        assert_eq!(toast.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_restarts_timer() {
        let toast = Notifier::default();
        toast.show("A");
        advance(Duration::from_secs(2)).await;
        toast.show("B");
        advance(Duration::from_secs(2)).await;
        assert_eq!(toast.current().as_deref(), Some("B"));
        advance(Duration::from_secs(1)).await;
        assert_eq!(toast.current(), None);
    }

    #[test]
    fn test_dismiss() {
        let toast = Notifier::default();
        toast.show("A");
        toast.dismiss();
        assert_eq!(toast.current(), None);
    }
}
