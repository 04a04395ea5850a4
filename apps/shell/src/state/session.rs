//! # Session State
//!
//! Sign-in gate and display preferences.
//!
//! Any non-empty email and password pair is accepted; there is no account
//! store behind it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Shell-managed session state.
#[derive(Debug, Default)]
pub struct SessionState {
    user: Mutex<Option<String>>,
    dark_mode: AtomicBool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `email` as signed in.
    pub fn sign_in(&self, email: &str) {
        *self.user.lock().unwrap_or_else(|e| e.into_inner()) = Some(email.to_string());
    }

    pub fn sign_out(&self) {
        *self.user.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }

    /// Email of the signed-in user.
    pub fn user(&self) -> Option<String> {
        self.user.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.load(Ordering::Relaxed)
    }

    /// Flips the dark mode preference and returns the new value.
    pub fn toggle_dark_mode(&self) -> bool {
        !self.dark_mode.fetch_xor(true, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_out() {
        let session = SessionState::new();
        assert!(!session.is_signed_in());
        session.sign_in("caixa@pambala.ao");
        assert_eq!(session.user().as_deref(), Some("caixa@pambala.ao"));
        session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_dark_mode_toggle() {
        let session = SessionState::new();
        assert!(session.toggle_dark_mode());
        assert!(session.dark_mode());
        assert!(!session.toggle_dark_mode());
    }
}
