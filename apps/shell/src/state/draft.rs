//! # Draft State
//!
//! Holds the sale being composed on the `sales` and `manualSaleDetails`
//! screens.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  toggle   ┌──────────┐  next   ┌──────────┐  commit       │
//! │  │  Empty   │─────────► │ Editing  │───────► │ Details  │──────────┐    │
//! │  └──────────┘           └──────────┘ ◄───────└──────────┘          │    │
//! │       ▲                      │        back           │             │    │
//! │       │                      │ go <other view>       │             │    │
//! │       └──────────────────────┴───────────────────────┴─────────────┘    │
//! │                           reset(now)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is never held across an `.await`; every access is a closure.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use pambala_core::SaleDraft;

/// Current local date and time, truncated to the minute.
pub fn local_now() -> (NaiveDate, NaiveTime) {
    let now = Local::now().naive_local();
    let time = now
        .time()
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or_else(|| now.time());
    (now.date(), time)
}

/// Shell-managed draft state.
#[derive(Debug, Clone)]
pub struct DraftState {
    draft: Arc<Mutex<SaleDraft>>,
}

impl DraftState {
    /// Creates an empty draft stamped with the current time.
    pub fn new() -> Self {
        let (date, time) = local_now();
        DraftState {
            draft: Arc::new(Mutex::new(SaleDraft::new(date, time))),
        }
    }

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SaleDraft) -> R,
    {
        let draft = self.draft.lock().unwrap_or_else(|e| e.into_inner());
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SaleDraft) -> R,
    {
        let mut draft = self.draft.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut draft)
    }

    /// Resets the draft to defaults stamped with the current time.
    pub fn reset(&self) {
        let (date, time) = local_now();
        self.with_draft_mut(|d| d.reset(date, time));
    }
}

impl Default for DraftState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_selection() {
        let state = DraftState::new();
        state.with_draft_mut(|d| {
            d.toggle("1");
            d.set_quantity("1", 4);
        });
        assert_eq!(state.with_draft(|d| d.quantity("1")), 4);

        state.reset();
        assert!(state.with_draft(SaleDraft::is_empty));
        assert_eq!(state.with_draft(|d| d.quantity("1")), 1);
    }

    #[test]
    fn test_local_now_has_no_seconds() {
        let (_, time) = local_now();
        assert_eq!(time.second(), 0);
    }
}
