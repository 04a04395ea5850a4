//! # Checkout State
//!
//! Sale id allocation and the "last committed sale" the success screen
//! offers an invoice for.

use std::sync::Mutex;

use chrono::Utc;
use pambala_core::SaleIdSequence;

/// Shell-managed checkout state.
#[derive(Debug, Default)]
pub struct CheckoutState {
    ids: SaleIdSequence,
    last_sale_id: Mutex<Option<String>>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a `VENDA-<n>` id from the wall clock.
    pub fn next_sale_id(&self) -> String {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.ids.next_id(now)
    }

    /// Publishes the id of the sale that was just committed.
    pub fn record(&self, sale_id: String) {
        *self.last_sale_id.lock().unwrap_or_else(|e| e.into_inner()) = Some(sale_id);
    }

    /// The most recently committed sale, if any.
    pub fn last_sale_id(&self) -> Option<String> {
        self.last_sale_id
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
