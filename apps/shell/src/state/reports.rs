//! # Reports State
//!
//! Memoises the analytics series on the identity of their inputs.
//!
//! Every store write replaces whole collections, so an unchanged
//! `Arc<Vec<_>>` pointer means unchanged contents and the cached series can
//! be handed back without recomputing.

use std::sync::{Arc, Mutex};

use pambala_core::analytics::{self, ReportInsights};
use pambala_core::{Product, Transaction};
use tracing::debug;

#[derive(Debug)]
struct Memo {
    transactions: Arc<Vec<Transaction>>,
    products: Arc<Vec<Product>>,
    insights: Arc<ReportInsights>,
}

/// Shell-managed analytics cache.
#[derive(Debug, Default)]
pub struct ReportsState {
    memo: Mutex<Option<Memo>>,
}

impl ReportsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the series for these inputs, recomputing only when either
    /// collection was replaced since the last call.
    pub fn insights(
        &self,
        transactions: Arc<Vec<Transaction>>,
        products: Arc<Vec<Product>>,
    ) -> Arc<ReportInsights> {
        let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(m) = memo.as_ref() {
            if Arc::ptr_eq(&m.transactions, &transactions) && Arc::ptr_eq(&m.products, &products) {
                return Arc::clone(&m.insights);
            }
        }

        debug!(
            transactions = transactions.len(),
            products = products.len(),
            "Recomputing report series"
        );
        let insights = Arc::new(analytics::compute(&transactions, &products));
        *memo = Some(Memo {
            transactions,
            products,
            insights: Arc::clone(&insights),
        });
        insights
    }
}
