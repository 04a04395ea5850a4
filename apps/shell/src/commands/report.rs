//! # Report Commands
//!
//! The reports screen and the home dashboard.

use std::sync::Arc;

use pambala_core::analytics::{recent, summarize, FinancialSummary, ReportInsights};
use pambala_core::{Transaction, DASHBOARD_RECENT_LIMIT};
use serde::Serialize;
use tracing::debug;

use crate::state::{ReportsState, StoreState};

/// What the home view shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub store_name: String,
    pub summary: FinancialSummary,
    /// Newest first.
    pub recent: Vec<Transaction>,
}

/// The four chart series, recomputed only after a store write.
pub fn reports(store: &StoreState, reports: &ReportsState) -> Arc<ReportInsights> {
    debug!("reports command");
    let db = store.inner();
    reports.insights(db.transactions().list(), db.products().list())
}

pub fn dashboard(store: &StoreState) -> Dashboard {
    debug!("dashboard command");
    let db = store.inner();
    let transactions = db.transactions().list();

    Dashboard {
        store_name: db.profile().get().store_name.clone(),
        summary: summarize(&transactions),
        recent: recent(&transactions, DASHBOARD_RECENT_LIMIT).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pambala_core::Money;
    use pambala_store::seed;

    #[test]
    fn test_demo_shop_opens_with_empty_ledger() {
        let dash = dashboard(&StoreState::demo("Loja da Ana"));
        assert!(dash.recent.is_empty());
        assert!(dash.summary.balance.is_zero());
    }

    #[test]
    fn test_dashboard_over_sample_ledger() {
        let store = StoreState::demo("Loja da Ana");
        for t in seed::sample_ledger().into_iter().rev() {
            store.inner().transactions().append(t).unwrap();
        }
        let dash = dashboard(&store);
        assert_eq!(dash.store_name, "Loja da Ana");
        assert_eq!(dash.recent.len(), 4);
        assert_eq!(dash.summary.income, Money::from_kz(19_590));
        assert_eq!(dash.summary.expenses, Money::from_kz(47_050));
        assert_eq!(dash.summary.balance, Money::from_kz(-27_460));
    }

    #[test]
    fn test_reports_cached_until_write() {
        let store = StoreState::demo("Pambala AO");
        let cache = ReportsState::new();

        let a = reports(&store, &cache);
        let b = reports(&store, &cache);
        assert!(Arc::ptr_eq(&a, &b));

        store.inner().products().delete("3");
        let c = reports(&store, &cache);
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
