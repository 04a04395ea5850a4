//! # Sale Repository
//!
//! The single mutation of a sale commit.
//!
//! ## Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       commit(sale, policy)                              │
//! │                                                                         │
//! │   ┌──────────── one write guard ─────────────────────────────────┐     │
//! │   │                                                              │     │
//! │   │  1. products'     = debit_stock(products, sale.items, policy)│     │
//! │   │  2. transactions' = [sale] ++ transactions                   │     │
//! │   │  3. swap both in                                             │     │
//! │   │                                                              │     │
//! │   └──────────────────────────────────────────────────────────────┘     │
//! │                                                                         │
//! │   Any error in 1 or 2 → nothing swapped, store unchanged              │
//! │   Readers see either neither change or both                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use pambala_core::stock::{debit_stock, StockPolicy};
use pambala_core::{CoreError, Transaction};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::repository::transaction::prepend_unique;
use crate::store::EntityStore;

/// Repository for committed sales.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    store: EntityStore,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(store: EntityStore) -> Self {
        SaleRepository { store }
    }

    /// Debits stock for the sale's items and appends the sale, atomically.
    ///
    /// ## Errors
    /// - `Core(StaleSelection)` if an item's product was deleted meanwhile
    /// - `Core(InsufficientStock)` under [`StockPolicy::Reject`]
    /// - `Duplicate` if the sale id is already in the ledger
    pub fn commit(&self, sale: Transaction, policy: StockPolicy) -> StoreResult<()> {
        let sale_id = sale.id.clone();
        let lines = sale.items().len();

        self.store.write("commit_sale", |snap| {
            let products = debit_stock(&snap.products, sale.items(), policy)?;
            let transactions = prepend_unique(&snap.transactions, sale)?;

            snap.products = Arc::new(products);
            snap.transactions = Arc::new(transactions);
            Ok(())
        })?;

        info!(sale_id = %sale_id, lines, ?policy, "Sale committed");
        Ok(())
    }

    /// Gets a committed sale (income transaction) by ID.
    pub fn get_by_id(&self, id: &str) -> StoreResult<Transaction> {
        self.store
            .read(|snap| {
                snap.transactions
                    .iter()
                    .find(|t| t.id == id && t.is_income())
                    .cloned()
            })
            .ok_or_else(|| StoreError::Core(CoreError::SaleNotFound(id.to_string())))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
