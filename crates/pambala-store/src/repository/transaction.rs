//! # Transaction Repository
//!
//! The append-only ledger. Transactions are prepended (newest first) and
//! never mutated or removed.

use std::sync::Arc;

use pambala_core::Transaction;
use tracing::info;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

/// Repository for the transaction ledger.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    store: EntityStore,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(store: EntityStore) -> Self {
        TransactionRepository { store }
    }

    /// Returns every transaction, newest first.
    pub fn list(&self) -> Arc<Vec<Transaction>> {
        self.store.read(|snap| Arc::clone(&snap.transactions))
    }

    /// Gets a transaction by ID.
    pub fn get_by_id(&self, id: &str) -> Option<Transaction> {
        self.store
            .read(|snap| snap.transactions.iter().find(|t| t.id == id).cloned())
    }

    /// Prepends a transaction.
    ///
    /// ## Errors
    /// - `Duplicate` if the id is already in the ledger
    pub fn append(&self, transaction: Transaction) -> StoreResult<()> {
        self.store.write("append_transaction", |snap| {
            snap.transactions = Arc::new(prepend_unique(&snap.transactions, transaction)?);
            Ok(())
        })
    }

    pub fn count(&self) -> usize {
        self.store.read(|snap| snap.transactions.len())
    }
}

/// Prefix of expense ids.
pub const EXPENSE_ID_PREFIX: &str = "DESP-";

/// Helper to generate a new expense transaction ID.
pub fn generate_expense_id() -> String {
    format!("{}{}", EXPENSE_ID_PREFIX, Uuid::new_v4().simple())
}

/// Returns a new ledger with `transaction` in front.
pub(crate) fn prepend_unique(
    ledger: &[Transaction],
    transaction: Transaction,
) -> StoreResult<Vec<Transaction>> {
    if ledger.iter().any(|t| t.id == transaction.id) {
        return Err(StoreError::duplicate("transaction id", &transaction.id));
    }

    info!(
        id = %transaction.id,
        kind = %transaction.kind,
        amount = transaction.amount.kz(),
        "Appending transaction"
    );

    let mut next = Vec::with_capacity(ledger.len() + 1);
    next.push(transaction);
    next.extend(ledger.iter().cloned());
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use pambala_core::{Money, TransactionType};

    fn expense(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            description: "Conta de Luz".to_string(),
            amount: Money::from_kz(-320),
            date: NaiveDate::from_ymd_opt(2024, 6, 23).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            category: "Contas".to_string(),
            kind: TransactionType::Expense,
            customer_name: None,
            customer_gender: None,
            payment_method: None,
            delivery_location: None,
            discount: None,
            items: None,
        }
    }

    #[test]
    fn test_append_newest_first() {
        let store = EntityStore::new();
        let repo = store.transactions();
        repo.append(expense("t1")).unwrap();
        repo.append(expense("t2")).unwrap();

        let ids: Vec<String> = repo.list().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
        assert!(repo.get_by_id("t1").is_some());
    }

    #[test]
    fn test_append_rejects_reused_id() {
        let store = EntityStore::new();
        let repo = store.transactions();
        repo.append(expense("t1")).unwrap();
        assert!(matches!(
            repo.append(expense("t1")),
            Err(StoreError::Duplicate { .. })
        ));
        assert_eq!(repo.count(), 1);
    }
}
