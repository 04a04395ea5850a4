//! # Entity Store
//!
//! The in-memory home of every product, client, transaction and the shop
//! profile for one session.
//!
//! ## Snapshot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         EntityStore                                     │
//! │                                                                         │
//! │   RwLock<Snapshot>                                                     │
//! │   ┌───────────────────────────────────────────────────────────────┐    │
//! │   │ products:     Arc<Vec<Product>>      (newest first)           │    │
//! │   │ clients:      Arc<Vec<Client>>       (newest first)           │    │
//! │   │ transactions: Arc<Vec<Transaction>>  (newest first, append-only)│  │
//! │   │ profile:      Arc<Profile>                                    │    │
//! │   └───────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │   snapshot()  ──► clones four Arcs; readers keep their view even       │
//! │                   while a writer swaps in new collections              │
//! │                                                                         │
//! │   write(f)    ──► f edits a copy of the snapshot; on Ok the copy is    │
//! │                   swapped in under the same write guard, on Err the    │
//! │                   store is untouched                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collections are never mutated in place: a writer builds a new `Vec` and
//! replaces the `Arc`. A reader comparing two snapshots with `Arc::ptr_eq`
//! can therefore tell whether a collection changed.

use std::sync::{Arc, PoisonError, RwLock};

use pambala_core::{Client, Product, Profile, Transaction};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::repository::client::ClientRepository;
use crate::repository::product::ProductRepository;
use crate::repository::profile::ProfileRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::transaction::TransactionRepository;
use crate::seed;

// =============================================================================
// Snapshot
// =============================================================================

/// A consistent view of every collection at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub products: Arc<Vec<Product>>,
    pub clients: Arc<Vec<Client>>,
    pub transactions: Arc<Vec<Transaction>>,
    pub profile: Arc<Profile>,
}

impl Snapshot {
    /// Builds a snapshot from owned collections.
    pub fn new(
        products: Vec<Product>,
        clients: Vec<Client>,
        transactions: Vec<Transaction>,
        profile: Profile,
    ) -> Self {
        Snapshot {
            products: Arc::new(products),
            clients: Arc::new(clients),
            transactions: Arc::new(transactions),
            profile: Arc::new(profile),
        }
    }
}

// =============================================================================
// Entity Store
// =============================================================================

/// Shared handle to the session's entities.
///
/// Cloning the handle shares the same store.
///
/// ## Usage
/// ```rust
/// use pambala_store::EntityStore;
///
/// let store = EntityStore::seeded();
/// let products = store.products().list();
/// assert_eq!(products.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    inner: Arc<RwLock<Snapshot>>,
}

impl EntityStore {
    /// Creates an empty store with the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        EntityStore {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Creates a store with the demo catalogue.
    pub fn seeded() -> Self {
        let snapshot = seed::demo_snapshot();
        info!(
            products = snapshot.products.len(),
            clients = snapshot.clients.len(),
            transactions = snapshot.transactions.len(),
            "Seeded entity store"
        );
        Self::with_snapshot(snapshot)
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.read(Snapshot::clone)
    }

    /// Runs `f` against the current snapshot under the read lock.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        // A panicking writer never leaves a half-built snapshot behind, so a
        // poisoned lock still guards consistent data.
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Applies `f` to a copy of the snapshot and swaps the copy in on
    /// success.
    ///
    /// The whole edit happens under one write guard, so no reader observes
    /// part of it.
    pub(crate) fn write<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut Snapshot) -> StoreResult<R>,
    ) -> StoreResult<R> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        let out = f(&mut next)?;
        *guard = next;
        debug!(op, "Store snapshot replaced");
        Ok(out)
    }

    // =========================================================================
    // Repositories
    // =========================================================================

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Returns the client repository.
    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.clone())
    }

    /// Returns the transaction repository.
    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.clone())
    }

    /// Returns the profile repository.
    pub fn profile(&self) -> ProfileRepository {
        ProfileRepository::new(self.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_empty_store() {
        let store = EntityStore::new();
        let snap = store.snapshot();
        assert!(snap.products.is_empty());
        assert!(snap.clients.is_empty());
        assert!(snap.transactions.is_empty());
        assert_eq!(snap.profile.store_name, "Pambala AO");
    }

    #[test]
    fn test_failed_write_leaves_store_untouched() {
        let store = EntityStore::seeded();
        let before = store.snapshot();

        let result: StoreResult<()> = store.write("test", |snap| {
            snap.products = Arc::new(Vec::new());
            Err(StoreError::not_found("Product", "x"))
        });
        assert!(result.is_err());

        let after = store.snapshot();
        assert!(Arc::ptr_eq(&before.products, &after.products));
        assert_eq!(after.products.len(), 3);
    }

    #[test]
    fn test_reader_keeps_its_snapshot() {
        let store = EntityStore::seeded();
        let held = store.snapshot();

        store
            .write("test", |snap| {
                snap.products = Arc::new(Vec::new());
                Ok(())
            })
            .unwrap();

        assert_eq!(held.products.len(), 3);
        assert!(store.snapshot().products.is_empty());
        assert!(!Arc::ptr_eq(&held.products, &store.snapshot().products));
        // untouched collections keep their identity
        assert!(Arc::ptr_eq(&held.clients, &store.snapshot().clients));
    }

    #[test]
    fn test_clones_share_state() {
        let a = EntityStore::new();
        let b = a.clone();
        a.write("test", |snap| {
            snap.profile = Arc::new(Profile {
                store_name: "Loja da Ana".to_string(),
                ..Profile::default()
            });
            Ok(())
        })
        .unwrap();
        assert_eq!(b.snapshot().profile.store_name, "Loja da Ana");
    }
}
