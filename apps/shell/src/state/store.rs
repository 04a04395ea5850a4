//! # Store State
//!
//! Wraps the `EntityStore` for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! fn search_products(store: &StoreState, query: &str) -> Vec<Product> {
//!     store.inner().products().search(query)
//! }
//! ```
//!
//! The store is cheap to clone and internally locked, so commands never
//! hold it across an `.await`.

use pambala_core::Profile;
use pambala_store::{seed, EntityStore, Snapshot};

/// Wrapper around `EntityStore` for shell state management.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: EntityStore,
}

impl StoreState {
    /// Creates a new StoreState wrapping the store.
    pub fn new(store: EntityStore) -> Self {
        StoreState { store }
    }

    /// An empty store whose profile carries `store_name`.
    pub fn empty(store_name: &str) -> Self {
        StoreState::new(EntityStore::with_snapshot(Snapshot {
            profile: named_profile(store_name).into(),
            ..Snapshot::default()
        }))
    }

    /// The demo catalogue with the profile renamed to `store_name`.
    pub fn demo(store_name: &str) -> Self {
        StoreState::new(EntityStore::with_snapshot(Snapshot {
            profile: named_profile(store_name).into(),
            ..seed::demo_snapshot()
        }))
    }

    /// Returns a reference to the inner EntityStore.
    pub fn inner(&self) -> &EntityStore {
        &self.store
    }
}

fn named_profile(store_name: &str) -> Profile {
    Profile {
        store_name: store_name.to_string(),
        ..Profile::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_demo() {
        let empty = StoreState::empty("Loja X");
        assert_eq!(empty.inner().products().count(), 0);
        assert_eq!(empty.inner().profile().get().store_name, "Loja X");

        let demo = StoreState::demo("Loja Y");
        assert_eq!(demo.inner().products().count(), 3);
        assert_eq!(demo.inner().clients().count(), 3);
        assert_eq!(demo.inner().transactions().count(), 0);
        assert_eq!(demo.inner().profile().get().store_name, "Loja Y");
    }
}
