//! # Profile Repository
//!
//! Read and replace the singleton shop profile.

use std::sync::Arc;

use pambala_core::validation::validate_name;
use pambala_core::Profile;
use tracing::info;

use crate::error::StoreResult;
use crate::store::EntityStore;

/// Repository for the shop profile.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    store: EntityStore,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository.
    pub fn new(store: EntityStore) -> Self {
        ProfileRepository { store }
    }

    /// Returns the current profile.
    pub fn get(&self) -> Arc<Profile> {
        self.store.read(|snap| Arc::clone(&snap.profile))
    }

    /// Replaces the profile. The store name must not be blank.
    pub fn update(&self, profile: Profile) -> StoreResult<()> {
        validate_name("store name", &profile.store_name)?;

        self.store.write("update_profile", |snap| {
            info!(store_name = %profile.store_name, "Updating profile");
            snap.profile = Arc::new(profile);
            Ok(())
        })
    }
}
