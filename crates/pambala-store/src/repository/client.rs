//! # Client Repository
//!
//! Operations over the client registry. Mirrors the product repository:
//! prepend on add, patch on update, idempotent delete.

use std::sync::Arc;

use pambala_core::validation::validate_client;
use pambala_core::{Client, ClientPatch};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

/// Repository for client operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    store: EntityStore,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(store: EntityStore) -> Self {
        ClientRepository { store }
    }

    /// Returns every client, newest first.
    pub fn list(&self) -> Arc<Vec<Client>> {
        self.store.read(|snap| Arc::clone(&snap.clients))
    }

    /// Gets a client by ID.
    pub fn get_by_id(&self, id: &str) -> Option<Client> {
        self.store
            .read(|snap| snap.clients.iter().find(|c| c.id == id).cloned())
    }

    /// Case-insensitive substring search over name and phone.
    pub fn search(&self, query: &str) -> Vec<Client> {
        let needle = query.trim().to_lowercase();
        debug!(query = %needle, "Searching clients");

        self.store.read(|snap| {
            snap.clients
                .iter()
                .filter(|c| {
                    needle.is_empty()
                        || c.name.to_lowercase().contains(&needle)
                        || c.phone.contains(&needle)
                })
                .cloned()
                .collect()
        })
    }

    /// Adds a client at the front of the registry.
    pub fn add(&self, client: Client) -> StoreResult<()> {
        validate_client(&client)?;

        self.store.write("add_client", |snap| {
            if snap.clients.iter().any(|c| c.id == client.id) {
                return Err(StoreError::duplicate("client id", &client.id));
            }

            info!(id = %client.id, "Adding client");
            let mut clients = Vec::with_capacity(snap.clients.len() + 1);
            clients.push(client);
            clients.extend(snap.clients.iter().cloned());
            snap.clients = Arc::new(clients);
            Ok(())
        })
    }

    /// Replaces the matching client with `patch` applied.
    pub fn update(&self, id: &str, patch: &ClientPatch) -> StoreResult<Client> {
        self.store.write("update_client", |snap| {
            let current = snap
                .clients
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| StoreError::not_found("Client", id))?;

            let updated = patch.apply(current);
            validate_client(&updated)?;

            snap.clients = Arc::new(
                snap.clients
                    .iter()
                    .map(|c| if c.id == id { updated.clone() } else { c.clone() })
                    .collect(),
            );
            Ok(updated)
        })
    }

    /// Removes a client. Deleting an absent id is a no-op.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.store.write("delete_client", |snap| {
            if !snap.clients.iter().any(|c| c.id == id) {
                return Ok(false);
            }
            snap.clients = Arc::new(snap.clients.iter().filter(|c| c.id != id).cloned().collect());
            Ok(true)
        });
        matches!(removed, Ok(true))
    }

    pub fn count(&self) -> usize {
        self.store.read(|snap| snap.clients.len())
    }
}

/// Helper to generate a new client ID.
pub fn generate_client_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pambala_core::{ClientCategory, ClientStatus};

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: id.to_string(),
            name: name.to_string(),
            phone: "923 000 111".to_string(),
            email: None,
            category: ClientCategory::New,
            status: ClientStatus::Active,
            last_purchase: None,
        }
    }

    #[test]
    fn test_crud() {
        let store = EntityStore::new();
        let repo = store.clients();

        repo.add(client("1", "Ana Silva")).unwrap();
        repo.add(client("2", "Carlos Souza")).unwrap();
        assert_eq!(repo.list()[0].id, "2");

        let patch = ClientPatch {
            category: Some(ClientCategory::Vip),
            email: Some(Some("ana@email.com".to_string())),
            ..ClientPatch::default()
        };
        let ana = repo.update("1", &patch).unwrap();
        assert_eq!(ana.category, ClientCategory::Vip);
        assert_eq!(ana.email.as_deref(), Some("ana@email.com"));

        assert!(repo.delete("2"));
        assert!(!repo.delete("2"));
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn test_update_missing() {
        let store = EntityStore::new();
        assert_eq!(
            store
                .clients()
                .update("nope", &ClientPatch::default())
                .unwrap_err(),
            StoreError::not_found("Client", "nope")
        );
    }

    #[test]
    fn test_search() {
        let store = EntityStore::seeded();
        let repo = store.clients();
        assert_eq!(repo.search("ana")[0].name, "Ana Silva");
        assert_eq!(repo.search("91234").len(), 1);
    }
}
