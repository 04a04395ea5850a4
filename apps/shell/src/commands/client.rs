//! # Client Commands
//!
//! Client registry listing, search and the client form.

use pambala_core::{Client, ClientCategory, ClientPatch, ClientStatus, CoreError};
use pambala_store::repository::client::generate_client_id;
use serde::Deserialize;
use tracing::{debug, info};

use crate::commands::navigation;
use crate::error::ApiResult;
use crate::state::{DraftState, FormState, Notifier, StoreState, View, ViewState};

/// Toast shown after a client is created or edited.
pub const CLIENT_SAVED_TOAST: &str = "Cliente guardado!";

/// Field values submitted by the client form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: String,
    pub phone: String,
    /// Blank means "no email".
    pub email: String,
    pub category: ClientCategory,
    pub status: ClientStatus,
}

impl ClientInput {
    fn email(&self) -> Option<String> {
        match self.email.trim() {
            "" => None,
            email => Some(email.to_string()),
        }
    }

    fn into_patch(self) -> ClientPatch {
        ClientPatch {
            email: Some(self.email()),
            name: Some(self.name.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            category: Some(self.category),
            status: Some(self.status),
        }
    }
}

/// Lists clients, newest first, optionally filtered by name or phone.
pub fn list_clients(store: &StoreState, query: Option<&str>) -> Vec<Client> {
    debug!(?query, "list_clients command");
    match query {
        Some(q) => store.inner().clients().search(q),
        None => store.inner().clients().list().to_vec(),
    }
}

/// Gets a single client by its ID.
pub fn get_client(store: &StoreState, id: &str) -> ApiResult<Client> {
    store
        .inner()
        .clients()
        .get_by_id(id)
        .ok_or_else(|| CoreError::ClientNotFound(id.to_string()).into())
}

/// Creates (`id == None`) or edits a client, then returns to the list.
///
/// ## Errors
/// - `NotFound` when editing an unknown id
/// - `ValidationError` for a blank name or phone, or a malformed email
pub fn save_client(
    store: &StoreState,
    view: &ViewState,
    draft: &DraftState,
    form: &FormState,
    toast: &Notifier,
    id: Option<&str>,
    input: ClientInput,
) -> ApiResult<Client> {
    debug!(?id, "save_client command");

    let client = match id {
        Some(id) => store.inner().clients().update(id, &input.into_patch())?,
        None => {
            let client = Client {
                id: generate_client_id(),
                name: input.name.trim().to_string(),
                phone: input.phone.trim().to_string(),
                email: input.email(),
                category: input.category,
                status: input.status,
                last_purchase: None,
            };
            store.inner().clients().add(client.clone())?;
            client
        }
    };

    info!(id = %client.id, "Client saved");
    navigation::navigate(view, draft, form, View::Clients)?;
    toast.show(CLIENT_SAVED_TOAST);

    Ok(client)
}

/// Removes a client.
///
/// ## Returns
/// `true` if a client was removed.
pub fn delete_client(store: &StoreState, id: &str) -> bool {
    debug!(id = %id, "delete_client command");
    store.inner().clients().delete(id)
}
