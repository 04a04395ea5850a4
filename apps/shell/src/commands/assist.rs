//! # Assist Commands
//!
//! The "gerar descrição" button of the product form.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  generate_description()                                                 │
//! │       │  form.begin_description()  ── generating = true                 │
//! │       ▼                                                                 │
//! │  tokio::spawn ──► describe(generator, name, category).await             │
//! │                        │                                                │
//! │                        ▼                                                │
//! │              form.finish_description(generation, text)                  │
//! │                 same form still open? merge : drop                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The command returns as soon as the task is spawned; nothing waits on it.

use pambala_assist::describe;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::{AssistState, FormState};

/// Starts a description request for the open product form.
///
/// ## Errors
/// - `ValidationError` "Dê um nome!" if the name is blank
/// - `GenerationBusy` if a request is already running
/// - `InvalidTransition` if no form is open
///
/// ## Returns
/// The task handle; it resolves to `true` if the text was merged.
pub fn generate_description(form: &FormState, assist: &AssistState) -> ApiResult<JoinHandle<bool>> {
    let ticket = form.begin_description()?;
    debug!(product = %ticket.name, generation = ticket.generation, "generate_description command");

    let form = form.clone();
    let generator = assist.generator();

    Ok(tokio::spawn(async move {
        let text = describe(generator.as_ref(), &ticket.name, ticket.category).await;
        let merged = form.finish_description(ticket.generation, text);
        info!(product = %ticket.name, merged, "Description request finished");
        merged
    }))
}
