//! # Description Generator
//!
//! The seam between the product form and whatever writes the marketing
//! blurb.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  describe(generator, "Calça Jeans", Vestuário)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  generator.generate(name, category).await                              │
//! │       │                                                                 │
//! │       ├── Ok(text)            → text, capped at 200 chars              │
//! │       ├── Err(EmptyResponse)  → "Descrição não pôde ser gerada."       │
//! │       └── Err(_)              → "Erro ao conectar com a IA."           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use pambala_core::ProductCategory;
use tracing::warn;

use crate::error::{AssistError, AssistResult};

/// Longest description kept in the product form.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Placeholder when the provider answered without text.
pub const EMPTY_PLACEHOLDER: &str = "Descrição não pôde ser gerada.";

/// Placeholder when the provider could not be reached.
pub const ERROR_PLACEHOLDER: &str = "Erro ao conectar com a IA.";

/// Something that can write a product description.
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    /// Generates a short Portuguese marketing description.
    async fn generate(&self, name: &str, category: ProductCategory) -> AssistResult<String>;
}

/// Builds the provider prompt.
pub fn prompt(name: &str, category: ProductCategory) -> String {
    format!(
        "Gere uma descrição de marketing curta e atraente em português para o produto \"{}\" na categoria \"{}\". Use no máximo {} caracteres.",
        name, category, MAX_DESCRIPTION_CHARS
    )
}

/// Runs `generator` and absorbs every failure into a placeholder.
pub async fn describe(
    generator: &dyn DescriptionGenerator,
    name: &str,
    category: ProductCategory,
) -> String {
    match generator.generate(name, category).await {
        Ok(text) => truncate_chars(text.trim(), MAX_DESCRIPTION_CHARS),
        Err(AssistError::EmptyResponse) => {
            warn!(product = %name, "Description provider returned no text");
            EMPTY_PLACEHOLDER.to_string()
        }
        Err(e) => {
            warn!(product = %name, error = %e, "Description generation failed");
            ERROR_PLACEHOLDER.to_string()
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// Generator used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait]
impl DescriptionGenerator for Unconfigured {
    async fn generate(&self, _name: &str, _category: ProductCategory) -> AssistResult<String> {
        Err(AssistError::GenerationUnavailable(format!(
            "{} is not set",
            crate::config::API_KEY_ENV
        )))
    }
}
