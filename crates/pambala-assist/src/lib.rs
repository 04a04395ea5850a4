//! # pambala-assist: Product Description Assistant
//!
//! Fills the product form's description field from a generative-text
//! provider. The result is advisory: every failure turns into a placeholder
//! string and nothing here can block a sale.
//!
//! ## Module Organization
//!
//! - [`generator`] - `DescriptionGenerator` trait, prompt, placeholder fallback
//! - [`gemini`] - reqwest client for the Gemini API
//! - [`config`] - Endpoint, model, timeout and the `API_KEY` secret
//! - [`error`] - Assist error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pambala_assist::{build_generator, describe, AssistConfig};
//! use pambala_core::ProductCategory;
//!
//! let generator = build_generator(&AssistConfig::default().with_env());
//! let text = describe(generator.as_ref(), "Calça Jeans", ProductCategory::Clothing).await;
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;

use std::sync::Arc;

use tracing::{info, warn};

pub use config::AssistConfig;
pub use error::{AssistError, AssistResult};
pub use gemini::GeminiClient;
pub use generator::{describe, DescriptionGenerator, Unconfigured};

/// Builds the generator for `config`: the Gemini client when a key is
/// present, otherwise [`Unconfigured`].
pub fn build_generator(config: &AssistConfig) -> Arc<dyn DescriptionGenerator> {
    match GeminiClient::from_config(config) {
        Ok(client) => {
            info!(model = %config.model, "Description assistant enabled");
            Arc::new(client)
        }
        Err(e) => {
            warn!(error = %e, "Description assistant disabled");
            Arc::new(Unconfigured)
        }
    }
}
