//! # Assist Configuration
//!
//! Settings for the generative-text provider.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment (highest priority)                                     │
//! │     API_KEY                  provider secret                           │
//! │     PAMBALA_ASSIST_ENDPOINT  base URL (tests, proxies)                 │
//! │     PAMBALA_ASSIST_MODEL     model name                                │
//! │                                                                         │
//! │  2. [assist] table of pambala.toml (loaded by the shell)               │
//! │                                                                         │
//! │  3. Defaults                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The API key is never read from the TOML file.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable holding the provider secret.
pub const API_KEY_ENV: &str = "API_KEY";

/// Provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Base URL of the provider API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model used for generation.
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Provider secret; only ever set from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for AssistConfig {
    fn default() -> Self {
        AssistConfig {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

impl AssistConfig {
    /// Applies environment overrides, including the API key.
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = var("PAMBALA_ASSIST_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(model) = var("PAMBALA_ASSIST_MODEL") {
            self.model = model;
        }
        self.api_key = var(API_KEY_ENV).filter(|k| !k.trim().is_empty());

        debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            has_key = self.api_key.is_some(),
            "Assist configuration resolved"
        );
        self
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks if a provider can be called at all.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}
