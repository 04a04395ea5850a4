//! # Assist Error Types
//!
//! Failures of the description-generation collaborator.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GenerationUnavailable  no API key configured                          │
//! │  Request                network, DNS, TLS, timeout, bad JSON           │
//! │  Api                    provider answered with a non-2xx status        │
//! │  EmptyResponse          2xx but no text in the first candidate         │
//! │                                                                         │
//! │  All four are absorbed by `describe()` into a placeholder string.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for assist operations.
pub type AssistResult<T> = Result<T, AssistError>;

/// Description generation errors.
#[derive(Debug, Error)]
pub enum AssistError {
    /// No provider is configured (missing `API_KEY`).
    #[error("Description generation is unavailable: {0}")]
    GenerationUnavailable(String),

    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered without any text.
    #[error("Provider returned no text")]
    EmptyResponse,
}
