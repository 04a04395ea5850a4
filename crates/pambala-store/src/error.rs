//! # Store Error Types
//!
//! Error types for Entity Store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (stale selection, insufficient stock, validation)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds missing / duplicate record cases      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in shell) ← Portuguese message                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Toast                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed write never changes the store: every error is raised before the
//! new snapshot is swapped in.

use pambala_core::{CoreError, ValidationError};
use thiserror::Error;

/// Entity Store operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Record not found.
    ///
    /// ## When This Occurs
    /// - `update` on an id that is not in the collection
    /// - looking up a sale id for an invoice
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique id violation.
    ///
    /// ## When This Occurs
    /// - adding a product or client whose id already exists
    /// - appending a transaction with a reused id
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A domain rule rejected the write.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
