//! # Error Types
//!
//! Domain-specific error types for pambala-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pambala-core errors (this file)                                       │
//! │  ├── CoreError        - Sale pipeline and domain rule failures         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pambala-store errors (separate crate)                                 │
//! │  └── StoreError       - Missing / duplicate records                    │
//! │                                                                         │
//! │  shell errors (in app)                                                 │
//! │  └── ApiError         - Portuguese message shown in the toast          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Toast     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, sale id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message in the shell

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The first three variants are the commit preconditions of the sale
/// pipeline, checked in this order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The draft has no selected products.
    #[error("No products selected")]
    EmptySelection,

    /// The draft has no customer name.
    #[error("Customer name is required")]
    MissingCustomer,

    /// A selected product no longer exists in the store.
    ///
    /// ## User Workflow
    /// ```text
    /// sales: select "Camiseta"
    ///      │
    ///      ▼
    /// products: delete "Camiseta"
    ///      │
    ///      ▼
    /// manualSaleDetails: commit
    ///      │
    ///      ▼
    /// StaleSelection { product_id: "1" }
    /// ```
    #[error("Selected product no longer exists: {product_id}")]
    StaleSelection { product_id: String },

    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Client cannot be found.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Sale (income transaction) cannot be found.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Insufficient stock to complete sale.
    ///
    /// Only raised under `StockPolicy::Reject`; the default saturating
    /// policy floors stock at zero instead.
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// A line total or the subtotal does not fit in `Money`.
    #[error("Sale amount overflows at product {product_id}")]
    AmountOverflow { product_id: String },

    /// Discount is larger than the sum of the sale lines.
    #[error("Discount {discount} exceeds subtotal {subtotal}")]
    DiscountExceedsSubtotal { subtotal: i64, discount: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid date, invalid time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::Negative`].
    pub fn negative(field: impl Into<String>) -> Self {
        ValidationError::Negative {
            field: field.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            sku: "CMB-001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for CMB-001: available 3, requested 5"
        );

        let err = CoreError::StaleSelection {
            product_id: "P7".to_string(),
        };
        assert_eq!(err.to_string(), "Selected product no longer exists: P7");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("customer name");
        assert_eq!(err.to_string(), "customer name is required");
        assert_eq!(err.field(), "customer name");

        let err = ValidationError::negative("discount");
        assert_eq!(err.to_string(), "discount must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("sku").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
