//! # Validation Module
//!
//! Input validation utilities for Pambala AO.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end                                                    │
//! │  ├── Required fields, numeric inputs                                   │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Shell command (Rust)                                         │
//! │  ├── Enumeration parsing (labels are bit-exact)                        │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Entity Store                                                 │
//! │  └── Unique ids, existence checks                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pambala_core::validation::{parse_time, validate_sku};
//!
//! assert!(validate_sku("CMB-001").is_ok());
//! assert_eq!(parse_time("09:05").unwrap().to_string(), "09:05:00");
//! ```

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Client, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_SKU_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens, underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::required("sku"));
    }

    if sku.chars().count() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (product or client).
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates the customer name of a sale draft. Whitespace-only counts as
/// empty.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_name("customer name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that an amount is not negative. Zero is allowed (free items,
/// no discount).
///
/// ## Example
/// ```rust
/// use pambala_core::money::Money;
/// use pambala_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("price", Money::from_kz(0)).is_ok());
/// assert!(validate_non_negative("price", Money::from_kz(-1)).is_err());
/// ```
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::negative(field));
    }
    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::negative("stock"));
    }
    Ok(())
}

// =============================================================================
// Date / Time
// =============================================================================

/// Parses an ISO date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

/// Parses a 24h time (`HH:MM`).
pub fn parse_time(raw: &str) -> ValidationResult<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| ValidationError::InvalidFormat {
        field: "time".to_string(),
        reason: "expected HH:MM (24h)".to_string(),
    })
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a product record before it enters the store.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }
    validate_name("name", &product.name)?;
    validate_sku(&product.sku)?;
    validate_non_negative("cost price", product.cost_price)?;
    validate_non_negative("sale price", product.sale_price)?;
    validate_stock(product.stock)?;
    Ok(())
}

/// Validates a client record before it enters the store.
pub fn validate_client(client: &Client) -> ValidationResult<()> {
    if client.id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }
    validate_name("name", &client.name)?;
    if client.phone.trim().is_empty() {
        return Err(ValidationError::required("phone"));
    }
    if let Some(email) = &client.email {
        if !email.is_empty() && !email.contains('@') {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
                reason: "missing @".to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
