//! # pambala-core: Pure Business Logic for Pambala AO
//!
//! The sale pipeline of the Pambala AO shop manager, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pambala AO Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal front-end (shell)                   │   │
//! │  │   Products ──► Sale draft ──► Details ──► Success ──► Factura  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ pambala-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐ │   │
//! │  │   │  types  │ │  draft  │ │ checkout │ │analytics│ │ invoice │ │   │
//! │  │   │ Product │ │SaleDraft│ │Validated │ │ series  │ │ Factura │ │   │
//! │  │   │  Money  │ │metadata │ │  Sale    │ │ summary │ │  text   │ │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                pambala-store (Entity Store)                     │   │
//! │  │          snapshot reads, whole-collection replacement           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities and the labelled enumerations (Product, Client, Transaction, ...)
//! - [`money`] - Whole-Kwanza `Money` with `pt-BR` grouping
//! - [`error`] - Domain error types
//! - [`validation`] - Field and entity validation
//! - [`draft`] - The editable sale draft
//! - [`checkout`] - Draft validation and transaction construction
//! - [`stock`] - Stock debit policy
//! - [`analytics`] - Report series and dashboard summary
//! - [`invoice`] - Plain-text receipt rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use pambala_core::draft::{MetadataField, SaleDraft};
//! use pambala_core::{Money, Product, ProductCategory};
//!
//! let shirt = Product {
//!     id: "1".into(),
//!     name: "Camiseta".into(),
//!     sku: "CMB-001".into(),
//!     category: ProductCategory::Clothing,
//!     cost_price: Money::from_kz(2_500),
//!     sale_price: Money::from_kz(4_990),
//!     stock: 12,
//!     image: String::new(),
//!     description: String::new(),
//! };
//!
//! let mut draft = SaleDraft::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 24).unwrap(),
//!     NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
//! );
//! draft.toggle("1");
//! draft.set_quantity("1", 2);
//! draft.set_metadata(MetadataField::CustomerName("Ana".into())).unwrap();
//!
//! let sale = draft.validate(&[shirt]).unwrap();
//! let transaction = sale.into_transaction("VENDA-1".into());
//! assert_eq!(transaction.amount.to_string(), "Kz 9.980");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod checkout;
pub mod draft;
pub mod error;
pub mod invoice;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{SaleIdSequence, ValidatedSale};
pub use draft::{MetadataField, SaleDraft, SaleMetadata};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::Invoice;
pub use money::Money;
pub use stock::StockPolicy;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Municipality preselected in a fresh draft.
pub const DEFAULT_MUNICIPALITY: Municipality = Municipality::Luanda;

/// Number of transactions shown on the home dashboard.
pub const DASHBOARD_RECENT_LIMIT: usize = 5;
