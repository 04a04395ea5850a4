//! # pambala-store: Entity Store for Pambala AO
//!
//! Holds the session's products, clients, transactions and shop profile in
//! memory, behind snapshot reads and whole-collection replacement writes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pambala AO Data Flow                             │
//! │                                                                         │
//! │  Shell command (commit_sale)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   pambala-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  EntityStore  │    │  Repositories │    │     Seed     │  │   │
//! │  │   │  (store.rs)   │    │ (product.rs)  │    │  (seed.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ RwLock<       │◄───│ ProductRepo   │    │ 3 products   │  │   │
//! │  │   │   Snapshot>   │    │ SaleRepo      │    │ 3 clients    │  │   │
//! │  │   │               │    │ ClientRepo    │    │ 4 entries    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pambala-core (stock debit, validation)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `EntityStore` and `Snapshot`
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (product, client, sale, ...)
//! - [`seed`] - Demo data
//!
//! ## Usage
//!
//! ```rust
//! use pambala_store::EntityStore;
//!
//! let store = EntityStore::seeded();
//! let shoes = store.products().search("tênis");
//! assert_eq!(shoes[0].stock, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{EntityStore, Snapshot};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::product::ProductRepository;
pub use repository::profile::ProfileRepository;
pub use repository::sale::SaleRepository;
pub use repository::transaction::TransactionRepository;
