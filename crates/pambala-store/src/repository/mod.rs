//! # Repository Module
//!
//! Per-entity access to the [`EntityStore`](crate::EntityStore).
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell command                                                         │
//! │       │                                                                 │
//! │       │  store.products().search("jeans")                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list / get_by_id / search                                         │
//! │  ├── add / update / delete                                             │
//! │  └── debit_stock                                                       │
//! │       │                                                                 │
//! │       │  read(|snap| ..) / write("op", |snap| ..)                      │
//! │       ▼                                                                 │
//! │  EntityStore  (RwLock<Snapshot>)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalogue CRUD, search, stock debit
//! - [`ClientRepository`](client::ClientRepository) - Client registry CRUD and search
//! - [`TransactionRepository`](transaction::TransactionRepository) - Append-only ledger
//! - [`SaleRepository`](sale::SaleRepository) - Atomic sale commit
//! - [`ProfileRepository`](profile::ProfileRepository) - Shop profile

pub mod client;
pub mod product;
pub mod profile;
pub mod sale;
pub mod transaction;
