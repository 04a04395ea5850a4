//! # Commands Module
//!
//! Every action the front-end can take.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── navigation.rs  ◄─── View changes and their side effects
//! ├── sale.rs        ◄─── Draft editing and commit
//! ├── invoice.rs     ◄─── Factura download
//! ├── product.rs     ◄─── Catalogue and product form
//! ├── assist.rs      ◄─── Description generation task
//! ├── client.rs      ◄─── Client CRUD
//! ├── expense.rs     ◄─── Expense entries
//! ├── report.rs      ◄─── Dashboard and report series
//! ├── profile.rs     ◄─── Shop profile and adjustments
//! └── session.rs     ◄─── Sign in / out
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the draft
//! fn set_quantity(draft: &DraftState, product_id: &str, quantity: i64)
//!
//! // Needs store, draft, view, toast, checkout and config
//! fn commit_sale(store: &StoreState, draft: &DraftState, ...)
//! ```
//!
//! Commands return `ApiResult<T>`. Success toasts are emitted here; errors
//! are handed to the toast by the caller (see `App::execute`).

pub mod assist;
pub mod client;
pub mod expense;
pub mod invoice;
pub mod navigation;
pub mod product;
pub mod profile;
pub mod report;
pub mod sale;
pub mod session;
