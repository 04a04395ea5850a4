//! # State Module
//!
//! Manages application state for the shell.
//!
//! One focused type per concern instead of a single `AppState`, so each
//! command declares exactly the state it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │  StoreState  │  │  DraftState  │  │  ViewState   │  │  Notifier  │  │
//! │  │  EntityStore │  │  Arc<Mutex<  │  │  Mutex<View> │  │  toast     │  │
//! │  │  (RwLock)    │  │   SaleDraft>>│  │              │  │  slot      │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │ CheckoutState│  │ ReportsState │  │  FormState   │  │ SessionSt. │  │
//! │  │  sale ids,   │  │  analytics   │  │  product     │  │  sign-in,  │  │
//! │  │  last sale   │  │  memo        │  │  form + gen  │  │  dark mode │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  ConfigState: read-only after startup    AssistState: generator handle │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod assist;
mod checkout;
mod config;
mod draft;
mod form;
mod reports;
mod session;
mod store;
mod toast;
mod view;

pub use assist::AssistState;
pub use checkout::CheckoutState;
pub use config::{ConfigError, ConfigState, CONFIG_PATH_ENV};
pub use draft::{local_now, DraftState};
pub use form::{DescriptionTicket, FormError, FormField, FormState, ProductForm};
pub use reports::ReportsState;
pub use session::SessionState;
pub use store::StoreState;
pub use toast::{Notifier, DEFAULT_TOAST_DURATION};
pub use view::{Transition, View, ViewError, ViewState};
