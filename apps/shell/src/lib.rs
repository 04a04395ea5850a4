//! # Pambala AO Shell Library
//!
//! Application shell for the Pambala AO shop manager: owns the state
//! objects, exposes the commands and runs the terminal front-end.
//!
//! ## Module Organization
//! ```text
//! pambala_shell/
//! ├── lib.rs          ◄─── You are here (App, tracing, run loop)
//! ├── shell.rs        ◄─── One clap subcommand per typed line
//! ├── sink.rs         ◄─── Where downloaded invoices go
//! ├── error.rs        ◄─── API error type for commands
//! ├── state/
//! │   ├── store.rs    ◄─── Entity store wrapper
//! │   ├── draft.rs    ◄─── Sale draft
//! │   ├── view.rs     ◄─── View router
//! │   ├── toast.rs    ◄─── Notification channel
//! │   ├── form.rs     ◄─── Product form + description generations
//! │   └── ...         ◄─── checkout, reports, session, assist, config
//! └── commands/
//!     ├── sale.rs     ◄─── Draft editing and commit
//!     ├── invoice.rs  ◄─── Factura download
//!     └── ...         ◄─── products, clients, expenses, reports, ...
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         App (one per session)                           │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │  StoreState  │ │  DraftState  │ │  ViewState   │ │   Notifier   │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │CheckoutState │ │ ReportsState │ │  FormState   │ │ SessionState │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │  ConfigState · AssistState · Arc<dyn InvoiceSink>                      │
//! │                                                                         │
//! │  Commands borrow only the pieces they need; `App` just holds them.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod sink;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sink::{DownloadDir, InvoiceSink};
use state::{
    AssistState, CheckoutState, ConfigState, DraftState, FormState, Notifier, ReportsState,
    SessionState, StoreState, ViewState,
};

/// Every state object of a running session.
pub struct App {
    pub config: ConfigState,
    pub store: StoreState,
    pub draft: DraftState,
    pub view: ViewState,
    pub toast: Notifier,
    pub checkout: CheckoutState,
    pub reports: ReportsState,
    pub form: FormState,
    pub session: SessionState,
    pub assist: AssistState,
    pub sink: Arc<dyn InvoiceSink>,
}

impl App {
    /// Builds a session from configuration.
    ///
    /// ## Initial State
    /// - Store: demo catalogue if `seed_demo`, else empty; profile named
    ///   after `store_name`
    /// - View: `home`, empty draft, no toast, signed out
    /// - Invoices: written to `download_dir`
    pub fn new(config: ConfigState) -> Self {
        let store = if config.seed_demo {
            StoreState::demo(&config.store_name)
        } else {
            StoreState::empty(&config.store_name)
        };

        App {
            store,
            draft: DraftState::new(),
            view: ViewState::new(),
            toast: Notifier::new(config.toast_duration()),
            checkout: CheckoutState::new(),
            reports: ReportsState::new(),
            form: FormState::new(),
            session: SessionState::new(),
            assist: AssistState::from_config(&config.assist),
            sink: Arc::new(DownloadDir::new(config.download_dir.clone())),
            config,
        }
    }

    /// Replaces the invoice sink.
    pub fn with_sink(mut self, sink: Arc<dyn InvoiceSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the description generator.
    pub fn with_assist(mut self, assist: AssistState) -> Self {
        self.assist = assist;
        self
    }
}

/// Runs the terminal front-end until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (stderr, RUST_LOG or "info,pambala=debug")      │
/// │  2. Load config: defaults → pambala.toml → environment                 │
/// │  3. Build App (store, draft, view, toast, ...)                          │
/// │  4. Loop: read line → App::execute → print output + visible toast      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> std::io::Result<()> {
    init_tracing();

    let config = ConfigState::load_or_default(config_path);
    info!(
        store_name = %config.store_name,
        stock_policy = ?config.stock_policy,
        download_dir = %config.download_dir.display(),
        assist = config.assist.is_enabled(),
        "Starting Pambala AO"
    );

    let app = App::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"Pambala AO - escreva 'help' para ver os comandos.\n")
        .await?;

    loop {
        stdout
            .write_all(format!("[{}] > ", app.view.current()).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = app.execute(&line);
        if !outcome.output.is_empty() {
            stdout.write_all(outcome.output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        if let Some(toast) = app.toast.current() {
            stdout.write_all(format!("» {}\n", toast).as_bytes()).await?;
        }
        if outcome.quit {
            break;
        }
    }

    info!("Pambala AO stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pambala_store=trace` - Trace the store only
/// - Default: `info,pambala=debug`
///
/// Logs go to stderr so they never interleave with the prompt on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pambala=debug"));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
