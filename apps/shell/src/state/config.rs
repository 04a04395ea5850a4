//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                               │
//! │                                                                         │
//! │  2. Config file                                                         │
//! │     $PAMBALA_CONFIG, or                                                │
//! │     ~/.config/pambala-ao/pambala.toml (Linux)                           │
//! │     ~/Library/Application Support/ao.pambala.pambala-ao/... (macOS)    │
//! │                                                                         │
//! │  3. Environment                                                         │
//! │     PAMBALA_STORE_NAME    PAMBALA_STOCK_POLICY                         │
//! │     PAMBALA_DOWNLOAD_DIR  PAMBALA_TOAST_SECS                           │
//! │     API_KEY (+ PAMBALA_ASSIST_*) via AssistConfig                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```toml
//! # pambala.toml
//! store_name = "Boutique Kinaxixi"
//! stock_policy = "reject"
//! download_dir = "/home/caixa/Facturas"
//! toast_secs = 3
//! seed_demo = true
//!
//! [assist]
//! model = "gemini-3-flash-preview"
//! timeout_secs = 15
//! ```
//!
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{ProjectDirs, UserDirs};
use pambala_assist::AssistConfig;
use pambala_core::stock::DEFAULT_STOCK_POLICY;
use pambala_core::StockPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PAMBALA_CONFIG";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shop name used for a fresh profile and on invoices.
    pub store_name: String,

    /// What a commit does when a line asks for more than is in stock.
    pub stock_policy: StockPolicy,

    /// Where downloaded invoices are written.
    pub download_dir: PathBuf,

    /// How long a toast stays visible (seconds).
    pub toast_secs: u64,

    /// Start the session with the demo catalogue.
    pub seed_demo: bool,

    /// Description assistant settings.
    pub assist: AssistConfig,
}

impl Default for ConfigState {
    /// Returns default configuration.
    ///
    /// ## Default Values
    /// - Store: "Pambala AO"
    /// - Stock policy: saturating
    /// - Downloads: the user's download folder, else the working directory
    /// - Toast: 3 seconds
    /// - Demo seed: on
    fn default() -> Self {
        ConfigState {
            store_name: "Pambala AO".to_string(),
            stock_policy: DEFAULT_STOCK_POLICY,
            download_dir: default_download_dir(),
            toast_secs: 3,
            seed_demo: true,
            assist: AssistConfig::default(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);
        Self::load_with(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Loads configuration from `path` (if it exists) and an arbitrary
    /// variable lookup.
    pub fn load_with(
        path: Option<&Path>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                ConfigState::default()
            }
            None => ConfigState::default(),
        };

        config.apply_overrides(&var);
        config.assist = config.assist.with_vars(&var);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            ConfigState::default().with_env_secret()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.toast_secs == 0 {
            return Err(ConfigError::Invalid(
                "toast_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("PAMBALA_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(policy) = var("PAMBALA_STOCK_POLICY") {
            match policy.parse() {
                Ok(parsed) => self.stock_policy = parsed,
                Err(e) => warn!(policy = %policy, "Ignoring stock policy: {}", e),
            }
        }

        if let Some(dir) = var("PAMBALA_DOWNLOAD_DIR") {
            self.download_dir = PathBuf::from(dir);
        }

        if let Some(secs) = var("PAMBALA_TOAST_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                self.toast_secs = s;
            }
        }
    }

    fn with_env_secret(mut self) -> Self {
        self.assist = self.assist.with_env();
        self
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("ao", "pambala", "pambala-ao")
            .map(|dirs| dirs.config_dir().join("pambala.toml"))
    }

    /// Returns how long a toast stays visible.
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }
}
