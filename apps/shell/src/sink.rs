//! # Invoice Sinks
//!
//! Where a rendered factura goes when the user asks to download it.
//!
//! ```text
//! ┌──────────────────────────┐        ┌──────────────────────────────────┐
//! │ download_invoice()       │ offer  │ DownloadDir                      │
//! │  render_invoice(sale) ───┼───────►│  <download_dir>/Factura_<id>.txt │
//! └──────────────────────────┘        ├──────────────────────────────────┤
//!                                     │ MemorySink (tests, embedding)    │
//!                                     └──────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pambala_core::Invoice;
use tracing::info;

/// Host hand-off for invoice artifacts.
pub trait InvoiceSink: Send + Sync {
    /// Delivers `invoice` and returns where it ended up.
    fn offer(&self, invoice: &Invoice) -> io::Result<String>;
}

/// Writes invoices as files into a directory.
#[derive(Debug, Clone)]
pub struct DownloadDir {
    dir: PathBuf,
}

impl DownloadDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DownloadDir { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl InvoiceSink for DownloadDir {
    fn offer(&self, invoice: &Invoice) -> io::Result<String> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&invoice.file_name);
        std::fs::write(&path, &invoice.content)?;
        info!(path = %path.display(), "Invoice written");
        Ok(path.display().to_string())
    }
}

/// Keeps invoices in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    offered: Mutex<Vec<Invoice>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every invoice offered so far, oldest first.
    pub fn offered(&self) -> Vec<Invoice> {
        self.offered.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl InvoiceSink for MemorySink {
    fn offer(&self, invoice: &Invoice) -> io::Result<String> {
        self.offered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(invoice.clone());
        Ok(invoice.file_name.clone())
    }
}
