//! # Invoice Commands
//!
//! The "Baixar Factura" button of the success screen.

use pambala_core::invoice::{render_invoice, Invoice};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::sink::InvoiceSink;
use crate::state::{Notifier, StoreState};

/// Toast shown after a download.
pub const INVOICE_TOAST: &str = "Factura descarregada!";

/// A delivered invoice and where the sink put it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedInvoice {
    pub invoice: Invoice,
    pub location: String,
}

/// Renders the factura for `sale_id` and hands it to `sink`.
///
/// ## Behavior
/// - Unknown id (or an expense id): no-op, `Ok(None)`, no toast
/// - Otherwise: render with the profile's store name, offer, toast
///
/// ## Errors
/// `Internal` if the sink fails to write.
pub fn download_invoice(
    store: &StoreState,
    toast: &Notifier,
    sink: &dyn InvoiceSink,
    sale_id: &str,
) -> ApiResult<Option<DownloadedInvoice>> {
    debug!(sale_id = %sale_id, "download_invoice command");

    let sale = match store.inner().sales().get_by_id(sale_id) {
        Ok(sale) => sale,
        Err(e) => {
            debug!(sale_id = %sale_id, error = %e, "No sale to invoice");
            return Ok(None);
        }
    };

    let products = store.inner().products().list();
    let profile = store.inner().profile().get();
    let invoice = render_invoice(&sale, &products, &profile.store_name);

    let location = sink.offer(&invoice)?;
    info!(sale_id = %sale_id, location = %location, "Invoice downloaded");
    toast.show(INVOICE_TOAST);

    Ok(Some(DownloadedInvoice { invoice, location }))
}
