//! # Sale Commands
//!
//! Draft editing on the `sales` / `manualSaleDetails` screens and the
//! commit that turns the draft into a ledger entry.
//!
//! ## Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commit_sale()                                                          │
//! │       │                                                                 │
//! │       ├─ view must be manualSaleDetails                                 │
//! │       ├─ products = store snapshot                                      │
//! │       ├─ draft.validate(products) ──► EmptySelection / MissingCustomer  │
//! │       │                               StaleSelection / Discount...      │
//! │       ├─ id = VENDA-<n>                                                 │
//! │       ├─ store.sales().commit(sale, policy)   ◄── the only mutation     │
//! │       ├─ checkout.record(id)                                            │
//! │       ├─ draft.reset()                                                  │
//! │       └─ view → saleSuccess, toast                                      │
//! │                                                                         │
//! │  Any failure before the store commit leaves every state untouched.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pambala_core::{
    CoreError, MetadataField, Money, Product, SaleDraft, SaleMetadata, Transaction,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::{CheckoutState, ConfigState, DraftState, Notifier, StoreState, View, ViewError, ViewState};

/// Toast shown after a successful commit.
pub const SALE_SUCCESS_TOAST: &str = "Venda registada com sucesso!";

/// One row of the sales screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleProductRow {
    pub product: Product,
    pub selected: bool,
    pub quantity: i64,
}

/// One line of the details screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
    pub stock: i64,
}

/// Everything the details screen shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub lines: Vec<DraftLine>,
    pub subtotal: Money,
    pub total: Money,
    pub metadata: SaleMetadata,
    /// The "next" button is enabled.
    pub can_proceed: bool,
    /// The delivery location names one of the listed municipalities.
    pub known_location: bool,
}

/// Lists the catalogue with the draft's selection marks.
pub fn list_sale_products(store: &StoreState, draft: &DraftState) -> Vec<SaleProductRow> {
    let products = store.inner().products().list();
    draft.with_draft(|d| {
        products
            .iter()
            .map(|p| SaleProductRow {
                product: p.clone(),
                selected: d.is_selected(&p.id),
                quantity: d.quantity(&p.id),
            })
            .collect()
    })
}

/// Adds or removes a product from the draft.
///
/// ## Returns
/// `true` if the product is selected afterwards.
pub fn toggle_product(store: &StoreState, draft: &DraftState, product_id: &str) -> ApiResult<bool> {
    debug!(product_id = %product_id, "toggle_product command");
    let selected = draft.with_draft(|d| d.is_selected(product_id));

    // Deselecting a since-deleted product must stay possible.
    if !selected && store.inner().products().get_by_id(product_id).is_none() {
        return Err(CoreError::ProductNotFound(product_id.to_string()).into());
    }

    Ok(draft.with_draft_mut(|d| d.toggle(product_id)))
}

/// Sets the quantity of a selected line (clamped to ≥ 1).
pub fn set_quantity(draft: &DraftState, product_id: &str, quantity: i64) -> ApiResult<i64> {
    debug!(product_id = %product_id, quantity, "set_quantity command");
    draft.with_draft_mut(|d| {
        ensure_selected(d, product_id)?;
        Ok(d.set_quantity(product_id, quantity))
    })
}

/// Sets or clears the price override of a selected line.
pub fn set_price_override(
    draft: &DraftState,
    product_id: &str,
    price: Option<Money>,
) -> ApiResult<()> {
    debug!(product_id = %product_id, ?price, "set_price_override command");
    draft.with_draft_mut(|d| {
        ensure_selected(d, product_id)?;
        d.set_price_override(product_id, price)?;
        Ok(())
    })
}

/// Updates one metadata field of the draft.
pub fn set_metadata(draft: &DraftState, field: MetadataField) -> ApiResult<()> {
    debug!(?field, "set_metadata command");
    draft.with_draft_mut(|d| d.set_metadata(field))?;
    Ok(())
}

fn ensure_selected(draft: &SaleDraft, product_id: &str) -> ApiResult<()> {
    if draft.is_selected(product_id) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "Produto não selecionado: {}",
            product_id
        )))
    }
}

/// Builds the details-screen view of the draft.
///
/// Lines whose product was deleted are left out; the commit reports them.
pub fn draft_summary(store: &StoreState, draft: &DraftState) -> DraftSummary {
    let products = store.inner().products().list();
    draft.with_draft(|d| {
        let lines = d
            .selected()
            .iter()
            .filter_map(|id| products.iter().find(|p| &p.id == id))
            .map(|p| {
                let quantity = d.quantity(&p.id);
                let unit_price = d.unit_price(p);
                DraftLine {
                    product_id: p.id.clone(),
                    name: p.name.clone(),
                    quantity,
                    unit_price,
                    line_total: unit_price.multiply_quantity(quantity),
                    stock: p.stock,
                }
            })
            .collect();

        DraftSummary {
            lines,
            subtotal: d.subtotal(&products),
            total: d.total(&products),
            metadata: d.metadata().clone(),
            can_proceed: !d.is_empty(),
            known_location: d.metadata().is_known_location(),
        }
    })
}

/// Commits the draft as an income transaction.
///
/// ## Errors
/// - `InvalidTransition` unless the details screen is showing
/// - `EmptySelection`, `MissingCustomer`, `StaleSelection`,
///   `AmountOverflow`, `DiscountExceedsSubtotal` from validation
/// - `InsufficientStock` under the reject policy
pub fn commit_sale(
    store: &StoreState,
    draft: &DraftState,
    view: &ViewState,
    toast: &Notifier,
    checkout: &CheckoutState,
    config: &ConfigState,
) -> ApiResult<Transaction> {
    debug!("commit_sale command");

    let current = view.current();
    if current != View::ManualSaleDetails {
        return Err(ViewError::Blocked {
            from: current,
            to: View::SaleSuccess,
        }
        .into());
    }

    let products = store.inner().products().list();
    let validated = draft.with_draft(|d| d.validate(&products))?;

    let sale = validated.into_transaction(checkout.next_sale_id());
    store
        .inner()
        .sales()
        .commit(sale.clone(), config.stock_policy)?;

    info!(
        sale_id = %sale.id,
        amount = sale.amount.kz(),
        lines = sale.items().len(),
        "Sale committed"
    );

    checkout.record(sale.id.clone());
    draft.reset();
    if let Err(e) = view.show_sale_success() {
        warn!(error = %e, "Sale committed but success screen not shown");
    }
    toast.show(SALE_SUCCESS_TOAST);

    Ok(sale)
}
