//! # Product Commands
//!
//! Catalogue listing, search, edits and the "new product" form.
//!
//! ## Form Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──go productForm──► form.open()                              │
//! │                                  │                                      │
//! │                        set_form_field(...)   generate_description()    │
//! │                                  │                                      │
//! │                        submit_product()                                 │
//! │                                  │                                      │
//! │        validate ─► id = UUID v4, sku ??= SKU-XXXXXX ─► store.add       │
//! │                                  │                                      │
//! │        view → products, form closed, toast "Produto Adicionado!"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pambala_core::{CoreError, Product, ProductPatch};
use pambala_store::repository::product::generate_product_id;
use tracing::{debug, info};

use crate::commands::navigation;
use crate::error::ApiResult;
use crate::state::{
    DraftState, FormError, FormField, FormState, Notifier, ProductForm, StoreState, View,
    ViewState,
};

/// Toast shown after a product is created.
pub const PRODUCT_ADDED_TOAST: &str = "Produto Adicionado!";

/// Lists products, newest first, optionally filtered by name or SKU.
pub fn list_products(store: &StoreState, query: Option<&str>) -> Vec<Product> {
    debug!(?query, "list_products command");
    match query {
        Some(q) => store.inner().products().search(q),
        None => store.inner().products().list().to_vec(),
    }
}

/// Gets a single product by its ID.
pub fn get_product(store: &StoreState, id: &str) -> ApiResult<Product> {
    store
        .inner()
        .products()
        .get_by_id(id)
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
}

/// Updates one field of the open product form.
pub fn set_form_field(form: &FormState, field: FormField) -> ApiResult<ProductForm> {
    debug!(?field, "set_form_field command");
    form.set(field)?;
    Ok(form.current().ok_or(FormError::NotOpen)?)
}

/// Creates a product from the open form.
///
/// ## Errors
/// - `InvalidTransition` if the form is not open
/// - `ValidationError` for a blank name, negative price or stock
pub fn submit_product(
    store: &StoreState,
    form: &FormState,
    view: &ViewState,
    draft: &DraftState,
    toast: &Notifier,
) -> ApiResult<Product> {
    debug!("submit_product command");

    let fields = form.current().ok_or(FormError::NotOpen)?;
    let product = fields.to_product(generate_product_id())?;
    store.inner().products().add(product.clone())?;

    info!(id = %product.id, sku = %product.sku, "Product created from form");
    navigation::navigate(view, draft, form, View::Products)?;
    toast.show(PRODUCT_ADDED_TOAST);

    Ok(product)
}

/// Applies a partial update to an existing product.
pub fn update_product(store: &StoreState, id: &str, patch: &ProductPatch) -> ApiResult<Product> {
    debug!(id = %id, "update_product command");
    Ok(store.inner().products().update(id, patch)?)
}

/// Removes a product. Past sales keep referencing its id.
///
/// ## Returns
/// `true` if a product was removed.
pub fn delete_product(store: &StoreState, id: &str) -> bool {
    debug!(id = %id, "delete_product command");
    store.inner().products().delete(id)
}
