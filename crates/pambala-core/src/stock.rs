//! # Stock Debit
//!
//! Computes the product list that results from selling a set of items.
//!
//! ## Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stock = 3, sold = 5                                                   │
//! │                                                                         │
//! │  Saturating (default) ──► new stock = max(0, 3 − 5) = 0   sale kept    │
//! │  Reject               ──► InsufficientStock { available 3, req 5 }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The saturating policy tolerates overselling: the shop floor is the source
//! of truth, and the count only has to stay non-negative.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, SaleItem};

/// What a commit does when a line sells more than the stock on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Floor the stock at zero and accept the sale.
    #[default]
    Saturating,
    /// Refuse the whole sale.
    Reject,
}

/// The policy used when none is configured.
pub const DEFAULT_STOCK_POLICY: StockPolicy = StockPolicy::Saturating;

impl std::str::FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "saturating" | "saturate" => Ok(StockPolicy::Saturating),
            "reject" | "strict" => Ok(StockPolicy::Reject),
            _ => Err(format!("Unknown stock policy: {}", s)),
        }
    }
}

/// Returns `products` with every item's quantity debited.
///
/// Pure: the input slice is untouched, so the caller can swap the result in
/// as one whole-collection replacement.
///
/// ## Errors
/// - `StaleSelection` if an item names a product not in `products`
/// - `InsufficientStock` under [`StockPolicy::Reject`] when a line (or the
///   sum of lines for the same product) exceeds the stock
pub fn debit_stock(
    products: &[Product],
    items: &[SaleItem],
    policy: StockPolicy,
) -> CoreResult<Vec<Product>> {
    let mut updated = products.to_vec();

    for item in items {
        let product = updated
            .iter_mut()
            .find(|p| p.id == item.product_id)
            .ok_or_else(|| CoreError::StaleSelection {
                product_id: item.product_id.clone(),
            })?;

        let remaining = product.stock.saturating_sub(item.quantity);
        if remaining < 0 && policy == StockPolicy::Reject {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.stock,
                requested: item.quantity,
            });
        }

        product.stock = remaining.max(0);
    }

    Ok(updated)
}

// =============================================================================
// Unit Tests
// =============================================================================
