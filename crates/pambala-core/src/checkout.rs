//! # Checkout
//!
//! Turns a [`SaleDraft`] into an immutable sale [`Transaction`].
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Draft Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐  validate()   ┌───────────────┐  into_transaction(id)     │
//! │  │ Editing  │──────────────►│ ValidatedSale │─────────────────┐         │
//! │  │SaleDraft │               │  (Validating) │                 │         │
//! │  └──────────┘               └───────────────┘                 ▼         │
//! │       ▲   │                                            ┌─────────────┐  │
//! │       │   └── Err(EmptySelection | MissingCustomer |   │  Committed  │  │
//! │       │          StaleSelection | AmountOverflow |     │ Transaction │  │
//! │       │          DiscountExceedsSubtotal)              └─────────────┘  │
//! │       │          draft untouched                              │         │
//! │       └────────── reset() after the store accepts the sale ───┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `ValidatedSale` can only be built by `validate()`, so a transaction
//! produced from one always satisfies
//! `amount == Σ price_at_sale × quantity − discount`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::draft::{SaleDraft, SaleMetadata};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, SaleItem, Transaction, TransactionType, SALES_CATEGORY};
use crate::validation::validate_customer_name;

/// Prefix of every sale id.
pub const SALE_ID_PREFIX: &str = "VENDA-";

// =============================================================================
// Validated Sale
// =============================================================================

/// A draft that passed every commit precondition, with its lines priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSale {
    items: Vec<SaleItem>,
    subtotal: Money,
    amount: Money,
    metadata: SaleMetadata,
}

impl ValidatedSale {
    /// Priced sale lines, in selection order.
    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Final amount (subtotal minus discount).
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn metadata(&self) -> &SaleMetadata {
        &self.metadata
    }

    /// Builds the income transaction for this sale under `sale_id`.
    pub fn into_transaction(self, sale_id: String) -> Transaction {
        let meta = self.metadata;
        Transaction {
            id: sale_id,
            description: sale_description(&meta.customer_name),
            amount: self.amount,
            date: meta.date,
            time: meta.time,
            category: SALES_CATEGORY.to_string(),
            kind: TransactionType::Income,
            customer_name: Some(meta.customer_name),
            customer_gender: Some(meta.customer_gender),
            payment_method: Some(meta.payment_method),
            delivery_location: Some(meta.delivery_location),
            discount: Some(meta.discount),
            items: Some(self.items),
        }
    }
}

/// Description recorded on a sale transaction.
pub fn sale_description(customer_name: &str) -> String {
    format!("Venda p/ {}", customer_name)
}

impl SaleDraft {
    /// Checks the commit preconditions against the current products and
    /// prices every line.
    ///
    /// ## Preconditions (checked in order)
    /// 1. at least one product selected → `EmptySelection`
    /// 2. customer name not blank → `MissingCustomer`
    /// 3. every selected product still exists → `StaleSelection`
    /// 4. the subtotal fits in `Money` → `AmountOverflow`
    /// 5. discount ≤ subtotal → `DiscountExceedsSubtotal`
    ///
    /// ## Pricing
    /// `qty = max(1, quantity(id))`, `price = override(id) ?? sale_price`.
    /// The price is copied into the line, so later price edits never touch
    /// this sale.
    pub fn validate(&self, products: &[Product]) -> CoreResult<ValidatedSale> {
        if self.is_empty() {
            return Err(CoreError::EmptySelection);
        }

        if validate_customer_name(&self.metadata().customer_name).is_err() {
            return Err(CoreError::MissingCustomer);
        }

        let mut items = Vec::with_capacity(self.line_count());
        for id in self.selected() {
            let product = products
                .iter()
                .find(|p| &p.id == id)
                .ok_or_else(|| CoreError::StaleSelection {
                    product_id: id.clone(),
                })?;

            items.push(SaleItem {
                product_id: product.id.clone(),
                quantity: self.quantity(id),
                price_at_sale: self.unit_price(product),
            });
        }

        let mut subtotal = Money::zero();
        for item in &items {
            subtotal = item
                .price_at_sale
                .checked_mul_quantity(item.quantity)
                .and_then(|line| subtotal.checked_add(line))
                .ok_or_else(|| CoreError::AmountOverflow {
                    product_id: item.product_id.clone(),
                })?;
        }

        let discount = self.metadata().discount;
        if discount > subtotal {
            return Err(CoreError::DiscountExceedsSubtotal {
                subtotal: subtotal.kz(),
                discount: discount.kz(),
            });
        }

        let mut metadata = self.metadata().clone();
        metadata.customer_name = metadata.customer_name.trim().to_string();

        Ok(ValidatedSale {
            items,
            subtotal,
            amount: subtotal - discount,
            metadata,
        })
    }
}

// =============================================================================
// Sale Id Sequence
// =============================================================================

/// Allocates `VENDA-<nonce>` ids with a strictly increasing nonce.
///
/// The nonce follows the caller's millisecond clock but never repeats or
/// goes backwards: two sales in the same millisecond (or a clock step back)
/// get `last + 1`.
#[derive(Debug, Default)]
pub struct SaleIdSequence {
    last: AtomicU64,
}

impl SaleIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id given the current time in milliseconds.
    pub fn next_id(&self, now_millis: u64) -> String {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now_millis.max(prev + 1);
            match self
                .last
                .compare_exchange(prev, next, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return format!("{}{}", SALE_ID_PREFIX, next),
                Err(current) => prev = current,
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::MetadataField;
    use crate::types::{Gender, ProductCategory};
    use chrono::{NaiveDate, NaiveTime};

    fn product(id: &str, price: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produto {id}"),
            sku: format!("SKU-{id}"),
            category: ProductCategory::Clothing,
            cost_price: Money::zero(),
            sale_price: Money::from_kz(price),
            stock,
            image: String::new(),
            description: String::new(),
        }
    }

    fn draft() -> SaleDraft {
        SaleDraft::new(
            NaiveDate::from_ymd_opt(2024, 6, 24).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        )
    }

    fn named(mut d: SaleDraft, name: &str) -> SaleDraft {
        d.set_metadata(MetadataField::CustomerName(name.to_string()))
            .unwrap();
        d
    }

    #[test]
    fn test_empty_selection_checked_first() {
        let d = draft();
        assert_eq!(d.validate(&[]).unwrap_err(), CoreError::EmptySelection);
    }

    #[test]
    fn test_missing_customer() {
        let mut d = draft();
        d.toggle("1");
        let products = vec![product("1", 100, 3)];
        assert_eq!(
            d.validate(&products).unwrap_err(),
            CoreError::MissingCustomer
        );

        let d = named(d, "   ");
        assert_eq!(
            d.validate(&products).unwrap_err(),
            CoreError::MissingCustomer
        );
    }

    #[test]
    fn test_stale_selection() {
        let mut d = draft();
        d.toggle("1");
        d.toggle("gone");
        let d = named(d, "Ana");
        assert_eq!(
            d.validate(&[product("1", 100, 3)]).unwrap_err(),
            CoreError::StaleSelection {
                product_id: "gone".to_string()
            }
        );
    }

    #[test]
    fn test_huge_quantity_fails_instead_of_wrapping() {
        let mut d = draft();
        d.toggle("1");
        d.set_quantity("1", 10_000_000_000_000_000);
        let d = named(d, "Ana");
        let products = vec![product("1", 4_990, 3)];

        assert_eq!(
            d.validate(&products).unwrap_err(),
            CoreError::AmountOverflow {
                product_id: "1".to_string()
            }
        );
        assert_eq!(d.subtotal(&products), Money::MAX);
    }

    #[test]
    fn test_lines_overflow_when_summed() {
        let mut d = draft();
        d.toggle("1");
        d.toggle("2");
        d.set_quantity("1", i64::MAX / 2);
        d.set_quantity("2", i64::MAX / 2);
        let d = named(d, "Ana");
        let products = vec![product("1", 2, 0), product("2", 2, 0)];

        assert_eq!(
            d.validate(&products).unwrap_err(),
            CoreError::AmountOverflow {
                product_id: "2".to_string()
            }
        );
    }

    #[test]
    fn test_discount_larger_than_subtotal_rejected() {
        let mut d = draft();
        d.toggle("1");
        d.set_metadata(MetadataField::Discount(Money::from_kz(150)))
            .unwrap();
        let d = named(d, "Ana");
        assert_eq!(
            d.validate(&[product("1", 100, 3)]).unwrap_err(),
            CoreError::DiscountExceedsSubtotal {
                subtotal: 100,
                discount: 150
            }
        );
    }

    #[test]
    fn test_single_line_sale() {
        let mut d = draft();
        d.toggle("1");
        d.set_quantity("1", 2);
        let d = named(d, "Ana");

        let sale = d.validate(&[product("1", 100, 3)]).unwrap();
        assert_eq!(sale.amount().kz(), 200);

        let t = sale.into_transaction("VENDA-1".to_string());
        assert_eq!(t.amount.kz(), 200);
        assert_eq!(t.description, "Venda p/ Ana");
        assert_eq!(t.category, "Vendas");
        assert!(t.is_income());
        assert_eq!(t.customer_gender, Some(Gender::Female));
        assert_eq!(
            t.items(),
            &[SaleItem {
                product_id: "1".to_string(),
                quantity: 2,
                price_at_sale: Money::from_kz(100),
            }]
        );
    }

    #[test]
    fn test_two_lines_with_discount() {
        let mut d = draft();
        d.toggle("A");
        d.toggle("B");
        d.set_quantity("A", 2);
        d.set_metadata(MetadataField::Discount(Money::from_kz(20)))
            .unwrap();
        let d = named(d, "X");

        let sale = d
            .validate(&[product("A", 50, 9), product("B", 30, 9)])
            .unwrap();
        assert_eq!(sale.subtotal().kz(), 130);
        assert_eq!(sale.amount().kz(), 110);
    }

    #[test]
    fn test_quantity_above_stock_is_not_a_validation_error() {
        let mut d = draft();
        d.toggle("1");
        d.set_quantity("1", 5);
        let d = named(d, "Ana");
        let sale = d.validate(&[product("1", 100, 3)]).unwrap();
        assert_eq!(sale.items()[0].quantity, 5);
        assert_eq!(sale.amount().kz(), 500);
    }

    #[test]
    fn test_override_snapshot() {
        let mut d = draft();
        d.toggle("1");
        d.set_price_override("1", Some(Money::from_kz(80))).unwrap();
        let d = named(d, "Ana");
        let sale = d.validate(&[product("1", 100, 3)]).unwrap();
        assert_eq!(sale.items()[0].price_at_sale.kz(), 80);
    }

    #[test]
    fn test_customer_name_trimmed() {
        let mut d = draft();
        d.toggle("1");
        let d = named(d, "  Ana  ");
        let t = d
            .validate(&[product("1", 100, 3)])
            .unwrap()
            .into_transaction("VENDA-9".to_string());
        assert_eq!(t.customer_name.as_deref(), Some("Ana"));
        assert_eq!(t.description, "Venda p/ Ana");
    }

    #[test]
    fn test_sale_ids_strictly_increase() {
        let seq = SaleIdSequence::new();
        assert_eq!(seq.next_id(1_000), "VENDA-1000");
        assert_eq!(seq.next_id(1_000), "VENDA-1001");
        // clock stepped back
        assert_eq!(seq.next_id(900), "VENDA-1002");
        assert_eq!(seq.next_id(5_000), "VENDA-5000");
    }
}
