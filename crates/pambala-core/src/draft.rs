//! # Sale Draft
//!
//! The transient, pre-commit representation of a sale being composed.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Draft Operations                                │
//! │                                                                         │
//! │  Screen                 Operation                 Draft Change          │
//! │  ──────                 ─────────                 ────────────          │
//! │                                                                         │
//! │  sales: tap product ───► toggle(id) ────────────► selected ± id        │
//! │                                                  quantity[id] ??= 1    │
//! │                                                                         │
//! │  sales: − / + ─────────► set_quantity(id, q) ───► quantity[id] = max(1,q)│
//! │                                                                         │
//! │  details: price field ─► set_price_override() ──► override[id]         │
//! │                                                                         │
//! │  details: form fields ─► set_metadata(field) ───► metadata.field       │
//! │                                                                         │
//! │  details: submit ──────► validate() (checkout.rs) ──► ValidatedSale    │
//! │                                                                         │
//! │  commit / leave flow ──► reset(date, time) ─────► defaults             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft holds product ids only. Prices and names are always read from
//! the product snapshot passed in, so the draft never owns a `Product`.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::money::Money;
use crate::types::{Gender, Municipality, PaymentMethod, Product};
use crate::validation::{validate_non_negative, ValidationResult};

// =============================================================================
// Metadata
// =============================================================================

/// Customer and logistics details of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleMetadata {
    pub customer_name: String,
    pub customer_gender: Gender,
    pub payment_method: PaymentMethod,
    /// Free text; [`Municipality`] values are suggestions.
    pub delivery_location: String,
    /// Whole Kwanza subtracted from the subtotal. Never negative.
    pub discount: Money,
    pub date: NaiveDate,
    #[serde(with = "crate::types::hhmm")]
    pub time: NaiveTime,
}

impl SaleMetadata {
    /// Default metadata stamped with the given date and time.
    ///
    /// ## Defaults
    /// - gender: Feminino
    /// - payment: Dinheiro em Mão
    /// - delivery: Luanda
    /// - discount: 0
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        SaleMetadata {
            customer_name: String::new(),
            customer_gender: Gender::default(),
            payment_method: PaymentMethod::default(),
            delivery_location: crate::DEFAULT_MUNICIPALITY.label().to_string(),
            discount: Money::zero(),
            date,
            time,
        }
    }

    /// Checks if the delivery location is one of the recognised
    /// municipalities.
    pub fn is_known_location(&self) -> bool {
        self.delivery_location.parse::<Municipality>().is_ok()
    }
}

/// One editable metadata field with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataField {
    CustomerName(String),
    Gender(Gender),
    PaymentMethod(PaymentMethod),
    DeliveryLocation(String),
    Discount(Money),
    Date(NaiveDate),
    Time(NaiveTime),
}

// =============================================================================
// Sale Draft
// =============================================================================

/// An in-progress sale.
///
/// ## Invariants
/// - `selected` holds each product id at most once, in selection order
/// - every stored quantity is ≥ 1
/// - every stored price override is ≥ 0
/// - the discount is ≥ 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    selected: Vec<String>,
    /// Kept across deselection so re-selecting restores the quantity.
    quantities: BTreeMap<String, i64>,
    price_overrides: BTreeMap<String, Money>,
    metadata: SaleMetadata,
}

impl SaleDraft {
    /// Creates an empty draft stamped with the given date and time.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        SaleDraft {
            selected: Vec::new(),
            quantities: BTreeMap::new(),
            price_overrides: BTreeMap::new(),
            metadata: SaleMetadata::new(date, time),
        }
    }

    /// Adds or removes a product from the selection.
    ///
    /// When adding, the quantity is initialised to 1 unless one is already
    /// recorded.
    ///
    /// ## Returns
    /// `true` if the product is selected after the call.
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|id| id == product_id) {
            self.selected.remove(pos);
            return false;
        }

        self.selected.push(product_id.to_string());
        self.quantities.entry(product_id.to_string()).or_insert(1);
        true
    }

    /// Sets the quantity for a product, clamped to at least 1.
    ///
    /// There is no upper bound here; stock is only consulted at commit.
    ///
    /// ## Returns
    /// The quantity actually stored.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> i64 {
        let quantity = quantity.max(1);
        self.quantities.insert(product_id.to_string(), quantity);
        quantity
    }

    /// Sets (`Some`) or clears (`None`) the per-line price override.
    pub fn set_price_override(
        &mut self,
        product_id: &str,
        price: Option<Money>,
    ) -> ValidationResult<()> {
        match price {
            Some(price) => {
                validate_non_negative("price", price)?;
                self.price_overrides.insert(product_id.to_string(), price);
            }
            None => {
                self.price_overrides.remove(product_id);
            }
        }
        Ok(())
    }

    /// Updates one metadata field.
    ///
    /// ## Errors
    /// `ValidationError::Negative` for a negative discount. Every other
    /// field is accepted as given; the customer name is only checked at
    /// commit.
    pub fn set_metadata(&mut self, field: MetadataField) -> ValidationResult<()> {
        match field {
            MetadataField::CustomerName(name) => self.metadata.customer_name = name,
            MetadataField::Gender(gender) => self.metadata.customer_gender = gender,
            MetadataField::PaymentMethod(method) => self.metadata.payment_method = method,
            MetadataField::DeliveryLocation(location) => {
                self.metadata.delivery_location = location
            }
            MetadataField::Discount(discount) => {
                validate_non_negative("discount", discount)?;
                self.metadata.discount = discount;
            }
            MetadataField::Date(date) => self.metadata.date = date,
            MetadataField::Time(time) => self.metadata.time = time,
        }
        Ok(())
    }

    /// Clears selection, quantities, overrides and metadata back to the
    /// defaults, stamped with the given date and time.
    pub fn reset(&mut self, date: NaiveDate, time: NaiveTime) {
        *self = SaleDraft::new(date, time);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Selected product ids, in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, product_id: &str) -> bool {
        self.selected.iter().any(|id| id == product_id)
    }

    /// Checks if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected lines.
    pub fn line_count(&self) -> usize {
        self.selected.len()
    }

    /// Quantity for a product, 1 when unset.
    pub fn quantity(&self, product_id: &str) -> i64 {
        self.quantities.get(product_id).copied().unwrap_or(1).max(1)
    }

    pub fn price_override(&self, product_id: &str) -> Option<Money> {
        self.price_overrides.get(product_id).copied()
    }

    pub fn metadata(&self) -> &SaleMetadata {
        &self.metadata
    }

    /// Unit price for a line: the override when set, else the product's
    /// current sale price.
    pub fn unit_price(&self, product: &Product) -> Money {
        self.price_override(&product.id).unwrap_or(product.sale_price)
    }

    /// `Σ quantity × unit price` over selected products found in
    /// `products`. Missing products contribute nothing.
    pub fn subtotal(&self, products: &[Product]) -> Money {
        self.selected
            .iter()
            .filter_map(|id| products.iter().find(|p| &p.id == id))
            .map(|p| self.unit_price(p).multiply_quantity(self.quantity(&p.id)))
            .sum()
    }

    /// Subtotal minus discount.
    ///
    /// Signed: a discount larger than the subtotal yields a negative total.
    /// Such a draft is rejected at commit with
    /// `CoreError::DiscountExceedsSubtotal`.
    pub fn total(&self, products: &[Product]) -> Money {
        self.subtotal(products) - self.metadata.discount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
