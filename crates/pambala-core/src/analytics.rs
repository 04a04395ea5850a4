//! # Analytics Aggregator
//!
//! Derives the report series and the dashboard summary from the
//! transaction list. Everything here is a pure function of its inputs;
//! caching is the caller's concern.
//!
//! ## Series
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  income transactions ──┬──► top products    (qty by name, top 5)       │
//! │        + products      ├──► category sales  (qty by current category)  │
//! │                        ├──► location sales  (Σ amount by município)    │
//! │                        └──► gender split    (Feminino/Masculino/Outro) │
//! │                                                                         │
//! │  all transactions ────────► summary (income, expenses, balance)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keyed series keep first-occurrence order, so ties in the top-products
//! ranking resolve to whichever product sold first.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Gender, Product, Transaction};

/// Length of the top-products series.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// One bar or slice of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeriesPoint {
    pub name: String,
    pub value: i64,
}

impl SeriesPoint {
    fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The four report series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportInsights {
    pub top_products: Vec<SeriesPoint>,
    pub category_sales: Vec<SeriesPoint>,
    pub location_sales: Vec<SeriesPoint>,
    pub gender_distribution: Vec<SeriesPoint>,
}

/// Dashboard totals over every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinancialSummary {
    pub income: Money,
    /// Sum of expense magnitudes (positive).
    pub expenses: Money,
    pub balance: Money,
}

/// Insertion-ordered accumulator. Saturates at `i64::MAX`.
#[derive(Default)]
struct Tally(Vec<SeriesPoint>);

impl Tally {
    fn add(&mut self, key: &str, value: i64) {
        match self.0.iter_mut().find(|p| p.name == key) {
            Some(point) => point.value = point.value.saturating_add(value),
            None => self.0.push(SeriesPoint::new(key, value)),
        }
    }

    fn into_points(self) -> Vec<SeriesPoint> {
        self.0
    }
}

/// Computes every report series.
///
/// Only income transactions count. Sale items whose product has been
/// deleted are skipped in the product and category series; the
/// transaction itself still counts toward location and gender.
pub fn compute(transactions: &[Transaction], products: &[Product]) -> ReportInsights {
    let mut by_product = Tally::default();
    let mut by_category = Tally::default();
    let mut by_location = Tally::default();
    let mut genders = [0i64; 3];

    for t in transactions.iter().filter(|t| t.is_income()) {
        for item in t.items() {
            let Some(product) = products.iter().find(|p| p.id == item.product_id) else {
                continue;
            };
            by_product.add(&product.name, item.quantity);
            by_category.add(product.category.label(), item.quantity);
        }

        if let Some(location) = &t.delivery_location {
            by_location.add(location, t.amount.kz());
        }

        if let Some(gender) = t.customer_gender {
            if let Some(slot) = GENDER_BUCKETS.iter().position(|g| *g == gender) {
                genders[slot] += 1;
            }
        }
    }

    let mut top_products = by_product.into_points();
    // stable: ties keep first-occurrence order
    top_products.sort_by(|a, b| b.value.cmp(&a.value));
    top_products.truncate(TOP_PRODUCTS_LIMIT);

    ReportInsights {
        top_products,
        category_sales: by_category.into_points(),
        location_sales: by_location.into_points(),
        gender_distribution: GENDER_BUCKETS
            .iter()
            .zip(genders)
            .map(|(g, count)| SeriesPoint::new(g.label(), count))
            .collect(),
    }
}

/// Fixed axis of the gender chart.
pub const GENDER_BUCKETS: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Other];

/// Income, expenses and balance over all transactions.
pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let (income, expenses) = transactions.iter().fold(
        (Money::zero(), Money::zero()),
        |(income, expenses), t| {
            if t.is_income() {
                (income + t.amount, expenses)
            } else {
                (income, expenses + t.amount.abs())
            }
        },
    );

    FinancialSummary {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// The `n` most recent transactions (the list is kept newest first).
pub fn recent(transactions: &[Transaction], n: usize) -> &[Transaction] {
    &transactions[..n.min(transactions.len())]
}

// =============================================================================
// Unit Tests
// =============================================================================
