//! # Product Repository
//!
//! Catalogue operations over the product collection.
//!
//! ## Key Operations
//! - Prepend-on-add (newest first, no timestamp sort needed)
//! - Patch-based update
//! - Idempotent delete
//! - Substring search over name and SKU
//! - Stock debit under a [`StockPolicy`]
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types: "jeans"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  case-insensitive match on name or sku                                 │
//! │                                                                         │
//! │  CMB-001 | Camiseta Básica Preta                                       │
//! │  CJS-042 | Calça Jeans Skinny        ← MATCH                           │
//! │  TCB-088 | Tênis Casual Branco                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results keep catalogue order: [CJS-042]                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use pambala_core::stock::{debit_stock, StockPolicy};
use pambala_core::validation::validate_product;
use pambala_core::{Product, ProductPatch, SaleItem};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

/// Repository for product operations.
///
/// ## Usage
/// ```rust
/// use pambala_store::EntityStore;
///
/// let store = EntityStore::seeded();
/// let repo = store.products();
///
/// let results = repo.search("jeans");
/// assert_eq!(results[0].sku, "CJS-042");
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: EntityStore,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(store: EntityStore) -> Self {
        ProductRepository { store }
    }

    /// Returns the whole catalogue, newest first.
    pub fn list(&self) -> Arc<Vec<Product>> {
        self.store.read(|snap| Arc::clone(&snap.products))
    }

    /// Gets a product by its ID.
    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        self.store
            .read(|snap| snap.products.iter().find(|p| p.id == id).cloned())
    }

    /// Case-insensitive substring search over name and SKU.
    ///
    /// An empty query returns the whole catalogue.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        debug!(query = %needle, "Searching products");

        self.store.read(|snap| {
            snap.products
                .iter()
                .filter(|p| {
                    needle.is_empty()
                        || p.name.to_lowercase().contains(&needle)
                        || p.sku.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect()
        })
    }

    /// Adds a product at the front of the catalogue.
    ///
    /// ## Errors
    /// - `Duplicate` if the id is already taken
    /// - `Core(Validation)` if a field is invalid
    pub fn add(&self, product: Product) -> StoreResult<()> {
        validate_product(&product)?;

        self.store.write("add_product", |snap| {
            if snap.products.iter().any(|p| p.id == product.id) {
                return Err(StoreError::duplicate("product id", &product.id));
            }

            info!(id = %product.id, sku = %product.sku, "Adding product");
            let mut products = Vec::with_capacity(snap.products.len() + 1);
            products.push(product);
            products.extend(snap.products.iter().cloned());
            snap.products = Arc::new(products);
            Ok(())
        })
    }

    /// Replaces the matching product with `patch` applied.
    ///
    /// ## Errors
    /// - `NotFound` if no product has this id
    pub fn update(&self, id: &str, patch: &ProductPatch) -> StoreResult<Product> {
        self.store.write("update_product", |snap| {
            let current = snap
                .products
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::not_found("Product", id))?;

            let updated = patch.apply(current);
            validate_product(&updated)?;

            debug!(id = %id, "Updating product");
            snap.products = Arc::new(
                snap.products
                    .iter()
                    .map(|p| if p.id == id { updated.clone() } else { p.clone() })
                    .collect(),
            );
            Ok(updated)
        })
    }

    /// Removes a product. Deleting an absent id is a no-op.
    ///
    /// Past transactions keep their items untouched.
    ///
    /// ## Returns
    /// `true` if a product was removed.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.store.write("delete_product", |snap| {
            if !snap.products.iter().any(|p| p.id == id) {
                return Ok(false);
            }
            snap.products = Arc::new(snap.products.iter().filter(|p| p.id != id).cloned().collect());
            Ok(true)
        });

        let removed = matches!(removed, Ok(true));
        if removed {
            info!(id = %id, "Deleted product");
        }
        removed
    }

    /// Debits stock for every item as one replacement of the catalogue.
    ///
    /// ## Errors
    /// - `Core(StaleSelection)` if an item names an unknown product
    /// - `Core(InsufficientStock)` under [`StockPolicy::Reject`]
    pub fn debit_stock(&self, items: &[SaleItem], policy: StockPolicy) -> StoreResult<()> {
        self.store.write("debit_stock", |snap| {
            snap.products = Arc::new(debit_stock(&snap.products, items, policy)?);
            Ok(())
        })
    }

    /// Counts products.
    pub fn count(&self) -> usize {
        self.store.read(|snap| snap.products.len())
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a `SKU-XXXXXX` code for products created without one.
///
/// ## Example
/// ```rust
/// use pambala_store::repository::product::generate_sku;
///
/// let sku = generate_sku();
/// assert!(sku.starts_with("SKU-"));
/// assert_eq!(sku.len(), 10);
/// ```
pub fn generate_sku() -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("SKU-{}", &raw[..6])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pambala_core::{CoreError, Money, ProductCategory};

    fn product(id: &str, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produto {id}"),
            sku: format!("SKU-{id}"),
            category: ProductCategory::Electronics,
            cost_price: Money::from_kz(10),
            sale_price: Money::from_kz(100),
            stock,
            image: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_add_prepends() {
        let store = EntityStore::new();
        let repo = store.products();
        repo.add(product("a", 1)).unwrap();
        repo.add(product("b", 1)).unwrap();

        let ids: Vec<String> = repo.list().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let store = EntityStore::new();
        let repo = store.products();
        repo.add(product("a", 1)).unwrap();
        assert_eq!(
            repo.add(product("a", 9)).unwrap_err(),
            StoreError::duplicate("product id", "a")
        );
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn test_add_rejects_negative_stock() {
        let store = EntityStore::new();
        let err = store.products().add(product("a", -1)).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_update() {
        let store = EntityStore::new();
        let repo = store.products();
        repo.add(product("a", 1)).unwrap();

        let patch = ProductPatch {
            sale_price: Some(Money::from_kz(250)),
            ..ProductPatch::default()
        };
        let updated = repo.update("a", &patch).unwrap();
        assert_eq!(updated.sale_price.kz(), 250);
        assert_eq!(repo.get_by_id("a").unwrap().sale_price.kz(), 250);

        assert_eq!(
            repo.update("zz", &patch).unwrap_err(),
            StoreError::not_found("Product", "zz")
        );
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = EntityStore::new();
        let repo = store.products();
        repo.add(product("a", 1)).unwrap();

        assert!(repo.delete("a"));
        assert!(!repo.delete("a"));
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_search_matches_name_and_sku() {
        let store = EntityStore::seeded();
        let repo = store.products();

        assert_eq!(repo.search("JEANS").len(), 1);
        assert_eq!(repo.search("tcb").len(), 1);
        assert_eq!(repo.search("").len(), 3);
        assert!(repo.search("inexistente").is_empty());
    }

    #[test]
    fn test_debit_stock_reject_is_all_or_nothing() {
        let store = EntityStore::new();
        let repo = store.products();
        repo.add(product("a", 5)).unwrap();
        repo.add(product("b", 1)).unwrap();

        let items = vec![
            SaleItem {
                product_id: "a".to_string(),
                quantity: 2,
                price_at_sale: Money::from_kz(100),
            },
            SaleItem {
                product_id: "b".to_string(),
                quantity: 3,
                price_at_sale: Money::from_kz(100),
            },
        ];

        assert!(repo.debit_stock(&items, StockPolicy::Reject).is_err());
        assert_eq!(repo.get_by_id("a").unwrap().stock, 5);

        repo.debit_stock(&items, StockPolicy::Saturating).unwrap();
        assert_eq!(repo.get_by_id("a").unwrap().stock, 3);
        assert_eq!(repo.get_by_id("b").unwrap().stock, 0);
    }

    #[test]
    fn test_generated_sku_shape() {
        let sku = generate_sku();
        assert!(sku.starts_with("SKU-"));
        assert!(sku[4..].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(generate_sku(), generate_sku());
    }
}
