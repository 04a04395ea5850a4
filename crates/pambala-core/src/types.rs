//! # Domain Types
//!
//! Core domain types used throughout Pambala AO.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │     Client      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (VENDA-n)   │   │  id             │       │
//! │  │  sku            │   │  amount (±)     │   │  name, phone    │       │
//! │  │  category       │   │  date, time     │   │  category       │       │
//! │  │  sale_price     │   │  items ─────────┼──►│  status         │       │
//! │  │  stock          │   │  metadata       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │           ▲                     │                                       │
//! │           └──── SaleItem.product_id (borrowed by id, never owned)       │
//! │                                                                         │
//! │  Enumerations (labels are bit-exact user input):                       │
//! │  ProductCategory · ClientCategory · ClientStatus · PaymentMethod ·     │
//! │  Gender · Municipality · TransactionType                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Category recorded on every sale transaction.
pub const SALES_CATEGORY: &str = "Vendas";

/// Image used for products created without one.
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://images.unsplash.com/photo-1523275335684-37898b6baf30?q=80&w=200&auto=format&fit=crop";

// =============================================================================
// Labelled Enumerations
// =============================================================================

/// Declares a closed enumeration whose serialised form, `Display` and
/// `FromStr` all use the exact Portuguese label.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:tt {
            $( $(#[$vmeta:meta])* $variant:ident => $label:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The exact label shown to (and typed by) the user.
            pub const fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s)
                    .ok_or_else(|| ValidationError::NotAllowed {
                        field: $field.to_string(),
                        allowed: Self::ALL.iter().map(|v| v.label().to_string()).collect(),
                    })
            }
        }
    };
}

labelled_enum! {
    /// Product category shown in the product form.
    ProductCategory, "category" {
        Clothing => "Vestuário",
        Footwear => "Calçados",
        Accessories => "Acessórios",
        Electronics => "Eletrônicos",
        Beauty => "Beleza",
    }
}

impl Default for ProductCategory {
    fn default() -> Self {
        ProductCategory::Clothing
    }
}

labelled_enum! {
    /// Loyalty tier of a client.
    ClientCategory, "client category" {
        New => "Novo",
        Returning => "Recorrente",
        Vip => "VIP",
        Loyal => "Fiel",
    }
}

impl Default for ClientCategory {
    fn default() -> Self {
        ClientCategory::New
    }
}

labelled_enum! {
    /// Whether a client record has been confirmed.
    ClientStatus, "status" {
        Active => "active",
        Pending => "pending",
    }
}

impl Default for ClientStatus {
    fn default() -> Self {
        ClientStatus::Active
    }
}

labelled_enum! {
    /// How the customer paid.
    PaymentMethod, "payment method" {
        /// Cash handed over at delivery.
        Cash => "Dinheiro em Mão",
        Transfer => "Transferência",
        Deposit => "Depósito",
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

labelled_enum! {
    /// Customer gender, used only for the demographic chart.
    Gender, "gender" {
        Male => "Masculino",
        Female => "Feminino",
        Other => "Outro",
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Female
    }
}

labelled_enum! {
    /// Recognised delivery municipalities of Luanda province.
    ///
    /// The delivery location of a sale is free text; these values are the
    /// suggestions offered by the form.
    Municipality, "delivery location" {
        Luanda => "Luanda",
        Belas => "Belas",
        Cazenga => "Cazenga",
        Cacuaco => "Cacuaco",
        Viana => "Viana",
        Talatona => "Talatona",
        KilambaKiaxi => "Kilamba Kiaxi",
        IcoloEBengo => "Icolo e Bengo",
        Quicama => "Quiçama",
    }
}

impl Default for Municipality {
    fn default() -> Self {
        crate::DEFAULT_MUNICIPALITY
    }
}

labelled_enum! {
    /// Direction of a transaction.
    TransactionType, "type" {
        Income => "income",
        Expense => "expense",
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the shop's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: String,

    /// Display name shown in lists, charts and on the invoice.
    pub name: String,

    /// Stock Keeping Unit.
    pub sku: String,

    pub category: ProductCategory,

    /// What the shop paid per unit.
    pub cost_price: Money,

    /// Default selling price per unit.
    pub sale_price: Money,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Image URL.
    pub image: String,

    pub description: String,
}

impl Product {
    /// Checks if at least one unit is on hand.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Unit margin (sale price minus cost price).
    #[inline]
    pub fn margin(&self) -> Money {
        self.sale_price - self.cost_price
    }
}

/// Partial update for a [`Product`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<ProductCategory>,
    pub cost_price: Option<Money>,
    pub sale_price: Option<Money>,
    pub stock: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl ProductPatch {
    /// Returns a copy of `product` with this patch applied. The id is never
    /// changed.
    pub fn apply(&self, product: &Product) -> Product {
        let mut updated = product.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(sku) = &self.sku {
            updated.sku = sku.clone();
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        if let Some(cost) = self.cost_price {
            updated.cost_price = cost;
        }
        if let Some(price) = self.sale_price {
            updated.sale_price = price;
        }
        if let Some(stock) = self.stock {
            updated.stock = stock;
        }
        if let Some(image) = &self.image {
            updated.image = image.clone();
        }
        if let Some(description) = &self.description {
            updated.description = description.clone();
        }
        updated
    }
}

// =============================================================================
// Client
// =============================================================================

/// A customer in the client registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub category: ClientCategory,
    pub status: ClientStatus,
    /// Free-form note such as "Hoje" or "2 dias atrás".
    pub last_purchase: Option<String>,
}

/// Partial update for a [`Client`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    /// `Some(None)` clears the email.
    pub email: Option<Option<String>>,
    pub category: Option<ClientCategory>,
    pub status: Option<ClientStatus>,
}

impl ClientPatch {
    /// Returns a copy of `client` with this patch applied.
    pub fn apply(&self, client: &Client) -> Client {
        let mut updated = client.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            updated.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        if let Some(status) = self.status {
            updated.status = status;
        }
        updated
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line of a committed sale.
///
/// Uses the snapshot pattern for price: `price_at_sale` is frozen at commit,
/// so later edits to the product's sale price never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    /// Product sold. May dangle once the product is deleted.
    pub product_id: String,
    pub quantity: i64,
    pub price_at_sale: Money,
}

impl SaleItem {
    /// Line total (price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price_at_sale.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// An immutable entry in the ledger: a sale (income) or an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    /// Positive for income, negative for expenses.
    pub amount: Money,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[ts(as = "String")]
    pub time: NaiveTime,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SaleItem>>,
}

impl Transaction {
    /// Checks if this is an income transaction.
    #[inline]
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Sale lines, empty for expenses and itemless income.
    pub fn items(&self) -> &[SaleItem] {
        self.items.as_deref().unwrap_or(&[])
    }

    /// Sum of line totals before discount.
    pub fn subtotal(&self) -> Money {
        self.items().iter().map(SaleItem::line_total).sum()
    }

    /// Discount applied, zero when absent.
    pub fn discount(&self) -> Money {
        self.discount.unwrap_or_default()
    }
}

/// `HH:MM` (24h) serde format for [`NaiveTime`].
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Profile
// =============================================================================

/// The shop's own details, printed on invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Profile {
    pub store_name: String,
    pub slogan: String,
    pub phone: String,
    pub address: String,
    /// Número de Identificação Fiscal.
    pub nif: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            store_name: "Pambala AO".to_string(),
            slogan: "Gestão de Negócios Luanda".to_string(),
            phone: String::new(),
            address: "Luanda, Angola".to_string(),
            nif: String::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(items: Vec<SaleItem>, discount: i64) -> Transaction {
        Transaction {
            id: "VENDA-1".to_string(),
            description: "Venda p/ Ana".to_string(),
            amount: Money::from_kz(0),
            date: NaiveDate::from_ymd_opt(2024, 6, 24).unwrap(),
            time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            category: SALES_CATEGORY.to_string(),
            kind: TransactionType::Income,
            customer_name: Some("Ana".to_string()),
            customer_gender: Some(Gender::Female),
            payment_method: Some(PaymentMethod::Cash),
            delivery_location: Some("Luanda".to_string()),
            discount: Some(Money::from_kz(discount)),
            items: Some(items),
        }
    }

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for m in Municipality::ALL {
            assert_eq!(m.label().parse::<Municipality>().unwrap(), *m);
        }
        assert_eq!(Municipality::ALL.len(), 9);
        assert_eq!("Quiçama".parse::<Municipality>().unwrap(), Municipality::Quicama);
        assert!("quiçama".parse::<Municipality>().is_err());
    }

    #[test]
    fn test_unknown_label_lists_allowed_values() {
        let err = "Cartão".parse::<PaymentMethod>().unwrap_err();
        match err {
            ValidationError::NotAllowed { field, allowed } => {
                assert_eq!(field, "payment method");
                assert_eq!(allowed, vec!["Dinheiro em Mão", "Transferência", "Depósito"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Gender::default(), Gender::Female);
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert_eq!(Municipality::default().label(), "Luanda");
    }

    #[test]
    fn test_transaction_json_shape() {
        let t = sale(
            vec![SaleItem {
                product_id: "1".to_string(),
                quantity: 2,
                price_at_sale: Money::from_kz(100),
            }],
            0,
        );
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["time"], "14:30");
        assert_eq!(json["date"], "2024-06-24");
        assert_eq!(json["customerGender"], "Feminino");
        assert_eq!(json["paymentMethod"], "Dinheiro em Mão");
        assert_eq!(json["items"][0]["priceAtSale"], 100);

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_transaction_subtotal() {
        let t = sale(
            vec![
                SaleItem {
                    product_id: "A".to_string(),
                    quantity: 2,
                    price_at_sale: Money::from_kz(50),
                },
                SaleItem {
                    product_id: "B".to_string(),
                    quantity: 1,
                    price_at_sale: Money::from_kz(30),
                },
            ],
            20,
        );
        assert_eq!(t.subtotal().kz(), 130);
        assert_eq!(t.discount().kz(), 20);
    }

    #[test]
    fn test_product_patch_keeps_id() {
        let product = Product {
            id: "1".to_string(),
            name: "Camiseta".to_string(),
            sku: "CMB-001".to_string(),
            category: ProductCategory::Clothing,
            cost_price: Money::from_kz(2_500),
            sale_price: Money::from_kz(4_990),
            stock: 12,
            image: DEFAULT_PRODUCT_IMAGE.to_string(),
            description: String::new(),
        };
        let patch = ProductPatch {
            sale_price: Some(Money::from_kz(5_500)),
            stock: Some(4),
            ..Default::default()
        };
        let updated = patch.apply(&product);
        assert_eq!(updated.id, "1");
        assert_eq!(updated.sale_price.kz(), 5_500);
        assert_eq!(updated.stock, 4);
        assert_eq!(updated.name, "Camiseta");
        assert_eq!(updated.margin().kz(), 3_000);
    }

    #[test]
    fn test_client_patch_clears_email() {
        let client = Client {
            id: "1".to_string(),
            name: "Ana Silva".to_string(),
            phone: "923 456 789".to_string(),
            email: Some("ana@email.com".to_string()),
            category: ClientCategory::Vip,
            status: ClientStatus::Active,
            last_purchase: None,
        };
        let patch = ClientPatch {
            email: Some(None),
            ..Default::default()
        };
        assert_eq!(patch.apply(&client).email, None);
    }
}
