//! # Demo Seed Data
//!
//! A small catalogue and client list for trying the app out. The shop
//! opens with an empty ledger; [`sample_ledger`] is a ready-made history
//! for fixtures and the seed printer. Prices are whole Kwanza.

use chrono::{NaiveDate, NaiveTime};
use pambala_core::{
    Client, ClientCategory, ClientStatus, Money, Product, ProductCategory, Profile, Transaction,
    TransactionType, SALES_CATEGORY,
};

use crate::store::Snapshot;

/// The demo snapshot: three products, three clients, no transactions.
pub fn demo_snapshot() -> Snapshot {
    Snapshot::new(demo_products(), demo_clients(), Vec::new(), Profile::default())
}

pub fn demo_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Camiseta Básica Preta",
            "CMB-001",
            ProductCategory::Clothing,
            (2_500, 4_990),
            12,
            "photo-1521572163474-6864f9cf17ab",
            "Camiseta básica de algodão fio 30.1",
        ),
        product(
            "2",
            "Calça Jeans Skinny",
            "CJS-042",
            ProductCategory::Clothing,
            (6_500, 11_990),
            5,
            "photo-1541099649105-f69ad21f3246",
            "Calça jeans com elastano corte skinny",
        ),
        product(
            "3",
            "Tênis Casual Branco",
            "TCB-088",
            ProductCategory::Footwear,
            (9_500, 18_990),
            0,
            "photo-1549298916-b41d501d3772",
            "Tênis casual sintético resistente",
        ),
    ]
}

pub fn demo_clients() -> Vec<Client> {
    vec![
        client("1", "Ana Silva", "923 765 432", "ana@email.com", ClientCategory::Loyal, ClientStatus::Active, "Hoje"),
        client("2", "Carlos Souza", "912 345 678", "carlos@email.com", ClientCategory::Returning, ClientStatus::Active, "2 dias atrás"),
        client("3", "Mariana Costa", "934 987 654", "mari@email.com", ClientCategory::New, ClientStatus::Pending, "1 semana atrás"),
    ]
}

/// Two sales and two expenses, newest first.
pub fn sample_ledger() -> Vec<Transaction> {
    vec![
        entry("t1", "Venda #1023", 15_000, (2024, 6, 24), (14, 30), SALES_CATEGORY, TransactionType::Income),
        entry("t2", "Compra de embalagens", -15_000, (2024, 6, 24), (12, 0), "Estoque", TransactionType::Expense),
        entry("t3", "Venda Balcão", 4_590, (2024, 6, 24), (11, 15), SALES_CATEGORY, TransactionType::Income),
        entry("t4", "Conta de Luz", -32_050, (2024, 6, 23), (9, 0), "Contas", TransactionType::Expense),
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    sku: &str,
    category: ProductCategory,
    (cost, sale): (i64, i64),
    stock: i64,
    photo: &str,
    description: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        sku: sku.to_string(),
        category,
        cost_price: Money::from_kz(cost),
        sale_price: Money::from_kz(sale),
        stock,
        image: format!(
            "https://images.unsplash.com/{}?q=80&w=200&auto=format&fit=crop",
            photo
        ),
        description: description.to_string(),
    }
}

fn client(
    id: &str,
    name: &str,
    phone: &str,
    email: &str,
    category: ClientCategory,
    status: ClientStatus,
    last_purchase: &str,
) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: Some(email.to_string()),
        category,
        status,
        last_purchase: Some(last_purchase.to_string()),
    }
}

fn entry(
    id: &str,
    description: &str,
    amount: i64,
    (y, m, d): (i32, u32, u32),
    (hh, mm): (u32, u32),
    category: &str,
    kind: TransactionType,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        description: description.to_string(),
        amount: Money::from_kz(amount),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        time: NaiveTime::from_hms_opt(hh, mm, 0).unwrap_or_default(),
        category: category.to_string(),
        kind,
        customer_name: None,
        customer_gender: None,
        payment_method: None,
        delivery_location: None,
        discount: None,
        items: None,
    }
}
