//! # Invoice Rendering
//!
//! Formats a committed sale as the plain-text receipt ("factura") handed to
//! the host for download.
//!
//! ```text
//! FACTURA - Pambala AO
//! ----------------
//! ID: VENDA-1718000000000
//! Data: 2024-06-24 14:30
//! Local: Luanda
//! ----------------
//! Camiseta Básica Algodão x2 - Kz 4.990
//! ----------------
//! TOTAL: Kz 9.980
//! Obrigado por comprar connosco!
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{hhmm, Product, Transaction};

/// MIME type of the downloadable artifact.
pub const INVOICE_MIME_TYPE: &str = "text/plain";

const RULE: &str = "----------------";
const FOOTER: &str = "Obrigado por comprar connosco!";

/// A rendered receipt, ready for the host to offer as a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

/// File name for a sale's receipt.
pub fn invoice_file_name(sale_id: &str) -> String {
    format!("Factura_{}.txt", sale_id)
}

/// Renders the receipt for `sale`.
///
/// Items whose product has since been deleted print the product id in place
/// of the name. Amounts are the values frozen on the transaction, never the
/// current catalogue prices.
pub fn render_invoice(sale: &Transaction, products: &[Product], store_name: &str) -> Invoice {
    let mut lines = vec![
        format!("FACTURA - {}", store_name),
        RULE.to_string(),
        format!("ID: {}", sale.id),
        format!("Data: {} {}", sale.date, sale.time.format(hhmm::FORMAT)),
        format!("Local: {}", sale.delivery_location.as_deref().unwrap_or_default()),
        RULE.to_string(),
    ];

    for item in sale.items() {
        let name = products
            .iter()
            .find(|p| p.id == item.product_id)
            .map(|p| p.name.as_str())
            .unwrap_or(&item.product_id);
        lines.push(format!("{} x{} - {}", name, item.quantity, item.price_at_sale));
    }

    lines.push(RULE.to_string());
    lines.push(format!("TOTAL: {}", sale.amount));
    lines.push(FOOTER.to_string());

    Invoice {
        file_name: invoice_file_name(&sale.id),
        mime_type: INVOICE_MIME_TYPE.to_string(),
        content: lines.join("\n"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Gender, PaymentMethod, ProductCategory, SaleItem, TransactionType};
    use chrono::{NaiveDate, NaiveTime};

    fn sale() -> Transaction {
        Transaction {
            id: "VENDA-1718000000000".to_string(),
            description: "Venda p/ Ana".to_string(),
            amount: Money::from_kz(21_970),
            date: NaiveDate::from_ymd_opt(2024, 6, 24).unwrap(),
            time: NaiveTime::from_hms_opt(14, 5, 0).unwrap(),
            category: "Vendas".to_string(),
            kind: TransactionType::Income,
            customer_name: Some("Ana".to_string()),
            customer_gender: Some(Gender::Female),
            payment_method: Some(PaymentMethod::Cash),
            delivery_location: Some("Talatona".to_string()),
            discount: Some(Money::from_kz(2_000)),
            items: Some(vec![
                SaleItem {
                    product_id: "1".to_string(),
                    quantity: 2,
                    price_at_sale: Money::from_kz(4_990),
                },
                SaleItem {
                    product_id: "2".to_string(),
                    quantity: 1,
                    price_at_sale: Money::from_kz(13_990),
                },
            ]),
        }
    }

    fn camiseta() -> Product {
        Product {
            id: "1".to_string(),
            name: "Camiseta Básica Algodão".to_string(),
            sku: "CMB-001".to_string(),
            category: ProductCategory::Clothing,
            cost_price: Money::from_kz(2_500),
            sale_price: Money::from_kz(5_500),
            stock: 12,
            image: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_render_exact_layout() {
        let invoice = render_invoice(&sale(), &[camiseta()], "Pambala AO");

        let expected = "FACTURA - Pambala AO\n\
                        ----------------\n\
                        ID: VENDA-1718000000000\n\
                        Data: 2024-06-24 14:05\n\
                        Local: Talatona\n\
                        ----------------\n\
                        Camiseta Básica Algodão x2 - Kz 4.990\n\
                        2 x1 - Kz 13.990\n\
                        ----------------\n\
                        TOTAL: Kz 21.970\n\
                        Obrigado por comprar connosco!";
        assert_eq!(invoice.content, expected);
        assert_eq!(invoice.file_name, "Factura_VENDA-1718000000000.txt");
        assert_eq!(invoice.mime_type, "text/plain");
    }

    #[test]
    fn test_price_is_the_frozen_one() {
        // catalogue price moved to 5.500, receipt keeps 4.990
        let invoice = render_invoice(&sale(), &[camiseta()], "Loja");
        assert!(invoice.content.contains("x2 - Kz 4.990"));
        assert!(!invoice.content.contains("5.500"));
    }
}
