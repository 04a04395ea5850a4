//! # Seed Data Printer
//!
//! Prints the demo catalogue the shell loads when `seed_demo` is on, and
//! optionally the sample ledger used by fixtures.
//!
//! ## Usage
//! ```bash
//! # Human-readable summary
//! cargo run -p pambala-store --bin seed
//!
//! # JSON, e.g. to feed a front-end fixture
//! cargo run -p pambala-store --bin seed -- --json
//!
//! # Include the sample ledger
//! cargo run -p pambala-store --bin seed -- --ledger
//! ```

use std::env;

use pambala_store::seed::{demo_clients, demo_products, sample_ledger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut json = false;
    let mut ledger = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" | "-j" => json = true,
            "--ledger" | "-l" => ledger = true,
            "--help" | "-h" => {
                println!("Pambala AO Seed Data");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -j, --json    Print the demo data as JSON");
                println!("  -l, --ledger  Also print the sample ledger");
                println!("  -h, --help    Show this help message");
                return Ok(());
            }
            _ => {}
        }
    }

    let products = demo_products();
    let clients = demo_clients();
    let transactions = if ledger { sample_ledger() } else { Vec::new() };

    if json {
        let out = serde_json::json!({
            "products": products,
            "clients": clients,
            "transactions": transactions,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("🌱 Pambala AO Seed Data");
    println!("=======================");
    println!();
    println!("Products:");
    for p in &products {
        println!(
            "  {:<8} {:<24} {:>10}  stock {}",
            p.sku, p.name, p.sale_price.to_string(), p.stock
        );
    }
    println!();
    println!("Clients:");
    for c in &clients {
        println!("  {:<16} {:<14} {}", c.name, c.phone, c.category);
    }
    if transactions.is_empty() {
        return Ok(());
    }
    println!();
    println!("Transactions:");
    for t in &transactions {
        println!("  {} {}  {:<22} {:>10}", t.date, t.time.format("%H:%M"), t.description, t.amount.to_string());
    }

    Ok(())
}
