//! End-to-end sale flows driven through the shell commands and the
//! terminal dispatcher.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pambala_assist::{AssistResult, DescriptionGenerator};
use pambala_core::analytics::SeriesPoint;
use pambala_core::{
    Gender, MetadataField, Money, Product, ProductCategory, SaleItem, StockPolicy, Transaction,
};
use pambala_shell::commands::{assist, navigation, product, report, sale};
use pambala_shell::error::{ApiResult, ErrorCode};
use pambala_shell::sink::MemorySink;
use pambala_shell::state::{AssistState, ConfigState, FormField, View};
use pambala_shell::App;

// =============================================================================
// Fixtures
// =============================================================================

fn product(id: &str, price: i64, stock: i64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Produto {}", id),
        sku: format!("SKU-{}", id),
        category: ProductCategory::Accessories,
        cost_price: Money::zero(),
        sale_price: Money::from_kz(price),
        stock,
        image: String::new(),
        description: String::new(),
    }
}

fn app_with(policy: StockPolicy, products: Vec<Product>) -> (App, Arc<MemorySink>) {
    let config = ConfigState {
        seed_demo: false,
        stock_policy: policy,
        ..ConfigState::default()
    };
    let sink = Arc::new(MemorySink::new());
    let app = App::new(config).with_sink(sink.clone());
    for p in products.into_iter().rev() {
        app.store.inner().products().add(p).unwrap();
    }
    (app, sink)
}

fn app(products: Vec<Product>) -> App {
    app_with(StockPolicy::Saturating, products).0
}

fn open_sales(app: &App) {
    navigation::navigate(&app.view, &app.draft, &app.form, View::Sales).unwrap();
}

/// Selects `lines`, fills `fields` and commits from the details screen.
fn sell(app: &App, lines: &[(&str, i64)], fields: Vec<MetadataField>) -> ApiResult<Transaction> {
    open_sales(app);
    for (id, qty) in lines {
        sale::toggle_product(&app.store, &app.draft, id)?;
        sale::set_quantity(&app.draft, id, *qty)?;
    }
    for field in fields {
        sale::set_metadata(&app.draft, field)?;
    }
    navigation::proceed_to_details(&app.view, &app.draft)?;
    commit(app)
}

fn commit(app: &App) -> ApiResult<Transaction> {
    sale::commit_sale(
        &app.store,
        &app.draft,
        &app.view,
        &app.toast,
        &app.checkout,
        &app.config,
    )
}

fn customer(name: &str) -> MetadataField {
    MetadataField::CustomerName(name.to_string())
}

fn stock_of(app: &App, id: &str) -> i64 {
    app.store.inner().products().get_by_id(id).unwrap().stock
}

fn point(name: &str, value: i64) -> SeriesPoint {
    SeriesPoint {
        name: name.to_string(),
        value,
    }
}

// =============================================================================
// Sale pipeline
// =============================================================================

#[test]
fn test_empty_store_cannot_sell() {
    let app = app(vec![]);
    open_sales(&app);

    assert!(sale::list_sale_products(&app.store, &app.draft).is_empty());
    assert!(!sale::draft_summary(&app.store, &app.draft).can_proceed);

    let err = navigation::proceed_to_details(&app.view, &app.draft).unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptySelection);
    assert_eq!(app.view.current(), View::Sales);

    assert!(commit(&app).is_err());
    assert_eq!(app.store.inner().transactions().count(), 0);
}

#[test]
fn test_single_line_sale() {
    let app = app(vec![product("1", 100, 3)]);
    let sale = sell(&app, &[("1", 2)], vec![customer("Ana")]).unwrap();

    let ledger = app.store.inner().transactions().list();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0], sale);
    assert_eq!(sale.amount, Money::from_kz(200));
    assert_eq!(
        sale.items(),
        &[SaleItem {
            product_id: "1".to_string(),
            quantity: 2,
            price_at_sale: Money::from_kz(100),
        }]
    );
    assert_eq!(stock_of(&app, "1"), 1);
    assert!(app.draft.with_draft(|d| d.is_empty()));
    assert_eq!(app.view.current(), View::SaleSuccess);
    assert_eq!(app.checkout.last_sale_id(), Some(sale.id));
}

#[test]
fn test_oversell_saturates_stock() {
    let app = app(vec![product("1", 100, 3)]);
    let sale = sell(&app, &[("1", 5)], vec![customer("Ana")]).unwrap();

    assert_eq!(stock_of(&app, "1"), 0);
    assert_eq!(sale.items()[0].quantity, 5);
    assert_eq!(sale.amount, Money::from_kz(500));
}

#[test]
fn test_oversell_rejected_under_reject_policy() {
    let (app, _) = app_with(StockPolicy::Reject, vec![product("1", 100, 3)]);
    let err = sell(&app, &[("1", 5)], vec![customer("Ana")]).unwrap_err();

    assert_eq!(err.code, ErrorCode::InsufficientStock);
    assert_eq!(stock_of(&app, "1"), 3);
    assert_eq!(app.store.inner().transactions().count(), 0);
    assert_eq!(app.view.current(), View::ManualSaleDetails);
    assert_eq!(app.draft.with_draft(|d| d.quantity("1")), 5);
}

#[test]
fn test_two_lines_with_discount() {
    let app = app(vec![product("A", 50, 10), product("B", 30, 10)]);
    let sale = sell(
        &app,
        &[("A", 2), ("B", 1)],
        vec![customer("X"), MetadataField::Discount(Money::from_kz(20))],
    )
    .unwrap();

    assert_eq!(sale.amount, Money::from_kz(110));
    assert_eq!(sale.discount, Some(Money::from_kz(20)));
}

#[test]
fn test_price_override_is_frozen_on_the_sale() {
    let app = app(vec![product("1", 100, 3)]);
    open_sales(&app);
    sale::toggle_product(&app.store, &app.draft, "1").unwrap();
    sale::set_price_override(&app.draft, "1", Some(Money::from_kz(80))).unwrap();
    sale::set_metadata(&app.draft, customer("Ana")).unwrap();
    navigation::proceed_to_details(&app.view, &app.draft).unwrap();
    let sale = commit(&app).unwrap();

    assert_eq!(sale.items()[0].price_at_sale, Money::from_kz(80));
    assert_eq!(app.store.inner().products().get_by_id("1").unwrap().sale_price, Money::from_kz(100));
}

#[test]
fn test_back_keeps_draft_and_leaving_resets_it() {
    let app = app(vec![product("1", 100, 3)]);
    open_sales(&app);
    sale::toggle_product(&app.store, &app.draft, "1").unwrap();
    navigation::proceed_to_details(&app.view, &app.draft).unwrap();

    assert_eq!(navigation::back(&app.view, &app.draft, &app.form), View::Sales);
    assert!(app.draft.with_draft(|d| d.is_selected("1")));

    navigation::navigate(&app.view, &app.draft, &app.form, View::Reports).unwrap();
    assert!(app.draft.with_draft(|d| d.is_empty()));
}

#[test]
fn test_deleted_product_at_commit_is_stale() {
    let app = app(vec![product("1", 100, 3)]);
    open_sales(&app);
    sale::toggle_product(&app.store, &app.draft, "1").unwrap();
    sale::set_metadata(&app.draft, customer("Ana")).unwrap();
    navigation::proceed_to_details(&app.view, &app.draft).unwrap();

    assert!(product::delete_product(&app.store, "1"));
    let err = commit(&app).unwrap_err();
    assert_eq!(err.code, ErrorCode::StaleSelection);
    assert_eq!(app.store.inner().transactions().count(), 0);
}

// =============================================================================
// Analytics
// =============================================================================

#[test]
fn test_location_series_sums_amounts() {
    let app = app(vec![product("1", 50, 100)]);
    let at = |place: &str| MetadataField::DeliveryLocation(place.to_string());

    // The ledger is newest first; series keep first-seen order.
    sell(&app, &[("1", 1)], vec![customer("C"), at("Viana")]).unwrap();
    sell(
        &app,
        &[("1", 4)],
        vec![customer("B"), at("Luanda"), MetadataField::Gender(Gender::Male)],
    )
    .unwrap();
    sell(&app, &[("1", 2)], vec![customer("A"), at("Luanda")]).unwrap();

    let insights = report::reports(&app.store, &app.reports);
    assert_eq!(
        insights.location_sales,
        vec![point("Luanda", 300), point("Viana", 50)]
    );
    assert_eq!(
        insights.gender_distribution,
        vec![point("Feminino", 2), point("Masculino", 1), point("Outro", 0)]
    );
}

#[test]
fn test_deleted_product_leaves_history_intact() {
    let app = app(vec![product("P", 100, 5)]);
    let sale = sell(&app, &[("P", 2)], vec![customer("Ana")]).unwrap();
    assert_eq!(
        report::reports(&app.store, &app.reports).top_products,
        vec![point("Produto P", 2)]
    );

    assert!(product::delete_product(&app.store, "P"));

    let insights = report::reports(&app.store, &app.reports);
    assert!(insights.top_products.is_empty());
    assert!(insights.category_sales.is_empty());

    let kept = app.store.inner().transactions().get_by_id(&sale.id).unwrap();
    assert_eq!(kept.amount, Money::from_kz(200));
    assert_eq!(kept.items(), sale.items());
}

// =============================================================================
// Terminal dispatcher
// =============================================================================

#[test]
fn test_terminal_sale_and_invoice() {
    let (app, sink) = app_with(StockPolicy::Saturating, vec![product("1", 1_500, 3)]);

    assert!(app.execute("go sales").output.is_empty());
    assert_eq!(app.toast.current().map(|_| ()), Some(()));
    assert_eq!(app.view.current(), View::Home);

    app.execute("login caixa@pambala.ao segredo");
    for line in [
        "go sales",
        "toggle 1",
        "qty 1 2",
        r#"set customer "Ana Silva""#,
        r#"set payment "Transferência""#,
        "set location Viana",
        "next",
    ] {
        app.execute(line);
    }
    assert_eq!(app.view.current(), View::ManualSaleDetails);

    let out = app.execute("commit");
    assert!(out.output.contains("Kz 3.000"), "{}", out.output);
    assert_eq!(app.view.current(), View::SaleSuccess);

    app.execute("invoice");
    let offered = sink.offered();
    assert_eq!(offered.len(), 1);
    let sale_id = app.checkout.last_sale_id().unwrap();
    assert_eq!(offered[0].file_name, format!("Factura_{}.txt", sale_id));
    assert!(offered[0].content.starts_with("FACTURA - Pambala AO"));
    assert!(offered[0].content.contains("Local: Viana"));
    assert!(offered[0].content.contains("TOTAL: Kz 3.000"));
    assert_eq!(app.toast.current().as_deref(), Some("Factura descarregada!"));

    app.execute("invoice VENDA-0");
    assert_eq!(sink.offered().len(), 1);
}

#[test]
fn test_terminal_errors_go_to_toast() {
    let app = app(vec![]);
    app.execute("login caixa@pambala.ao x");
    app.execute("go sales");

    let out = app.execute("next");
    assert!(out.output.is_empty());
    assert_eq!(
        app.toast.current().as_deref(),
        Some("Selecione ao menos um produto!")
    );

    assert!(app.execute("quit").quit);
}

#[test]
fn test_huge_quantity_is_refused_without_losing_the_session() {
    let app = app(vec![product("1", 4_990, 3)]);
    app.execute("login caixa@pambala.ao segredo");
    for line in ["go sales", "toggle 1", "qty 1 10000000000000000", "set customer Ana"] {
        app.execute(line);
    }

    app.execute("next");
    assert_eq!(app.view.current(), View::ManualSaleDetails);
    assert!(app.execute("total").output.contains("Kz"));

    app.execute("commit");
    assert_eq!(
        app.toast.current().as_deref(),
        Some("Valor da venda demasiado grande! Reveja as quantidades.")
    );
    assert_eq!(app.view.current(), View::ManualSaleDetails);
    assert_eq!(app.store.inner().transactions().count(), 0);
    assert_eq!(stock_of(&app, "1"), 3);

    app.execute("qty 1 2");
    let out = app.execute("commit");
    assert!(out.output.contains("Kz 9.980"), "{}", out.output);
}

#[test]
fn test_terminal_notes_unlisted_location() {
    let app = app(vec![product("1", 100, 3)]);
    app.execute("login caixa@pambala.ao segredo");
    app.execute("go sales");
    app.execute("toggle 1");

    let out = app.execute("set location Lobito").output;
    assert!(out.contains("'Lobito' não é um município reconhecido"), "{}", out);

    let out = app.execute("set location Viana").output;
    assert!(!out.contains("não é um município reconhecido"), "{}", out);
}

#[tokio::test(start_paused = true)]
async fn test_toast_expires_after_three_seconds() {
    let app = app(vec![product("1", 100, 3)]);
    sell(&app, &[("1", 1)], vec![customer("Ana")]).unwrap();
    assert_eq!(
        app.toast.current().as_deref(),
        Some(sale::SALE_SUCCESS_TOAST)
    );

    tokio::time::advance(Duration::from_secs(3)).await;
    assert_eq!(app.toast.current(), None);
}

// =============================================================================
// Description generation
// =============================================================================

/// Answers after a delay so the form can be left meanwhile.
struct Slow(&'static str);

#[async_trait]
impl DescriptionGenerator for Slow {
    async fn generate(&self, _name: &str, _category: ProductCategory) -> AssistResult<String> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(self.0.to_string())
    }
}

fn app_with_writer() -> App {
    app(vec![]).with_assist(AssistState::with_generator(Arc::new(Slow(
        "Boné leve para o sol de Luanda.",
    ))))
}

fn open_named_form(app: &App) {
    navigation::navigate(&app.view, &app.draft, &app.form, View::ProductForm).unwrap();
    product::set_form_field(&app.form, FormField::Name("Boné".into())).unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_description_merged_into_open_form() {
    let app = app_with_writer();
    open_named_form(&app);

    let task = assist::generate_description(&app.form, &app.assist).unwrap();
    let err = assist::generate_description(&app.form, &app.assist).unwrap_err();
    assert_eq!(err.code, ErrorCode::GenerationBusy);

    assert!(task.await.unwrap());
    let form = app.form.current().unwrap();
    assert_eq!(form.description, "Boné leve para o sol de Luanda.");
    assert!(!form.generating);
}

#[tokio::test(start_paused = true)]
async fn test_description_dropped_after_leaving_form() {
    let app = app_with_writer();
    open_named_form(&app);
    let task = assist::generate_description(&app.form, &app.assist).unwrap();

    navigation::back(&app.view, &app.draft, &app.form);
    navigation::navigate(&app.view, &app.draft, &app.form, View::ProductForm).unwrap();

    assert!(!task.await.unwrap());
    let form = app.form.current().unwrap();
    assert_eq!(form.description, "");
    assert!(!form.generating);
}

#[tokio::test]
async fn test_description_needs_a_name() {
    let app = app_with_writer();
    navigation::navigate(&app.view, &app.draft, &app.form, View::ProductForm).unwrap();

    let err = assist::generate_description(&app.form, &app.assist).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(err.message, "Dê um nome!");
}
