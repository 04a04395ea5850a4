//! # Terminal Front-End
//!
//! Every typed line is parsed as one clap subcommand and dispatched to the
//! same command functions a graphical front-end would call.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "set customer \"Ana Silva\""                                           │
//! │        │ split_line (quotes group words)                                │
//! │        ▼                                                                │
//! │  ["set", "customer", "Ana Silva"] ──► Line::try_parse_from             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  App::dispatch ──► commands::sale::set_metadata(...)                    │
//! │        │                                                                │
//! │        ├── Ok(text)   → printed                                         │
//! │        └── Err(ApiError) → message shown in the toast                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are typed in whole Kwanza; `1.500` and `1500` are the same.

use clap::{Args, Parser, Subcommand, ValueEnum};
use pambala_core::validation::{parse_date, parse_time};
use pambala_core::{
    Client, MetadataField, Money, Product, ProductPatch, Profile, Transaction, ValidationError,
};
use tracing::warn;

use crate::commands::{
    assist, client, expense, invoice, navigation, product, profile, report, sale, session,
};
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::{FormField, ProductForm, View};
use crate::App;

/// What a line produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Text to print, possibly empty.
    pub output: String,
    /// The user asked to leave.
    pub quit: bool,
}

impl Outcome {
    fn text(output: impl Into<String>) -> Self {
        Outcome {
            output: output.into(),
            quit: false,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pambala", no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with any email and password
    Login { email: String, password: String },
    /// Sign out and return home
    Logout,
    /// Open a screen (home, sales, products, clients, reports, ...)
    Go { view: String },
    /// Sales screen: continue to the details of the selection
    Next,
    /// Follow the back arrow
    Back,
    /// Dashboard: recent transactions and totals
    #[command(alias = "dashboard")]
    Home,
    /// List or search products by name or SKU
    Products { query: Option<String> },
    /// List or search clients by name or phone
    Clients { query: Option<String> },
    /// Select or unselect a product for the sale
    Toggle { product_id: String },
    /// Set the quantity of a selected product
    Qty {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Override the unit price of a selected product (omit to clear)
    Price {
        product_id: String,
        price: Option<String>,
    },
    /// Set a sale detail
    Set {
        field: DraftField,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Show the sale being composed
    #[command(alias = "total")]
    Summary,
    /// Register the sale
    Commit,
    /// Download the factura of a sale (default: the last one)
    Invoice { sale_id: Option<String> },
    /// Fill a field of the product form
    Form {
        field: ProductFormField,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Ask the assistant for a product description
    Describe,
    /// Create the product in the form
    SaveProduct,
    /// Edit an existing product
    UpdateProduct(UpdateProductArgs),
    /// Remove a product
    DeleteProduct { id: String },
    /// Create or edit a client
    SaveClient(SaveClientArgs),
    /// Remove a client
    DeleteClient { id: String },
    /// Record an expense
    Expense {
        amount: String,
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Report series as JSON
    Reports,
    /// Show or edit the shop profile
    Profile(ProfileArgs),
    /// Toggle dark mode
    Dark,
    /// Leave
    #[command(alias = "exit")]
    Quit,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DraftField {
    Customer,
    Gender,
    Payment,
    Location,
    Discount,
    Date,
    Time,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ProductFormField {
    Name,
    Category,
    Price,
    Cost,
    Stock,
    Sku,
    Description,
}

#[derive(Args, Debug)]
struct UpdateProductArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    cost: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    stock: Option<i64>,
    #[arg(long)]
    sku: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
struct SaveClientArgs {
    /// Edit this client instead of creating one
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    slogan: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    nif: Option<String>,
}

impl ProfileArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slogan.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.nif.is_none()
    }

    fn apply(self, current: Profile) -> Profile {
        Profile {
            store_name: self.name.unwrap_or(current.store_name),
            slogan: self.slogan.unwrap_or(current.slogan),
            phone: self.phone.unwrap_or(current.phone),
            address: self.address.unwrap_or(current.address),
            nif: self.nif.unwrap_or(current.nif),
        }
    }
}

impl App {
    /// Runs one typed line.
    ///
    /// Parse errors and help are returned as output. Command errors go to
    /// the toast, like every other message the user sees.
    pub fn execute(&self, line: &str) -> Outcome {
        let words = match split_line(line) {
            Ok(words) if words.is_empty() => return Outcome::default(),
            Ok(words) => words,
            Err(e) => {
                self.toast.show(e.message);
                return Outcome::default();
            }
        };

        let command = match Line::try_parse_from(words) {
            Ok(line) => line.command,
            Err(e) => return Outcome::text(e.to_string().trim_end()),
        };

        if let Command::Quit = command {
            return Outcome {
                output: "Até logo!".to_string(),
                quit: true,
            };
        }

        match self.dispatch(command) {
            Ok(output) => Outcome::text(output),
            Err(e) => {
                warn!(code = ?e.code, "{}", e.message);
                self.toast.show(e.message);
                Outcome::default()
            }
        }
    }

    fn dispatch(&self, command: Command) -> ApiResult<String> {
        if !self.session.is_signed_in() && !matches!(command, Command::Login { .. }) {
            return Err(ApiError::new(
                ErrorCode::Unauthorized,
                "Inicie sessão primeiro (login <email> <palavra-passe>)",
            ));
        }

        match command {
            Command::Login { email, password } => {
                let user = session::sign_in(&self.session, &email, &password)?;
                Ok(format!("Bem-vindo, {}!", user))
            }
            Command::Logout => {
                session::sign_out(&self.session, &self.view, &self.draft, &self.form)?;
                Ok("Sessão terminada.".to_string())
            }
            Command::Go { view } => {
                let to = view.parse::<View>()?;
                navigation::navigate(&self.view, &self.draft, &self.form, to)?;
                self.render_view()
            }
            Command::Next => {
                navigation::proceed_to_details(&self.view, &self.draft)?;
                self.render_view()
            }
            Command::Back => {
                navigation::back(&self.view, &self.draft, &self.form);
                self.render_view()
            }
            Command::Home => Ok(render_dashboard(&report::dashboard(&self.store))),
            Command::Products { query } => Ok(render_products(&product::list_products(
                &self.store,
                query.as_deref(),
            ))),
            Command::Clients { query } => Ok(render_clients(&client::list_clients(
                &self.store,
                query.as_deref(),
            ))),
            Command::Toggle { product_id } => {
                let selected = sale::toggle_product(&self.store, &self.draft, &product_id)?;
                let mark = if selected { "[x]" } else { "[ ]" };
                Ok(format!("{} {}", mark, product_id))
            }
            Command::Qty {
                product_id,
                quantity,
            } => {
                let quantity = sale::set_quantity(&self.draft, &product_id, quantity)?;
                Ok(format!("{} × {}", product_id, quantity))
            }
            Command::Price { product_id, price } => {
                let price = price.as_deref().map(|p| parse_kz("price", p)).transpose()?;
                sale::set_price_override(&self.draft, &product_id, price)?;
                self.render_summary()
            }
            Command::Set { field, value } => {
                sale::set_metadata(&self.draft, metadata_field(field, &value.join(" "))?)?;
                self.render_summary()
            }
            Command::Summary => self.render_summary(),
            Command::Commit => {
                let sale = sale::commit_sale(
                    &self.store,
                    &self.draft,
                    &self.view,
                    &self.toast,
                    &self.checkout,
                    &self.config,
                )?;
                Ok(format!(
                    "{} · {} · {}\nUse 'invoice' para baixar a factura.",
                    sale.id,
                    sale.customer_name.as_deref().unwrap_or_default(),
                    sale.amount
                ))
            }
            Command::Invoice { sale_id } => {
                let sale_id = sale_id
                    .or_else(|| self.checkout.last_sale_id())
                    .ok_or_else(|| ApiError::validation("Nenhuma venda para facturar"))?;
                let downloaded =
                    invoice::download_invoice(&self.store, &self.toast, self.sink.as_ref(), &sale_id)?;
                Ok(downloaded
                    .map(|d| format!("{}\n{}", d.location, d.invoice.content))
                    .unwrap_or_default())
            }
            Command::Form { field, value } => {
                let form =
                    product::set_form_field(&self.form, form_field(field, &value.join(" "))?)?;
                Ok(render_form(&form))
            }
            Command::Describe => {
                // Detached; the text lands in the form if it is still open.
                let _task = assist::generate_description(&self.form, &self.assist)?;
                Ok("A gerar descrição...".to_string())
            }
            Command::SaveProduct => {
                let created = product::submit_product(
                    &self.store,
                    &self.form,
                    &self.view,
                    &self.draft,
                    &self.toast,
                )?;
                Ok(render_products(std::slice::from_ref(&created)))
            }
            Command::UpdateProduct(args) => {
                let patch = ProductPatch {
                    name: args.name,
                    sku: args.sku,
                    category: args.category.as_deref().map(str::parse).transpose()?,
                    cost_price: args.cost.as_deref().map(|c| parse_kz("cost", c)).transpose()?,
                    sale_price: args.price.as_deref().map(|p| parse_kz("price", p)).transpose()?,
                    stock: args.stock,
                    image: None,
                    description: args.description,
                };
                let updated = product::update_product(&self.store, &args.id, &patch)?;
                Ok(render_products(std::slice::from_ref(&updated)))
            }
            Command::DeleteProduct { id } => Ok(removed(product::delete_product(&self.store, &id))),
            Command::SaveClient(args) => {
                let input = client::ClientInput {
                    name: args.name,
                    phone: args.phone,
                    email: args.email,
                    category: args.category.as_deref().map(str::parse).transpose()?.unwrap_or_default(),
                    status: args.status.as_deref().map(str::parse).transpose()?.unwrap_or_default(),
                };
                let saved = client::save_client(
                    &self.store,
                    &self.view,
                    &self.draft,
                    &self.form,
                    &self.toast,
                    args.id.as_deref(),
                    input,
                )?;
                Ok(render_clients(std::slice::from_ref(&saved)))
            }
            Command::DeleteClient { id } => Ok(removed(client::delete_client(&self.store, &id))),
            Command::Expense {
                amount,
                description,
                category,
            } => {
                let amount = parse_kz("amount", &amount)?;
                let entry = expense::record_expense(
                    &self.store,
                    &self.toast,
                    &description.join(" "),
                    amount,
                    &category,
                )?;
                Ok(render_transactions(std::slice::from_ref(&entry)))
            }
            Command::Reports => {
                let insights = report::reports(&self.store, &self.reports);
                serde_json::to_string_pretty(insights.as_ref())
                    .map_err(|e| ApiError::internal(e.to_string()))
            }
            Command::Profile(args) => {
                let current = profile::get_profile(&self.store);
                let shown = if args.is_empty() {
                    current
                } else {
                    profile::update_profile(&self.store, &self.toast, args.apply(current))?
                };
                Ok(render_profile(&shown))
            }
            Command::Dark => {
                let dark = profile::toggle_dark_mode(&self.session);
                Ok(format!("Modo escuro: {}", if dark { "ligado" } else { "desligado" }))
            }
            Command::Quit => Ok(String::new()),
        }
    }

    fn render_view(&self) -> ApiResult<String> {
        let current = self.view.current();
        let body = match current {
            View::Home => render_dashboard(&report::dashboard(&self.store)),
            View::Sales => render_sale_rows(&sale::list_sale_products(&self.store, &self.draft)),
            View::ManualSaleDetails => self.render_summary()?,
            View::Products => render_products(&product::list_products(&self.store, None)),
            View::ProductForm => self.form.current().map(|f| render_form(&f)).unwrap_or_default(),
            View::Clients => render_clients(&client::list_clients(&self.store, None)),
            View::Reports => {
                let insights = report::reports(&self.store, &self.reports);
                serde_json::to_string_pretty(insights.as_ref())
                    .map_err(|e| ApiError::internal(e.to_string()))?
            }
            View::Profile => render_profile(&profile::get_profile(&self.store)),
            _ => String::new(),
        };
        Ok(format!("== {} ==\n{}", current, body).trim_end().to_string())
    }

    fn render_summary(&self) -> ApiResult<String> {
        let summary = sale::draft_summary(&self.store, &self.draft);
        let m = &summary.metadata;

        let mut out: Vec<String> = summary
            .lines
            .iter()
            .map(|l| {
                format!(
                    "{} × {} @ {} = {}  (stock {})",
                    l.name, l.quantity, l.unit_price, l.line_total, l.stock
                )
            })
            .collect();
        out.push(format!("Subtotal: {}", summary.subtotal));
        out.push(format!("Desconto: {}", m.discount));
        out.push(format!("Total:    {}", summary.total));
        if !summary.known_location {
            out.push(format!(
                "Nota: '{}' não é um município reconhecido",
                m.delivery_location
            ));
        }
        out.push(format!(
            "Cliente: {} ({}) · {} · {} · {} {}",
            m.customer_name,
            m.customer_gender,
            m.payment_method,
            m.delivery_location,
            m.date,
            m.time.format("%H:%M")
        ));
        Ok(out.join("\n"))
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Splits a line on whitespace; `"..."` and `'...'` keep spaces.
pub fn split_line(line: &str) -> ApiResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ApiError::validation("Aspas por fechar"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Whole Kwanza, either plain digits (`1500`) or `.`-grouped in threes
/// (`1.500`). Decimals such as `49.90` are refused.
fn parse_kz(field: &str, raw: &str) -> ApiResult<Money> {
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw),
    };

    let mut groups = digits.split('.');
    let lead = groups.next().unwrap_or_default();
    let grouped = digits.contains('.');
    let well_formed = !lead.is_empty()
        && lead.bytes().all(|b| b.is_ascii_digit())
        && (!grouped || lead.len() <= 3)
        && groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()));

    let invalid = || -> ApiError {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected whole Kwanza".to_string(),
        }
        .into()
    };

    if !well_formed {
        return Err(invalid());
    }
    digits
        .replace('.', "")
        .parse::<i64>()
        .map(|kz| Money::from_kz(sign * kz))
        .map_err(|_| invalid())
}

fn metadata_field(field: DraftField, value: &str) -> ApiResult<MetadataField> {
    Ok(match field {
        DraftField::Customer => MetadataField::CustomerName(value.to_string()),
        DraftField::Gender => MetadataField::Gender(value.parse()?),
        DraftField::Payment => MetadataField::PaymentMethod(value.parse()?),
        DraftField::Location => MetadataField::DeliveryLocation(value.to_string()),
        DraftField::Discount => MetadataField::Discount(parse_kz("discount", value)?),
        DraftField::Date => MetadataField::Date(parse_date(value)?),
        DraftField::Time => MetadataField::Time(parse_time(value)?),
    })
}

fn form_field(field: ProductFormField, value: &str) -> ApiResult<FormField> {
    Ok(match field {
        ProductFormField::Name => FormField::Name(value.to_string()),
        ProductFormField::Category => FormField::Category(value.parse()?),
        ProductFormField::Price => FormField::SalePrice(parse_kz("price", value)?),
        ProductFormField::Cost => FormField::CostPrice(parse_kz("cost", value)?),
        ProductFormField::Stock => FormField::Stock(value.trim().parse().map_err(|_| {
            ValidationError::InvalidFormat {
                field: "stock".to_string(),
                reason: "expected a whole number".to_string(),
            }
        })?),
        ProductFormField::Sku => FormField::Sku(value.to_string()),
        ProductFormField::Description => FormField::Description(value.to_string()),
    })
}

// =============================================================================
// Rendering
// =============================================================================

fn removed(was_removed: bool) -> String {
    let text = if was_removed { "Removido." } else { "Nada a remover." };
    text.to_string()
}

fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "Sem produtos.".to_string();
    }
    products
        .iter()
        .map(|p| {
            format!(
                "{:<10} {:<10} {:<28} {:>12}  stock {}",
                p.id,
                p.sku,
                p.name,
                p.sale_price.to_string(),
                p.stock
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_sale_rows(rows: &[sale::SaleProductRow]) -> String {
    if rows.is_empty() {
        return "Sem produtos.".to_string();
    }
    rows.iter()
        .map(|r| {
            let mark = if r.selected { "[x]" } else { "[ ]" };
            format!(
                "{} {:<10} {:<28} {:>12}  × {}",
                mark,
                r.product.id,
                r.product.name,
                r.product.sale_price.to_string(),
                r.quantity
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_clients(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "Sem clientes.".to_string();
    }
    clients
        .iter()
        .map(|c| {
            format!(
                "{:<10} {:<24} {:<14} {:<10} {}",
                c.id,
                c.name,
                c.phone,
                c.category.label(),
                c.status.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_transactions(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| {
            format!(
                "{} {}  {:<28} {:<10} {:>14}",
                t.date,
                t.time.format("%H:%M"),
                t.description,
                t.category,
                t.amount.to_string()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_dashboard(dash: &report::Dashboard) -> String {
    format!(
        "{}\nEntradas: {}  Saídas: {}  Saldo: {}\n{}",
        dash.store_name,
        dash.summary.income,
        dash.summary.expenses,
        dash.summary.balance,
        render_transactions(&dash.recent)
    )
}

fn render_form(form: &ProductForm) -> String {
    format!(
        "Nome: {}\nCategoria: {}\nPreço: {}  Custo: {}  Stock: {}\nSKU: {}\nDescrição: {}{}",
        form.name,
        form.category,
        form.sale_price,
        form.cost_price,
        form.stock,
        if form.sku.is_empty() { "(automático)" } else { form.sku.as_str() },
        form.description,
        if form.generating { "\n(a gerar descrição...)" } else { "" }
    )
}

fn render_profile(profile: &Profile) -> String {
    format!(
        "{}\n{}\nTel: {}\n{}\nNIF: {}",
        profile.store_name, profile.slogan, profile.phone, profile.address, profile.nif
    )
}
