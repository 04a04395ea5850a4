//! # Product Form State
//!
//! The "new product" screen, including the description request that may
//! still be running when the user leaves.
//!
//! ## Generations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open()                 generation 7, empty form                       │
//! │  begin_description()    ticket { generation: 7 }, generating = true    │
//! │  close()                form gone (user left the screen)               │
//! │  open()                 generation 8, empty form                       │
//! │  finish_description(7)  generation mismatch → text discarded           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A late answer is merged only into the form instance that asked for it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use pambala_core::{Money, Product, ProductCategory, DEFAULT_PRODUCT_IMAGE};
use pambala_core::validation::{validate_product, ValidationResult};
use pambala_store::repository::product::generate_sku;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Product form errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Product form is not open")]
    NotOpen,

    #[error("A description is already being generated")]
    Busy,

    #[error("Product name is required before generating a description")]
    MissingName,
}

/// Field values of the product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub category: ProductCategory,
    pub sale_price: Money,
    pub cost_price: Money,
    pub stock: i64,
    /// Blank means "generate one on submit".
    pub sku: String,
    pub description: String,
    /// A description request is in flight; the trigger is disabled.
    pub generating: bool,
}

/// One editable form field with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Name(String),
    Category(ProductCategory),
    SalePrice(Money),
    CostPrice(Money),
    Stock(i64),
    Sku(String),
    Description(String),
}

impl ProductForm {
    fn set(&mut self, field: FormField) {
        match field {
            FormField::Name(name) => self.name = name,
            FormField::Category(category) => self.category = category,
            FormField::SalePrice(price) => self.sale_price = price,
            FormField::CostPrice(cost) => self.cost_price = cost,
            FormField::Stock(stock) => self.stock = stock,
            FormField::Sku(sku) => self.sku = sku,
            FormField::Description(text) => self.description = text,
        }
    }

    /// Builds the product this form describes.
    ///
    /// ## Errors
    /// Any field failing `validate_product` (name required, prices and
    /// stock non-negative, SKU charset).
    pub fn to_product(&self, id: String) -> ValidationResult<Product> {
        let sku = match self.sku.trim() {
            "" => generate_sku(),
            sku => sku.to_string(),
        };

        let product = Product {
            id,
            name: self.name.trim().to_string(),
            sku,
            category: self.category,
            cost_price: self.cost_price,
            sale_price: self.sale_price,
            stock: self.stock,
            image: DEFAULT_PRODUCT_IMAGE.to_string(),
            description: self.description.clone(),
        };
        validate_product(&product)?;
        Ok(product)
    }
}

/// What a description request needs, plus the form instance it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionTicket {
    pub generation: u64,
    pub name: String,
    pub category: ProductCategory,
}

#[derive(Debug)]
struct OpenForm {
    generation: u64,
    form: ProductForm,
}

/// Shell-managed product form state.
///
/// Cloned into the description task, hence the `Arc`s.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    open: Arc<Mutex<Option<OpenForm>>>,
    generations: Arc<AtomicU64>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a fresh, empty form and returns its generation.
    pub fn open(&self) -> u64 {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock() = Some(OpenForm {
            generation,
            form: ProductForm::default(),
        });
        debug!(generation, "Product form opened");
        generation
    }

    /// Drops the open form, if any.
    pub fn close(&self) {
        if let Some(open) = self.lock().take() {
            debug!(generation = open.generation, "Product form closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Copy of the current field values.
    pub fn current(&self) -> Option<ProductForm> {
        self.lock().as_ref().map(|open| open.form.clone())
    }

    pub fn set(&self, field: FormField) -> Result<(), FormError> {
        let mut open = self.lock();
        let open = open.as_mut().ok_or(FormError::NotOpen)?;
        open.form.set(field);
        Ok(())
    }

    /// Marks a description request as in flight.
    ///
    /// ## Errors
    /// - `NotOpen` if no form is showing
    /// - `Busy` if a request is already running
    /// - `MissingName` if the name field is blank
    pub fn begin_description(&self) -> Result<DescriptionTicket, FormError> {
        let mut open = self.lock();
        let open = open.as_mut().ok_or(FormError::NotOpen)?;

        if open.form.generating {
            return Err(FormError::Busy);
        }
        if open.form.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }

        open.form.generating = true;
        Ok(DescriptionTicket {
            generation: open.generation,
            name: open.form.name.trim().to_string(),
            category: open.form.category,
        })
    }

    /// Merges `text` into the form that asked for it.
    ///
    /// ## Returns
    /// `false` if that form was closed or replaced meanwhile.
    pub fn finish_description(&self, generation: u64, text: String) -> bool {
        let mut open = self.lock();
        match open.as_mut() {
            Some(open) if open.generation == generation => {
                open.form.description = text;
                open.form.generating = false;
                true
            }
            _ => {
                debug!(generation, "Discarding description for a closed form");
                false
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<OpenForm>> {
        self.open.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_need_open_form() {
        let forms = FormState::new();
        assert_eq!(
            forms.set(FormField::Name("x".into())),
            Err(FormError::NotOpen)
        );
        forms.open();
        forms.set(FormField::Name("Boné".into())).unwrap();
        assert_eq!(forms.current().unwrap().name, "Boné");
    }

    #[test]
    fn test_description_guards() {
        let forms = FormState::new();
        forms.open();
        assert_eq!(forms.begin_description(), Err(FormError::MissingName));

        forms.set(FormField::Name("Boné".into())).unwrap();
        let ticket = forms.begin_description().unwrap();
        assert!(forms.current().unwrap().generating);
        assert_eq!(forms.begin_description(), Err(FormError::Busy));

        assert!(forms.finish_description(ticket.generation, "Estilo.".into()));
        let form = forms.current().unwrap();
        assert_eq!(form.description, "Estilo.");
        assert!(!form.generating);
    }

    #[test]
    fn test_late_description_discarded() {
        let forms = FormState::new();
        forms.open();
        forms.set(FormField::Name("Boné".into())).unwrap();
        let ticket = forms.begin_description().unwrap();

        forms.close();
        forms.open();
        assert!(!forms.finish_description(ticket.generation, "Estilo.".into()));
        assert_eq!(forms.current().unwrap().description, "");
    }

    #[test]
    fn test_to_product_generates_sku() {
        let form = ProductForm {
            name: " Boné Aba Reta ".into(),
            sale_price: Money::from_kz(3500),
            stock: 4,
            ..ProductForm::default()
        };
        let product = form.to_product("p-1".into()).unwrap();
        assert_eq!(product.name, "Boné Aba Reta");
        assert!(product.sku.starts_with("SKU-"));
        assert_eq!(product.image, DEFAULT_PRODUCT_IMAGE);
    }

    #[test]
    fn test_to_product_rejects_negative_stock() {
        let form = ProductForm {
            name: "Boné".into(),
            stock: -1,
            ..ProductForm::default()
        };
        assert!(form.to_product("p-1".into()).is_err());
    }
}
