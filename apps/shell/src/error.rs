//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Pambala AO                             │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, ApiError>                             │
//! │         │                                                               │
//! │         ├── StoreError::NotFound ──────────┐                            │
//! │         ├── CoreError::EmptySelection ─────┤                            │
//! │         ├── ValidationError::Required ─────┼──► ApiError { code, msg }  │
//! │         ├── FormError::MissingName ────────┤            │               │
//! │         └── ViewError::Blocked ────────────┘            │               │
//! │                                                         ▼               │
//! │                                        Notifier::show(msg)  (toast)    │
//! │                                                                         │
//! │  No error ends the session; the message is shown and the user          │
//! │  carries on from the unchanged state.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are short Portuguese strings meant for the toast.

use pambala_core::{CoreError, ValidationError};
use pambala_store::StoreError;
use serde::Serialize;

use crate::state::{FormError, ViewError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "EMPTY_SELECTION",
///   "message": "Selecione ao menos um produto!"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entity not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Commit attempted with nothing selected
    EmptySelection,

    /// Commit attempted without a customer name
    MissingCustomer,

    /// Draft references a product that was deleted
    StaleSelection,

    /// Stock check failed under the reject policy
    InsufficientStock,

    /// Business rule violated (discount, duplicate id, ...)
    BusinessLogic,

    /// View transition not allowed from the current view
    InvalidTransition,

    /// Description request already running
    GenerationBusy,

    /// Terminal command issued before signing in
    Unauthorized,

    /// Host I/O failed (invoice file, config file)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} não encontrado: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Duplicate { field, value } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("{} '{}' já existe", field, value),
            ),
            StoreError::Core(e) => e.into(),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptySelection => {
                ApiError::new(ErrorCode::EmptySelection, "Selecione ao menos um produto!")
            }
            CoreError::MissingCustomer => {
                ApiError::new(ErrorCode::MissingCustomer, "Indique o nome do cliente!")
            }
            CoreError::StaleSelection { product_id } => ApiError::new(
                ErrorCode::StaleSelection,
                format!("Produto selecionado já não existe: {}", product_id),
            ),
            CoreError::ProductNotFound(id) => ApiError::not_found("Produto", &id),
            CoreError::ClientNotFound(id) => ApiError::not_found("Cliente", &id),
            CoreError::SaleNotFound(id) => ApiError::not_found("Venda", &id),
            CoreError::InsufficientStock {
                sku,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Stock insuficiente para {}: {} disponível, {} pedido",
                    sku, available, requested
                ),
            ),
            CoreError::AmountOverflow { .. } => ApiError::new(
                ErrorCode::BusinessLogic,
                "Valor da venda demasiado grande! Reveja as quantidades.",
            ),
            CoreError::DiscountExceedsSubtotal { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, "Desconto superior ao subtotal")
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts field validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let message = match &err {
            ValidationError::Required { field } => format!("Campo obrigatório: {}", field),
            ValidationError::TooLong { field, max } => {
                format!("{} aceita no máximo {} caracteres", field, max)
            }
            ValidationError::Negative { field } => format!("{} não pode ser negativo", field),
            ValidationError::InvalidFormat { field, .. } => format!("Formato inválido: {}", field),
            ValidationError::NotAllowed { field, allowed } => {
                format!("{} deve ser um de: {}", field, allowed.join(", "))
            }
            ValidationError::Duplicate { field, value } => {
                format!("{} '{}' já existe", field, value)
            }
        };
        ApiError::validation(message)
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::Unknown(name) => {
                ApiError::validation(format!("Ecrã desconhecido: {}", name))
            }
            ViewError::Blocked { from, to } => ApiError::new(
                ErrorCode::InvalidTransition,
                format!("Não é possível abrir {} a partir de {}", to, from),
            ),
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::NotOpen => ApiError::new(
                ErrorCode::InvalidTransition,
                "Abra o formulário de produto primeiro",
            ),
            FormError::Busy => ApiError::new(ErrorCode::GenerationBusy, "A gerar descrição..."),
            FormError::MissingName => ApiError::validation("Dê um nome!"),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Host I/O failed: {}", err);
        ApiError::internal("Falha ao gravar o ficheiro")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;
