//! # Expense Commands
//!
//! Manual expense entries. Each becomes an `expense` transaction with a
//! negative amount, stamped with the current local date and time.

use pambala_core::validation::validate_name;
use pambala_core::{Money, Transaction, TransactionType};
use pambala_store::repository::transaction::generate_expense_id;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::{local_now, Notifier, StoreState};

/// Toast shown after an expense is recorded.
pub const EXPENSE_TOAST: &str = "Despesa registada!";

/// Category used when none is given.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "Geral";

/// Records an expense of `amount` (a positive magnitude).
///
/// ## Errors
/// - `ValidationError` for a blank description or a non-positive amount
pub fn record_expense(
    store: &StoreState,
    toast: &Notifier,
    description: &str,
    amount: Money,
    category: &str,
) -> ApiResult<Transaction> {
    debug!(description = %description, amount = amount.kz(), "record_expense command");

    validate_name("description", description)?;
    if !amount.is_positive() {
        return Err(ApiError::validation("O valor da despesa deve ser positivo"));
    }

    let category = match category.trim() {
        "" => DEFAULT_EXPENSE_CATEGORY,
        c => c,
    };
    let (date, time) = local_now();

    let expense = Transaction {
        id: generate_expense_id(),
        description: description.trim().to_string(),
        amount: -amount,
        date,
        time,
        category: category.to_string(),
        kind: TransactionType::Expense,
        customer_name: None,
        customer_gender: None,
        payment_method: None,
        delivery_location: None,
        discount: None,
        items: None,
    };
    store.inner().transactions().append(expense.clone())?;

    info!(id = %expense.id, amount = expense.amount.kz(), "Expense recorded");
    toast.show(EXPENSE_TOAST);

    Ok(expense)
}
