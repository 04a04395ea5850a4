//! # Session Commands
//!
//! The login gate. Any non-empty email and password pair signs in.

use tracing::{debug, info};

use crate::commands::navigation;
use crate::error::{ApiError, ApiResult};
use crate::state::{DraftState, FormState, SessionState, View, ViewState};

/// Signs in and returns the user shown in the menu.
///
/// ## Errors
/// - `ValidationError` if either field is blank
pub fn sign_in(session: &SessionState, email: &str, password: &str) -> ApiResult<String> {
    debug!(email = %email, "sign_in command");
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Indique o email e a palavra-passe"));
    }

    session.sign_in(email);
    info!(email = %email, "Signed in");
    Ok(email.to_string())
}

/// Signs out and returns to the home view, dropping any draft or open form.
pub fn sign_out(
    session: &SessionState,
    view: &ViewState,
    draft: &DraftState,
    form: &FormState,
) -> ApiResult<()> {
    debug!("sign_out command");
    session.sign_out();
    navigation::navigate(view, draft, form, View::Home)?;
    info!("Signed out");
    Ok(())
}
