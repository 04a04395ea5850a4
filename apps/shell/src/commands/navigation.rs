//! # Navigation Commands
//!
//! View changes and the state they reset.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Transition                        Side effect                          │
//! │  ──────────                        ───────────                          │
//! │  sales|details → other view        draft.reset()                        │
//! │  productForm → other view          form.close()  (late text dropped)    │
//! │  other view → productForm          form.open()                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pambala_core::CoreError;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{DraftState, FormState, Transition, View, ViewState};

/// Moves to a top-level view.
pub fn navigate(
    view: &ViewState,
    draft: &DraftState,
    form: &FormState,
    to: View,
) -> ApiResult<View> {
    debug!(%to, "navigate command");
    let transition = view.navigate(to)?;
    apply(&transition, draft, form);
    Ok(transition.to)
}

/// The "next" button of the sales screen.
///
/// ## Errors
/// - `EmptySelection` if nothing is selected (the button is disabled)
/// - `InvalidTransition` outside the sales screen
pub fn proceed_to_details(view: &ViewState, draft: &DraftState) -> ApiResult<View> {
    debug!("proceed_to_details command");
    if draft.with_draft(|d| d.is_empty()) {
        return Err(CoreError::EmptySelection.into());
    }
    Ok(view.proceed_to_details()?.to)
}

/// The back arrow.
pub fn back(view: &ViewState, draft: &DraftState, form: &FormState) -> View {
    debug!("back command");
    let transition = view.back();
    apply(&transition, draft, form);
    transition.to
}

/// Runs the side effects of a completed transition.
pub(crate) fn apply(transition: &Transition, draft: &DraftState, form: &FormState) {
    if transition.leaves_sales_flow() {
        debug!(from = %transition.from, "Leaving sales flow, resetting draft");
        draft.reset();
    }
    if transition.leaves_product_form() {
        form.close();
    }
    if transition.enters_product_form() {
        form.open();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    struct Fixture {
        view: ViewState,
        draft: DraftState,
        form: FormState,
    }

    fn fixture() -> Fixture {
        Fixture {
            view: ViewState::new(),
            draft: DraftState::new(),
            form: FormState::new(),
        }
    }

    #[test]
    fn test_next_disabled_on_empty_draft() {
        let f = fixture();
        navigate(&f.view, &f.draft, &f.form, View::Sales).unwrap();
        let err = proceed_to_details(&f.view, &f.draft).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptySelection);
        assert_eq!(f.view.current(), View::Sales);
    }

    #[test]
    fn test_back_keeps_draft() {
        let f = fixture();
        navigate(&f.view, &f.draft, &f.form, View::Sales).unwrap();
        f.draft.with_draft_mut(|d| d.toggle("1"));
        proceed_to_details(&f.view, &f.draft).unwrap();

        assert_eq!(back(&f.view, &f.draft, &f.form), View::Sales);
        assert!(f.draft.with_draft(|d| d.is_selected("1")));
    }

    #[test]
    fn test_leaving_sales_resets_draft() {
        let f = fixture();
        navigate(&f.view, &f.draft, &f.form, View::Sales).unwrap();
        f.draft.with_draft_mut(|d| d.toggle("1"));
        proceed_to_details(&f.view, &f.draft).unwrap();

        navigate(&f.view, &f.draft, &f.form, View::Reports).unwrap();
        assert!(f.draft.with_draft(|d| d.is_empty()));
    }

    #[test]
    fn test_product_form_lifecycle() {
        let f = fixture();
        navigate(&f.view, &f.draft, &f.form, View::ProductForm).unwrap();
        assert!(f.form.is_open());
        back(&f.view, &f.draft, &f.form);
        assert!(!f.form.is_open());
    }
}
