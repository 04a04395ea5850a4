//! # View Router
//!
//! Which screen is showing. Transitions are explicit and there is no
//! back-stack.
//!
//! ## Sales Subflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   sales ──next──► manualSaleDetails ──commit──► saleSuccess ──► home    │
//! │     ▲                    │                           │                  │
//! │     └────────back────────┘                           └────────► sales   │
//! │                                                                         │
//! │   Leaving {sales, manualSaleDetails} for any other view resets the     │
//! │   draft. `back` keeps it.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `manualSaleDetails` and `saleSuccess` are never navigated to directly:
//! the first needs a non-empty draft, the second a commit.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Every screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Home,
    Sales,
    ManualSaleDetails,
    SaleSuccess,
    Products,
    ProductForm,
    Clients,
    ClientForm,
    Reports,
    Expenses,
    Menu,
    Profile,
    Adjustments,
}

impl View {
    pub const ALL: [View; 13] = [
        View::Home,
        View::Sales,
        View::ManualSaleDetails,
        View::SaleSuccess,
        View::Products,
        View::ProductForm,
        View::Clients,
        View::ClientForm,
        View::Reports,
        View::Expenses,
        View::Menu,
        View::Profile,
        View::Adjustments,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Sales => "sales",
            View::ManualSaleDetails => "manualSaleDetails",
            View::SaleSuccess => "saleSuccess",
            View::Products => "products",
            View::ProductForm => "productForm",
            View::Clients => "clients",
            View::ClientForm => "clientForm",
            View::Reports => "reports",
            View::Expenses => "expenses",
            View::Menu => "menu",
            View::Profile => "profile",
            View::Adjustments => "adjustments",
        }
    }

    /// Views reachable with a plain `navigate`.
    pub const fn is_top_level(&self) -> bool {
        !matches!(self, View::ManualSaleDetails | View::SaleSuccess)
    }

    /// Views that keep the sale draft alive.
    pub const fn in_sales_flow(&self) -> bool {
        matches!(self, View::Sales | View::ManualSaleDetails)
    }

    /// Where the back arrow leads.
    pub const fn parent(&self) -> View {
        match self {
            View::ManualSaleDetails => View::Sales,
            View::ProductForm => View::Products,
            View::ClientForm => View::Clients,
            View::Profile | View::Adjustments => View::Menu,
            _ => View::Home,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for View {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ViewError::Unknown(s.to_string()))
    }
}

/// Router errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Unknown view: {0}")]
    Unknown(String),

    #[error("Cannot go from {from} to {to}")]
    Blocked { from: View, to: View },
}

/// A completed view change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: View,
    pub to: View,
}

impl Transition {
    /// The draft must be reset.
    pub fn leaves_sales_flow(&self) -> bool {
        self.from.in_sales_flow() && !self.to.in_sales_flow()
    }

    /// The open product form must be closed.
    pub fn leaves_product_form(&self) -> bool {
        self.from == View::ProductForm && self.to != View::ProductForm
    }

    /// A fresh product form must be opened.
    pub fn enters_product_form(&self) -> bool {
        self.to == View::ProductForm && self.from != View::ProductForm
    }
}

/// Shell-managed view state.
#[derive(Debug, Default)]
pub struct ViewState {
    current: Mutex<View>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Moves to a top-level view.
    pub fn navigate(&self, to: View) -> Result<Transition, ViewError> {
        self.transition(|from| {
            if to.is_top_level() {
                Ok(to)
            } else {
                Err(ViewError::Blocked { from, to })
            }
        })
    }

    /// `sales → manualSaleDetails`. The caller checks the draft first.
    pub fn proceed_to_details(&self) -> Result<Transition, ViewError> {
        self.transition(|from| match from {
            View::Sales => Ok(View::ManualSaleDetails),
            _ => Err(ViewError::Blocked {
                from,
                to: View::ManualSaleDetails,
            }),
        })
    }

    /// Follows the back arrow of the current view.
    pub fn back(&self) -> Transition {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let from = *current;
        let to = from.parent();
        *current = to;
        debug!(%from, %to, "Back");
        Transition { from, to }
    }

    /// `manualSaleDetails → saleSuccess`, taken only by a commit.
    pub fn show_sale_success(&self) -> Result<Transition, ViewError> {
        self.transition(|from| match from {
            View::ManualSaleDetails => Ok(View::SaleSuccess),
            _ => Err(ViewError::Blocked {
                from,
                to: View::SaleSuccess,
            }),
        })
    }

    fn transition(
        &self,
        next: impl FnOnce(View) -> Result<View, ViewError>,
    ) -> Result<Transition, ViewError> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let from = *current;
        let to = next(from)?;
        *current = to;
        debug!(%from, %to, "View transition");
        Ok(Transition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse() {
        for view in View::ALL {
            assert_eq!(view.label().parse::<View>().unwrap(), view);
        }
        assert_eq!("PRODUCTS".parse::<View>().unwrap(), View::Products);
        assert!(matches!("cart".parse::<View>(), Err(ViewError::Unknown(_))));
    }

    #[test]
    fn test_subflow_cannot_be_entered_directly() {
        let views = ViewState::new();
        assert!(views.navigate(View::ManualSaleDetails).is_err());
        assert!(views.navigate(View::SaleSuccess).is_err());
        assert!(views.proceed_to_details().is_err());
        assert_eq!(views.current(), View::Home);
    }

    #[test]
    fn test_sales_flow() {
        let views = ViewState::new();
        views.navigate(View::Sales).unwrap();
        let t = views.proceed_to_details().unwrap();
        assert!(!t.leaves_sales_flow());

        let t = views.back();
        assert_eq!(t.to, View::Sales);
        assert!(!t.leaves_sales_flow());

        views.proceed_to_details().unwrap();
        let t = views.show_sale_success().unwrap();
        assert_eq!(views.current(), View::SaleSuccess);
        assert!(t.leaves_sales_flow());
    }

    #[test]
    fn test_leaving_flow_flags() {
        let views = ViewState::new();
        views.navigate(View::Sales).unwrap();
        assert!(views.navigate(View::Reports).unwrap().leaves_sales_flow());

        let t = views.navigate(View::ProductForm).unwrap();
        assert!(t.enters_product_form());
        let t = views.back();
        assert_eq!(t.to, View::Products);
        assert!(t.leaves_product_form());
    }
}
