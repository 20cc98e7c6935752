//! Defines the endpoint for changing the monthly budget.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{AppState, Error, endpoints, ledger::BudgetTracker};

/// The state needed to change the monthly budget.
#[derive(Debug, Clone)]
pub struct EditBudgetState {
    budget_tracker: Arc<Mutex<BudgetTracker>>,
}

impl FromRef<AppState> for EditBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
        }
    }
}

/// The form data for changing the monthly budget.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    /// The new monthly budget in dollars.
    pub monthly_budget: f64,
}

/// A route handler for setting the monthly budget, redirects to the dashboard on success.
///
/// A rejected budget leaves the current budget in place and responds with an
/// error alert.
pub async fn edit_budget_endpoint(
    State(state): State<EditBudgetState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let mut budget_tracker = match state.budget_tracker.lock() {
        Ok(budget_tracker) => budget_tracker,
        Err(error) => {
            tracing::error!("could not acquire the ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    if let Err(error) = budget_tracker.set_monthly_budget(form.monthly_budget) {
        return Error::from(error).into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
