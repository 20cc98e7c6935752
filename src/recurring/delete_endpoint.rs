//! Defines the endpoint for deleting a recurring transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, alert::Alert, ledger::BudgetTracker, record_id::RecordId};

/// The state needed to delete a recurring transaction.
#[derive(Debug, Clone)]
pub struct DeleteRecurringState {
    budget_tracker: Arc<Mutex<BudgetTracker>>,
}

impl FromRef<AppState> for DeleteRecurringState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
        }
    }
}

/// A route handler for deleting a recurring transaction, responds with an alert.
pub async fn delete_recurring_endpoint(
    State(state): State<DeleteRecurringState>,
    Path(recurring_id): Path<RecordId>,
) -> Response {
    let mut budget_tracker = match state.budget_tracker.lock() {
        Ok(budget_tracker) => budget_tracker,
        Err(error) => {
            tracing::error!("could not acquire the ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    budget_tracker.delete_recurring_transaction(&recurring_id);

    // The status code has to be 200 OK or HTMX will not delete the table row.
    Alert::SuccessSimple {
        message: "Recurring transaction deleted successfully".to_owned(),
    }
    .into_response()
}
