//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, alert::Alert, ledger::BudgetTracker, record_id::RecordId};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The budget tracker that holds the transaction.
    budget_tracker: Arc<Mutex<BudgetTracker>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with an alert.
///
/// Deleting a transaction that does not exist is not an error, the row is
/// simply removed from the page.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<RecordId>,
) -> Response {
    let mut budget_tracker = match state.budget_tracker.lock() {
        Ok(budget_tracker) => budget_tracker,
        Err(error) => {
            tracing::error!("could not acquire the ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    budget_tracker.delete_transaction(&transaction_id);

    // The status code has to be 200 OK or HTMX will not delete the table row.
    Alert::SuccessSimple {
        message: "Transaction deleted successfully".to_owned(),
    }
    .into_response()
}
