//! Defines the endpoint for pausing and resuming a recurring transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints, ledger::BudgetTracker, record_id::RecordId,
    recurring::recurring_page::recurring_row,
};

/// The state needed to toggle a recurring transaction.
#[derive(Debug, Clone)]
pub struct ToggleRecurringState {
    budget_tracker: Arc<Mutex<BudgetTracker>>,
}

impl FromRef<AppState> for ToggleRecurringState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
        }
    }
}

/// A route handler that flips whether a recurring transaction is active.
///
/// Responds with the updated table row. If the recurring transaction no
/// longer exists the client is redirected to reload the list.
pub async fn toggle_recurring_endpoint(
    State(state): State<ToggleRecurringState>,
    Path(recurring_id): Path<RecordId>,
) -> Response {
    let mut budget_tracker = match state.budget_tracker.lock() {
        Ok(budget_tracker) => budget_tracker,
        Err(error) => {
            tracing::error!("could not acquire the ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    if budget_tracker.toggle_recurring_active(&recurring_id).is_none() {
        return (
            HxRedirect(endpoints::RECURRING_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response();
    }

    match budget_tracker
        .ledger()
        .recurring_transactions
        .iter()
        .find(|recurring| recurring.id == recurring_id)
    {
        Some(recurring) => recurring_row(recurring).into_response(),
        None => Error::NotFound.into_alert_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use scraper::Selector;

    use crate::{
        endpoints,
        record_id::RecordId,
        recurring::{
            RecurringTransactionDraft, toggle_endpoint::ToggleRecurringState,
            toggle_recurring_endpoint,
        },
        test_utils::{assert_hx_redirect, new_test_tracker, parse_html_fragment},
        transaction::TransactionType,
    };

    #[tokio::test]
    async fn pauses_and_resumes() {
        let budget_tracker = new_test_tracker();
        let id = budget_tracker
            .lock()
            .unwrap()
            .add_recurring_transaction(RecurringTransactionDraft::new(
                TransactionType::Expense,
                15.99,
                "Entertainment",
                "monthly",
                "2024-01-01",
            ))
            .unwrap();
        let state = ToggleRecurringState {
            budget_tracker: budget_tracker.clone(),
        };

        let response = toggle_recurring_endpoint(State(state.clone()), Path(id.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!budget_tracker.lock().unwrap().ledger().recurring_transactions[0].is_active);
        let html = parse_html_fragment(response).await;
        let status = html
            .select(&Selector::parse("[data-status]").unwrap())
            .next()
            .expect("No status badge found");
        assert_eq!(status.value().attr("data-status"), Some("paused"));

        toggle_recurring_endpoint(State(state), Path(id)).await;

        assert!(budget_tracker.lock().unwrap().ledger().recurring_transactions[0].is_active);
    }

    #[tokio::test]
    async fn unknown_id_reloads_list() {
        let state = ToggleRecurringState {
            budget_tracker: new_test_tracker(),
        };

        let response =
            toggle_recurring_endpoint(State(state), Path(RecordId::new("missing"))).await;

        assert_hx_redirect(&response, endpoints::RECURRING_VIEW);
    }
}
