//! Defines the endpoint for creating a new recurring transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints, ledger::BudgetTracker, recurring::RecurringTransactionDraft,
    transaction::TransactionType,
};

/// The state needed to create a recurring transaction.
#[derive(Debug, Clone)]
pub struct CreateRecurringState {
    /// The budget tracker that records the recurring transaction.
    pub budget_tracker: Arc<Mutex<BudgetTracker>>,
}

impl FromRef<AppState> for CreateRecurringState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
        }
    }
}

/// The form data for creating a recurring transaction.
#[derive(Debug, Deserialize)]
pub struct RecurringForm {
    /// Whether the money comes in or goes out.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The amount paid each period in dollars.
    pub amount: f64,
    /// The category the recurring transaction belongs to.
    pub category: String,
    /// Text detailing the recurring transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// How often the transaction repeats, e.g. "weekly".
    pub frequency: String,
    /// The date of the first occurrence, e.g. "2024-01-05".
    pub start_date: String,
}

impl From<RecurringForm> for RecurringTransactionDraft {
    fn from(form: RecurringForm) -> Self {
        RecurringTransactionDraft::new(
            form.kind,
            form.amount,
            &form.category,
            &form.frequency,
            &form.start_date,
        )
        .description(form.description.as_deref().unwrap_or_default())
    }
}

/// A route handler for creating a recurring transaction, redirects to the
/// recurring transactions view on success.
pub async fn create_recurring_endpoint(
    State(state): State<CreateRecurringState>,
    Form(form): Form<RecurringForm>,
) -> Response {
    let mut budget_tracker = match state.budget_tracker.lock() {
        Ok(budget_tracker) => budget_tracker,
        Err(error) => {
            tracing::error!("could not acquire the ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    if let Err(error) = budget_tracker.add_recurring_transaction(form.into()) {
        tracing::debug!("rejected new recurring transaction: {error}");

        return Error::from(error).into_alert_response();
    }

    (
        HxRedirect(endpoints::RECURRING_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use time::macros::date;

    use crate::{
        endpoints,
        recurring::{
            Frequency,
            create_endpoint::{CreateRecurringState, RecurringForm},
            create_recurring_endpoint,
        },
        test_utils::{assert_hx_redirect, new_test_tracker},
        transaction::TransactionType,
    };

    fn get_form(frequency: &str) -> RecurringForm {
        RecurringForm {
            kind: TransactionType::Expense,
            amount: 15.99,
            category: "Entertainment".to_owned(),
            description: Some("Streaming".to_owned()),
            frequency: frequency.to_owned(),
            start_date: "2024-01-01".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_recurring_transaction() {
        let state = CreateRecurringState {
            budget_tracker: new_test_tracker(),
        };

        let response =
            create_recurring_endpoint(State(state.clone()), Form(get_form("monthly"))).await;

        assert_hx_redirect(&response, endpoints::RECURRING_VIEW);
        let tracker = state.budget_tracker.lock().unwrap();
        let recurring = &tracker.ledger().recurring_transactions;
        assert_eq!(recurring.len(), 1);
        assert_eq!(recurring[0].frequency, Frequency::Monthly);
        assert_eq!(recurring[0].start_date, date!(2024 - 01 - 01));
        assert_eq!(recurring[0].description, "Streaming");
        assert!(recurring[0].is_active);
    }

    #[tokio::test]
    async fn rejects_unknown_frequency() {
        let state = CreateRecurringState {
            budget_tracker: new_test_tracker(),
        };

        let response =
            create_recurring_endpoint(State(state.clone()), Form(get_form("fortnightly"))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            state
                .budget_tracker
                .lock()
                .unwrap()
                .ledger()
                .recurring_transactions
                .is_empty()
        );
    }
}
