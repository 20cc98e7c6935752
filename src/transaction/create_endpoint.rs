//! Defines the endpoint for creating a new transaction.
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
    AppState, Error, endpoints,
    ledger::BudgetTracker,
    transaction::{TransactionDraft, TransactionType},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The budget tracker that records the transaction.
    pub budget_tracker: Arc<Mutex<BudgetTracker>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget_tracker: state.budget_tracker.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the money came in or went out.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The category the transaction belongs to.
    pub category: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The date when the transaction ocurred, e.g. "2024-01-05".
    pub date: String,
}

impl From<TransactionForm> for TransactionDraft {
    fn from(form: TransactionForm) -> Self {
        TransactionDraft::new(form.kind, form.amount, &form.category, &form.date)
            .description(form.description.as_deref().unwrap_or_default())
    }
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut budget_tracker = match state.budget_tracker.lock() {
        Ok(budget_tracker) => budget_tracker,
        Err(error) => {
            tracing::error!("could not acquire the ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    if let Err(error) = budget_tracker.add_transaction(form.into()) {
        tracing::debug!("rejected new transaction: {error}");

        return Error::from(error).into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::date;

    use crate::{
        test_utils::{assert_valid_html, new_test_tracker, parse_html_fragment},
        transaction::{
            TransactionType,
            create_endpoint::{CreateTransactionState, TransactionForm},
            create_transaction_endpoint,
        },
    };

    fn get_test_state() -> CreateTransactionState {
        CreateTransactionState {
            budget_tracker: new_test_tracker(),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();
        let form = TransactionForm {
            kind: TransactionType::Expense,
            amount: 12.3,
            category: "Food & Dining".to_owned(),
            description: Some("test transaction".to_owned()),
            date: "2024-01-05".to_owned(),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_transactions_view(response);

        let tracker = state.budget_tracker.lock().unwrap();
        let transactions = &tracker.ledger().transactions;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 12.3);
        assert_eq!(transactions[0].category, "Food & Dining");
        assert_eq!(transactions[0].description, "test transaction");
        assert_eq!(transactions[0].date, date!(2024 - 01 - 05));
    }

    #[tokio::test]
    async fn new_transactions_are_listed_first() {
        let state = get_test_state();

        for category in ["Salary", "Gift"] {
            let form = TransactionForm {
                kind: TransactionType::Income,
                amount: 100.0,
                category: category.to_owned(),
                description: None,
                date: "2024-01-01".to_owned(),
            };
            create_transaction_endpoint(State(state.clone()), Form(form)).await;
        }

        let tracker = state.budget_tracker.lock().unwrap();
        let categories: Vec<_> = tracker
            .ledger()
            .transactions
            .iter()
            .map(|transaction| transaction.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Gift", "Salary"]);
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let state = get_test_state();
        let form = TransactionForm {
            kind: TransactionType::Expense,
            amount: -1.0,
            category: "Food & Dining".to_owned(),
            description: None,
            date: "2024-01-05".to_owned(),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(state.budget_tracker.lock().unwrap().ledger().transactions.is_empty());
    }

    #[tokio::test]
    async fn rejects_malformed_date() {
        let state = get_test_state();
        let form = TransactionForm {
            kind: TransactionType::Expense,
            amount: 5.0,
            category: "Food & Dining".to_owned(),
            description: None,
            date: "05/01/2024".to_owned(),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.budget_tracker.lock().unwrap().ledger().transactions.is_empty());
    }

    #[track_caller]
    fn assert_redirects_to_transactions_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/transactions",
            "got redirect to {location:?}, want redirect to /transactions"
        );
    }
}
