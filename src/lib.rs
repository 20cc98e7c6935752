//! A personal budget tracker served as a small web app.
//!
//! Users record income and expense transactions, keep a list of recurring
//! transactions, set a monthly budget and view statistics derived from their
//! data.
//!
//! This library provides the domain model, the pure aggregation and mutation
//! functions over it, a key-value persistence boundary and an HTTP router that
//! serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod budget;
mod category;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod ledger;
mod navigation;
mod not_found;
mod persistence;
mod record_id;
mod recurring;
mod routing;
mod statistics;
mod storage;
mod timezone;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use budget::{DEFAULT_MONTHLY_BUDGET, set_monthly_budget};
pub use ledger::{BudgetTracker, Ledger};
pub use persistence::{
    MONTHLY_BUDGET_KEY, RECURRING_TRANSACTIONS_KEY, TRANSACTIONS_KEY, from_json, load_ledger,
    save_monthly_budget, save_recurring_transactions, save_transactions, to_json,
};
pub use record_id::{IdGenerator, RecordId};
pub use recurring::{
    Frequency, RecurringTransaction, RecurringTransactionDraft, add_recurring_transaction,
    delete_recurring_transaction, toggle_recurring_active,
};
pub use routing::build_router;
pub use statistics::aggregation;
pub use storage::{KeyValueStore, SqliteStore};
pub use timezone::get_local_offset;
pub use transaction::{
    Transaction, TransactionDraft, TransactionType, add_transaction, delete_transaction,
};
pub use validation::ValidationError;

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted input that a mutation rejected.
    ///
    /// The ledger is unchanged, the user can correct the input and resubmit.
    #[error("invalid input: {0}")]
    InvalidInput(ValidationError),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing or parsing a collection as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the lock on the budget tracker.
    #[error("could not acquire the ledger lock")]
    LedgerLockError,
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::InvalidInput(value)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::LedgerLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidInput(error) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid input".to_owned(),
                    details: capitalize(&error.to_string()),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "The item could not be found. \
                    Try refreshing the page to see the latest data."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
