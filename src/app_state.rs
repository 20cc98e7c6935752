//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{Error, ledger::BudgetTracker, storage::KeyValueStore, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The budget tracker, shared by every request handler.
    pub budget_tracker: Arc<Mutex<BudgetTracker>>,
}

impl AppState {
    /// Create a new [AppState] by loading the ledger from `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if `local_timezone` is not a valid timezone.
    pub fn new(store: Box<dyn KeyValueStore + Send>, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            budget_tracker: Arc::new(Mutex::new(BudgetTracker::open(store))),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{AppState, Error, storage::SqliteStore};

    fn get_test_store() -> Box<SqliteStore> {
        let connection = Connection::open_in_memory().unwrap();

        Box::new(SqliteStore::new(connection).unwrap())
    }

    #[test]
    fn rejects_invalid_timezone() {
        let result = AppState::new(get_test_store(), "Not/A_Timezone");

        assert_eq!(
            result.map(|_| ()),
            Err(Error::InvalidTimezoneError("Not/A_Timezone".to_owned()))
        );
    }

    #[test]
    fn loads_ledger_from_store() {
        let state = AppState::new(get_test_store(), "Pacific/Auckland").unwrap();

        let tracker = state.budget_tracker.lock().unwrap();
        assert!(tracker.ledger().transactions.is_empty());
    }
}
