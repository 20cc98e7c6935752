use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{ledger::BudgetTracker, storage::SqliteStore};

/// A budget tracker with an empty ledger backed by an in-memory database.
pub(crate) fn new_test_tracker() -> Arc<Mutex<BudgetTracker>> {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    let store = SqliteStore::new(connection).expect("Could not create key-value store");

    Arc::new(Mutex::new(BudgetTracker::open(Box::new(store))))
}
