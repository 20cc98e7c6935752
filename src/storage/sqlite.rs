//! A [KeyValueStore] backed by a single SQLite table.

use rusqlite::{Connection, OptionalExtension, named_params};

use crate::{Error, storage::KeyValueStore};

/// Stores each slot as one row of the `key_value` table.
#[derive(Debug)]
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Wrap `connection`, creating the `key_value` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the table could not be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_key_value_table(&connection)?;

        Ok(Self { connection })
    }
}

/// Create the table that holds the persisted slots.
fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .query_row(
                "SELECT value FROM key_value WHERE key = :key",
                named_params! { ":key": key },
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO key_value (key, value) VALUES (:key, :value)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            named_params! { ":key": key, ":value": value },
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::storage::{KeyValueStore, SqliteStore};

    fn get_test_store() -> SqliteStore {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");

        SqliteStore::new(connection).expect("Could not create key_value table")
    }

    #[test]
    fn get_missing_key_returns_none() {
        let store = get_test_store();

        assert_eq!(store.get("transactions"), Ok(None));
    }

    #[test]
    fn set_then_get() {
        let mut store = get_test_store();

        store.set("monthlyBudget", "2500").unwrap();

        assert_eq!(store.get("monthlyBudget"), Ok(Some("2500".to_owned())));
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = get_test_store();

        store.set("monthlyBudget", "2500").unwrap();
        store.set("monthlyBudget", "1200.5").unwrap();

        assert_eq!(store.get("monthlyBudget"), Ok(Some("1200.5".to_owned())));
    }

    #[test]
    fn keys_are_independent() {
        let mut store = get_test_store();

        store.set("transactions", "[]").unwrap();

        assert_eq!(store.get("recurringTransactions"), Ok(None));
    }

    #[test]
    fn new_does_not_clear_existing_table() {
        let connection = Connection::open_in_memory().unwrap();
        let mut store = SqliteStore::new(connection).unwrap();
        store.set("transactions", "[]").unwrap();

        let store = SqliteStore::new(store.connection).unwrap();

        assert_eq!(store.get("transactions"), Ok(Some("[]".to_owned())));
    }
}
