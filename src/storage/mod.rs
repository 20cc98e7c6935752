//! The durable key-value boundary that the ledger is saved to.
//!
//! Values are whole serialized slots, there are no partial writes.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::Error;

/// A durable store of string values addressed by string keys.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}
