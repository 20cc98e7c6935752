//! Identifiers for transactions and recurring transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An opaque, unique identifier for a transaction or a recurring transaction.
///
/// IDs are assigned once when a record is created and are never reused or
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing ID string, e.g. one read back from storage or a URL.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Hands out fresh [RecordId]s derived from the current time in milliseconds.
///
/// IDs are strictly increasing for the lifetime of the generator, so two
/// records created within the same millisecond still get distinct IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdGenerator {
    last_issued: u64,
}

impl IdGenerator {
    /// Create a generator that has not issued any IDs yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that will only issue IDs greater than any numeric
    /// ID in `existing`.
    ///
    /// Non-numeric IDs cannot collide with generated ones and are skipped.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a RecordId>) -> Self {
        let last_issued = existing
            .into_iter()
            .filter_map(|id| id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or_default();

        Self { last_issued }
    }

    /// Get a fresh ID.
    pub fn next_id(&mut self) -> RecordId {
        self.next_id_at(current_millis())
    }

    fn next_id_at(&mut self, now_millis: u64) -> RecordId {
        let next = now_millis.max(self.last_issued.saturating_add(1));
        self.last_issued = next;

        RecordId(next.to_string())
    }
}

fn current_millis() -> u64 {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    u64::try_from(millis).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::record_id::{IdGenerator, RecordId};

    #[test]
    fn ids_are_timestamp_derived() {
        let mut ids = IdGenerator::new();

        let id = ids.next_id_at(1_704_067_200_000);

        assert_eq!(id, RecordId::new("1704067200000"));
    }

    #[test]
    fn ids_are_unique_within_the_same_millisecond() {
        let mut ids = IdGenerator::new();

        let first = ids.next_id_at(1_000);
        let second = ids.next_id_at(1_000);
        let third = ids.next_id_at(999);

        assert_eq!(first.as_str(), "1000");
        assert_eq!(second.as_str(), "1001");
        assert_eq!(third.as_str(), "1002");
    }

    #[test]
    fn seeded_generator_skips_past_existing_ids() {
        let existing = [
            RecordId::new("5000"),
            RecordId::new("not-a-number"),
            RecordId::new("7000"),
        ];
        let mut ids = IdGenerator::seeded(&existing);

        let id = ids.next_id_at(10);

        assert_eq!(id.as_str(), "7001");
    }

    #[test]
    fn next_id_never_repeats() {
        let mut ids = IdGenerator::new();

        let first = ids.next_id();
        let second = ids.next_id();

        assert_ne!(first, second);
    }
}
