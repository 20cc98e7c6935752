//! Reading the ledger from, and writing it to, a [KeyValueStore].
//!
//! The ledger is kept in three independent slots. Each slot is read on its own
//! so a damaged slot only loses that part of the state.

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error,
    budget::DEFAULT_MONTHLY_BUDGET,
    ledger::Ledger,
    recurring::RecurringTransaction,
    storage::KeyValueStore,
    transaction::Transaction,
};

/// The slot holding the JSON array of transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// The slot holding the JSON array of recurring transactions.
pub const RECURRING_TRANSACTIONS_KEY: &str = "recurringTransactions";
/// The slot holding the monthly budget as a decimal string.
pub const MONTHLY_BUDGET_KEY: &str = "monthlyBudget";

/// Read the whole ledger from `store`.
///
/// This never fails. A slot that is missing, cannot be read or cannot be
/// parsed falls back to an empty collection, or to [DEFAULT_MONTHLY_BUDGET]
/// for the budget, and the problem is logged.
pub fn load_ledger(store: &dyn KeyValueStore) -> Ledger {
    let ledger = Ledger {
        transactions: load_collection(store, TRANSACTIONS_KEY),
        recurring_transactions: load_collection(store, RECURRING_TRANSACTIONS_KEY),
        monthly_budget: load_monthly_budget(store),
    };

    tracing::info!(
        "loaded {} transactions, {} recurring transactions and a monthly budget of {}",
        ledger.transactions.len(),
        ledger.recurring_transactions.len(),
        ledger.monthly_budget
    );

    ledger
}

fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!("could not read \"{key}\", starting with an empty list: {error}");
            return Vec::new();
        }
    };

    from_json(&text).unwrap_or_else(|error| {
        tracing::warn!("stored \"{key}\" is corrupt, starting with an empty list: {error}");
        Vec::new()
    })
}

fn load_monthly_budget(store: &dyn KeyValueStore) -> f64 {
    let text = match store.get(MONTHLY_BUDGET_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return DEFAULT_MONTHLY_BUDGET,
        Err(error) => {
            tracing::warn!("could not read the monthly budget, using the default: {error}");
            return DEFAULT_MONTHLY_BUDGET;
        }
    };

    match parse_monthly_budget(&text) {
        Some(budget) => budget,
        None => {
            tracing::warn!("stored monthly budget {text:?} is not valid, using the default");
            DEFAULT_MONTHLY_BUDGET
        }
    }
}

/// Parse a stored budget, rejecting anything that is not a positive number.
fn parse_monthly_budget(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|budget| budget.is_finite() && *budget > 0.0)
}

/// Write the full transaction list to its slot.
///
/// # Errors
///
/// Returns an error if the list could not be serialized or the store rejected
/// the write.
pub fn save_transactions(
    store: &mut dyn KeyValueStore,
    transactions: &[Transaction],
) -> Result<(), Error> {
    store.set(TRANSACTIONS_KEY, &to_json(transactions)?)
}

/// Write the full recurring transaction list to its slot.
///
/// # Errors
///
/// Returns an error if the list could not be serialized or the store rejected
/// the write.
pub fn save_recurring_transactions(
    store: &mut dyn KeyValueStore,
    recurring_transactions: &[RecurringTransaction],
) -> Result<(), Error> {
    store.set(RECURRING_TRANSACTIONS_KEY, &to_json(recurring_transactions)?)
}

/// Write the monthly budget to its slot as a decimal string.
///
/// # Errors
///
/// Returns an error if the store rejected the write.
pub fn save_monthly_budget(
    store: &mut dyn KeyValueStore,
    monthly_budget: f64,
) -> Result<(), Error> {
    store.set(MONTHLY_BUDGET_KEY, &monthly_budget.to_string())
}

/// Serialize a collection in its storage format, a JSON array.
pub fn to_json<T: Serialize>(collection: &[T]) -> Result<String, Error> {
    serde_json::to_string(collection)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))
}

/// Parse a collection from its storage format.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, Error> {
    serde_json::from_str(text).map_err(|error| Error::JSONSerializationError(error.to_string()))
}
