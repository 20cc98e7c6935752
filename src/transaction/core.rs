//! Defines the transaction model and the operations that add and remove
//! transactions from a collection.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use crate::{
    recurring::Frequency,
    record_id::{IdGenerator, RecordId},
    validation::{ValidationError, parse_date, validate_amount, validate_category},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The name to show to users, e.g. "Income".
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// The value used in forms and storage, e.g. "income".
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense event.
///
/// The amount is always positive, the direction of the money is given by
/// [Transaction::kind]. Transactions cannot be edited in place, a correction
/// is made by deleting the transaction and adding a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The unique ID assigned when the transaction was added.
    pub id: RecordId,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The amount of money in currency units, always greater than zero.
    pub amount: f64,
    /// What the money was for, e.g. "Food & Dining" or "Salary".
    pub category: String,
    /// Optional free text detailing the transaction.
    #[serde(default, deserialize_with = "deserialize_description")]
    pub description: String,
    /// The calendar date the transaction happened on.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Informational flag marking a transaction as part of a repeating series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
    /// Informational frequency of the repeating series, if any.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_frequency"
    )]
    pub recurring_frequency: Option<Frequency>,
}

/// Unvalidated user input for a new transaction.
///
/// The date is kept as text so that it can be validated along with the other
/// fields by [add_transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// Whether this is income or an expense.
    pub kind: TransactionType,
    /// The amount in currency units, must be greater than zero.
    pub amount: f64,
    /// The category, must not be empty.
    pub category: String,
    /// Optional description, may be empty.
    pub description: String,
    /// The date as "YYYY-MM-DD".
    pub date: String,
}

impl TransactionDraft {
    /// Start a draft with an empty description.
    pub fn new(kind: TransactionType, amount: f64, category: &str, date: &str) -> Self {
        Self {
            kind,
            amount,
            category: category.to_owned(),
            description: String::new(),
            date: date.to_owned(),
        }
    }

    /// Set the description of the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

// ============================================================================
// MUTATIONS
// ============================================================================

/// Validate `draft` and return a new collection with the transaction at the front.
///
/// The new transaction is given a fresh ID from `ids`. `transactions` is left
/// untouched.
///
/// # Errors
///
/// Returns a [ValidationError] if the amount is not greater than zero, the
/// category is empty or the date is not a valid calendar date.
pub fn add_transaction(
    transactions: &[Transaction],
    draft: TransactionDraft,
    ids: &mut IdGenerator,
) -> Result<Vec<Transaction>, ValidationError> {
    let amount = validate_amount(draft.amount)?;
    let category = validate_category(&draft.category)?;
    let date = parse_date(&draft.date)?;

    let transaction = Transaction {
        id: ids.next_id(),
        kind: draft.kind,
        amount,
        category,
        description: draft.description.trim().to_owned(),
        date,
        is_recurring: None,
        recurring_frequency: None,
    };

    let mut updated = Vec::with_capacity(transactions.len() + 1);
    updated.push(transaction);
    updated.extend_from_slice(transactions);

    Ok(updated)
}

/// Return a new collection without the transaction with `id`.
///
/// Deleting an ID that is not in the collection is not an error, the returned
/// collection is simply equal to `transactions`.
pub fn delete_transaction(transactions: &[Transaction], id: &RecordId) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| &transaction.id != id)
        .cloned()
        .collect()
}

// ============================================================================
// SERIALIZATION HELPERS
// ============================================================================

/// Serde adapter for dates stored as "YYYY-MM-DD".
pub(crate) mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::Date;

    use crate::validation::ISO_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(ISO_DATE_FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(&text, ISO_DATE_FORMAT).map_err(de::Error::custom)
    }
}

/// Read an optional description, a null or non-text value reads as empty.
pub(crate) fn deserialize_description<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::String(text)) => text,
        _ => String::new(),
    })
}

/// Read an optional frequency, treating anything unrecognised as absent.
fn deserialize_optional_frequency<'de, D>(deserializer: D) -> Result<Option<Frequency>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|text| text.parse().ok()))
}

#[cfg(test)]
mod transaction_model_tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{
        recurring::Frequency,
        record_id::RecordId,
        transaction::{Transaction, TransactionType},
    };

    #[test]
    fn serializes_with_storage_field_names() {
        let transaction = Transaction {
            id: RecordId::new("1704412800000"),
            kind: TransactionType::Expense,
            amount: 50.0,
            category: "Food & Dining".to_owned(),
            description: "Lunch".to_owned(),
            date: date!(2024 - 01 - 05),
            is_recurring: Some(true),
            recurring_frequency: Some(Frequency::Weekly),
        };

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            got,
            json!({
                "id": "1704412800000",
                "type": "expense",
                "amount": 50.0,
                "category": "Food & Dining",
                "description": "Lunch",
                "date": "2024-01-05",
                "isRecurring": true,
                "recurringFrequency": "weekly",
            })
        );
    }

    #[test]
    fn missing_optional_fields_are_absent() {
        let text = r#"{"id":"1","type":"income","amount":1000,"category":"Salary","date":"2024-01-01"}"#;

        let transaction: Transaction = serde_json::from_str(text).unwrap();

        assert_eq!(transaction.kind, TransactionType::Income);
        assert_eq!(transaction.description, "");
        assert_eq!(transaction.is_recurring, None);
        assert_eq!(transaction.recurring_frequency, None);
    }

    #[test]
    fn null_optional_fields_are_absent() {
        let text = r#"[{"id":"1","type":"expense","amount":5,"category":"Food","description":null,
            "date":"2024-01-05","isRecurring":null,"recurringFrequency":null}]"#;

        let transactions: Vec<Transaction> = serde_json::from_str(text).unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].description, "");
        assert_eq!(transactions[0].is_recurring, None);
        assert_eq!(transactions[0].recurring_frequency, None);
    }

    #[test]
    fn unknown_recurring_frequency_is_treated_as_absent() {
        let text = r#"{"id":"1","type":"expense","amount":5,"category":"Other",
            "description":"","date":"2024-01-01","recurringFrequency":"fortnightly"}"#;

        let transaction: Transaction = serde_json::from_str(text).unwrap();

        assert_eq!(transaction.recurring_frequency, None);
    }

    #[test]
    fn rejects_malformed_date() {
        let text = r#"{"id":"1","type":"expense","amount":5,"category":"Other","date":"01/01/2024"}"#;

        assert!(serde_json::from_str::<Transaction>(text).is_err());
    }
}
