//! Defines recurring transaction templates and the operations that manage them.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    record_id::{IdGenerator, RecordId},
    transaction::{TransactionType, deserialize_description, iso_date},
    validation::{ValidationError, parse_date, validate_amount, validate_category},
};

/// How often a recurring transaction happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every calendar month.
    Monthly,
    /// Every year.
    Yearly,
}

/// Average number of weeks in a month used for projections.
const WEEKS_PER_MONTH: f64 = 4.33;
/// Number of days in a month used for projections.
const DAYS_PER_MONTH: f64 = 30.0;
const MONTHS_PER_YEAR: f64 = 12.0;

impl Frequency {
    /// All frequencies, in the order they should be offered to users.
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    /// Convert an amount paid at this frequency into a monthly amount.
    pub fn monthly_equivalent(self, amount: f64) -> f64 {
        match self {
            Frequency::Daily => amount * DAYS_PER_MONTH,
            Frequency::Weekly => amount * WEEKS_PER_MONTH,
            Frequency::Monthly => amount,
            Frequency::Yearly => amount / MONTHS_PER_YEAR,
        }
    }

    /// The value used in forms and storage, e.g. "weekly".
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// The name to show to users, e.g. "Weekly".
    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(ValidationError::InvalidFrequency(text.to_owned())),
        }
    }
}

/// A template for income or an expense that repeats on a regular basis
/// (e.g., wages, phone bill).
///
/// A recurring transaction is not a ledger entry itself, it is only used to
/// project monthly cash flow. Apart from deletion, [RecurringTransaction::is_active]
/// is the only thing that can change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    /// The unique ID assigned when the template was added.
    pub id: RecordId,
    /// Whether this is recurring income or a recurring expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The amount paid each period, always greater than zero.
    pub amount: f64,
    /// What the money is for.
    pub category: String,
    /// Optional free text.
    #[serde(default, deserialize_with = "deserialize_description")]
    pub description: String,
    /// How often the transaction repeats.
    pub frequency: Frequency,
    /// The date of the first occurrence.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Inactive templates are kept but left out of projections.
    pub is_active: bool,
}

/// Unvalidated user input for a new recurring transaction.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct RecurringTransactionDraft {
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// One of "daily", "weekly", "monthly" or "yearly".
    pub frequency: String,
    /// The first date as "YYYY-MM-DD".
    pub start_date: String,
}

impl RecurringTransactionDraft {
    /// Start a draft with an empty description.
    pub fn new(
        kind: TransactionType,
        amount: f64,
        category: &str,
        frequency: &str,
        start_date: &str,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.to_owned(),
            description: String::new(),
            frequency: frequency.to_owned(),
            start_date: start_date.to_owned(),
        }
    }

    /// Set the description of the recurring transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

/// Validate `draft` and return a new collection with the recurring
/// transaction appended to the end.
///
/// New recurring transactions start out active.
///
/// # Errors
///
/// Returns a [ValidationError] if the amount is not greater than zero, the
/// category is empty, the frequency is unknown or the start date is not a
/// valid calendar date.
pub fn add_recurring_transaction(
    recurring_transactions: &[RecurringTransaction],
    draft: RecurringTransactionDraft,
    ids: &mut IdGenerator,
) -> Result<Vec<RecurringTransaction>, ValidationError> {
    let amount = validate_amount(draft.amount)?;
    let category = validate_category(&draft.category)?;
    let frequency = draft.frequency.parse::<Frequency>()?;
    let start_date = parse_date(&draft.start_date)?;

    let mut updated = recurring_transactions.to_vec();
    updated.push(RecurringTransaction {
        id: ids.next_id(),
        kind: draft.kind,
        amount,
        category,
        description: draft.description.trim().to_owned(),
        frequency,
        start_date,
        is_active: true,
    });

    Ok(updated)
}

/// Return a new collection where the recurring transaction with `id` has its
/// active flag flipped.
///
/// Unknown IDs leave the collection unchanged.
pub fn toggle_recurring_active(
    recurring_transactions: &[RecurringTransaction],
    id: &RecordId,
) -> Vec<RecurringTransaction> {
    recurring_transactions
        .iter()
        .map(|recurring| {
            if &recurring.id == id {
                RecurringTransaction {
                    is_active: !recurring.is_active,
                    ..recurring.clone()
                }
            } else {
                recurring.clone()
            }
        })
        .collect()
}

/// Return a new collection without the recurring transaction with `id`.
///
/// Unknown IDs leave the collection unchanged.
pub fn delete_recurring_transaction(
    recurring_transactions: &[RecurringTransaction],
    id: &RecordId,
) -> Vec<RecurringTransaction> {
    recurring_transactions
        .iter()
        .filter(|recurring| &recurring.id != id)
        .cloned()
        .collect()
}
