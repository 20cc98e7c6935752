//! Validation of user input before it is allowed to change the ledger.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The calendar date format used for storage and forms, e.g. "2024-01-05".
pub(crate) const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The reasons a mutation can reject its input.
///
/// Validation errors are always recoverable: the caller should show the
/// message to the user and let them resubmit with corrected input.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// Amounts must be finite and strictly positive, the direction of the
    /// money is carried by the transaction type.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// Every transaction needs a category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// The date was not a valid calendar date in the format YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The frequency was not one of daily, weekly, monthly or yearly.
    #[error("\"{0}\" is not a valid frequency, expected daily, weekly, monthly or yearly")]
    InvalidFrequency(String),

    /// The monthly budget must be finite and strictly positive.
    #[error("monthly budget must be greater than zero, got {0}")]
    NonPositiveBudget(f64),
}

/// Check that `amount` is a finite number greater than zero.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::NonPositiveAmount(amount))
    }
}

/// Check that `category` has at least one non-whitespace character.
///
/// Returns the category with surrounding whitespace removed.
pub fn validate_category(category: &str) -> Result<String, ValidationError> {
    let category = category.trim();

    if category.is_empty() {
        Err(ValidationError::EmptyCategory)
    } else {
        Ok(category.to_owned())
    }
}

/// Parse an ISO-8601 calendar date such as "2024-01-05".
pub fn parse_date(text: &str) -> Result<Date, ValidationError> {
    Date::parse(text.trim(), ISO_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::validation::{
        ValidationError, parse_date, validate_amount, validate_category,
    };

    #[test]
    fn accepts_positive_amount() {
        assert_eq!(validate_amount(0.01), Ok(0.01));
    }

    #[test]
    fn rejects_zero_negative_and_non_finite_amounts() {
        assert_eq!(
            validate_amount(0.0),
            Err(ValidationError::NonPositiveAmount(0.0))
        );
        assert_eq!(
            validate_amount(-5.0),
            Err(ValidationError::NonPositiveAmount(-5.0))
        );
        assert!(validate_amount(f64::INFINITY).is_err());
        assert!(validate_amount(f64::NAN).is_err());
    }

    #[test]
    fn trims_category() {
        assert_eq!(validate_category("  Food  "), Ok("Food".to_owned()));
    }

    #[test]
    fn rejects_blank_category() {
        assert_eq!(validate_category(""), Err(ValidationError::EmptyCategory));
        assert_eq!(validate_category("   "), Err(ValidationError::EmptyCategory));
    }

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date("2024-01-05"), Ok(date!(2024 - 01 - 05)));
    }

    #[test]
    fn rejects_malformed_dates() {
        for text in ["", "2024-13-01", "2024-02-30", "05/01/2024", "yesterday"] {
            assert_eq!(
                parse_date(text),
                Err(ValidationError::InvalidDate(text.to_owned())),
                "want {text:?} to be rejected"
            );
        }
    }
}
