//! The monthly budget and the operation that changes it.

use crate::validation::ValidationError;

/// The monthly budget used when none has been saved yet, in currency units.
pub const DEFAULT_MONTHLY_BUDGET: f64 = 3000.0;

/// Replace `current_budget` with `proposed` if it is a valid budget.
///
/// `current_budget` is what the budget stays at when `proposed` is rejected;
/// the caller keeps it on the error path.
///
/// # Errors
///
/// Returns [ValidationError::NonPositiveBudget] if `proposed` is not a finite
/// number greater than zero.
pub fn set_monthly_budget(current_budget: f64, proposed: f64) -> Result<f64, ValidationError> {
    if proposed.is_finite() && proposed > 0.0 {
        Ok(proposed)
    } else {
        tracing::debug!("rejected monthly budget {proposed}, keeping {current_budget}");
        Err(ValidationError::NonPositiveBudget(proposed))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        budget::{DEFAULT_MONTHLY_BUDGET, set_monthly_budget},
        validation::ValidationError,
    };

    #[test]
    fn accepts_positive_budget() {
        assert_eq!(set_monthly_budget(DEFAULT_MONTHLY_BUDGET, 2000.0), Ok(2000.0));
    }

    #[test]
    fn rejects_negative_budget() {
        assert_eq!(
            set_monthly_budget(3000.0, -5.0),
            Err(ValidationError::NonPositiveBudget(-5.0))
        );
    }

    #[test]
    fn rejects_zero_and_non_finite_budgets() {
        assert!(set_monthly_budget(3000.0, 0.0).is_err());
        assert!(set_monthly_budget(3000.0, f64::NAN).is_err());
        assert!(set_monthly_budget(3000.0, f64::INFINITY).is_err());
    }
}
