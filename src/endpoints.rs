//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the budget overview.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for adding and listing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for adding and listing recurring transactions.
pub const RECURRING_VIEW: &str = "/recurring";
/// The page with derived statistics and charts.
pub const STATISTICS_VIEW: &str = "/statistics";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to update the monthly budget.
pub const BUDGET_API: &str = "/api/budget";
/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to create recurring transactions.
pub const RECURRING_API: &str = "/api/recurring";
/// The route to access a single recurring transaction.
pub const RECURRING_TRANSACTION: &str = "/api/recurring/{recurring_id}";
/// The route to pause or resume a recurring transaction.
pub const TOGGLE_RECURRING: &str = "/api/recurring/{recurring_id}/toggle";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/recurring/{recurring_id}', '{recurring_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
