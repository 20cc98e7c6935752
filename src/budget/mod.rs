//! The monthly spending budget.

mod core;
mod edit_endpoint;

pub use core::{DEFAULT_MONTHLY_BUDGET, set_monthly_budget};
pub use edit_endpoint::edit_budget_endpoint;
