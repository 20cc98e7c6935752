//! Dashboard module
//!
//! Provides the budget overview for the current month: balance, income,
//! expenses and how much of the monthly budget has been used.

mod cards;
mod handlers;

pub use handlers::get_dashboard_page;
