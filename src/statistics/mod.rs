//! Statistics derived from the ledger.
//!
//! [aggregation] holds the pure functions that compute totals, averages,
//! trends and projections. The rest of the module renders them as the
//! statistics page.

pub mod aggregation;
mod cards;
mod charts;
mod handlers;

pub use handlers::get_statistics_page;
