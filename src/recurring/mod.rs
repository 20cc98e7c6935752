//! Recurring transactions: templates for income and expenses that repeat on a
//! regular basis.
//!
//! Recurring transactions never create ledger entries, they only feed the
//! projected monthly cash flow.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod recurring_page;
mod toggle_endpoint;

pub use core::{
    Frequency, RecurringTransaction, RecurringTransactionDraft, add_recurring_transaction,
    delete_recurring_transaction, toggle_recurring_active,
};
pub use create_endpoint::create_recurring_endpoint;
pub use delete_endpoint::delete_recurring_endpoint;
pub use recurring_page::get_recurring_page;
pub use toggle_endpoint::toggle_recurring_endpoint;
