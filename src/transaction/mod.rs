//! Transactions: single income or expense events.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the pure operations that add and delete them
//! - The endpoints that apply those operations to the shared ledger
//! - The page that adds and lists transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod transactions_page;

pub use core::{Transaction, TransactionDraft, TransactionType, add_transaction, delete_transaction};
pub(crate) use core::{deserialize_description, iso_date};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use transactions_page::get_transactions_page;
