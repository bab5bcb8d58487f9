//! The transaction ledger.
//!
//! This module contains everything related to transactions:
//! - The `TransactionRecord` model and ID generation
//! - The `Ledger` controller that owns the records and the filter, sort and editor state
//! - Conversions between records and the text shown in the table
//! - View handlers for the transactions page and the JSON API

mod api;
pub(crate) mod bootstrap;
pub(crate) mod core;
mod delete_endpoint;
mod editor;
pub(crate) mod filter;
pub(crate) mod form;
pub(crate) mod format;
pub(crate) mod ledger;
pub(crate) mod range;
pub(crate) mod sort;
mod submit_endpoint;
mod transactions_page;
pub(crate) mod view;

pub use api::{
    create_transaction_json, delete_transaction_json, list_transactions_json,
    update_transaction_json,
};
pub use bootstrap::{BootstrapReport, SkippedRow};
pub use self::core::{TransactionId, TransactionRecord};
pub use delete_endpoint::delete_transaction_endpoint;
pub use editor::{cancel_editor, get_edit_transaction_editor, get_new_transaction_editor};
pub use form::ValidationErrors;
pub use ledger::Ledger;
pub use submit_endpoint::submit_transaction_endpoint;
pub use transactions_page::{
    get_transaction_table, get_transactions_page, refresh_transactions, sort_transactions,
};
