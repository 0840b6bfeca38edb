//! Transaction routes - query, stored filter state, list page
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_transaction_filter, api_transaction_filter_reset, api_transaction_filter_update,
    api_transactions, htmx_transactions_list, htmx_transactions_reset,
};
pub use page::page_transactions;
