//! Payables and receivables routes
//!
//! Structure:
//! - api.rs: JSON API endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_payables, api_receivables, api_settlement_filter, api_settlement_filter_update};
pub use page::page_payables;
