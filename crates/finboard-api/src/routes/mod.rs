//! Route modules for the API server
//!
//! - transactions: Transaction query, stored filter state, list page
//! - settlements: Payables and receivables with their summaries
//! - notifications: Notification center actions
//! - accounts: Connected accounts and the bank connection wizard
//! - financial_data: Chart payload
//! - settings: Configuration display
//!
//! Modules with pages follow the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX partials
//! - page.rs: Full page rendering

pub mod accounts;
pub mod financial_data;
pub mod notifications;
pub mod settings;
pub mod settlements;
pub mod transactions;

use crate::{ApiError, ApiResult};
use finboard_core::{Dashboard, DateRange, FilterState, SortDirection};
use serde::Deserialize;

/// Query-string overrides for a stored filter state
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub account: Option<String>,
    pub range: Option<String>,
    pub sort: Option<String>,
    pub offset: Option<usize>,
}

impl FilterParams {
    /// Overlay the given parameters on `base`; absent ones keep the stored value
    pub fn apply(&self, base: &FilterState, dashboard: &Dashboard) -> ApiResult<FilterState> {
        let mut state = base.clone();
        if let Some(q) = &self.q {
            state.search_text = q.clone();
        }
        if let Some(category) = &self.category {
            state.category = dashboard.category_selection(category);
        }
        if let Some(account) = &self.account {
            state.account = dashboard.account_selection(account);
        }
        if let Some(range) = &self.range {
            state.date_range = range.parse::<DateRange>().map_err(ApiError::bad_request)?;
        }
        if let Some(sort) = &self.sort {
            state.sort_direction = sort.parse::<SortDirection>().map_err(ApiError::bad_request)?;
        }
        Ok(state)
    }
}
