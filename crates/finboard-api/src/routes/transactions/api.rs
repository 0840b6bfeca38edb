//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Stateless query (JSON)
//! - api_transaction_filter: Stored filter state (JSON)
//! - api_transaction_filter_update: Apply a filter action (JSON)
//! - api_transaction_filter_reset: Reset the stored filter (JSON)
//! - htmx_transactions_list: Filtered list (HTML fragment)
//! - htmx_transactions_reset: Reset and re-render the panel (HTML fragment)

use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use finboard_core::{FilterAction, FilterState};

use super::page::{render_transaction_list, render_transactions_panel};
use crate::routes::FilterParams;
use crate::{ApiResult, AppState};

/// Query transactions; absent parameters fall back to the stored filter
pub async fn api_transactions(
    state: State<AppState>,
    params: Query<FilterParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let dashboard = state.dashboard.read().await;
    let filter = params.apply(&dashboard.transaction_filter, &dashboard)?;
    let result = dashboard.query_transactions(&filter, state.today());

    Ok(Json(serde_json::json!({
        "label": result.showing_label("transactions"),
        "count": result.count,
        "total": result.total,
        "transactions": result.records,
    })))
}

pub async fn api_transaction_filter(state: State<AppState>) -> Json<FilterState> {
    let dashboard = state.dashboard.read().await;
    Json(dashboard.transaction_filter.clone())
}

pub async fn api_transaction_filter_update(
    state: State<AppState>,
    Json(action): Json<FilterAction>,
) -> Json<FilterState> {
    let mut dashboard = state.dashboard.write().await;
    Json(dashboard.apply_transaction_filter(action).clone())
}

pub async fn api_transaction_filter_reset(state: State<AppState>) -> Json<FilterState> {
    let mut dashboard = state.dashboard.write().await;
    Json(dashboard.apply_transaction_filter(FilterAction::Reset).clone())
}

/// HTMX: Transactions list - stores the submitted filter and renders the result
pub async fn htmx_transactions_list(
    state: State<AppState>,
    params: Query<FilterParams>,
) -> ApiResult<Html<String>> {
    let mut dashboard = state.dashboard.write().await;
    let filter = params.apply(&dashboard.transaction_filter, &dashboard)?;
    dashboard.transaction_filter = filter;

    let result = dashboard.visible_transactions(state.today());
    Ok(Html(render_transaction_list(&state, &result, params.offset.unwrap_or(0))))
}

/// HTMX: Reset button - clears every predicate and re-renders filters and list
pub async fn htmx_transactions_reset(state: State<AppState>) -> Html<String> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.apply_transaction_filter(FilterAction::Reset);
    Html(render_transactions_panel(&state, &dashboard))
}
