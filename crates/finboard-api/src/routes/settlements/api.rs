//! Payables and receivables endpoints - JSON API
//!
//! Both collections share one stored filter state; the summaries always
//! cover the whole collection.

use axum::extract::{Query, State};
use axum::Json;
use finboard_core::{FilterAction, FilterState, PayableReceivable, QueryResult, SettlementSummary};

use crate::routes::FilterParams;
use crate::{ApiResult, AppState};

fn items_response(result: QueryResult<PayableReceivable>, summary: SettlementSummary, noun: &str) -> serde_json::Value {
    serde_json::json!({
        "label": result.showing_label(noun),
        "count": result.count,
        "total": result.total,
        "items": result.records,
        "summary": summary,
    })
}

pub async fn api_payables(
    state: State<AppState>,
    params: Query<FilterParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let dashboard = state.dashboard.read().await;
    let filter = params.apply(&dashboard.settlement_filter, &dashboard)?;
    let result = finboard_core::query(&dashboard.payables, &filter, state.today());
    Ok(Json(items_response(result, dashboard.payables_summary(), "payables")))
}

pub async fn api_receivables(
    state: State<AppState>,
    params: Query<FilterParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let dashboard = state.dashboard.read().await;
    let filter = params.apply(&dashboard.settlement_filter, &dashboard)?;
    let result = finboard_core::query(&dashboard.receivables, &filter, state.today());
    Ok(Json(items_response(result, dashboard.receivables_summary(), "receivables")))
}

pub async fn api_settlement_filter(state: State<AppState>) -> Json<FilterState> {
    let dashboard = state.dashboard.read().await;
    Json(dashboard.settlement_filter.clone())
}

pub async fn api_settlement_filter_update(
    state: State<AppState>,
    Json(action): Json<FilterAction>,
) -> Json<FilterState> {
    let mut dashboard = state.dashboard.write().await;
    Json(dashboard.apply_settlement_filter(action).clone())
}
