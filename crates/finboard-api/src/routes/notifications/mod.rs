//! Notification center endpoints - JSON API
//!
//! Unknown ids are not an error: the center ignores them and the current
//! state is returned as usual.

use axum::extract::{Path, State};
use axum::Json;
use finboard_core::{NotificationAction, NotificationCenter};

use crate::AppState;

fn center_response(center: &NotificationCenter) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "open": center.open,
        "unread": center.unread_count(),
        "notifications": center.notifications,
    }))
}

async fn apply(state: &AppState, action: NotificationAction) -> Json<serde_json::Value> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.notifications.reduce(action);
    center_response(&dashboard.notifications)
}

pub async fn api_notifications(state: State<AppState>) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.read().await;
    center_response(&dashboard.notifications)
}

pub async fn api_notifications_toggle(state: State<AppState>) -> Json<serde_json::Value> {
    apply(&state, NotificationAction::Toggle).await
}

pub async fn api_notifications_read_all(state: State<AppState>) -> Json<serde_json::Value> {
    apply(&state, NotificationAction::MarkAllRead).await
}

pub async fn api_notification_read(state: State<AppState>, Path(id): Path<String>) -> Json<serde_json::Value> {
    apply(&state, NotificationAction::MarkRead(id)).await
}

pub async fn api_notification_dismiss(state: State<AppState>, Path(id): Path<String>) -> Json<serde_json::Value> {
    apply(&state, NotificationAction::Dismiss(id)).await
}
