//! Server API tests

use super::*;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use finboard_core::{BankConnector, ConnectedAccount, CoreError, CoreResult, FileFinancialData};
use std::path::PathBuf;
use std::time::Duration;
use tower::ServiceExt;

fn test_config() -> Config {
    let mut config = Config::default();
    config.filters.reference_date = NaiveDate::from_ymd_opt(2023, 6, 30);
    config.connector.handshake_delay_ms = 0;
    config.connector.confirm_delay_ms = 0;
    config
}

fn test_state() -> AppState {
    let config = test_config();
    let dashboard = Dashboard::sample(&config);
    AppState::new(config, dashboard)
}

fn setup_test_app() -> Router {
    create_router(test_state())
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

fn ids(json: &serde_json::Value, key: &str) -> Vec<String> {
    json[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

// ========== Transactions ==========

#[tokio::test]
async fn test_health() {
    let response = send(setup_test_app(), "GET", "/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn test_transactions_default_view() {
    let response = send(setup_test_app(), "GET", "/api/transactions", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["count"], 7);
    assert_eq!(json["total"], 7);
    assert_eq!(json["label"], "Showing 7 of 7 transactions");
    assert_eq!(ids(&json, "transactions")[0], "tx1");
}

#[tokio::test]
async fn test_transactions_search_matches_category() {
    let response = send(setup_test_app(), "GET", "/api/transactions?q=income&sort=asc", None).await;
    let json = get_body_json(response).await;
    assert_eq!(ids(&json, "transactions"), vec!["tx6", "tx2"]);
}

#[tokio::test]
async fn test_transactions_sentinel_and_account() {
    let app = setup_test_app();
    let response = send(
        app.clone(),
        "GET",
        "/api/transactions?category=All%20Categories&account=Chase%20Checking",
        None,
    )
    .await;
    let json = get_body_json(response).await;
    assert_eq!(ids(&json, "transactions"), vec!["tx1", "tx6"]);

    let response = send(app, "GET", "/api/transactions?range=all&q=zzz", None).await;
    let json = get_body_json(response).await;
    assert_eq!(json["count"], 0);
    assert_eq!(json["label"], "Showing 0 of 7 transactions");
}

#[tokio::test]
async fn test_transactions_invalid_params() {
    let app = setup_test_app();
    let response = send(app.clone(), "GET", "/api/transactions?sort=sideways", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("sideways"));

    let response = send(app, "GET", "/api/transactions?range=fortnight", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stored_filter_actions_and_reset() {
    let state = test_state();
    let app = create_router(state.clone());

    let action = serde_json::json!({"action": "set_category", "value": {"only": "Income"}});
    let response = send(app.clone(), "POST", "/api/transactions/filter", Some(action)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], serde_json::json!({"only": "Income"}));

    let action = serde_json::json!({"action": "toggle_sort"});
    send(app.clone(), "POST", "/api/transactions/filter", Some(action)).await;

    // The stateless query falls back to the stored filter
    let json = get_body_json(send(app.clone(), "GET", "/api/transactions", None).await).await;
    assert_eq!(ids(&json, "transactions"), vec!["tx6", "tx2"]);

    let response = send(app.clone(), "POST", "/api/transactions/filter/reset", None).await;
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "all");
    assert_eq!(json["sort_direction"], "ascending");

    let dashboard = state.dashboard.read().await;
    assert!(dashboard.transaction_filter.category.is_all());
}

#[tokio::test]
async fn test_transactions_pages() {
    let app = setup_test_app();
    let response = send(app.clone(), "GET", "/transactions", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Showing 7 of 7 transactions"));
    assert!(html.contains("Grocery Store"));

    let response = send(app.clone(), "GET", "/transactions/list?q=coffee", None).await;
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Coffee Shop"));
    assert!(html.contains("Showing 1 of 7 transactions"));
    assert!(!html.contains("<!DOCTYPE html>"));

    let response = send(app, "POST", "/transactions/reset", None).await;
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Showing 7 of 7 transactions"));
}

#[tokio::test]
async fn test_htmx_request_gets_partial_page() {
    let request = Request::builder()
        .uri("/payables")
        .header("hx-request", "true")
        .body(Body::empty())
        .unwrap();
    let response = setup_test_app().oneshot(request).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Alquiler de Oficina"));
    assert!(html.contains("$3,066.25"));
}

// ========== Payables and receivables ==========

#[tokio::test]
async fn test_payables_summary() {
    let json = get_body_json(send(setup_test_app(), "GET", "/api/payables", None).await).await;
    assert_eq!(json["count"], 5);
    assert_eq!(json["summary"]["total_amount"], "3066.25");
    assert_eq!(json["summary"]["total_overdue"], "850.00");
    assert_eq!(json["summary"]["overdue_count"], 1);

    let overdue = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["id"] == "p3")
        .unwrap();
    assert_eq!(overdue["status"], "vencido");
}

#[tokio::test]
async fn test_receivables_window_and_sort() {
    let json = get_body_json(
        send(setup_test_app(), "GET", "/api/receivables?range=next_30_days&sort=asc", None).await,
    )
    .await;
    assert_eq!(ids(&json, "items"), vec!["r2", "r4", "r1", "r3"]);
    assert_eq!(json["summary"]["total_overdue"], "1200.00");
}

// ========== Notifications ==========

#[tokio::test]
async fn test_notification_actions() {
    let app = setup_test_app();
    let json = get_body_json(send(app.clone(), "GET", "/api/notifications", None).await).await;
    assert_eq!(json["unread"], 2);

    let json = get_body_json(send(app.clone(), "POST", "/api/notifications/1/read", None).await).await;
    assert_eq!(json["unread"], 1);

    let json = get_body_json(send(app.clone(), "DELETE", "/api/notifications/2", None).await).await;
    assert_eq!(json["unread"], 0);
    assert_eq!(json["notifications"].as_array().unwrap().len(), 4);

    let json = get_body_json(send(app.clone(), "POST", "/api/notifications/toggle", None).await).await;
    assert_eq!(json["open"], true);

    let response = send(app, "POST", "/api/notifications/99/read", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ========== Accounts ==========

struct FailingConnector;

#[async_trait]
impl BankConnector for FailingConnector {
    async fn connect(&self, _bank: &str) -> CoreResult<ConnectedAccount> {
        Err(CoreError::Connection {
            message: "bank unavailable".to_string(),
        })
    }
}

#[tokio::test]
async fn test_connect_account() {
    let state = test_state();
    let app = create_router(state.clone());

    let response = send(
        app.clone(),
        "POST",
        "/api/accounts/connect",
        Some(serde_json::json!({"bank": "Citibank"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["bankName"], "Citibank");
    assert_eq!(json["id"], "4");
    assert_eq!(json["lastUpdated"], "Just now");

    let dashboard = state.dashboard.read().await;
    assert_eq!(dashboard.accounts.accounts.len(), 4);
}

#[tokio::test]
async fn test_connect_failure_returns_to_idle() {
    let mut state = test_state();
    state.connector = Arc::new(FailingConnector);
    let app = create_router(state.clone());

    let response = send(
        app,
        "POST",
        "/api/accounts/connect",
        Some(serde_json::json!({"bank": "Chase"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let dashboard = state.dashboard.read().await;
    assert_eq!(dashboard.accounts.phase, finboard_core::ConnectionPhase::Idle);
    assert_eq!(dashboard.accounts.accounts.len(), 3);
}

struct HangingConnector;

#[async_trait]
impl BankConnector for HangingConnector {
    async fn connect(&self, _bank: &str) -> CoreResult<ConnectedAccount> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_abandoned_connect_returns_to_idle() {
    let mut state = test_state();
    state.connector = Arc::new(HangingConnector);
    let app = create_router(state.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/api/accounts/connect")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({"bank": "Citibank"}).to_string()))
        .unwrap();
    let outcome = tokio::time::timeout(Duration::from_millis(50), app.oneshot(request)).await;
    assert!(outcome.is_err());

    tokio::time::sleep(Duration::from_millis(20)).await;
    let mut dashboard = state.dashboard.write().await;
    assert_eq!(dashboard.accounts.phase, finboard_core::ConnectionPhase::Idle);
    assert_eq!(dashboard.accounts.accounts.len(), 3);
    dashboard
        .accounts
        .reduce(finboard_core::AccountAction::BeginConnect("TD Bank".to_string()))
        .unwrap();
}

#[tokio::test]
async fn test_connect_while_connecting_conflicts() {
    let mut state = test_state();
    state.connector = Arc::new(SimulatedBankConnector::new(Duration::from_millis(0)));
    state
        .dashboard
        .write()
        .await
        .accounts
        .reduce(finboard_core::AccountAction::BeginConnect("Chase".to_string()))
        .unwrap();

    let response = send(
        create_router(state),
        "POST",
        "/api/accounts/connect",
        Some(serde_json::json!({"bank": "TD Bank"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_remove_and_refresh_account() {
    let app = setup_test_app();
    let json = get_body_json(send(app.clone(), "POST", "/api/accounts/2/refresh", None).await).await;
    assert_eq!(json["lastUpdated"], "Just now");

    let json = get_body_json(send(app.clone(), "DELETE", "/api/accounts/3", None).await).await;
    assert_eq!(json["accounts"].as_array().unwrap().len(), 2);

    let response = send(app, "DELETE", "/api/accounts/3", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bank_search() {
    let json = get_body_json(send(setup_test_app(), "GET", "/api/banks?q=bank", None).await).await;
    let names: Vec<_> = json["banks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Bank of America", "Citibank", "TD Bank"]);
}

// ========== Financial data, summary, settings ==========

#[tokio::test]
async fn test_financial_data_get_and_post() {
    let app = setup_test_app();
    for method in ["GET", "POST"] {
        let response = send(app.clone(), method, "/api/financial-data", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_body_json(response).await;
        assert_eq!(json["spendingData"]["labels"].as_array().unwrap().len(), 6);
        assert_eq!(json["incomeData"][0]["salary"], 4500.0);
    }
}

#[tokio::test]
async fn test_financial_data_error() {
    let mut state = test_state();
    state.data_source = Arc::new(FileFinancialData::new(PathBuf::from("/nonexistent/finboard/chart.json")));
    let response = send(create_router(state), "GET", "/api/financial-data", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_summary_and_dashboard_page() {
    let app = setup_test_app();
    let json = get_body_json(send(app.clone(), "GET", "/api/summary", None).await).await;
    assert_eq!(json["unread_notifications"], 2);
    assert_eq!(json["connected_accounts"], 3);
    assert_eq!(json["payables"]["total_amount"], "3066.25");

    let response = send(app, "GET", "/", None).await;
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Unusual Activity Detected"));
    assert!(html.contains("$4,350.00"));
}

#[tokio::test]
async fn test_settings() {
    let json = get_body_json(send(setup_test_app(), "GET", "/api/settings", None).await).await;
    assert_eq!(json["server"]["port"], 8081);
    assert_eq!(json["filters"]["reference_date"], "2023-06-30");
}
