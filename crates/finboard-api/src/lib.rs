//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction query, filter state, list page
//! - routes::settlements: Payables and receivables
//! - routes::notifications: Notification center
//! - routes::accounts: Connected accounts and the bank connection wizard
//! - routes::financial_data: Chart payload
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use chrono::NaiveDate;
use finboard_config::Config;
use finboard_core::{
    ConnectorRef, Dashboard, DataSourceRef, FileFinancialData, SimulatedBankConnector,
    StaticFinancialData,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<RwLock<Dashboard>>,
    pub config: Config,
    pub data_source: DataSourceRef,
    pub connector: ConnectorRef,
}

impl AppState {
    /// State with the data source and connector described by the config
    pub fn new(config: Config, dashboard: Dashboard) -> Self {
        let data_source: DataSourceRef = match &config.data.financial_data_path {
            Some(path) => Arc::new(FileFinancialData::new(path.clone())),
            None => Arc::new(StaticFinancialData::default()),
        };
        let connector: ConnectorRef = Arc::new(SimulatedBankConnector::from_config(&config.connector));
        Self {
            dashboard: Arc::new(RwLock::new(dashboard)),
            config,
            data_source,
            connector,
        }
    }

    /// Reference date for every relative window
    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    /// Format an amount with the configured currency
    pub fn money(&self, amount: Decimal) -> String {
        finboard_utils::format_currency(amount, &self.config.currency)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{
        api_accounts, api_account_refresh, api_account_remove, api_accounts_connect, api_banks,
    };
    use routes::financial_data::api_financial_data;
    use routes::notifications::{
        api_notification_dismiss, api_notification_read, api_notifications,
        api_notifications_read_all, api_notifications_toggle,
    };
    use routes::settings::api_settings;
    use routes::settlements::{
        api_payables, api_receivables, api_settlement_filter, api_settlement_filter_update,
        page_payables,
    };
    use routes::transactions::{
        api_transaction_filter, api_transaction_filter_reset, api_transaction_filter_update,
        api_transactions, htmx_transactions_list, htmx_transactions_reset, page_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/financial-data", get(api_financial_data).post(api_financial_data))
        .route("/api/summary", get(api_summary))
        .route("/api/transactions", get(api_transactions))
        .route(
            "/api/transactions/filter",
            get(api_transaction_filter).post(api_transaction_filter_update),
        )
        .route("/api/transactions/filter/reset", post(api_transaction_filter_reset))
        .route("/api/payables", get(api_payables))
        .route("/api/receivables", get(api_receivables))
        .route(
            "/api/settlements/filter",
            get(api_settlement_filter).post(api_settlement_filter_update),
        )
        .route("/api/notifications", get(api_notifications))
        .route("/api/notifications/toggle", post(api_notifications_toggle))
        .route("/api/notifications/read-all", post(api_notifications_read_all))
        .route("/api/notifications/:id/read", post(api_notification_read))
        .route("/api/notifications/:id", delete(api_notification_dismiss))
        .route("/api/accounts", get(api_accounts))
        .route("/api/accounts/connect", post(api_accounts_connect))
        .route("/api/accounts/:id", delete(api_account_remove))
        .route("/api/accounts/:id/refresh", post(api_account_refresh))
        .route("/api/banks", get(api_banks))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/transactions", get(page_transactions))
        .route("/payables", get(page_payables))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/reset", post(htmx_transactions_reset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Dashboard summary (JSON API)
async fn api_summary(state: axum::extract::State<AppState>) -> axum::Json<finboard_core::DashboardSummary> {
    let dashboard = state.dashboard.read().await;
    axum::Json(dashboard.summary(state.today()))
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Finboard</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        finboard_utils::escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Dashboard", "📊"),
        ("/transactions", "Transactions", "📋"),
        ("/payables", "Payables & Receivables", "🧾"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Finboard</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for a full page, or return it bare for HTMX requests
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Dashboard overview page
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let dashboard = state.dashboard.read().await;
    let summary = dashboard.summary(state.today());
    let label = dashboard.transaction_filter.date_range.label();

    let categories: Vec<String> = summary.top_categories.iter().map(|c| {
        format!(
            "<div class='flex justify-between py-2 border-b'><span>{}</span><span class='font-medium'>{}</span></div>",
            finboard_utils::escape_html(&c.category),
            state.money(c.amount)
        )
    }).collect();

    let notifications: Vec<String> = dashboard.notifications.recent(3).iter().map(|n| {
        let dot = if n.read { "bg-gray-300" } else { "bg-indigo-500" };
        format!(
            "<div class='flex items-start gap-2 py-2 border-b'><span class='w-2 h-2 mt-2 rounded-full {}'></span><div><p class='font-medium'>{}</p><p class='text-sm text-gray-500'>{}</p><p class='text-xs text-gray-400'>{}</p></div></div>",
            dot,
            finboard_utils::escape_html(&n.title),
            finboard_utils::escape_html(&n.message),
            finboard_utils::escape_html(&n.time)
        )
    }).collect();

    let net_class = if summary.transactions.net.is_sign_negative() { "text-red-600" } else { "text-green-600" };

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Dashboard</h2><p class='text-sm text-gray-500'>{}</p></div>
        <div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-6'>
            <div class='bg-green-50 p-4 rounded-lg border border-green-200'><p class='text-sm text-green-600'>Income</p><p class='text-2xl font-bold text-green-700'>{}</p></div>
            <div class='bg-red-50 p-4 rounded-lg border border-red-200'><p class='text-sm text-red-600'>Expenses</p><p class='text-2xl font-bold text-red-700'>{}</p></div>
            <div class='bg-blue-50 p-4 rounded-lg border border-blue-200'><p class='text-sm text-blue-600'>Payables</p><p class='text-2xl font-bold text-blue-700'>{}</p><p class='text-xs text-red-500'>{} overdue</p></div>
            <div class='bg-yellow-50 p-4 rounded-lg border border-yellow-200'><p class='text-sm text-yellow-600'>Receivables</p><p class='text-2xl font-bold text-yellow-700'>{}</p><p class='text-xs text-red-500'>{} overdue</p></div>
        </div>
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Top Spending Categories</h3>
                <div class='space-y-1'>{}</div>
                <p class='mt-4 text-sm'>Net: <span class='font-bold {}'>{}</span></p>
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Notifications <span class='text-sm text-indigo-600'>{} unread</span></h3>
                <div class='space-y-1'>{}</div>
                <p class='mt-4 text-sm text-gray-500'>{} connected accounts</p>
            </div>
        </div>"#,
        label,
        state.money(summary.transactions.total_income),
        state.money(summary.transactions.total_expenses),
        state.money(summary.payables.total_amount),
        state.money(summary.payables.total_overdue),
        state.money(summary.receivables.total_amount),
        state.money(summary.receivables.total_overdue),
        categories.join(""),
        net_class,
        state.money(summary.transactions.net),
        summary.unread_notifications,
        notifications.join(""),
        summary.connected_accounts
    );

    axum::response::Html(page_response(&headers, "Dashboard", "/", &inner_content))
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the listener fails.
pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Finboard server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /payables (Payables and receivables)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

#[cfg(test)]
mod tests;
