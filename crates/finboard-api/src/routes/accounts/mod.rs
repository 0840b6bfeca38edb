//! Connected accounts and the bank connection wizard - JSON API
//!
//! A connection runs in three steps: the wizard moves to `connecting`, the
//! connector performs the handshake without holding the dashboard lock, and
//! the outcome is fed back into the wizard. A successful connection returns
//! to idle by itself after the configured confirmation delay. A request that
//! is dropped mid-handshake fails the attempt so the wizard never stays in
//! `connecting`.

use axum::extract::{Path, Query, State};
use axum::Json;
use finboard_core::{filter_banks, AccountAction, AccountManager, ConnectedAccount, Dashboard};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::{ApiError, ApiResult, AppState};

fn manager_response(manager: &AccountManager) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "accounts": manager.accounts,
        "tab": manager.tab,
        "add_method": manager.add_method,
        "phase": manager.phase,
    }))
}

pub async fn api_accounts(state: State<AppState>) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.read().await;
    manager_response(&dashboard.accounts)
}

/// Fails the pending connection when dropped before `disarm`
struct PendingConnection {
    dashboard: Arc<RwLock<Dashboard>>,
    armed: bool,
}

impl PendingConnection {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingConnection {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let dashboard = self.dashboard.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    log::info!("Connection request abandoned, returning wizard to idle");
                    if let Err(e) = dashboard.write().await.accounts.reduce(AccountAction::ConnectFailed) {
                        log::debug!("Skipping abandoned connection cleanup: {}", e);
                    }
                });
            }
            Err(_) => log::warn!("No runtime to clean up an abandoned connection"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub bank: String,
}

/// Connect a bank and return the new account
pub async fn api_accounts_connect(
    state: State<AppState>,
    Json(request): Json<ConnectRequest>,
) -> ApiResult<Json<ConnectedAccount>> {
    let bank = request.bank.trim().to_string();
    if bank.is_empty() {
        return Err(ApiError::bad_request("bank must not be empty"));
    }

    state
        .dashboard
        .write()
        .await
        .accounts
        .reduce(AccountAction::BeginConnect(bank.clone()))?;
    let pending = PendingConnection {
        dashboard: state.dashboard.clone(),
        armed: true,
    };

    let outcome = state.connector.connect(&bank).await;

    let mut dashboard = state.dashboard.write().await;
    pending.disarm();
    let account = match outcome {
        Ok(account) => {
            dashboard.accounts.reduce(AccountAction::ConnectSucceeded(account))?;
            dashboard
                .accounts
                .accounts
                .last()
                .cloned()
                .ok_or_else(|| ApiError::Internal { message: "account list is empty".to_string() })?
        }
        Err(e) => {
            log::warn!("Connection to {} failed: {}", bank, e);
            dashboard.accounts.reduce(AccountAction::ConnectFailed)?;
            return Err(e.into());
        }
    };
    drop(dashboard);

    let confirm_delay = Duration::from_millis(state.config.connector.confirm_delay_ms);
    let dashboard = state.dashboard.clone();
    tokio::spawn(async move {
        tokio::time::sleep(confirm_delay).await;
        if let Err(e) = dashboard.write().await.accounts.reduce(AccountAction::Acknowledge) {
            log::debug!("Skipping connection acknowledgement: {}", e);
        }
    });

    Ok(Json(account))
}

pub async fn api_account_remove(
    state: State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.accounts.reduce(AccountAction::Remove(id))?;
    Ok(manager_response(&dashboard.accounts))
}

pub async fn api_account_refresh(
    state: State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ConnectedAccount>> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.accounts.reduce(AccountAction::Refresh(id.clone()))?;
    dashboard
        .accounts
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound { resource: format!("Account {}", id) })
}

#[derive(Debug, Default, Deserialize)]
pub struct BankSearch {
    pub q: Option<String>,
}

/// Popular banks matching the search text
pub async fn api_banks(state: State<AppState>, params: Query<BankSearch>) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.read().await;
    let banks = filter_banks(&dashboard.banks, params.q.as_deref().unwrap_or(""));
    Json(serde_json::json!({ "banks": banks }))
}
