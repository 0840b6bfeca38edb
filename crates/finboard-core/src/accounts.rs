//! Connected-account management and the bank connection wizard

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::{Bank, ConnectedAccount};

/// Visible tab of the account management dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ManagerTab {
    #[default]
    Manage,
    Add,
}

/// How a new account is added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddMethod {
    #[default]
    Api,
    Manual,
}

/// Progress of a bank connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ConnectionPhase {
    #[default]
    Idle,
    Connecting { bank: String },
    Connected { bank: String },
}

impl std::fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionPhase::Idle => write!(f, "idle"),
            ConnectionPhase::Connecting { bank } => write!(f, "connecting to {}", bank),
            ConnectionPhase::Connected { bank } => write!(f, "connected to {}", bank),
        }
    }
}

/// Account manager transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum AccountAction {
    SelectTab(ManagerTab),
    SelectAddMethod(AddMethod),
    SetBankSearch(String),
    BeginConnect(String),
    ConnectSucceeded(ConnectedAccount),
    ConnectFailed,
    Acknowledge,
    Remove(String),
    Refresh(String),
}

/// Case-insensitive substring match on the bank name
pub fn filter_banks<'a>(catalog: &'a [Bank], search: &str) -> Vec<&'a Bank> {
    let needle = search.trim().to_lowercase();
    catalog
        .iter()
        .filter(|bank| bank.name.to_lowercase().contains(&needle))
        .collect()
}

/// State of the account management dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountManager {
    pub accounts: Vec<ConnectedAccount>,
    pub tab: ManagerTab,
    pub add_method: AddMethod,
    pub bank_search: String,
    pub phase: ConnectionPhase,
    next_id: u64,
}

impl Default for AccountManager {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AccountManager {
    pub fn new(accounts: Vec<ConnectedAccount>) -> Self {
        // Ids are never reused, so start past every numeric id already handed out
        let next_id = accounts
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .max(accounts.len() as u64)
            .saturating_add(1);
        Self {
            accounts,
            tab: ManagerTab::Manage,
            add_method: AddMethod::Api,
            bank_search: String::new(),
            phase: ConnectionPhase::Idle,
            next_id,
        }
    }

    /// Apply one transition. On error the state is left untouched.
    pub fn reduce(&mut self, action: AccountAction) -> CoreResult<()> {
        log::debug!("account action: {:?} (phase: {})", action, self.phase);
        match action {
            AccountAction::SelectTab(tab) => self.tab = tab,
            AccountAction::SelectAddMethod(method) => self.add_method = method,
            AccountAction::SetBankSearch(search) => self.bank_search = search,
            AccountAction::BeginConnect(bank) => {
                if self.phase != ConnectionPhase::Idle {
                    return Err(self.invalid("begin_connect"));
                }
                self.phase = ConnectionPhase::Connecting { bank };
            }
            AccountAction::ConnectSucceeded(mut account) => {
                let bank = match &self.phase {
                    ConnectionPhase::Connecting { bank } => bank.clone(),
                    _ => return Err(self.invalid("connect_succeeded")),
                };
                account.id = self.next_id.to_string();
                self.next_id = self.next_id.saturating_add(1);
                log::info!("Connected {} account {}", account.bank_name, account.account_number);
                self.accounts.push(account);
                self.phase = ConnectionPhase::Connected { bank };
            }
            AccountAction::ConnectFailed => {
                if !matches!(self.phase, ConnectionPhase::Connecting { .. }) {
                    return Err(self.invalid("connect_failed"));
                }
                self.phase = ConnectionPhase::Idle;
            }
            AccountAction::Acknowledge => {
                if !matches!(self.phase, ConnectionPhase::Connected { .. }) {
                    return Err(self.invalid("acknowledge"));
                }
                self.phase = ConnectionPhase::Idle;
                self.tab = ManagerTab::Manage;
            }
            AccountAction::Remove(id) => {
                let index = self.position(&id)?;
                self.accounts.remove(index);
            }
            AccountAction::Refresh(id) => {
                let index = self.position(&id)?;
                self.accounts[index].last_updated = "Just now".to_string();
            }
        }
        Ok(())
    }

    /// Popular banks whose name contains the current search text
    pub fn filtered_banks<'a>(&self, catalog: &'a [Bank]) -> Vec<&'a Bank> {
        filter_banks(catalog, &self.bank_search)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self.phase, ConnectionPhase::Connecting { .. })
    }

    pub fn get(&self, id: &str) -> Option<&ConnectedAccount> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn position(&self, id: &str) -> CoreResult<usize> {
        self.accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CoreError::RecordNotFound {
                kind: "Account".to_string(),
                id: id.to_string(),
            })
    }

    fn invalid(&self, action: &str) -> CoreError {
        CoreError::InvalidTransition {
            action: action.to_string(),
            state: self.phase.to_string(),
        }
    }
}
