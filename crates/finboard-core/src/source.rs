//! Async capabilities behind the dashboard: chart data and bank connections

use async_trait::async_trait;
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::models::{ConnectedAccount, FinancialData};
use crate::sample;
use crate::types::ConnectionStatus;

/// Shared data source reference
pub type DataSourceRef = Arc<dyn FinancialDataSource>;

/// Shared connector reference
pub type ConnectorRef = Arc<dyn BankConnector>;

/// Provider of the chart payload
#[async_trait]
pub trait FinancialDataSource: Send + Sync {
    async fn fetch_financial_data(&self) -> CoreResult<FinancialData>;
}

/// Returns the built-in chart payload
#[derive(Debug, Clone)]
pub struct StaticFinancialData {
    data: FinancialData,
}

impl StaticFinancialData {
    pub fn new(data: FinancialData) -> Self {
        Self { data }
    }
}

impl Default for StaticFinancialData {
    fn default() -> Self {
        Self::new(sample::financial_data())
    }
}

#[async_trait]
impl FinancialDataSource for StaticFinancialData {
    async fn fetch_financial_data(&self) -> CoreResult<FinancialData> {
        Ok(self.data.clone())
    }
}

/// Reads the chart payload from a JSON file on every fetch
#[derive(Debug, Clone)]
pub struct FileFinancialData {
    path: PathBuf,
}

impl FileFinancialData {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FinancialDataSource for FileFinancialData {
    async fn fetch_financial_data(&self) -> CoreResult<FinancialData> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CoreError::DataSource {
                message: format!("cannot read {}: {}", self.path.display(), e),
            }
        })?;
        let data = serde_json::from_str(&content)?;
        log::debug!("Fetched financial data from {}", self.path.display());
        Ok(data)
    }
}

/// Establishes a link to a bank and returns the new account
#[async_trait]
pub trait BankConnector: Send + Sync {
    async fn connect(&self, bank: &str) -> CoreResult<ConnectedAccount>;
}

/// Pretends to talk to the bank: waits, then yields a checking account
#[derive(Debug, Clone)]
pub struct SimulatedBankConnector {
    handshake_delay: Duration,
}

impl SimulatedBankConnector {
    pub fn new(handshake_delay: Duration) -> Self {
        Self { handshake_delay }
    }

    pub fn from_config(config: &finboard_config::ConnectorConfig) -> Self {
        Self::new(Duration::from_millis(config.handshake_delay_ms))
    }
}

#[async_trait]
impl BankConnector for SimulatedBankConnector {
    async fn connect(&self, bank: &str) -> CoreResult<ConnectedAccount> {
        let bank = bank.trim();
        if bank.is_empty() {
            return Err(CoreError::Connection {
                message: "bank name is empty".to_string(),
            });
        }

        log::info!("Connecting to {}", bank);
        tokio::time::sleep(self.handshake_delay).await;

        let suffix: u16 = rand::thread_rng().gen_range(1000..10000);
        Ok(ConnectedAccount {
            // Assigned by the account manager
            id: String::new(),
            bank_name: bank.to_string(),
            account_type: "Checking".to_string(),
            account_number: format!("****{}", suffix),
            status: ConnectionStatus::Active,
            last_updated: "Just now".to_string(),
        })
    }
}
