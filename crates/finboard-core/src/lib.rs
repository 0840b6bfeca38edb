//! Dashboard records, query engine and view state

pub mod accounts;
pub mod error;
pub mod models;
pub mod notifications;
pub mod query;
pub mod reports;
pub mod sample;
pub mod source;
pub mod time;
pub mod types;

use chrono::NaiveDate;
use finboard_config::Config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

pub use accounts::{filter_banks, AccountAction, AccountManager, AddMethod, ConnectionPhase, ManagerTab};
pub use error::{CoreError, CoreResult};
pub use models::{
    Bank, ChartDataset, ConnectedAccount, FinancialData, IncomePoint, Notification,
    PayableReceivable, SpendingData, Transaction,
};
pub use notifications::{NotificationAction, NotificationCenter};
pub use query::{query, FilterAction, FilterState, LedgerRecord, QueryResult, Selection, SortDirection};
pub use reports::{CategoryBreakdown, DashboardSummary, SettlementSummary, TransactionTotals};
pub use source::{
    BankConnector, ConnectorRef, DataSourceRef, FileFinancialData, FinancialDataSource,
    SimulatedBankConnector, StaticFinancialData,
};
pub use time::DateRange;
pub use types::{
    ConnectionStatus, NotificationKind, SettlementStatus, TransactionKind, TransactionStatus,
};

/// Number of categories reported in the dashboard summary
const TOP_CATEGORIES: usize = 5;

/// On-disk dataset; every key is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
    pub payables: Vec<PayableReceivable>,
    pub receivables: Vec<PayableReceivable>,
    pub notifications: Vec<Notification>,
    pub accounts: Vec<ConnectedAccount>,
    /// Explicit category options; derived from the transactions when empty
    pub categories: Vec<String>,
}

impl Dataset {
    /// Built-in demo data
    pub fn sample() -> Self {
        Self {
            transactions: sample::transactions(),
            payables: sample::payables(),
            receivables: sample::receivables(),
            notifications: sample::notifications(),
            accounts: sample::connected_accounts(),
            categories: Vec::new(),
        }
    }
}

/// Record collections plus the state of every dashboard view
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub transactions: Vec<Transaction>,
    pub payables: Vec<PayableReceivable>,
    pub receivables: Vec<PayableReceivable>,
    pub transaction_filter: FilterState,
    pub settlement_filter: FilterState,
    pub notifications: NotificationCenter,
    pub accounts: AccountManager,
    pub banks: Vec<Bank>,
    categories: Vec<String>,
    all_categories_label: String,
    all_accounts_label: String,
}

impl Dashboard {
    pub fn new(config: &Config, dataset: Dataset) -> Self {
        let mut transaction_filter = FilterState::transactions();
        let mut settlement_filter = FilterState::settlements();
        if !config.filters.apply_date_range {
            transaction_filter = transaction_filter.without_date_window();
            settlement_filter = settlement_filter.without_date_window();
        }

        Self {
            transactions: dataset.transactions,
            payables: dataset.payables,
            receivables: dataset.receivables,
            transaction_filter,
            settlement_filter,
            notifications: NotificationCenter::new(dataset.notifications),
            accounts: AccountManager::new(dataset.accounts),
            banks: sample::popular_banks(),
            categories: dataset.categories,
            all_categories_label: config.filters.all_categories_label.clone(),
            all_accounts_label: config.filters.all_accounts_label.clone(),
        }
    }

    /// Dashboard over the built-in demo data
    pub fn sample(config: &Config) -> Self {
        Self::new(config, Dataset::sample())
    }

    /// Load a JSON dataset file
    pub async fn load(config: &Config, path: &Path) -> CoreResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let dataset: Dataset = serde_json::from_str(&content)?;
        log::info!(
            "Loaded {} transactions, {} payables, {} receivables from {}",
            dataset.transactions.len(),
            dataset.payables.len(),
            dataset.receivables.len(),
            path.display()
        );
        Ok(Self::new(config, dataset))
    }

    /// Load the configured dataset, or the demo data when none is set
    pub async fn from_config(config: &Config) -> CoreResult<Self> {
        match &config.data.path {
            Some(path) => Self::load(config, path).await,
            None => {
                log::info!("No data path configured, using sample data");
                Ok(Self::sample(config))
            }
        }
    }

    pub fn visible_transactions(&self, today: NaiveDate) -> QueryResult<Transaction> {
        query(&self.transactions, &self.transaction_filter, today)
    }

    /// Run an ad-hoc filter without touching the stored one
    pub fn query_transactions(&self, state: &FilterState, today: NaiveDate) -> QueryResult<Transaction> {
        query(&self.transactions, state, today)
    }

    pub fn visible_payables(&self, today: NaiveDate) -> QueryResult<PayableReceivable> {
        query(&self.payables, &self.settlement_filter, today)
    }

    pub fn visible_receivables(&self, today: NaiveDate) -> QueryResult<PayableReceivable> {
        query(&self.receivables, &self.settlement_filter, today)
    }

    pub fn payables_summary(&self) -> SettlementSummary {
        SettlementSummary::of(&self.payables)
    }

    pub fn receivables_summary(&self) -> SettlementSummary {
        SettlementSummary::of(&self.receivables)
    }

    pub fn transaction_totals(&self) -> TransactionTotals {
        TransactionTotals::of(&self.transactions)
    }

    /// Overview of the visible transactions and every other collection
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        let visible = self.visible_transactions(today);
        let mut top_categories = reports::category_breakdown(&visible.records);
        top_categories.truncate(TOP_CATEGORIES);

        DashboardSummary {
            transactions: TransactionTotals::of(&visible.records),
            visible_transactions: visible.count,
            total_transactions: visible.total,
            payables: self.payables_summary(),
            receivables: self.receivables_summary(),
            unread_notifications: self.notifications.unread_count(),
            connected_accounts: self.accounts.accounts.len(),
            top_categories,
        }
    }

    pub fn apply_transaction_filter(&mut self, action: FilterAction) -> &FilterState {
        self.transaction_filter = self.transaction_filter.reduce(action);
        &self.transaction_filter
    }

    pub fn apply_settlement_filter(&mut self, action: FilterAction) -> &FilterState {
        self.settlement_filter = self.settlement_filter.reduce(action);
        &self.settlement_filter
    }

    /// Category options, sorted and distinct
    pub fn categories(&self) -> Vec<String> {
        if !self.categories.is_empty() {
            return self.categories.clone();
        }
        self.transactions
            .iter()
            .map(|t| t.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Account options, sorted and distinct
    pub fn accounts(&self) -> Vec<String> {
        self.transactions
            .iter()
            .map(|t| t.account.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Interpret a category option, honouring the configured sentinel label
    pub fn category_selection(&self, input: &str) -> Selection {
        Selection::parse(input, &self.all_categories_label)
    }

    /// Interpret an account option, honouring the configured sentinel label
    pub fn account_selection(&self, input: &str) -> Selection {
        Selection::parse(input, &self.all_accounts_label)
    }

    pub fn all_categories_label(&self) -> &str {
        &self.all_categories_label
    }

    pub fn all_accounts_label(&self) -> &str {
        &self.all_accounts_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()
    }

    fn dashboard() -> Dashboard {
        Dashboard::sample(&Config::default())
    }

    #[test]
    fn test_sample_dashboard_views() {
        let dashboard = dashboard();
        let visible = dashboard.visible_transactions(today());
        assert_eq!(visible.count, 7);
        assert_eq!(visible.records[0].id, "tx1");
        assert_eq!(visible.showing_label("transactions"), "Showing 7 of 7 transactions");

        // Next 30 days keeps overdue items and drops nothing before 2023-07-30
        assert_eq!(dashboard.visible_payables(today()).count, 5);
        assert_eq!(dashboard.visible_receivables(today()).count, 4);
    }

    #[test]
    fn test_summaries() {
        let dashboard = dashboard();
        let payables = dashboard.payables_summary();
        assert_eq!(payables.total_amount, Decimal::new(306625, 2));
        assert_eq!(payables.total_overdue, Decimal::new(850, 0));

        let receivables = dashboard.receivables_summary();
        assert_eq!(receivables.total_amount, Decimal::new(8250, 0));
        assert_eq!(receivables.total_overdue, Decimal::new(1200, 0));

        let summary = dashboard.summary(today());
        assert_eq!(summary.unread_notifications, 2);
        assert_eq!(summary.connected_accounts, 3);
        assert_eq!(summary.transactions.total_income, Decimal::new(4350, 0));
        assert_eq!(summary.top_categories[0].category, "Shopping");
        assert!(summary.top_categories.len() <= TOP_CATEGORIES);
    }

    #[test]
    fn test_filter_actions_and_reset() {
        let mut dashboard = dashboard();
        let category = dashboard.category_selection("Income");
        dashboard.apply_transaction_filter(FilterAction::SetCategory(category));
        dashboard.apply_transaction_filter(FilterAction::ToggleSort);
        let visible = dashboard.visible_transactions(today());
        let ids: Vec<_> = visible.records.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["tx6", "tx2"]);

        let state = dashboard.apply_transaction_filter(FilterAction::Reset).clone();
        assert!(state.category.is_all());
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(dashboard.visible_transactions(today()).count, 7);
    }

    #[test]
    fn test_sentinel_labels_select_everything() {
        let dashboard = dashboard();
        assert!(dashboard.category_selection("All Categories").is_all());
        assert!(dashboard.account_selection("All Accounts").is_all());
        assert_eq!(
            dashboard.account_selection("Chase Checking"),
            Selection::Only("Chase Checking".to_string())
        );
    }

    #[test]
    fn test_option_lists_are_sorted_and_distinct() {
        let dashboard = dashboard();
        let categories = dashboard.categories();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0], "Dining Out");
        assert_eq!(dashboard.accounts().len(), 6);
    }

    #[test]
    fn test_date_window_can_be_disabled() {
        let mut config = Config::default();
        config.filters.apply_date_range = false;
        let dashboard = Dashboard::sample(&config);
        let far_future = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(dashboard.visible_transactions(far_future).count, 7);

        let dashboard = Dashboard::sample(&Config::default());
        assert_eq!(dashboard.visible_transactions(far_future).count, 0);
    }

    #[tokio::test]
    async fn test_load_partial_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"payables":[{{"id":"p1","description":"Alquiler","amount":1200,
                "dueDate":"2023-07-01","status":"pendiente","entity":"Inmobiliaria",
                "category":"Alquiler"}}],"categories":["Rent"]}}"#
        )
        .unwrap();

        let dashboard = Dashboard::load(&Config::default(), file.path()).await.unwrap();
        assert!(dashboard.transactions.is_empty());
        assert_eq!(dashboard.payables.len(), 1);
        assert_eq!(dashboard.categories(), vec!["Rent".to_string()]);
        assert_eq!(dashboard.transaction_totals(), TransactionTotals::default());
    }

    #[tokio::test]
    async fn test_load_errors() {
        let err = Dashboard::load(&Config::default(), Path::new("/nonexistent/finboard.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::IoError(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2").unwrap();
        let err = Dashboard::load(&Config::default(), file.path()).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidFormat { .. }));
    }

    #[tokio::test]
    async fn test_from_config_without_path_uses_sample() {
        let dashboard = Dashboard::from_config(&Config::default()).await.unwrap();
        assert_eq!(dashboard.transactions.len(), 7);
    }
}
