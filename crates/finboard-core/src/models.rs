//! Core data models for the dashboard

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{
    ConnectionStatus, NotificationKind, SettlementStatus, TransactionKind, TransactionStatus,
};

/// Date format used by every record
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a record date, `None` when the text is not a calendar date
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

/// Transaction information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Transaction date (YYYY-MM-DD format)
    pub date: String,
    /// Free-text label
    pub description: String,
    /// Category name
    pub category: String,
    /// Unsigned magnitude; the sign comes from `kind`
    pub amount: Decimal,
    /// Income or expense
    #[serde(rename = "type", alias = "kind")]
    pub kind: TransactionKind,
    /// Owning account label
    pub account: String,
    /// Processing status
    pub status: TransactionStatus,
}

impl Transaction {
    /// Get the transaction date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Amount with the display sign applied
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// Payable or receivable line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayableReceivable {
    /// Unique identifier
    pub id: String,
    /// Free-text label
    pub description: String,
    /// Unsigned amount owed
    pub amount: Decimal,
    /// Due date (YYYY-MM-DD format)
    #[serde(rename = "dueDate", alias = "due_date")]
    pub due_date: String,
    /// Settlement lifecycle label, kept exactly as loaded
    pub status: String,
    /// Counterparty name
    pub entity: String,
    /// Category name
    pub category: String,
}

impl PayableReceivable {
    /// Get the due date as NaiveDate
    pub fn due_date_naive(&self) -> Option<NaiveDate> {
        parse_date(&self.due_date)
    }

    /// Interpreted status, `None` for labels outside the known lifecycle
    pub fn settlement_status(&self) -> Option<SettlementStatus> {
        self.status.parse().ok()
    }

    pub fn is_overdue(&self) -> bool {
        self.settlement_status() == Some(SettlementStatus::Overdue)
    }
}

/// Dashboard notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Relative time label, e.g. "10 minutes ago"
    pub time: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub action_required: bool,
}

/// Bank account linked to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedAccount {
    pub id: String,
    pub bank_name: String,
    /// "Checking", "Savings", "Credit Card", ...
    pub account_type: String,
    /// Masked number, e.g. "****4567"
    pub account_number: String,
    #[serde(default)]
    pub status: ConnectionStatus,
    /// Relative time label of the last sync
    pub last_updated: String,
}

/// Entry of the popular-bank catalog shown by the connection wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub logo: String,
}

/// Chart payload served by the financial-data endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub spending_data: SpendingData,
    pub income_data: Vec<IncomePoint>,
}

/// Labelled spending series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// One spending series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

/// Income by source for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomePoint {
    pub date: String,
    pub salary: f64,
    pub investments: f64,
    pub freelance: f64,
    pub other: f64,
}

impl IncomePoint {
    pub fn total(&self) -> f64 {
        self.salary + self.investments + self.freelance + self.other
    }
}
