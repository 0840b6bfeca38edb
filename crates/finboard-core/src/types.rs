//! Basic enumerations shared by the dashboard records

use serde::{Deserialize, Serialize};

/// Direction of money movement for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Income,
    /// Money spent
    Expense,
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" | "expenses" => Ok(TransactionKind::Expense),
            _ => Err(format!("Invalid transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// Processing status of a transaction (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(TransactionStatus::Completed),
            "pending" => Ok(TransactionStatus::Pending),
            "failed" => Ok(TransactionStatus::Failed),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Lifecycle of a payable or receivable
///
/// Records keep their status label as written; this is its interpretation.
/// Parsing accepts the Spanish labels used by the bundled dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Pending,
    Paid,
    Overdue,
    Partial,
}

impl std::str::FromStr for SettlementStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(SettlementStatus::Pending),
            "paid" | "pagado" => Ok(SettlementStatus::Paid),
            "overdue" | "vencido" => Ok(SettlementStatus::Overdue),
            "partial" | "parcial" => Ok(SettlementStatus::Partial),
            _ => Err(format!("Invalid settlement status: {}", s)),
        }
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettlementStatus::Pending => write!(f, "pending"),
            SettlementStatus::Paid => write!(f, "paid"),
            SettlementStatus::Overdue => write!(f, "overdue"),
            SettlementStatus::Partial => write!(f, "partial"),
        }
    }
}

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Security or unusual activity
    Alert,
    /// Balance or score changes
    Warning,
    /// Upcoming payments
    Reminder,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Alert => write!(f, "alert"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Reminder => write!(f, "reminder"),
        }
    }
}

/// Sync status of a connected bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Active,
    Pending,
    Error,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Active => write!(f, "active"),
            ConnectionStatus::Pending => write!(f, "pending"),
            ConnectionStatus::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_status_accepts_spanish_labels() {
        assert_eq!("vencido".parse::<SettlementStatus>().unwrap(), SettlementStatus::Overdue);
        assert_eq!("Pendiente".parse::<SettlementStatus>().unwrap(), SettlementStatus::Pending);
        assert_eq!("paid".parse::<SettlementStatus>().unwrap(), SettlementStatus::Paid);
        assert!("unknown".parse::<SettlementStatus>().is_err());

        let status: SettlementStatus = serde_json::from_str("\"parcial\"").unwrap();
        assert_eq!(status, SettlementStatus::Partial);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"partial\"");
    }

    #[test]
    fn test_transaction_kind_round_trips_through_display() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(kind.to_string().parse::<TransactionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_transaction_status_from_str() {
        assert_eq!("failed".parse::<TransactionStatus>().unwrap(), TransactionStatus::Failed);
        assert!("done".parse::<TransactionStatus>().is_err());
    }
}
