//! Aggregate reductions over record collections
//!
//! All sums use `Decimal`, so totals are exact and an empty input sums to zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::{PayableReceivable, Transaction};
use super::types::TransactionKind;

/// Totals for a payables or receivables collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SettlementSummary {
    pub total_amount: Decimal,
    pub total_overdue: Decimal,
    pub count: usize,
    pub overdue_count: usize,
}

impl SettlementSummary {
    pub fn of(items: &[PayableReceivable]) -> Self {
        items.iter().fold(Self::default(), |mut summary, item| {
            summary.total_amount += item.amount;
            summary.count += 1;
            if item.is_overdue() {
                summary.total_overdue += item.amount;
                summary.overdue_count += 1;
            }
            summary
        })
    }
}

/// Income and expense totals for a transaction collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransactionTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Income minus expenses
    pub net: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

impl TransactionTotals {
    pub fn of(transactions: &[Transaction]) -> Self {
        let mut totals = transactions.iter().fold(Self::default(), |mut totals, tx| {
            match tx.kind {
                TransactionKind::Income => {
                    totals.total_income += tx.amount;
                    totals.income_count += 1;
                }
                TransactionKind::Expense => {
                    totals.total_expenses += tx.amount;
                    totals.expense_count += 1;
                }
            }
            totals
        });
        totals.net = totals.total_income - totals.total_expenses;
        totals
    }
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
}

/// Expense totals per category, largest first, ties by name
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryBreakdown> {
    let mut by_category: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.kind == TransactionKind::Expense) {
        let entry = by_category.entry(tx.category.as_str()).or_insert((Decimal::ZERO, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut breakdown: Vec<CategoryBreakdown> = by_category
        .into_iter()
        .map(|(category, (amount, count))| CategoryBreakdown {
            category: category.to_string(),
            amount,
            count,
        })
        .collect();
    // BTreeMap order is by name, so a stable sort on amount keeps name order for ties
    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
    breakdown
}

/// Dashboard overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub transactions: TransactionTotals,
    pub visible_transactions: usize,
    pub total_transactions: usize,
    pub payables: SettlementSummary,
    pub receivables: SettlementSummary,
    pub unread_notifications: usize,
    pub connected_accounts: usize,
    pub top_categories: Vec<CategoryBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SettlementStatus, TransactionStatus};

    fn item(amount: Decimal, status: SettlementStatus) -> PayableReceivable {
        PayableReceivable {
            id: format!("p-{}", amount),
            description: "Factura".to_string(),
            amount,
            due_date: "2023-06-30".to_string(),
            status: status.to_string(),
            entity: "Cliente".to_string(),
            category: "Servicios".to_string(),
        }
    }

    fn tx(amount: Decimal, kind: TransactionKind, category: &str) -> Transaction {
        Transaction {
            id: format!("tx-{}-{}", category, amount),
            date: "2023-06-15".to_string(),
            description: "Entry".to_string(),
            category: category.to_string(),
            amount,
            kind,
            account: "Chase Checking".to_string(),
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn test_settlement_summary_scenario() {
        let items: Vec<PayableReceivable> = serde_json::from_str(
            r#"[{"id":"p1","description":"Alquiler","amount":1200,"dueDate":"2023-07-01",
                 "status":"pendiente","entity":"Inmobiliaria Central","category":"Alquiler"},
                {"id":"p3","description":"Pago a Proveedor","amount":850,"dueDate":"2023-06-18",
                 "status":"vencido","entity":"Suministros ABC","category":"Inventario"}]"#,
        )
        .unwrap();
        let summary = SettlementSummary::of(&items);
        assert_eq!(summary.total_amount, Decimal::new(2050, 0));
        assert_eq!(summary.total_overdue, Decimal::new(850, 0));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.overdue_count, 1);
    }

    #[test]
    fn test_empty_summaries_are_zero() {
        let summary = SettlementSummary::of(&[]);
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert_eq!(summary.total_overdue, Decimal::ZERO);

        let summary = SettlementSummary::of(&[item(Decimal::new(14575, 2), SettlementStatus::Pending)]);
        assert_eq!(summary.total_overdue, Decimal::ZERO);
        assert_eq!(summary.overdue_count, 0);
    }

    #[test]
    fn test_decimal_sums_are_exact() {
        let items: Vec<_> = (0..10)
            .map(|_| item(Decimal::new(1, 1), SettlementStatus::Overdue))
            .collect();
        let summary = SettlementSummary::of(&items);
        assert_eq!(summary.total_amount, Decimal::ONE);
        assert_eq!(summary.total_overdue, Decimal::ONE);
    }

    #[test]
    fn test_transaction_totals() {
        let transactions = vec![
            tx(Decimal::new(350000, 2), TransactionKind::Income, "Income"),
            tx(Decimal::new(7845, 2), TransactionKind::Expense, "Groceries"),
            tx(Decimal::new(575, 2), TransactionKind::Expense, "Dining Out"),
        ];
        let totals = TransactionTotals::of(&transactions);
        assert_eq!(totals.total_income, Decimal::new(350000, 2));
        assert_eq!(totals.total_expenses, Decimal::new(8420, 2));
        assert_eq!(totals.net, Decimal::new(341580, 2));
        assert_eq!(totals.income_count, 1);
        assert_eq!(totals.expense_count, 2);
    }

    #[test]
    fn test_category_breakdown_orders_by_amount_then_name() {
        let transactions = vec![
            tx(Decimal::new(10, 0), TransactionKind::Expense, "Utilities"),
            tx(Decimal::new(10, 0), TransactionKind::Expense, "Shopping"),
            tx(Decimal::new(5, 0), TransactionKind::Expense, "Groceries"),
            tx(Decimal::new(30, 0), TransactionKind::Expense, "Groceries"),
            tx(Decimal::new(999, 0), TransactionKind::Income, "Income"),
        ];
        let breakdown = category_breakdown(&transactions);
        let names: Vec<_> = breakdown.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Shopping", "Utilities"]);
        assert_eq!(breakdown[0].amount, Decimal::new(35, 0));
        assert_eq!(breakdown[0].count, 2);
    }
}
