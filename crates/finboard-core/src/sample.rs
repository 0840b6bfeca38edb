//! Built-in demo dataset used when no data file is configured

use rust_decimal::Decimal;

use crate::models::{
    Bank, ChartDataset, ConnectedAccount, FinancialData, IncomePoint, Notification,
    PayableReceivable, SpendingData, Transaction,
};
use crate::types::{
    ConnectionStatus, NotificationKind, TransactionKind, TransactionStatus,
};

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn tx(
    id: &str,
    date: &str,
    description: &str,
    category: &str,
    cents: i64,
    kind: TransactionKind,
    account: &str,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        amount: money(cents),
        kind,
        account: account.to_string(),
        status,
    }
}

fn item(
    id: &str,
    description: &str,
    cents: i64,
    due_date: &str,
    status: &str,
    entity: &str,
    category: &str,
) -> PayableReceivable {
    PayableReceivable {
        id: id.to_string(),
        description: description.to_string(),
        amount: money(cents),
        due_date: due_date.to_string(),
        status: status.to_string(),
        entity: entity.to_string(),
        category: category.to_string(),
    }
}

pub fn transactions() -> Vec<Transaction> {
    use TransactionKind::{Expense, Income};
    use TransactionStatus::{Completed, Failed, Pending};
    vec![
        tx("tx1", "2023-06-15", "Grocery Store", "Groceries", 7845, Expense, "Chase Checking", Completed),
        tx("tx2", "2023-06-14", "Monthly Salary", "Income", 350000, Income, "Bank of America Checking", Completed),
        tx("tx3", "2023-06-13", "Coffee Shop", "Dining Out", 575, Expense, "Chase Credit Card", Completed),
        tx("tx4", "2023-06-12", "Electric Bill", "Utilities", 9540, Expense, "Wells Fargo Checking", Pending),
        tx("tx5", "2023-06-10", "Online Shopping", "Shopping", 12499, Expense, "Citi Credit Card", Completed),
        tx("tx6", "2023-06-08", "Freelance Payment", "Income", 85000, Income, "Chase Checking", Completed),
        tx("tx7", "2023-06-07", "Gas Station", "Transportation", 4530, Expense, "Amex Credit Card", Failed),
    ]
}

const PENDING: &str = "pendiente";
const OVERDUE: &str = "vencido";
const PARTIAL: &str = "parcial";

pub fn payables() -> Vec<PayableReceivable> {
    vec![
        item("p1", "Alquiler de Oficina", 120000, "2023-07-01", PENDING, "Inmobiliaria Central", "Alquiler"),
        item("p2", "Factura de Electricidad", 14575, "2023-06-25", PENDING, "Compañía Eléctrica", "Servicios"),
        item("p3", "Pago a Proveedor", 85000, "2023-06-18", OVERDUE, "Suministros ABC", "Inventario"),
        item("p4", "Seguro de Negocio", 32050, "2023-07-10", PENDING, "Aseguradora Nacional", "Seguros"),
        item("p5", "Cuota de Préstamo", 55000, "2023-06-30", PENDING, "Banco Principal", "Préstamos"),
    ]
}

pub fn receivables() -> Vec<PayableReceivable> {
    vec![
        item("r1", "Factura #1089", 250000, "2023-06-30", PENDING, "Cliente Corporativo A", "Servicios"),
        item("r2", "Factura #1090", 120000, "2023-06-15", OVERDUE, "Cliente Minorista B", "Productos"),
        item("r3", "Factura #1091", 375000, "2023-07-10", PENDING, "Cliente Corporativo C", "Consultoría"),
        item("r4", "Factura #1092", 80000, "2023-06-20", PARTIAL, "Cliente Minorista D", "Productos"),
    ]
}

pub fn notifications() -> Vec<Notification> {
    let notification = |id: &str, kind, title: &str, message: &str, time: &str, read| Notification {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        read,
        account: None,
        amount: None,
        action_required: false,
    };

    vec![
        Notification {
            account: Some("Chase Credit Card".to_string()),
            amount: Some(money(150000)),
            action_required: true,
            ..notification(
                "1",
                NotificationKind::Alert,
                "Unusual Activity Detected",
                "A transaction of $1,500 was made on your Chase Credit Card.",
                "10 minutes ago",
                false,
            )
        },
        Notification {
            account: Some("Checking Account".to_string()),
            amount: Some(money(8542)),
            ..notification(
                "2",
                NotificationKind::Warning,
                "Low Balance Alert",
                "Your checking account balance is below $100.",
                "1 hour ago",
                false,
            )
        },
        Notification {
            amount: Some(money(12575)),
            action_required: true,
            ..notification(
                "3",
                NotificationKind::Reminder,
                "Upcoming Bill Payment",
                "Your electricity bill of $125.75 is due in 3 days.",
                "Yesterday",
                true,
            )
        },
        Notification {
            action_required: true,
            ..notification(
                "4",
                NotificationKind::Alert,
                "New Login Detected",
                "A new login was detected from an unrecognized device.",
                "2 days ago",
                true,
            )
        },
        notification(
            "5",
            NotificationKind::Warning,
            "Credit Score Change",
            "Your credit score has changed. Check your credit report.",
            "3 days ago",
            true,
        ),
    ]
}

pub fn connected_accounts() -> Vec<ConnectedAccount> {
    let account = |id: &str, bank: &str, kind: &str, number: &str, status, updated: &str| {
        ConnectedAccount {
            id: id.to_string(),
            bank_name: bank.to_string(),
            account_type: kind.to_string(),
            account_number: number.to_string(),
            status,
            last_updated: updated.to_string(),
        }
    };
    vec![
        account("1", "Chase Bank", "Checking", "****4567", ConnectionStatus::Active, "2 hours ago"),
        account("2", "Bank of America", "Savings", "****7890", ConnectionStatus::Active, "1 day ago"),
        account("3", "Wells Fargo", "Credit Card", "****2345", ConnectionStatus::Error, "3 days ago"),
    ]
}

/// Popular banks offered by the connection wizard
pub fn popular_banks() -> Vec<Bank> {
    [
        ("Chase", "chase"),
        ("Bank of America", "boa"),
        ("Wells Fargo", "wells"),
        ("Citibank", "citi"),
        ("Capital One", "capital"),
        ("TD Bank", "td"),
    ]
    .into_iter()
    .map(|(name, seed)| Bank {
        name: name.to_string(),
        logo: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", seed),
    })
    .collect()
}

/// Fixed chart payload
pub fn financial_data() -> FinancialData {
    let series = |label: &str, data: [f64; 6], rgb: &str| ChartDataset {
        label: label.to_string(),
        data: data.to_vec(),
        background_color: Some(format!("rgba({}, 0.2)", rgb)),
        border_color: Some(format!("rgba({}, 1)", rgb)),
    };
    let income = |date: &str, salary, investments, freelance, other| IncomePoint {
        date: date.to_string(),
        salary,
        investments,
        freelance,
        other,
    };

    FinancialData {
        spending_data: SpendingData {
            labels: ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            datasets: vec![
                series("Groceries", [400.0, 350.0, 500.0, 450.0, 470.0, 420.0], "75, 192, 192"),
                series("Entertainment", [200.0, 250.0, 180.0, 300.0, 220.0, 240.0], "153, 102, 255"),
                series("Utilities", [150.0, 160.0, 155.0, 140.0, 165.0, 170.0], "255, 159, 64"),
            ],
        },
        income_data: vec![
            income("Jan", 4500.0, 800.0, 1200.0, 300.0),
            income("Feb", 4500.0, 850.0, 900.0, 200.0),
            income("Mar", 4500.0, 900.0, 1500.0, 350.0),
            income("Apr", 4800.0, 950.0, 1100.0, 250.0),
            income("May", 4800.0, 1000.0, 1300.0, 400.0),
            income("Jun", 4800.0, 1050.0, 1800.0, 300.0),
        ],
    }
}
