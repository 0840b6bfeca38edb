//! Date range windows for filtering records
//!
//! Windows are always computed against an explicit `today`, so filtering
//! stays a pure function of its inputs.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date range selector value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_30_days")]
    Last30Days,
    ThisMonth,
    LastMonth,
    #[serde(rename = "last_3_months")]
    Last3Months,
    ThisYear,
    /// Everything due up to 30 days from today, including overdue items
    #[serde(rename = "next_30_days")]
    Next30Days,
    #[serde(rename = "next_60_days")]
    Next60Days,
    #[serde(rename = "next_90_days")]
    Next90Days,
    All,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::Last30Days
    }
}

impl DateRange {
    /// Inclusive lower and upper bound of the window, `None` meaning open
    pub fn bounds(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match *self {
            DateRange::Last7Days => (today.checked_sub_days(Days::new(6)), Some(today)),
            DateRange::Last30Days => (today.checked_sub_days(Days::new(29)), Some(today)),
            DateRange::ThisMonth => (first_of_month(today), last_of_month(today)),
            DateRange::LastMonth => {
                let previous = first_of_month(today).and_then(|d| d.pred_opt());
                (previous.and_then(first_of_month), previous)
            }
            DateRange::Last3Months => (today.checked_sub_months(Months::new(3)), Some(today)),
            DateRange::ThisYear => (
                NaiveDate::from_ymd_opt(today.year(), 1, 1),
                NaiveDate::from_ymd_opt(today.year(), 12, 31),
            ),
            DateRange::Next30Days => (None, today.checked_add_days(Days::new(30))),
            DateRange::Next60Days => (None, today.checked_add_days(Days::new(60))),
            DateRange::Next90Days => (None, today.checked_add_days(Days::new(90))),
            DateRange::All => (None, None),
            DateRange::Custom { start, end } => (Some(start), Some(end)),
        }
    }

    /// Check if a date falls inside the window
    pub fn contains(&self, date: &NaiveDate, today: NaiveDate) -> bool {
        match self.bounds(today) {
            (None, None) => true,
            (Some(s), None) => *date >= s,
            (None, Some(e)) => *date <= e,
            (Some(s), Some(e)) => *date >= s && *date <= e,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> String {
        match self {
            DateRange::Last7Days => "Last 7 Days".to_string(),
            DateRange::Last30Days => "Last 30 Days".to_string(),
            DateRange::ThisMonth => "This Month".to_string(),
            DateRange::LastMonth => "Last Month".to_string(),
            DateRange::Last3Months => "Last 3 Months".to_string(),
            DateRange::ThisYear => "This Year".to_string(),
            DateRange::Next30Days => "Next 30 Days".to_string(),
            DateRange::Next60Days => "Next 60 Days".to_string(),
            DateRange::Next90Days => "Next 90 Days".to_string(),
            DateRange::All => "All Time".to_string(),
            DateRange::Custom { start, end } => format!("{} to {}", start, end),
        }
    }

    /// Selector options for the transactions view
    pub fn history_options() -> &'static [DateRange] {
        &[
            DateRange::Last7Days,
            DateRange::Last30Days,
            DateRange::ThisMonth,
            DateRange::LastMonth,
            DateRange::Last3Months,
            DateRange::ThisYear,
            DateRange::All,
        ]
    }

    /// Selector options for the payables and receivables view
    pub fn due_options() -> &'static [DateRange] {
        &[
            DateRange::Next30Days,
            DateRange::Next60Days,
            DateRange::Next90Days,
            DateRange::All,
        ]
    }

    /// Query-string key, the inverse of `FromStr` for non-custom ranges
    pub fn key(&self) -> String {
        match self {
            DateRange::Custom { start, end } => format!("custom:{},{}", start, end),
            other => serde_json::to_value(other)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
        }
    }
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

fn last_of_month(date: NaiveDate) -> Option<NaiveDate> {
    first_of_month(date)
        .and_then(|d| d.checked_add_months(Months::new(1)))
        .and_then(|d| d.pred_opt())
}

impl std::str::FromStr for DateRange {
    type Err = String;

    /// Accepts keys (`last_30_days`), English labels and `custom:START,END`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(rest) = trimmed.strip_prefix("custom:") {
            let (start, end) = rest
                .split_once(',')
                .ok_or_else(|| format!("Invalid custom range: {}", s))?;
            let start = crate::models::parse_date(start)
                .ok_or_else(|| format!("Invalid custom start date: {}", start))?;
            let end = crate::models::parse_date(end)
                .ok_or_else(|| format!("Invalid custom end date: {}", end))?;
            if start > end {
                return Err(format!("Custom range starts after it ends: {}", s));
            }
            return Ok(DateRange::Custom { start, end });
        }

        let normalized = trimmed.to_lowercase().replace(' ', "_").replace('-', "_");

        match normalized.as_str() {
            "last_7_days" | "7d" => Ok(DateRange::Last7Days),
            "last_30_days" | "30d" => Ok(DateRange::Last30Days),
            "this_month" | "month" => Ok(DateRange::ThisMonth),
            "last_month" => Ok(DateRange::LastMonth),
            "last_3_months" | "quarter" => Ok(DateRange::Last3Months),
            "this_year" | "year" => Ok(DateRange::ThisYear),
            "next_30_days" => Ok(DateRange::Next30Days),
            "next_60_days" => Ok(DateRange::Next60Days),
            "next_90_days" => Ok(DateRange::Next90Days),
            "all" | "all_time" => Ok(DateRange::All),
            _ => Err(format!("Invalid date range: {}", s)),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
