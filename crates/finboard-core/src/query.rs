//! Record query engine: search, selection filters, date windows and sorting
//!
//! `query` is a pure function of the records, the filter state and the
//! reference date. It never fails and never mutates its input: malformed
//! dates are tolerated and sort below every valid date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{parse_date, PayableReceivable, Transaction};
use crate::time::DateRange;

/// Fields the query engine reads from a record
pub trait LedgerRecord {
    /// Date used for windows and sorting (YYYY-MM-DD)
    fn record_date(&self) -> &str;
    /// Free-text label searched by `search_text`
    fn description(&self) -> &str;
    /// Category name, searched and matched exactly
    fn category(&self) -> &str;
    /// Owning account, if the record kind has one
    fn account(&self) -> Option<&str> {
        None
    }

    fn record_date_naive(&self) -> Option<NaiveDate> {
        parse_date(self.record_date())
    }
}

impl LedgerRecord for Transaction {
    fn record_date(&self) -> &str {
        &self.date
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn account(&self) -> Option<&str> {
        Some(&self.account)
    }
}

impl LedgerRecord for PayableReceivable {
    fn record_date(&self) -> &str {
        &self.due_date
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Exact-match restriction on a text field, or no restriction at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Build a selection from user input.
    ///
    /// Empty input, the literal `all` and the configured sentinel label all
    /// mean no restriction.
    pub fn parse(input: &str, all_label: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") || trimmed == all_label {
            Selection::All
        } else {
            Selection::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }

    /// Records without the field only pass an unrestricted selection
    pub fn matches_opt(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Selection::All, _) => true,
            (Selection::Only(_), None) => false,
            (Selection::Only(_), Some(v)) => self.matches(v),
        }
    }

    /// Selected value, or the given sentinel label
    pub fn display<'a>(&'a self, all_label: &'a str) -> &'a str {
        match self {
            Selection::All => all_label,
            Selection::Only(value) => value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Sort order on the record date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// User-selected predicates for one view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub category: Selection,
    #[serde(default)]
    pub account: Selection,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub sort_direction: SortDirection,
    /// Range restored by `reset`
    #[serde(default)]
    pub default_range: DateRange,
    /// When false the date range is kept as state but never filters
    #[serde(default = "default_true")]
    pub apply_date_range: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_default_range(DateRange::Last30Days)
    }
}

/// Filter state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum FilterAction {
    SetSearch(String),
    SetCategory(Selection),
    SetAccount(Selection),
    SetDateRange(DateRange),
    SetSortDirection(SortDirection),
    ToggleSort,
    Reset,
}

impl FilterState {
    /// Unrestricted state whose date window starts at (and resets to) `range`
    pub fn with_default_range(range: DateRange) -> Self {
        Self {
            search_text: String::new(),
            category: Selection::All,
            account: Selection::All,
            date_range: range,
            sort_direction: SortDirection::Descending,
            default_range: range,
            apply_date_range: true,
        }
    }

    /// Default state of the transactions view
    pub fn transactions() -> Self {
        Self::with_default_range(DateRange::Last30Days)
    }

    /// Default state of the payables and receivables view
    pub fn settlements() -> Self {
        Self::with_default_range(DateRange::Next30Days)
    }

    /// Keep the date range as display state only
    pub fn without_date_window(mut self) -> Self {
        self.apply_date_range = false;
        self
    }

    /// Clear every predicate, keeping the sort direction
    pub fn reset(&self) -> Self {
        Self {
            search_text: String::new(),
            category: Selection::All,
            account: Selection::All,
            date_range: self.default_range,
            sort_direction: self.sort_direction,
            default_range: self.default_range,
            apply_date_range: self.apply_date_range,
        }
    }

    /// Apply one transition and return the next state
    pub fn reduce(&self, action: FilterAction) -> Self {
        log::debug!("filter action: {:?}", action);
        let mut next = self.clone();
        match action {
            FilterAction::SetSearch(text) => next.search_text = text,
            FilterAction::SetCategory(selection) => next.category = selection,
            FilterAction::SetAccount(selection) => next.account = selection,
            FilterAction::SetDateRange(range) => next.date_range = range,
            FilterAction::SetSortDirection(direction) => next.sort_direction = direction,
            FilterAction::ToggleSort => next.sort_direction = self.sort_direction.toggled(),
            FilterAction::Reset => return self.reset(),
        }
        next
    }

    /// Whether any predicate restricts the result
    pub fn is_filtering(&self) -> bool {
        !self.search_text.is_empty()
            || !self.category.is_all()
            || !self.account.is_all()
            || (self.apply_date_range && self.date_range != DateRange::All)
    }

    /// Check every predicate against one record
    pub fn matches<R: LedgerRecord>(&self, record: &R, today: NaiveDate) -> bool {
        self.matches_search(record)
            && self.category.matches(record.category())
            && self.account.matches_opt(record.account())
            && self.matches_window(record, today)
    }

    fn matches_search<R: LedgerRecord>(&self, record: &R) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        record.description().to_lowercase().contains(&needle)
            || record.category().to_lowercase().contains(&needle)
    }

    fn matches_window<R: LedgerRecord>(&self, record: &R, today: NaiveDate) -> bool {
        if !self.apply_date_range {
            return true;
        }
        match record.record_date_naive() {
            Some(date) => self.date_range.contains(&date, today),
            // Records with malformed dates are never hidden by the window
            None => true,
        }
    }
}

/// Ordered visible subset of a record collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<R> {
    pub records: Vec<R>,
    /// Number of visible records
    pub count: usize,
    /// Size of the collection before filtering
    pub total: usize,
}

impl<R> QueryResult<R> {
    /// "Showing N of M <noun>"
    pub fn showing_label(&self, noun: &str) -> String {
        format!("Showing {} of {} {}", self.count, self.total, noun)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Filter then stable-sort `records` by date.
pub fn query<R: LedgerRecord + Clone>(
    records: &[R],
    state: &FilterState,
    today: NaiveDate,
) -> QueryResult<R> {
    let mut visible: Vec<R> = records
        .iter()
        .filter(|record| state.matches(*record, today))
        .cloned()
        .collect();

    sort_by_date(&mut visible, state.sort_direction);

    QueryResult {
        count: visible.len(),
        total: records.len(),
        records: visible,
    }
}

/// Stable sort on the parsed date; unparsable dates rank below all valid ones
pub fn sort_by_date<R: LedgerRecord>(records: &mut [R], direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = a.record_date_naive().cmp(&b.record_date_naive());
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
