//! Configuration management for finboard
//!
//! This module handles loading, validation, and management of
//! finboard configuration from YAML files.

pub mod error;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data source configuration
///
/// Both paths are optional; when absent the built-in sample data is served.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// JSON dataset with transactions, payables, receivables, notifications and accounts
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// JSON chart payload served by the financial-data endpoint
    #[serde(default)]
    pub financial_data_path: Option<PathBuf>,
}

/// Filter behaviour and all-sentinel labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Label shown for the "no category restriction" option
    #[serde(default = "default_all_categories_label")]
    pub all_categories_label: String,
    /// Label shown for the "no account restriction" option
    #[serde(default = "default_all_accounts_label")]
    pub all_accounts_label: String,
    /// When false the date range selector is kept as state only and never filters
    #[serde(default = "default_true")]
    pub apply_date_range: bool,
    /// Fixed "today" used for relative date windows
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            all_categories_label: default_all_categories_label(),
            all_accounts_label: default_all_accounts_label(),
            apply_date_range: true,
            reference_date: None,
        }
    }
}

fn default_all_categories_label() -> String {
    "All Categories".to_string()
}

fn default_all_accounts_label() -> String {
    "All Accounts".to_string()
}

fn default_true() -> bool {
    true
}

/// Simulated bank connector timings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Delay before a connection attempt succeeds
    #[serde(default = "default_handshake_delay")]
    pub handshake_delay_ms: u64,
    /// Delay between success and the account showing up in the list
    #[serde(default = "default_confirm_delay")]
    pub confirm_delay_ms: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            handshake_delay_ms: default_handshake_delay(),
            confirm_delay_ms: default_confirm_delay(),
        }
    }
}

fn default_handshake_delay() -> u64 {
    2000
}

fn default_confirm_delay() -> u64 {
    1500
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page for lists
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            records_per_page: default_records_per_page(),
        }
    }
}

fn default_records_per_page() -> usize {
    50
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO currency code
    #[serde(default = "default_currency")]
    pub code: String,
    /// Currency symbol
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

fn default_decimal_sep() -> String {
    ".".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Before,
    After,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data source settings
    #[serde(default)]
    pub data: DataConfig,
    /// Filter settings
    #[serde(default)]
    pub filters: FiltersConfig,
    /// Bank connector settings
    #[serde(default)]
    pub connector: ConnectorConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound { path }) => {
                log::warn!("Config file {} not found, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.pagination.records_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.records_per_page".to_string(),
                reason: "Page size must be greater than 0".to_string(),
            });
        }

        if self.filters.all_categories_label.trim().is_empty()
            || self.filters.all_accounts_label.trim().is_empty()
        {
            return Err(ConfigError::ValidationError {
                message: "All-sentinel labels must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// The date relative windows are anchored to
    pub fn today(&self) -> NaiveDate {
        self.filters
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.filters.all_categories_label, "All Categories");
        assert!(config.filters.apply_date_range);
        assert_eq!(config.connector.handshake_delay_ms, 2000);
        assert_eq!(config.currency.symbol_position, SymbolPosition::Before);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(
            config.filters.reference_date,
            NaiveDate::from_ymd_opt(2023, 6, 30)
        );
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml(
            "filters:\n  all_categories_label: Todas las Categorías\n  apply_date_range: false\n",
        )
        .unwrap();
        assert_eq!(config.filters.all_categories_label, "Todas las Categorías");
        assert_eq!(config.filters.all_accounts_label, "All Accounts");
        assert!(!config.filters.apply_date_range);
        assert_eq!(config.pagination.records_per_page, 50);
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_validate_rejects_empty_sentinel() {
        let err = Config::from_yaml("filters:\n  all_accounts_label: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_bad_reference_date_is_invalid_yaml() {
        let err = Config::from_yaml("filters:\n  reference_date: yesterday\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_today_uses_reference_date() {
        let mut config = Config::default();
        let fixed = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
        config.filters.reference_date = Some(fixed);
        assert_eq!(config.today(), fixed);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/finboard.yaml")).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
