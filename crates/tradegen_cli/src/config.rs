//! Run configuration management.
//!
//! Handles loading of run configuration from TOML files with environment
//! variable override support.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tradegen_core::catalog::DEFAULT_SCENARIO;
use tradegen_core::{CatalogError, PriceTable, Scenario, ScenarioCatalog, SymbolTable};
use tradegen_report::ReportFormat;

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "tradegen.toml";

/// Largest record count a single run may request
pub const MAX_RECORDS: usize = 1_000_000;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Per-run settings (`[run]` table)
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Scenario to generate
    #[serde(default = "default_scenario")]
    pub scenario: String,

    /// Number of records requested
    #[serde(default = "default_num_records")]
    pub num_records: usize,

    /// Trade values strictly above this are flagged
    #[serde(default = "default_threshold")]
    pub large_trade_threshold: f64,

    /// Report destination
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Report format (`xlsx` or `csv`)
    #[serde(default = "default_format")]
    pub format: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Generate across the rayon pool
    #[serde(default)]
    pub parallel: bool,

    /// Seed for reproducible runs
    pub seed: Option<u64>,
}

fn default_scenario() -> String {
    DEFAULT_SCENARIO.to_string()
}

fn default_num_records() -> usize {
    100
}

fn default_threshold() -> f64 {
    3_000_000.0
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.xlsx")
}

fn default_format() -> String {
    "xlsx".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scenario: default_scenario(),
            num_records: default_num_records(),
            large_trade_threshold: default_threshold(),
            output_path: default_output_path(),
            format: default_format(),
            log_level: default_log_level(),
            parallel: false,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Threshold as an exact decimal
    pub fn threshold(&self) -> Result<Decimal, ConfigError> {
        Decimal::from_f64(self.large_trade_threshold)
            .filter(|t| t.is_sign_positive() && !t.is_zero())
            .ok_or_else(|| {
                ConfigError::Validation(vec![format!(
                    "large_trade_threshold {} is not a positive amount",
                    self.large_trade_threshold
                )])
            })
    }

    /// Parsed report format
    pub fn report_format(&self) -> Result<ReportFormat, ConfigError> {
        self.format
            .parse()
            .map_err(|e: String| ConfigError::Validation(vec![e]))
    }
}

/// A ticker and its base price (`[[tickers]]` entry)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TickerConfig {
    /// Ticker symbol
    pub symbol: String,
    /// Mean of the price sampler
    pub base_price: f64,
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Run settings
    #[serde(default)]
    pub run: RunConfig,

    /// Ticker universe; empty means the built-in universe
    #[serde(default)]
    pub tickers: Vec<TickerConfig>,

    /// Extra scenarios, replacing built-ins of the same name
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults if the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(scenario) = std::env::var("TRADEGEN_SCENARIO") {
            self.run.scenario = scenario;
        }

        if let Ok(num_records) = std::env::var("TRADEGEN_NUM_RECORDS") {
            match num_records.parse() {
                Ok(n) => self.run.num_records = n,
                Err(_) => tracing::warn!(value = %num_records, "Ignoring invalid TRADEGEN_NUM_RECORDS"),
            }
        }

        if let Ok(threshold) = std::env::var("TRADEGEN_THRESHOLD") {
            match threshold.parse() {
                Ok(t) => self.run.large_trade_threshold = t,
                Err(_) => tracing::warn!(value = %threshold, "Ignoring invalid TRADEGEN_THRESHOLD"),
            }
        }

        if let Ok(output) = std::env::var("TRADEGEN_OUTPUT") {
            self.run.output_path = PathBuf::from(output);
        }

        if let Ok(format) = std::env::var("TRADEGEN_FORMAT") {
            self.run.format = format;
        }

        if let Ok(log_level) = std::env::var("TRADEGEN_LOG_LEVEL") {
            self.run.log_level = log_level;
        }

        if let Ok(seed) = std::env::var("TRADEGEN_SEED") {
            match seed.parse() {
                Ok(s) => self.run.seed = Some(s),
                Err(_) => tracing::warn!(value = %seed, "Ignoring invalid TRADEGEN_SEED"),
            }
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let run = &self.run;

        if run.scenario.trim().is_empty() {
            errors.push("scenario cannot be empty".to_string());
        }

        if run.num_records == 0 {
            errors.push("num_records must be greater than 0".to_string());
        }
        if run.num_records > MAX_RECORDS {
            errors.push(format!(
                "num_records {} exceeds maximum allowed (1,000,000)",
                run.num_records
            ));
        }

        if !run.large_trade_threshold.is_finite() || run.large_trade_threshold <= 0.0 {
            errors.push(format!(
                "large_trade_threshold must be a finite positive amount, got {}",
                run.large_trade_threshold
            ));
        }

        if run.output_path.as_os_str().is_empty() {
            errors.push("output_path cannot be empty".to_string());
        }

        if let Err(e) = run.format.parse::<ReportFormat>() {
            errors.push(e);
        }

        if !VALID_LOG_LEVELS.contains(&run.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                run.log_level, VALID_LOG_LEVELS
            ));
        }

        for (i, ticker) in self.tickers.iter().enumerate() {
            if ticker.symbol.trim().is_empty() {
                errors.push(format!("tickers[{}] has an empty symbol", i));
            } else if self.tickers[..i].iter().any(|t| t.symbol == ticker.symbol) {
                errors.push(format!("ticker '{}' is listed more than once", ticker.symbol));
            }
            if !ticker.base_price.is_finite() {
                errors.push(format!(
                    "ticker '{}' has a non-finite base_price",
                    ticker.symbol
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Built-in scenarios plus the configured ones
    pub fn catalog(&self) -> Result<ScenarioCatalog, CatalogError> {
        let extra = ScenarioCatalog::from_scenarios(self.scenarios.clone())?;
        Ok(extra
            .iter()
            .cloned()
            .fold(ScenarioCatalog::builtin(), ScenarioCatalog::with_scenario))
    }

    /// Ticker symbols to draw from
    pub fn symbol_table(&self) -> SymbolTable {
        if self.tickers.is_empty() {
            SymbolTable::default()
        } else {
            SymbolTable::new(self.tickers.iter().map(|t| t.symbol.as_str()))
        }
    }

    /// Base prices for the ticker universe
    pub fn price_table(&self) -> PriceTable {
        if self.tickers.is_empty() {
            PriceTable::default()
        } else {
            self.tickers
                .iter()
                .map(|t| (t.symbol.clone(), t.base_price))
                .collect()
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}
