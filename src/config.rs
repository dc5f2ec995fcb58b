//! Configuration types for slice-backtester

use crate::backtest::ExecutionStrategy;
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Backtest defaults, overridable per request
#[derive(Debug, Clone, Deserialize)]
pub struct BacktestSettings {
    /// Strategy used when a request names none
    #[serde(default)]
    pub strategy: ExecutionStrategy,

    /// Initial capital
    #[serde(default = "default_starting_capital")]
    pub starting_capital: Decimal,

    /// Percentage of capital risked per slice
    #[serde(default = "default_risk_per_trade")]
    pub risk_per_trade: Decimal,

    /// Number of slices per run
    #[serde(default = "default_slice_count")]
    pub slice_count: usize,

    /// Requests asking for more slices are rejected
    #[serde(default = "default_max_slice_count")]
    pub max_slice_count: usize,

    /// Maximum child order quantity
    #[serde(default = "default_max_child_size")]
    pub max_child_size: Decimal,

    /// Scale factor on the risk quantity
    #[serde(default = "default_qty_multiplier")]
    pub qty_multiplier: Decimal,

    /// Half-width of the execution price shock (0.15 = ±15%)
    #[serde(default = "default_volatility")]
    pub volatility: Decimal,

    /// Clip child orders to `max_child_size` after the strategy transform
    #[serde(default = "default_true")]
    pub reclip: bool,

    /// Fixed RNG seed; a fresh seed is drawn per run when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_starting_capital() -> Decimal {
    Decimal::new(10000, 0)
}
fn default_risk_per_trade() -> Decimal {
    Decimal::new(2, 0) // 2%
}
fn default_slice_count() -> usize {
    20
}
fn default_max_slice_count() -> usize {
    100_000
}
fn default_max_child_size() -> Decimal {
    Decimal::new(5000, 0)
}
fn default_qty_multiplier() -> Decimal {
    Decimal::new(20, 0)
}
fn default_volatility() -> Decimal {
    Decimal::new(15, 2) // 0.15
}
fn default_true() -> bool {
    true
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::default(),
            starting_capital: Decimal::new(10000, 0),
            risk_per_trade: Decimal::new(2, 0),
            slice_count: 20,
            max_slice_count: 100_000,
            max_child_size: Decimal::new(5000, 0),
            qty_multiplier: Decimal::new(20, 0),
            volatility: Decimal::new(15, 2),
            reclip: true,
            seed: None,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; metrics are not exported when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
