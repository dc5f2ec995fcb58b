//! Backtest command implementation

use crate::api::{BacktestRequest, BacktestResponse};
use crate::backtest::{BacktestSimulator, ExecutionStrategy};
use crate::config::BacktestSettings;
use crate::data::load_bars;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Result rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary table
    Table,
    /// Same body the API returns
    Json,
}

#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// JSON file holding an array of OHLC bars
    #[arg(long)]
    pub data: PathBuf,

    /// Slicing strategy (TWAP, VWAP, ICEBERG)
    #[arg(long)]
    pub strategy: Option<ExecutionStrategy>,

    /// Initial capital
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Percent of capital risked per slice
    #[arg(long)]
    pub risk: Option<Decimal>,

    /// Number of slices
    #[arg(long)]
    pub slices: Option<usize>,

    /// Maximum child order size
    #[arg(long)]
    pub max_child: Option<Decimal>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl BacktestArgs {
    /// Request equivalent of these arguments
    pub fn to_request(&self) -> anyhow::Result<BacktestRequest> {
        let bars = load_bars(&self.data)?;
        Ok(BacktestRequest {
            data: Some(bars),
            strategy: self.strategy.clone(),
            starting_capital: self.capital,
            risk_per_trade: self.risk,
            slice_count: self.slices,
            max_child_size: self.max_child,
            seed: self.seed,
        })
    }

    pub async fn execute(&self, settings: &BacktestSettings) -> anyhow::Result<()> {
        tracing::info!("Running backtest on {:?}...", self.data);

        let request = self.to_request()?;
        let config = request.to_config(settings);
        let seed = request.seed.or(settings.seed).unwrap_or_else(rand::random);

        let result = BacktestSimulator::new(config).run_seeded(request.bars(), seed)?;

        match self.format {
            OutputFormat::Table => {
                print!("{}", result.summary.format_table());
                println!("Seed: {}", seed);
            }
            OutputFormat::Json => {
                let response = BacktestResponse::from(result);
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
        }

        Ok(())
    }
}
