//! CLI interface for slice-backtester
//!
//! Provides subcommands for:
//! - `serve`: Run the HTTP API
//! - `backtest`: Run one backtest from a JSON price file
//! - `generate`: Write a synthetic OHLC series
//! - `config`: Show configuration

mod backtest;
mod generate;
mod serve;

pub use backtest::{BacktestArgs, OutputFormat};
pub use generate::GenerateArgs;
pub use serve::ServeArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slice-backtester")]
#[command(about = "Sliced order execution backtester")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Run a backtest on a JSON price series
    Backtest(BacktestArgs),
    /// Generate a random-walk OHLC series
    Generate(GenerateArgs),
    /// Show configuration
    Config,
}
