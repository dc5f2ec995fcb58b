//! slice-backtester: sliced order execution backtester
//!
//! This library provides the core components for:
//! - Scheduling a parent order into slices over a price series
//! - TWAP, VWAP and iceberg child order sizing
//! - Randomized fill simulation with pluggable market and decision models
//! - P&L, win rate and equity curve segmentation
//! - An HTTP API and CLI over the simulator
//! - Synthetic OHLC data for demo runs

pub mod api;
pub mod backtest;
pub mod cli;
pub mod config;
pub mod data;
pub mod telemetry;
