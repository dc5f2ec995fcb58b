use clap::Parser;
use slice_backtester::cli::{Cli, Commands};
use slice_backtester::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let _telemetry = slice_backtester::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting API server");
            args.execute(&config).await?;
        }
        Commands::Backtest(args) => {
            tracing::info!("Starting backtest");
            args.execute(&config.backtest).await?;
        }
        Commands::Generate(args) => {
            args.execute().await?;
        }
        Commands::Config => {
            let b = &config.backtest;
            println!("Current configuration:");
            println!("  Server: {}", config.server.bind_addr());
            println!("  Strategy: {}", b.strategy);
            println!(
                "  Capital: {}, Risk: {}%, Slices: {}, MaxChild: {}",
                b.starting_capital, b.risk_per_trade, b.slice_count, b.max_child_size
            );
            println!(
                "  Multiplier: {}, Volatility: {}, Reclip: {}",
                b.qty_multiplier, b.volatility, b.reclip
            );
            match b.seed {
                Some(seed) => println!("  Seed: {}", seed),
                None => println!("  Seed: random"),
            }
            println!(
                "  Logging: {} ({:?})",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
