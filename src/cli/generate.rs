//! Generate command implementation

use crate::data::{save_bars, Asset, RandomWalkGenerator};
use chrono::NaiveDate;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Asset whose starting price seeds the walk
    #[arg(long, value_enum, default_value = "gold")]
    pub asset: Asset,

    /// First bar date (YYYY-MM-DD)
    #[arg(long, default_value = "2024-03-01")]
    pub from: NaiveDate,

    /// Last bar date, inclusive
    #[arg(long, default_value = "2024-03-31")]
    pub to: NaiveDate,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        if self.to < self.from {
            anyhow::bail!("--to ({}) is before --from ({})", self.to, self.from);
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let bars = RandomWalkGenerator::new(self.asset).generate(self.from, self.to, &mut rng);

        tracing::info!(
            asset = self.asset.symbol(),
            bars = bars.len(),
            seed,
            "Generated price series"
        );

        match &self.output {
            Some(path) => save_bars(path, &bars)?,
            None => println!("{}", serde_json::to_string_pretty(&bars)?),
        }

        Ok(())
    }
}
