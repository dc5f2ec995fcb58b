//! Price series module
//!
//! Input bar types, JSON files, and a synthetic random walk for demos

mod generator;
mod store;
mod types;

pub use generator::{Asset, RandomWalkGenerator};
pub use store::{load_bars, save_bars};
pub use types::{BarTime, PriceBar};
