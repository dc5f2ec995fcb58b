//! JSON price series files

use super::PriceBar;
use std::fs;
use std::path::Path;

/// Load a price series from a JSON array of bars
pub fn load_bars(path: impl AsRef<Path>) -> anyhow::Result<Vec<PriceBar>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let bars: Vec<PriceBar> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), bars = bars.len(), "Loaded price series");
    Ok(bars)
}

/// Write a price series as a pretty-printed JSON array
pub fn save_bars(path: impl AsRef<Path>, bars: &[PriceBar]) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(bars)?)?;
    tracing::info!(path = %path.display(), bars = bars.len(), "Saved price series");
    Ok(())
}
