pub mod export;
pub mod normalize;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use tt2cal_core::RawBatch;

/// Read a raw extraction batch from a JSON file.
pub fn load_batch(path: &Path) -> Result<RawBatch> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    RawBatch::from_json(&content)
        .with_context(|| format!("Could not parse raw batch in {}", path.display()))
}
