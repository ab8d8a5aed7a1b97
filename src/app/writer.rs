use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Overwrites `path` with the rendered Makefile.
pub fn write_recipe(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
    log::info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
