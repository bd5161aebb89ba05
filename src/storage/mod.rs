//! Data persistence and file operations

pub mod records;
pub mod state_repo;

pub use records::*;
pub use state_repo::*;

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write-temp-then-rename so a crash mid-write never leaves a corrupt file.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
