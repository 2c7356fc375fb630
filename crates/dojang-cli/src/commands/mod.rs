//! Subcommand implementations and the plumbing they share

pub mod info;
pub mod stamp;
pub mod trademark;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use dojang_core::error::{DojangError, Result};
use dojang_fontdb::FontLibrary;

/// Discover fonts under `dir` and wait until they are ready
pub fn load_fonts(dir: &Path) -> Result<Arc<FontLibrary>> {
    log::debug!("loading fonts from {}", dir.display());
    let gate = FontLibrary::load_in_background(dir);
    let library = pollster::block_on(gate.wait())?;
    Ok(Arc::new(library))
}

/// Read a JSON config; missing fields keep their defaults
pub fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| {
        DojangError::InvalidConfiguration(format!("{}: {e}", path.display()))
    })
}

pub fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data)?;
    eprintln!("Wrote {} ({} bytes)", path.display(), data.len());
    Ok(())
}
