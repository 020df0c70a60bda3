mod config;
mod ledger;

pub use config::Config;
pub use ledger::{TagLedger, TagRecord};

use std::path::PathBuf;

/// Returns `~/.config/tomata/`, creating it if needed.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tomata");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
