mod blob;
mod config;
pub mod database;

pub use blob::{BlobStore, MemoryBlobStore};
pub use config::{
    BodyScanConfig, BreathingConfig, Config, ErpConfig, MoodConfig, NotificationsConfig,
    TimerConfig,
};
pub use database::Database;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the directory holding `ocdian.db` and `config.toml`.
///
/// `OCDIAN_DATA_DIR` wins when set. Otherwise `~/.config/ocdian[-dev]/`
/// based on `OCDIAN_ENV` (set `OCDIAN_ENV=dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("OCDIAN_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("OCDIAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("ocdian-dev")
            } else {
                base_dir.join("ocdian")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
