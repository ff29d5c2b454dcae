mod config;
pub mod database;

pub use config::{Config, DisplayConfig, FeedbackConfig, SavedPlan};
pub use database::{Database, StoredSession};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/apnea[-dev]/` based on APNEA_ENV.
///
/// Set APNEA_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("APNEA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("apnea-dev")
    } else {
        base_dir.join("apnea")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
