mod config;
pub mod store;

pub use config::{Config, ReminderSection, SchedulerSection};
pub use store::ContactStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `KEEPINTOUCH_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/keepintouch[-dev]/`, with the `-dev` suffix when
/// `KEEPINTOUCH_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("KEEPINTOUCH_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("KEEPINTOUCH_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("keepintouch-dev")
            } else {
                base_dir.join("keepintouch")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
