//! Path utilities for trading-peripheral.
//!
//! Per-user data lives under the platform's local data directory:
//! - `<data-local>/trading-peripheral/trading_peripheral.ini` - the document
//! - `<data-local>/trading-peripheral/settings.toml` - tool settings
//! - `<data-local>/trading-peripheral/backups/` - timestamped backups

use std::path::PathBuf;

/// Returns the trading-peripheral data directory.
pub fn home_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trading-peripheral")
}

/// Returns the default document path.
pub fn default_document() -> PathBuf {
    home_dir().join("trading_peripheral.ini")
}

/// Returns the default settings path.
pub fn default_settings() -> PathBuf {
    home_dir().join("settings.toml")
}

/// Browser profile root used by the default `user_data_dir`.
pub fn browser_user_data() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Google")
        .join("Chrome")
        .join("User Data")
}

/// Download directory used by the default `csv_directory`.
pub fn downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}
