//! Tool settings loading and validation.
//!
//! Provides the [`Settings`] struct that aggregates the tool's own
//! configuration (not the edited document). Settings are read from an
//! optional TOML file; a missing file means defaults.
//!
//! # Example
//!
//! ```no_run
//! use trading_peripheral::infrastructure::config::settings::Settings;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load_or_default("settings.toml")?;
//!     settings.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::reconcile::ReconcileOptions;
use crate::error::{ConfigError, Result};
use crate::infrastructure::backup::BackupPolicy;
use crate::infrastructure::store::DEFAULT_ENCRYPTED_EXTENSION;

/// Backup retention.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BackupConfig {
    /// Newest backups kept per document.
    pub number_of_backups: usize,
    /// Backup directory; `<document dir>/backups` when unset.
    pub directory: Option<PathBuf>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        let policy = BackupPolicy::default();
        Self {
            number_of_backups: policy.number_of_backups,
            directory: policy.directory,
        }
    }
}

impl BackupConfig {
    #[must_use]
    pub fn policy(&self) -> BackupPolicy {
        BackupPolicy {
            number_of_backups: self.number_of_backups,
            directory: self.directory.clone(),
        }
    }
}

/// Key store program and the encrypted sibling's extension.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EncryptionConfig {
    pub program: String,
    pub extension: String,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            program: "gpg".into(),
            extension: DEFAULT_ENCRYPTED_EXTENSION.into(),
        }
    }
}

/// Sections the `check` walk skips or treats specially.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReconcileConfig {
    pub excluded_sections: Vec<String>,
    pub user_option_ignored_sections: Vec<String>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            excluded_sections: vec!["Variables".into()],
            user_option_ignored_sections: vec!["Actions".into()],
        }
    }
}

impl ReconcileConfig {
    #[must_use]
    pub fn options(&self) -> ReconcileOptions {
        ReconcileOptions::new(
            self.excluded_sections.iter().cloned(),
            self.user_option_ignored_sections.iter().cloned(),
        )
    }
}

/// Tool settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub backup: BackupConfig,

    #[serde(default)]
    pub encryption: EncryptionConfig,

    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

impl Settings {
    /// Parse settings from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load settings, falling back to defaults when the file is missing.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.backup.number_of_backups == 0 {
            return Err(ConfigError::InvalidValue {
                field: "number_of_backups",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.encryption.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "program",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        let extension = &self.encryption.extension;
        if extension.is_empty() || extension.starts_with('.') || extension.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "extension",
                reason: "must be a bare extension such as \"gpg\"".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self, verbosity: u8) {
        self.logging.init(verbosity);
    }
}
