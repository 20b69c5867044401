//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without
//! containing editing logic: persistence, encryption, backups and the
//! tool's own settings.
//!
//! # Submodules
//!
//! - [`backup`] - Timestamped backups with retention
//! - [`config`] - Settings loading, validation and logging setup
//! - [`gpg`] - Keyring adapter over the `gpg` program
//! - [`store`] - File-backed document store

pub mod backup;
pub mod config;
pub mod gpg;
pub mod store;
