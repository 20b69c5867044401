//! Implementations of ports (hexagonal adapters).
//!
//! Only inbound adapters live here: the CLI that drives the application
//! services. Outbound adapters (file store, gpg, backups) sit in
//! [`crate::infrastructure`].

pub mod inbound;
