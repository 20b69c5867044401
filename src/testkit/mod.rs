//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`console`] - `ScriptedConsole`, a [`Console`](crate::port::Console)
//!   that replays canned answers and records every prompt and line.
//! - [`keyring`] - `MemoryKeyring`, a reversible in-memory stand-in for gpg.
//! - [`pointer`] - `FakePointer`, which returns queued click positions.
//! - [`store`] - `MemoryStore`, a [`DocumentStore`](crate::port::DocumentStore)
//!   that keeps the last saved document.

pub mod console;
pub mod keyring;
pub mod pointer;
pub mod store;
