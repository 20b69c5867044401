//! trading-peripheral - interactive editor and drift checker for the
//! trading-peripheral configuration document.
//!
//! The document is an INI-style file of sections and options whose values
//! may be scalars or structured literals (tuples, dictionaries, and action
//! scripts made of tuple lists). The crate edits it through mnemonic menus,
//! persists every accepted change (through gpg when an encrypted sibling
//! exists), and reconciles it against the built-in defaults.
//!
//! # Modules
//!
//! - [`domain`] - Document, typed values, the value codec and edit schemas
//! - [`port`] - Console, keyring, pointer and store traits
//! - [`application`] - Mnemonic prompts, the node editor and the reconciler
//! - [`infrastructure`] - File store, gpg, backups, settings
//! - [`adapter`] - The command-line driver
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use trading_peripheral::domain::codec;
//! use trading_peripheral::domain::Value;
//!
//! let value = codec::decode("[('get', 'https://example.com'), ('refresh',)]").unwrap();
//! assert!(matches!(value, Value::TupleList(ref entries) if entries.len() == 2));
//! assert_eq!(codec::encode(&value), "[('get', 'https://example.com'), ('refresh',)]");
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
