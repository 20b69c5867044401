//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where the editor meets the outside world: the
//! console it prompts on, the key store that encrypts documents, and the
//! pointer device used to capture screen coordinates.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Console │            │   Keyring   │              │  Pointer  │
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`Console`] - Line-oriented prompt input and output
//! - [`Keyring`] - Encryption and decryption of stored documents
//! - [`Pointer`] - Blocking capture of a pointer click position
//! - [`DocumentStore`] - Loading and saving the configuration document

mod console;
mod keyring;
mod pointer;
mod store;

pub use console::Console;
pub use keyring::Keyring;
pub use pointer::Pointer;
pub use store::DocumentStore;
