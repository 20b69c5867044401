//! Application services (use cases).
//!
//! These services drive the interactive flows over the domain types and
//! reach the outside world only through ports.
//!
//! - [`prompt`] - mnemonic menus and value prompts
//! - [`editor`] - the node editor for sections, options and nested values
//! - [`reconcile`] - the default-versus-user diff walk
//! - [`theme`] - styling threaded through every prompt

pub mod editor;
pub mod prompt;
pub mod reconcile;
pub mod theme;

pub use editor::{Editor, OptionOutcome};
pub use prompt::{Action, Prompter};
pub use reconcile::{ReconcileOptions, ReconcileReport, Reconciler};
pub use theme::Theme;
