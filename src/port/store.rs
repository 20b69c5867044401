//! Store port for document persistence.
//!
//! The editor and the reconciler persist after every accepted mutation,
//! so a store is called once per change rather than once per session.

use crate::domain::Document;
use crate::error::Result;

/// Load and save one configuration document.
///
/// # Implementation Notes
///
/// - `load` of a document that does not exist yet returns an empty
///   [`Document`], not an error
/// - `save` overwrites the whole artifact; there is no partial write
pub trait DocumentStore {
    /// Read the document.
    fn load(&self) -> Result<Document>;

    /// Replace the persisted document with `document`.
    fn save(&self, document: &Document) -> Result<()>;
}
