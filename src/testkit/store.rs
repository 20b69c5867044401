//! In-memory document store.

use std::cell::{Cell, RefCell};

use crate::domain::Document;
use crate::error::Result;
use crate::port::DocumentStore;

/// Keeps the last saved document and counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Document>,
    saves: Cell<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            saved: RefCell::new(document),
            saves: Cell::new(0),
        }
    }

    /// The document as last persisted.
    #[must_use]
    pub fn saved(&self) -> Document {
        self.saved.borrow().clone()
    }

    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Document> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, document: &Document) -> Result<()> {
        *self.saved.borrow_mut() = document.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
