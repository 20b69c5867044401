use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use trading_peripheral::infrastructure::store::FileStore;
use trading_peripheral::testkit::keyring::MemoryKeyring;

/// Temporary directory holding one document and its settings file.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn document(&self) -> PathBuf {
        self.root().join("trading_peripheral.ini")
    }

    pub fn settings(&self) -> PathBuf {
        self.root().join("settings.toml")
    }

    pub fn backups(&self) -> PathBuf {
        self.root().join("backups")
    }

    pub fn write_document(&self, text: &str) {
        fs::write(self.document(), text).expect("write document");
    }

    pub fn write_settings(&self, text: &str) {
        fs::write(self.settings(), text).expect("write settings");
    }

    pub fn read_document(&self) -> String {
        fs::read_to_string(self.document()).expect("read document")
    }

    /// File store over the document, with an in-memory keyring.
    pub fn store(&self) -> (FileStore, Arc<MemoryKeyring>) {
        let keyring = Arc::new(MemoryKeyring::default());
        (FileStore::new(self.document(), keyring.clone()), keyring)
    }

    pub fn backup_count(&self) -> usize {
        fs::read_dir(self.backups()).map(|entries| entries.count()).unwrap_or(0)
    }
}
