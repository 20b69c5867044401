//! File-backed document store.
//!
//! A document lives at a plain-text path. When an encrypted sibling
//! (`<path>.<extension>`, `.gpg` by default) exists, both load and save go
//! through the [`Keyring`] instead and the plain path is left alone.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::Document;
use crate::error::{DocumentError, Result};
use crate::port::{DocumentStore, Keyring};

/// Section and option naming the preferred encryption recipient.
pub const FINGERPRINT_SECTION: &str = "General";
pub const FINGERPRINT_OPTION: &str = "fingerprint";

/// Default extension of the encrypted sibling.
pub const DEFAULT_ENCRYPTED_EXTENSION: &str = "gpg";

/// Document store over a path on disk.
pub struct FileStore {
    path: PathBuf,
    keyring: Arc<dyn Keyring>,
    extension: String,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, keyring: Arc<dyn Keyring>) -> Self {
        Self {
            path: path.into(),
            keyring,
            extension: DEFAULT_ENCRYPTED_EXTENSION.to_string(),
        }
    }

    /// Use a different extension for the encrypted sibling.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Plain-text path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the encrypted sibling, whether or not it exists.
    #[must_use]
    pub fn encrypted_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(&self.extension);
        PathBuf::from(name)
    }

    /// Whether load and save go through the keyring.
    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        self.encrypted_path().exists()
    }

    /// Raw document text, decrypted when needed. `None` when nothing has
    /// been saved yet.
    pub fn read_text(&self) -> Result<Option<String>> {
        let encrypted = self.encrypted_path();
        if encrypted.exists() {
            let ciphertext = fs::read(&encrypted)?;
            debug!(path = %encrypted.display(), "decrypting document");
            return self.keyring.decrypt(&ciphertext).map(Some);
        }

        match fs::read(&self.path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| DocumentError::Encoding.into()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn recipient(&self, document: &Document) -> Result<String> {
        match document
            .get(FINGERPRINT_SECTION, FINGERPRINT_OPTION)
            .filter(|fingerprint| !fingerprint.is_empty())
        {
            Some(fingerprint) => Ok(fingerprint.to_string()),
            None => self.keyring.default_recipient(),
        }
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<Document> {
        match self.read_text()? {
            Some(text) => Ok(text.parse()?),
            None => {
                debug!(path = %self.path.display(), "no document yet");
                Ok(Document::new())
            }
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        let encrypted = self.encrypted_path();
        if encrypted.exists() {
            let recipient = self.recipient(document)?;
            let ciphertext = self.keyring.encrypt(&document.to_string(), &recipient)?;
            write_replacing(&encrypted, &ciphertext)?;
            info!(path = %encrypted.display(), "encrypted document saved");
        } else {
            write_replacing(&self.path, document.to_string().as_bytes())?;
            info!(path = %self.path.display(), "document saved");
        }
        Ok(())
    }
}

/// Write to a temporary sibling, then rename it over `path`.
fn write_replacing(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut temporary = path.as_os_str().to_owned();
    temporary.push(".tmp");
    let temporary = PathBuf::from(temporary);
    fs::write(&temporary, contents)?;
    fs::rename(&temporary, path)?;
    Ok(())
}
