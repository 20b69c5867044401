//! Key-management port for encrypted documents.

use crate::error::Result;

/// Encrypts and decrypts document text.
///
/// Implementations report a missing backend as
/// [`Error::DecryptionUnavailable`](crate::error::Error::DecryptionUnavailable).
pub trait Keyring: Send + Sync {
    /// Decrypt an encrypted artifact into document text.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<String>;

    /// Encrypt document text for `recipient` (a key fingerprint).
    fn encrypt(&self, plaintext: &str, recipient: &str) -> Result<Vec<u8>>;

    /// Fingerprint of the first key in the key store.
    fn default_recipient(&self) -> Result<String>;
}
