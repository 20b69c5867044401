//! In-memory key store.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::port::Keyring;

const MAGIC: &[u8] = b"MEMKEY:";

/// Reversible fake cipher: `MEMKEY:<recipient>\n` followed by the text
/// with every byte inverted.
#[derive(Debug)]
pub struct MemoryKeyring {
    fingerprint: String,
    encryptions: AtomicUsize,
}

impl MemoryKeyring {
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            encryptions: AtomicUsize::new(0),
        }
    }

    /// Number of successful `encrypt` calls.
    #[must_use]
    pub fn encryptions(&self) -> usize {
        self.encryptions.load(Ordering::SeqCst)
    }

    /// Recipient recorded in a ciphertext produced by this keyring.
    #[must_use]
    pub fn recipient_of(ciphertext: &[u8]) -> Option<String> {
        let body = ciphertext.strip_prefix(MAGIC)?;
        let end = body.iter().position(|b| *b == b'\n')?;
        String::from_utf8(body[..end].to_vec()).ok()
    }
}

impl Default for MemoryKeyring {
    fn default() -> Self {
        Self::new("0123456789ABCDEF0123456789ABCDEF01234567")
    }
}

impl Keyring for MemoryKeyring {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<String> {
        let body = ciphertext
            .strip_prefix(MAGIC)
            .ok_or_else(|| Error::Encryption("not a memory keyring artifact".into()))?;
        let start = body
            .iter()
            .position(|b| *b == b'\n')
            .ok_or_else(|| Error::Encryption("missing recipient".into()))?;
        let plain: Vec<u8> = body[start + 1..].iter().map(|b| !b).collect();
        String::from_utf8(plain).map_err(|e| Error::Encryption(e.to_string()))
    }

    fn encrypt(&self, plaintext: &str, recipient: &str) -> Result<Vec<u8>> {
        let mut out = MAGIC.to_vec();
        out.extend_from_slice(recipient.as_bytes());
        out.push(b'\n');
        out.extend(plaintext.bytes().map(|b| !b));
        self.encryptions.fetch_add(1, Ordering::SeqCst);
        Ok(out)
    }

    fn default_recipient(&self) -> Result<String> {
        Ok(self.fingerprint.clone())
    }
}
