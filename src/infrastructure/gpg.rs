//! Keyring adapter that shells out to GnuPG.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::{Error, Result};
use crate::port::Keyring;

/// [`Keyring`] backed by the `gpg` command-line program.
#[derive(Debug, Clone)]
pub struct GpgKeyring {
    program: String,
}

impl GpgKeyring {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the program with `args`, feeding `input` on stdin.
    fn run(&self, args: &[&str], input: &[u8]) -> Result<Vec<u8>> {
        debug!(program = %self.program, ?args, "invoking key store");
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::DecryptionUnavailable {
                    program: self.program.clone(),
                },
                _ => Error::Io(e),
            })?;

        // Feed stdin from a separate thread so a large output cannot
        // deadlock against a full input pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = input.to_vec();
            thread::spawn(move || stdin.write_all(&input))
        });
        let output = child.wait_with_output()?;
        let written = match writer {
            Some(writer) => writer
                .join()
                .map_err(|_| Error::Encryption("stdin writer panicked".into()))?,
            None => Ok(()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Encryption(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        written?;
        Ok(output.stdout)
    }
}

impl Default for GpgKeyring {
    fn default() -> Self {
        Self::new("gpg")
    }
}

impl Keyring for GpgKeyring {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<String> {
        let plain = self.run(&["--batch", "--quiet", "--decrypt"], ciphertext)?;
        String::from_utf8(plain).map_err(|e| Error::Encryption(e.to_string()))
    }

    fn encrypt(&self, plaintext: &str, recipient: &str) -> Result<Vec<u8>> {
        self.run(
            &[
                "--batch",
                "--yes",
                "--quiet",
                "--trust-model",
                "always",
                "--encrypt",
                "--recipient",
                recipient,
            ],
            plaintext.as_bytes(),
        )
    }

    fn default_recipient(&self) -> Result<String> {
        let listing = self.run(&["--batch", "--list-keys", "--with-colons"], &[])?;
        first_fingerprint(&String::from_utf8_lossy(&listing))
            .ok_or_else(|| Error::Encryption("no public keys in the key store".into()))
    }
}

/// First primary-key fingerprint in `--with-colons` output.
///
/// A `fpr` record's tenth field holds the fingerprint; only the first
/// `fpr` after each `pub` record belongs to a primary key.
fn first_fingerprint(listing: &str) -> Option<String> {
    let mut after_pub = false;
    for line in listing.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        match fields.first() {
            Some(&"pub") => after_pub = true,
            Some(&"fpr") if after_pub => {
                return fields
                    .get(9)
                    .filter(|fpr| !fpr.is_empty())
                    .map(|fpr| (*fpr).to_string());
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
tru::1:1700000000:0:3:1:5
pub:u:255:22:AAAABBBBCCCCDDDD:1700000000:::u:::scESC:::::ed25519:::0:
fpr:::::::::0123456789ABCDEF0123456789ABCDEF01234567:
uid:u::::1700000000::HASH::Someone <someone@example.com>::::::::::0:
sub:u:255:18:EEEEFFFF00001111:1700000000::::::e:::::cv25519::
fpr:::::::::FEDCBA9876543210FEDCBA9876543210FEDCBA98:
";

    #[test]
    fn parses_first_primary_fingerprint() {
        assert_eq!(
            first_fingerprint(LISTING).as_deref(),
            Some("0123456789ABCDEF0123456789ABCDEF01234567")
        );
        assert_eq!(first_fingerprint("tru::1\n"), None);
    }

    #[test]
    fn missing_program_is_decryption_unavailable() {
        let keyring = GpgKeyring::new("definitely-not-an-installed-gpg-binary");
        match keyring.decrypt(b"cipher") {
            Err(err @ Error::DecryptionUnavailable { .. }) => assert_eq!(err.exit_code(), 4),
            other => panic!("expected DecryptionUnavailable, got {other:?}"),
        }
    }
}
