//! Encryption/decryption using PBKDF2-HMAC-SHA256 + AES-256-GCM
//!
//! This module implements password-based encryption of arbitrary bytes:
//! - PBKDF2-HMAC-SHA256 (100,000 rounds) derives a fresh key per salt
//! - AES-256-GCM seals the plaintext with a detached 16-byte tag
//!
//! The binary format is described in [`crate::blob`]:
//! salt(16) || nonce(12) || ciphertext(N) || tag(16).

use rand::RngCore;
use rand::rngs::OsRng;
use tracing::debug;

use crate::aead;
use crate::blob::{self, NONCE_LEN, SALT_LEN};
use crate::error::{ErrorCategory, ErrorKind, Result, TextsealError};
use crate::kdf;

/// Fill an array from the operating system's CSPRNG.
fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    OsRng.try_fill_bytes(&mut buf).map_err(|e| {
        TextsealError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::BackendFailure,
            "failed to read from the OS random source",
            e,
        )
    })?;
    Ok(buf)
}

fn check_password(password: &[u8]) -> Result<()> {
    if password.is_empty() {
        return Err(TextsealError::invalid_input("password must not be empty"));
    }
    Ok(())
}

/// Encrypt plaintext with a password using random salt and nonce
///
/// Returns the binary format: salt(16) + nonce(12) + ciphertext(N) + tag(16)
pub fn encrypt(password: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_password(password)?;

    let salt = random_bytes::<SALT_LEN>()?;
    let nonce = random_bytes::<NONCE_LEN>()?;

    encrypt_deterministic(password, plaintext, &salt, &nonce)
}

/// Encrypt plaintext with a password using provided salt and nonce
///
/// This function is ONLY for testing purposes to generate deterministic output.
/// NEVER use this in production - always use `encrypt()` which generates random salt/nonce.
pub fn encrypt_deterministic(
    password: &[u8],
    plaintext: &[u8],
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>> {
    check_password(password)?;

    let key = kdf::derive_key(password, salt)?;
    let (ciphertext, tag) = aead::seal(plaintext, key.as_bytes(), nonce)?;
    let output = blob::pack(salt, nonce, &ciphertext, &tag);

    debug!(
        plaintext_len = plaintext.len(),
        blob_len = output.len(),
        "sealed"
    );
    Ok(output)
}

/// Decrypt a packed blob with a password
pub fn decrypt(password: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    check_password(password)?;

    let parts = blob::unpack(blob)?;
    let key = kdf::derive_key(password, parts.salt)?;
    let plaintext = aead::open(parts.ciphertext, parts.tag, key.as_bytes(), parts.nonce)
        .inspect_err(|_| debug!(blob_len = blob.len(), "authentication failed"))?;

    debug!(
        plaintext_len = plaintext.len(),
        blob_len = blob.len(),
        "opened"
    );
    Ok(plaintext)
}
