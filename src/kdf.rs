//! Password-based key derivation
//!
//! PBKDF2 with HMAC-SHA256 as the PRF, 100,000 rounds, 32-byte output.
//! All three parameters are part of the blob format: changing any of them
//! yields a different key for the same (password, salt), which surfaces as
//! an authentication failure on decrypt rather than a distinct error.
//!
//! Keys are re-derived for every operation and never cached.

use std::fmt;

use hmac::Hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::blob::SALT_LEN;
use crate::error::{Result, TextsealError};

/// Length of derived key in bytes
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// A 256-bit AES key derived from a password. Wiped on drop.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DerivedKey").field(&"[REDACTED]").finish()
    }
}

/// Derive a 32-byte key from a password and salt.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<DerivedKey> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    derive_into(password, salt, PBKDF2_ROUNDS, &mut key[..])?;
    Ok(DerivedKey(key))
}

fn derive_into(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) -> Result<()> {
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, rounds, out).map_err(|e| {
        TextsealError::backend_failure(format!("PBKDF2 key derivation failed: {}", e))
    })
}
