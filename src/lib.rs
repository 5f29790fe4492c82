//! textseal - Password-based text encryption using PBKDF2 and AES-256-GCM
//!
//! [`encrypt`] turns a plaintext and a password into a base64 string of
//! `salt(16) || nonce(12) || ciphertext(N) || tag(16)`; [`decrypt`] reverses
//! it. Both are synchronous and CPU-bound: key derivation runs 100,000
//! PBKDF2 rounds per call, so interactive callers should run them off the
//! thread that serves the user.

#![forbid(unsafe_code)]

pub mod aead;
pub mod armor;
pub mod blob;
pub mod error;
pub mod file_ops;
pub mod kdf;
pub mod passphrase;
pub mod secretcrypt;

use zeroize::Zeroize;

use crate::error::{ErrorCategory, ErrorKind, Result, TextsealError};

pub use crate::error::TextsealError as Error;

/// Encrypt `plaintext` under `password`, returning the armored blob.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    let blob = secretcrypt::encrypt(password.as_bytes(), plaintext.as_bytes())?;
    Ok(armor::wrap(&blob))
}

/// Decrypt an armored blob produced by [`encrypt`].
pub fn decrypt(armored: &str, password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(TextsealError::invalid_input("password must not be empty"));
    }
    let blob = armor::unwrap(armored)?;
    let plaintext = secretcrypt::decrypt(password.as_bytes(), &blob)?;
    String::from_utf8(plaintext).map_err(|e| {
        let utf8_error = e.utf8_error();
        e.into_bytes().zeroize();
        TextsealError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::EncodingFailure,
            "decrypted data is not valid UTF-8",
            utf8_error,
        )
    })
}
