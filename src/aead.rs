//! AES-256-GCM with a detached tag
//!
//! No associated data is bound. Ciphertext has the same length as the
//! plaintext; the 16-byte tag travels separately so the blob layer can place
//! it after the ciphertext.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce, Tag};

use crate::blob::{NONCE_LEN, TAG_LEN};
use crate::error::{Result, TextsealError};
use crate::kdf::KEY_LEN;

/// Encrypt `plaintext`, returning the ciphertext and its tag.
pub fn seal(
    plaintext: &[u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<(Vec<u8>, [u8; TAG_LEN])> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
        .map_err(|_| TextsealError::backend_failure("AES-GCM encryption failed"))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);
    Ok((buffer, tag_bytes))
}

/// Verify `tag` and decrypt `ciphertext`.
///
/// Every verification failure maps to the same
/// [`ErrorKind::AuthenticationFailure`](crate::error::ErrorKind::AuthenticationFailure).
/// No plaintext is returned unless the tag verified.
pub fn open(
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut buffer,
            Tag::from_slice(tag),
        )
        .map_err(|_| TextsealError::authentication_failure())?;

    Ok(buffer)
}
