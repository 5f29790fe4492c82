//! Binary layout of a sealed blob
//!
//! The layout is fixed-offset with no length fields or version marker:
//! - salt: 16 bytes
//! - nonce: 12 bytes
//! - ciphertext: N bytes (N = plaintext length)
//! - tag: 16 bytes
//!
//! Ciphertext length is whatever remains between the nonce and the trailing
//! tag, so any input of at least `MIN_BLOB_LEN` bytes unpacks.

use crate::error::{Result, TextsealError};

/// Length of the PBKDF2 salt in bytes
pub const SALT_LEN: usize = 16;

/// Length of the AES-GCM nonce in bytes
pub const NONCE_LEN: usize = 12;

/// Length of the AES-GCM authentication tag in bytes
pub const TAG_LEN: usize = 16;

/// Smallest valid blob: an empty plaintext.
pub const MIN_BLOB_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// Borrowed view of the four regions of a packed blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unpacked<'a> {
    pub salt: &'a [u8; SALT_LEN],
    pub nonce: &'a [u8; NONCE_LEN],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8; TAG_LEN],
}

/// Concatenate `salt || nonce || ciphertext || tag`.
pub fn pack(
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Vec<u8> {
    let mut output = Vec::with_capacity(MIN_BLOB_LEN + ciphertext.len());
    output.extend_from_slice(salt);
    output.extend_from_slice(nonce);
    output.extend_from_slice(ciphertext);
    output.extend_from_slice(tag);
    output
}

/// Split a packed blob at its fixed offsets.
pub fn unpack(blob: &[u8]) -> Result<Unpacked<'_>> {
    let too_short = || {
        TextsealError::malformed_input(format!(
            "input too short: {} bytes, need at least {}",
            blob.len(),
            MIN_BLOB_LEN
        ))
    };

    let (salt, rest) = blob.split_first_chunk::<SALT_LEN>().ok_or_else(too_short)?;
    let (nonce, rest) = rest.split_first_chunk::<NONCE_LEN>().ok_or_else(too_short)?;
    let (ciphertext, tag) = rest.split_last_chunk::<TAG_LEN>().ok_or_else(too_short)?;

    Ok(Unpacked {
        salt,
        nonce,
        ciphertext,
        tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_min_blob_len() {
        assert_eq!(MIN_BLOB_LEN, 44);
    }

    #[test]
    fn test_pack_layout() {
        let salt = [0x11u8; SALT_LEN];
        let nonce = [0x22u8; NONCE_LEN];
        let tag = [0x44u8; TAG_LEN];

        let blob = pack(&salt, &nonce, b"\x33\x33\x33", &tag);

        assert_eq!(blob.len(), MIN_BLOB_LEN + 3);
        assert_eq!(&blob[0..16], &salt);
        assert_eq!(&blob[16..28], &nonce);
        assert_eq!(&blob[28..31], b"\x33\x33\x33");
        assert_eq!(&blob[31..], &tag);
    }

    #[test]
    fn test_unpack_offsets() {
        let blob: Vec<u8> = (0..50).collect();

        let parts = unpack(&blob).unwrap();

        assert_eq!(parts.salt[..], blob[0..16]);
        assert_eq!(parts.nonce[..], blob[16..28]);
        assert_eq!(parts.ciphertext, &blob[28..34]);
        assert_eq!(parts.tag[..], blob[34..50]);
    }

    #[test]
    fn test_unpack_empty_ciphertext() {
        let blob = vec![7u8; MIN_BLOB_LEN];

        let parts = unpack(&blob).unwrap();

        assert!(parts.ciphertext.is_empty());
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let salt = [1u8; SALT_LEN];
        let nonce = [2u8; NONCE_LEN];
        let tag = [4u8; TAG_LEN];
        let blob = pack(&salt, &nonce, b"payload", &tag);

        let parts = unpack(&blob).unwrap();

        assert_eq!(parts.salt, &salt);
        assert_eq!(parts.nonce, &nonce);
        assert_eq!(parts.ciphertext, b"payload");
        assert_eq!(parts.tag, &tag);
    }

    #[test]
    fn test_unpack_too_short() {
        for len in [0, 1, 16, 28, 40, MIN_BLOB_LEN - 1] {
            let blob = vec![0u8; len];
            let err = unpack(&blob).expect_err("expected short input to be rejected");
            assert_eq!(err.kind, Some(ErrorKind::MalformedInput), "len {}", len);
            // Same error whichever region ran out first
            assert_eq!(
                err.to_string(),
                format!("input too short: {} bytes, need at least 44", len)
            );
        }
    }
}
