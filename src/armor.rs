//! Text armoring for sealed blobs
//!
//! A blob is armored as plain standard-alphabet base64 with padding, with
//! no prefix or version marker, so armored output is interchangeable with
//! any other base64 producer of the same bytes.

use crate::error::{ErrorCategory, ErrorKind, Result, TextsealError};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Wrap bytes in armor, returning the armored string
pub fn wrap(body: &[u8]) -> String {
    STANDARD.encode(body)
}

/// Unwrap an armored string, returning the original bytes
///
/// Leading and trailing ASCII whitespace is ignored; anything else that is
/// not canonical padded base64 is rejected.
pub fn unwrap(armored: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(armored.trim_ascii())
        .map_err(|e| {
            TextsealError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::MalformedInput,
                format!("base64 decoding failed: {}", e),
                e,
            )
        })
}
