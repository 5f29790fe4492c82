//! Password reading functionality
//!
//! Every reader hands out the password wrapped in `Zeroizing`, so the
//! caller's copy is wiped as soon as it goes out of scope, whether the
//! operation that used it succeeded or not.

use crate::error::{ErrorCategory, ErrorKind, Result, TextsealError};
use std::io::{self, IsTerminal, Read, Write};
use zeroize::{Zeroize, Zeroizing};

/// Trait for reading passwords from various sources
pub trait PassphraseReader {
    /// Read a password as UTF-8 text.
    fn read_passphrase(&mut self) -> Result<Zeroizing<String>>;
}

/// Returns a fixed password (for testing)
pub struct ConstantPassphraseReader {
    passphrase: Zeroizing<String>,
}

impl ConstantPassphraseReader {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: Zeroizing::new(passphrase.into()),
        }
    }
}

impl PassphraseReader for ConstantPassphraseReader {
    fn read_passphrase(&mut self) -> Result<Zeroizing<String>> {
        Ok(self.passphrase.clone())
    }
}

/// Reads the password from any io::Read source
///
/// The whole stream is read and one trailing `\n` or `\r\n` is stripped, so
/// `echo secret | textseal --passphrase-stdin ...` uses `secret`.
pub struct ReaderPassphraseReader {
    reader: Box<dyn Read>,
}

impl ReaderPassphraseReader {
    pub fn new(reader: Box<dyn Read>) -> Self {
        Self { reader }
    }
}

impl PassphraseReader for ReaderPassphraseReader {
    fn read_passphrase(&mut self) -> Result<Zeroizing<String>> {
        let mut data = Zeroizing::new(Vec::new());
        self.reader.read_to_end(&mut data).map_err(|e| {
            TextsealError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("error reading password: {}", e),
                e,
            )
        })?;

        let mut passphrase = match String::from_utf8(std::mem::take(&mut *data)) {
            Ok(s) => Zeroizing::new(s),
            Err(e) => {
                e.into_bytes().zeroize();
                return Err(TextsealError::with_kind(
                    ErrorCategory::User,
                    ErrorKind::PassphraseUnavailable,
                    "password is not valid UTF-8",
                ));
            }
        };

        if passphrase.ends_with('\n') {
            passphrase.pop();
            if passphrase.ends_with('\r') {
                passphrase.pop();
            }
        }
        Ok(passphrase)
    }
}

/// Reads the password from the terminal with no echo
pub struct TerminalPassphraseReader;

impl TerminalPassphraseReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPassphraseReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PassphraseReader for TerminalPassphraseReader {
    fn read_passphrase(&mut self) -> Result<Zeroizing<String>> {
        if !io::stdin().is_terminal() {
            return Err(TextsealError::with_kind(
                ErrorCategory::User,
                ErrorKind::PassphraseUnavailable,
                "cannot read password from terminal - stdin is not a terminal",
            ));
        }

        io::stderr().write_all(b"Password (textseal): ").map_err(|e| {
            TextsealError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write prompt: {}", e),
                e,
            )
        })?;
        io::stderr().flush().map_err(|e| {
            TextsealError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to flush prompt: {}", e),
                e,
            )
        })?;

        // Read password *without echo*
        let passphrase = rpassword_read()?;
        Ok(Zeroizing::new(passphrase))
    }
}

#[cfg(feature = "cli")]
fn rpassword_read() -> Result<String> {
    rpassword::read_password().map_err(|e| {
        TextsealError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::PassphraseUnavailable,
            format!("failure reading password: {}", e),
            e,
        )
    })
}

#[cfg(not(feature = "cli"))]
fn rpassword_read() -> Result<String> {
    Err(TextsealError::with_kind(
        ErrorCategory::User,
        ErrorKind::PassphraseUnavailable,
        "terminal password entry requires the `cli` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_reader() {
        let mut reader = ConstantPassphraseReader::new("test123");
        assert_eq!(reader.read_passphrase().unwrap().as_str(), "test123");
        assert_eq!(reader.read_passphrase().unwrap().as_str(), "test123");
    }

    /// Tests the terminal reader. This is ignored by default and must be run
    /// explicitly and with human input:
    ///
    /// cargo test test_terminal_reader_interactive -- --ignored --nocapture
    #[test]
    #[ignore]
    fn test_terminal_reader_interactive() {
        let mut reader = TerminalPassphraseReader::new();
        println!("\nPlease enter a test password:");
        let passphrase = reader.read_passphrase().unwrap();
        assert!(!passphrase.is_empty(), "Expected non-empty password");
    }

    #[test]
    fn test_reader_passphrase_reader() {
        let mut reader = ReaderPassphraseReader::new(Box::new(&b"mypassword"[..]));
        assert_eq!(reader.read_passphrase().unwrap().as_str(), "mypassword");
    }

    #[test]
    fn test_reader_strips_one_trailing_newline() {
        let mut reader = ReaderPassphraseReader::new(Box::new(&b"mypassword\n"[..]));
        assert_eq!(reader.read_passphrase().unwrap().as_str(), "mypassword");

        let mut reader = ReaderPassphraseReader::new(Box::new(&b"mypassword\r\n"[..]));
        assert_eq!(reader.read_passphrase().unwrap().as_str(), "mypassword");

        let mut reader = ReaderPassphraseReader::new(Box::new(&b"two\n\n"[..]));
        assert_eq!(reader.read_passphrase().unwrap().as_str(), "two\n");
    }

    #[test]
    fn test_reader_keeps_bare_carriage_return() {
        let mut reader = ReaderPassphraseReader::new(Box::new(&b"pw\r"[..]));
        assert_eq!(reader.read_passphrase().unwrap().as_str(), "pw\r");
    }

    #[test]
    fn test_reader_passphrase_reader_empty() {
        let mut reader = ReaderPassphraseReader::new(Box::new(&b""[..]));
        assert_eq!(reader.read_passphrase().unwrap().as_str(), "");
    }

    #[test]
    fn test_reader_passphrase_reader_non_utf8() {
        let data: &[u8] = &[0xff, 0xfe, 0x00, 0x01];
        let mut reader = ReaderPassphraseReader::new(Box::new(data));

        let err = reader.read_passphrase().expect_err("expected UTF-8 error");
        assert_eq!(err.kind, Some(ErrorKind::PassphraseUnavailable));
    }
}
