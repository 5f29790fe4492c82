//! Decryption failure vectors
//!
//! Each vector is an input that must be rejected, together with the error
//! kind it must be rejected with.

use serde::Deserialize;
use textseal::error::ErrorKind;

#[derive(Debug, Deserialize)]
enum ExpectedKind {
    MalformedInput,
    AuthenticationFailure,
}

impl ExpectedKind {
    fn as_error_kind(&self) -> ErrorKind {
        match self {
            ExpectedKind::MalformedInput => ErrorKind::MalformedInput,
            ExpectedKind::AuthenticationFailure => ErrorKind::AuthenticationFailure,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FailureVector {
    input: String,
    kind: ExpectedKind,
    comment: String,
}

fn load_vectors() -> Vec<FailureVector> {
    let json_data = include_str!("../testdata/malformed-vectors.json");
    serde_json::from_str(json_data).expect("failed to parse malformed vectors")
}

#[test]
fn test_failure_vectors() {
    let vectors = load_vectors();
    assert!(!vectors.is_empty(), "No vectors were loaded");

    let mut failed = 0;
    for (i, vector) in vectors.iter().enumerate() {
        match textseal::decrypt(&vector.input, "correct horse battery staple") {
            Ok(_) => {
                eprintln!("Vector {}: FAILED - decrypt unexpectedly succeeded", i);
                eprintln!("  Comment: {}", vector.comment);
                failed += 1;
            }
            Err(e) if e.kind != Some(vector.kind.as_error_kind()) => {
                eprintln!("Vector {}: FAILED - wrong error kind", i);
                eprintln!("  Comment: {}", vector.comment);
                eprintln!("  Expected: {:?}", vector.kind);
                eprintln!("  Actual:   {:?} ({})", e.kind, e);
                failed += 1;
            }
            Err(_) => {}
        }
    }

    assert_eq!(failed, 0, "Some failure vectors did not fail as expected");
}

#[test]
fn test_authentication_failures_share_one_message() {
    let messages: Vec<String> = load_vectors()
        .iter()
        .filter(|v| matches!(v.kind, ExpectedKind::AuthenticationFailure))
        .map(|v| {
            textseal::decrypt(&v.input, "pw")
                .expect_err("expected authentication failure")
                .to_string()
        })
        .collect();

    assert!(!messages.is_empty());
    assert!(messages.iter().all(|m| m == &messages[0]));
}
