//! Tests for HMAC-SHA256 signing.

use super::*;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// RFC 4231 test case 2.
#[test]
fn test_sign_matches_rfc_4231_vector() {
    let digest = sign(b"what do ya want for nothing?", b"Jefe");

    assert_eq!(
        to_hex(&digest),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn test_sign_is_deterministic() {
    let message = br#"{"account":"a1"}"#;

    assert_eq!(sign(message, b"secret"), sign(message, b"secret"));
}

#[test]
fn test_sign_changes_with_message() {
    assert_ne!(sign(b"message-a", b"secret"), sign(b"message-b", b"secret"));
}

#[test]
fn test_sign_changes_with_secret() {
    assert_ne!(sign(b"message", b"secret-a"), sign(b"message", b"secret-b"));
}

#[test]
fn test_sign_empty_message() {
    let digest = sign(b"", b"s3cr3t");

    assert_eq!(digest.len(), SIGNATURE_LEN);
    assert_eq!(digest, sign(b"", b"s3cr3t"));
}

/// Keys longer than the SHA-256 block size are hashed rather than rejected.
#[test]
fn test_sign_accepts_long_and_empty_keys() {
    let long_key = vec![0x42u8; 1024];

    assert_eq!(sign(b"body", &long_key).len(), SIGNATURE_LEN);
    assert_eq!(sign(b"body", b"").len(), SIGNATURE_LEN);
}
