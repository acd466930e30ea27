//! Tests for webhook signature validation.

use super::*;

const SECRET: &str = "s3cr3t";
const BODY: &[u8] = br#"{"event":"messageNew"}"#;

fn signature_for(body: &[u8], secret: &str) -> String {
    base64url::encode(sign(body, secret.as_bytes()))
}

// ============================================================================
// Test: Valid Signature Validation
// ============================================================================

#[test]
fn test_verify_with_valid_signature() {
    let signature = signature_for(BODY, SECRET);

    let is_valid = verify_signature(BODY, &signature, SECRET.as_bytes())
        .expect("Validation should not error");

    assert!(is_valid, "Valid signature should pass validation");
}

#[test]
fn test_verify_empty_body() {
    let signature = signature_for(b"", SECRET);

    assert!(verify_signature(b"", &signature, SECRET.as_bytes()).unwrap());
}

// ============================================================================
// Test: Invalid Signature Detection
// ============================================================================

#[test]
fn test_verify_with_tampered_body() {
    let signature = signature_for(BODY, SECRET);
    let tampered = br#"{"event":"messageDeleted"}"#;

    let is_valid = verify_signature(tampered, &signature, SECRET.as_bytes()).unwrap();

    assert!(!is_valid, "Tampered body should fail validation");
}

#[test]
fn test_verify_with_wrong_secret() {
    let signature = signature_for(BODY, "another-secret");

    assert!(!verify_signature(BODY, &signature, SECRET.as_bytes()).unwrap());
}

/// Malformed signatures are a mismatch, not an error.
#[test]
fn test_verify_with_garbage_signature() {
    assert_eq!(
        verify_signature(BODY, "not-base64!!", SECRET.as_bytes()),
        Ok(false)
    );
    assert_eq!(verify_signature(BODY, "a", SECRET.as_bytes()), Ok(false));
    assert_eq!(verify_signature(BODY, "", SECRET.as_bytes()), Ok(false));
}

#[test]
fn test_verify_with_truncated_signature() {
    let signature = signature_for(BODY, SECRET);
    let truncated = &signature[..signature.len() - 4];

    assert!(!verify_signature(BODY, truncated, SECRET.as_bytes()).unwrap());
}

#[test]
fn test_verify_rejects_empty_secret() {
    let result = verify_signature(BODY, "anything", b"");

    assert_eq!(result, Err(ConfigurationError::MissingServiceSecret));
}

// ============================================================================
// Test: WebhookVerifier
// ============================================================================

#[test]
fn test_verifier_requires_secret() {
    let result = WebhookVerifier::new("");

    assert!(matches!(
        result,
        Err(ConfigurationError::MissingServiceSecret)
    ));
}

#[test]
fn test_verifier_verify() {
    let verifier = WebhookVerifier::new(SECRET).unwrap();
    let signature = signature_for(BODY, SECRET);

    assert!(verifier.verify(BODY, &signature));
    assert!(!verifier.verify(b"{}", &signature));
    assert!(!verifier.verify(BODY, "not-base64!!"));
}

#[test]
fn test_verifier_reads_signature_header_case_insensitively() {
    let verifier = WebhookVerifier::new(SECRET).unwrap();
    let headers = HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("X-EE-Wh-Signature".to_string(), signature_for(BODY, SECRET)),
    ]);

    assert!(verifier.verify_headers(&headers, BODY));
}

#[test]
fn test_verifier_missing_header_is_mismatch() {
    let verifier = WebhookVerifier::new(SECRET).unwrap();
    let headers = HashMap::from([("content-type".to_string(), "application/json".to_string())]);

    assert!(!verifier.verify_headers(&headers, BODY));
}

#[test]
fn test_verifier_debug_redacts_secret() {
    let verifier = WebhookVerifier::new(SECRET).unwrap();

    let debug = format!("{:?}", verifier);

    assert!(!debug.contains(SECRET));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn test_constant_time_compare() {
    assert!(constant_time_compare(b"abc", b"abc"));
    assert!(!constant_time_compare(b"abc", b"abd"));
    assert!(!constant_time_compare(b"abc", b"abcd"));
    assert!(constant_time_compare(b"", b""));
}
