//! Webhook signature validation implementation.
//!
//! Provides HMAC-SHA256 signature validation for EmailEngine webhooks using
//! constant-time comparison to prevent timing attacks.

use std::collections::HashMap;

use subtle::ConstantTimeEq;

use crate::error::ConfigurationError;
use crate::signing::{base64url, sign, ServiceSecret};

/// Header carrying the base64url HMAC-SHA256 of the webhook body.
pub const SIGNATURE_HEADER: &str = "x-ee-wh-signature";

/// Verify a webhook signature against a raw secret.
///
/// # Arguments
///
/// * `body` - The raw webhook body bytes, exactly as received
/// * `signature` - The claimed base64url signature
/// * `secret` - The service secret
///
/// # Returns
///
/// * `Ok(true)` - Signature is valid
/// * `Ok(false)` - Signature is invalid, malformed, or for a different body
///
/// # Errors
///
/// Returns `ConfigurationError::MissingServiceSecret` if `secret` is empty.
pub fn verify_signature(
    body: &[u8],
    signature: &str,
    secret: &[u8],
) -> Result<bool, ConfigurationError> {
    if secret.is_empty() {
        return Err(ConfigurationError::MissingServiceSecret);
    }

    let expected = sign(body, secret);
    let claimed = match base64url::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(false),
    };

    Ok(constant_time_compare(&expected, &claimed))
}

/// Validates EmailEngine webhook signatures using HMAC-SHA256.
///
/// Holds the service secret so that a webhook endpoint can verify many
/// requests without threading the secret through each call.
///
/// # Security
///
/// - Uses constant-time comparison to prevent timing attacks
/// - Never logs secrets or signature values
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: ServiceSecret,
}

impl WebhookVerifier {
    /// Create a new verifier.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingServiceSecret` if the secret is empty.
    pub fn new(secret: impl Into<ServiceSecret>) -> Result<Self, ConfigurationError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigurationError::MissingServiceSecret);
        }
        Ok(Self { secret })
    }

    /// Verify the signature of a webhook body.
    ///
    /// Returns `false` for tampered bodies, foreign secrets and malformed signatures.
    pub fn verify(&self, body: &[u8], signature: &str) -> bool {
        // The secret is non-empty by construction.
        verify_signature(body, signature, self.secret.as_bytes()).unwrap_or(false)
    }

    /// Verify a webhook using the `X-EE-Wh-Signature` header.
    ///
    /// Header names are matched case-insensitively. A missing header is a mismatch.
    pub fn verify_headers(&self, headers: &HashMap<String, String>, body: &[u8]) -> bool {
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SIGNATURE_HEADER))
            .map(|(_, signature)| self.verify(body, signature.trim()))
            .unwrap_or(false)
    }
}

// Security: Don't expose secrets in debug output
impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Compare two byte slices in constant time.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    // Length is not secret: every valid signature is 32 bytes.
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
