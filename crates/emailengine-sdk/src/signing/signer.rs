//! HMAC-SHA256 signing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 digest in bytes.
pub const SIGNATURE_LEN: usize = 32;

/// Compute the raw HMAC-SHA256 digest of `message` keyed by `secret`.
///
/// Deterministic and total: keys of any length are accepted (long keys are
/// hashed, short keys padded, as HMAC prescribes).
///
/// # Examples
///
/// ```
/// use emailengine_sdk::signing::{sign, SIGNATURE_LEN};
///
/// let digest = sign(b"{\"event\":\"messageNew\"}", b"s3cr3t");
/// assert_eq!(digest.len(), SIGNATURE_LEN);
/// assert_eq!(digest, sign(b"{\"event\":\"messageNew\"}", b"s3cr3t"));
/// ```
pub fn sign(message: &[u8], secret: &[u8]) -> [u8; SIGNATURE_LEN] {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(message);

    let mut digest = [0u8; SIGNATURE_LEN];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

#[cfg(test)]
#[path = "signer_tests.rs"]
mod tests;
