//! Signing primitives for the hosted authentication flow.
//!
//! EmailEngine's hosted "add account" form accepts a base64url-encoded JSON
//! payload together with an HMAC-SHA256 signature computed with the shared
//! service secret. The same secret signs webhook bodies, see
//! [`crate::webhook`].
//!
//! Everything in this module is synchronous and free of side effects.
//!
//! # Examples
//!
//! ```
//! use emailengine_sdk::signing::{build_auth_url, AuthPayload, ServiceSecret};
//!
//! let secret = ServiceSecret::new("s3cr3t");
//! let payload = AuthPayload::new()
//!     .with_account("example")
//!     .with_email("user@example.com");
//!
//! let url = build_auth_url(
//!     "http://localhost:3000",
//!     Some(&secret),
//!     Some("https://app.example.com/callback"),
//!     payload,
//! )?;
//! assert!(url.starts_with("http://localhost:3000/accounts/new?data="));
//! # Ok::<(), emailengine_sdk::ConfigurationError>(())
//! ```

pub mod auth_url;
pub mod base64url;
pub mod signer;

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub use auth_url::{build_auth_url, AuthPayload, REDIRECT_URL_KEY};
pub use signer::{sign, SIGNATURE_LEN};

/// Shared secret used to sign authentication URLs and webhook bodies.
///
/// The value is wiped from memory on drop and never appears in debug output.
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ServiceSecret(String);

impl ServiceSecret {
    /// Wrap a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw key bytes for HMAC computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether the secret is empty and therefore unusable.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ServiceSecret {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for ServiceSecret {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}

// Security: Don't expose secrets in debug output
impl std::fmt::Debug for ServiceSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceSecret(<REDACTED>)")
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
