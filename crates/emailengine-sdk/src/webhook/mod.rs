//! EmailEngine webhook authentication.
//!
//! EmailEngine signs every webhook body with HMAC-SHA256 keyed by the service
//! secret and sends the base64url digest in the `X-EE-Wh-Signature` header.
//! This module only authenticates bodies; parsing and acting on the webhook
//! payload is left to the receiving application.
//!
//! # Security
//!
//! Signatures are compared in constant time. A malformed signature is reported
//! as a mismatch rather than an error, so garbage input from the network never
//! turns into an exception path.
//!
//! # Examples
//!
//! ```
//! use emailengine_sdk::signing::{base64url, sign};
//! use emailengine_sdk::webhook::WebhookVerifier;
//!
//! let body = br#"{"event":"messageNew"}"#;
//! let header = base64url::encode(sign(body, b"s3cr3t"));
//!
//! let verifier = WebhookVerifier::new("s3cr3t")?;
//! assert!(verifier.verify(body, &header));
//! assert!(!verifier.verify(b"{}", &header));
//! # Ok::<(), emailengine_sdk::ConfigurationError>(())
//! ```

pub mod validation;

pub use validation::{verify_signature, WebhookVerifier, SIGNATURE_HEADER};
