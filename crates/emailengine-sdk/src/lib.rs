//! # EmailEngine SDK
//!
//! Client library for the [EmailEngine](https://emailengine.app) email API.
//!
//! This SDK provides:
//! - Signed URLs for EmailEngine's hosted account authentication form
//! - Webhook signature verification with constant-time comparison
//! - An authenticated API client with typed accessors for every resource
//! - Error classification by HTTP status with retry hints
//!
//! # Examples
//!
//! ## Hosted Authentication
//!
//! ```rust
//! use emailengine_sdk::client::{ClientConfig, EmailEngineClient};
//! use emailengine_sdk::AuthPayload;
//!
//! let client = EmailEngineClient::builder(
//!     ClientConfig::new("access-token")
//!         .with_base_url("https://ee.example.com")
//!         .with_service_secret("s3cr3t")
//!         .with_default_redirect_url("https://app.example.com/callback"),
//! )
//! .build()?;
//!
//! let url = client.authentication_url(
//!     AuthPayload::new()
//!         .with_account("user-1")
//!         .with_email("user@example.com"),
//! )?;
//! assert!(url.starts_with("https://ee.example.com/accounts/new?data="));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Verifying Webhooks
//!
//! ```rust
//! use emailengine_sdk::WebhookVerifier;
//!
//! let verifier = WebhookVerifier::new("s3cr3t")?;
//!
//! // Signature taken from the X-EE-Wh-Signature header
//! if !verifier.verify(br#"{"event":"messageNew"}"#, "bogus") {
//!     println!("Rejecting unsigned webhook");
//! }
//! # Ok::<(), emailengine_sdk::ConfigurationError>(())
//! ```
//!
//! ## Calling the API
//!
//! ```rust,no_run
//! use emailengine_sdk::client::{ClientConfig, EmailEngineClient};
//! use emailengine_sdk::ApiError;
//!
//! # async fn example() -> Result<(), ApiError> {
//! let client = EmailEngineClient::builder(ClientConfig::new("access-token")).build()?;
//!
//! match client.accounts().get("user-1").await {
//!     Ok(account) => println!("state: {}", account["state"]),
//!     Err(ApiError::NotFound(_)) => println!("no such account"),
//!     Err(e) if e.is_transient() => println!("try again later: {}", e),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod client;
pub mod error;
pub mod signing;
pub mod webhook;

// Re-export commonly used types at crate root for convenience
pub use error::{ApiError, ApiErrorBody, ConfigurationError, DecodingError};

pub use client::{ClientConfig, Download, EmailEngineClient, RequestOptions};
pub use signing::{build_auth_url, AuthPayload, ServiceSecret};
pub use webhook::{verify_signature, WebhookVerifier};
