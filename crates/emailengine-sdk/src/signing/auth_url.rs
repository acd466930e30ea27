//! Signed redirect URLs for EmailEngine's hosted authentication form.
//!
//! The URL carries two query parameters:
//!
//! - `data`: base64url of the compact JSON payload
//! - `sig`: base64url of HMAC-SHA256 over exactly that JSON, keyed with the
//!   service secret
//!
//! The JSON string is produced once and both encoded and signed from the same
//! bytes, so the signature always covers what EmailEngine receives.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{base64url, sign, ServiceSecret};
use crate::error::ConfigurationError;

/// Payload key holding the URL the user returns to after authenticating.
pub const REDIRECT_URL_KEY: &str = "redirectUrl";

/// Data passed to the hosted authentication form.
///
/// An ordered JSON object: keys serialize in insertion order. The well-known
/// keys have dedicated setters; provider-specific keys can be added with
/// [`AuthPayload::with_field`].
///
/// # Examples
///
/// ```
/// use emailengine_sdk::signing::AuthPayload;
///
/// let payload = AuthPayload::new()
///     .with_account("a1")
///     .with_name("Andris")
///     .with_field("delegated", true);
///
/// assert_eq!(payload.to_json(), r#"{"account":"a1","name":"Andris","delegated":true}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthPayload(Map<String, Value>);

impl AuthPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the account ID to create or re-authenticate.
    pub fn with_account(self, account: impl Into<String>) -> Self {
        self.with_field("account", account.into())
    }

    /// Set the display name of the account.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_field("name", name.into())
    }

    /// Set the email address of the account.
    pub fn with_email(self, email: impl Into<String>) -> Self {
        self.with_field("email", email.into())
    }

    /// Set the URL the user is sent back to after authenticating.
    pub fn with_redirect_url(self, url: impl Into<String>) -> Self {
        self.with_field(REDIRECT_URL_KEY, url.into())
    }

    /// Set an arbitrary field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field, returning the previous value. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The redirect URL, if set to a non-empty string.
    pub fn redirect_url(&self) -> Option<&str> {
        self.get(REDIRECT_URL_KEY)
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON serialization, keys in insertion order.
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// The underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    fn has_redirect_url(&self) -> bool {
        match self.get(REDIRECT_URL_KEY) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(url)) => !url.is_empty(),
            Some(_) => true,
        }
    }
}

impl From<Map<String, Value>> for AuthPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Build a signed URL for the hosted authentication form.
///
/// # Arguments
///
/// * `base_url` - EmailEngine base URL; a trailing `/` is ignored
/// * `secret` - Service secret shared with EmailEngine
/// * `default_redirect_url` - Used when the payload has no `redirectUrl`
/// * `payload` - Data for the hosted form
///
/// # Errors
///
/// - `ConfigurationError::MissingServiceSecret` if `secret` is absent or empty
/// - `ConfigurationError::MissingRedirectUrl` if neither the payload nor the
///   default supplies a redirect URL
pub fn build_auth_url(
    base_url: &str,
    secret: Option<&ServiceSecret>,
    default_redirect_url: Option<&str>,
    mut payload: AuthPayload,
) -> Result<String, ConfigurationError> {
    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or(ConfigurationError::MissingServiceSecret)?;

    if !payload.has_redirect_url() {
        let default = default_redirect_url
            .filter(|url| !url.is_empty())
            .ok_or(ConfigurationError::MissingRedirectUrl)?;
        payload.insert(REDIRECT_URL_KEY, default);
    }

    let json = payload.to_json();
    let signature = sign(json.as_bytes(), secret.as_bytes());

    Ok(format!(
        "{}/accounts/new?data={}&sig={}",
        base_url.trim_end_matches('/'),
        base64url::encode(&json),
        base64url::encode(signature)
    ))
}

#[cfg(test)]
#[path = "auth_url_tests.rs"]
mod tests;
