//! Error types for EmailEngine SDK operations.
//!
//! This module defines all error types used throughout the SDK, with
//! classification of API failures by HTTP status and retry hints for callers
//! that implement their own retry policy.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Missing or invalid client configuration.
///
/// Raised synchronously, before any signing work or network I/O. These are
/// always fixed by the caller supplying the missing setting and are never
/// worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No service secret is configured, so nothing can be signed or verified.
    #[error("Service secret is required for generating authentication URLs")]
    MissingServiceSecret,

    /// The payload carries no redirect URL and no default is configured.
    #[error("Redirect URL is required: set redirectUrl in the payload or configure a default")]
    MissingRedirectUrl,

    /// No access token is configured for API requests.
    #[error("Access token is required for API requests")]
    MissingAccessToken,

    /// The base URL could not be parsed.
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {message}")]
    HttpClient { message: String },
}

/// Malformed base64url input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    /// The unpadded length leaves a remainder of one, which no encoding produces.
    #[error("Invalid base64url length: {length}")]
    InvalidLength { length: usize },

    /// The input contains characters outside the alphabet or bad trailing bits.
    #[error("Invalid base64url encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

/// Error payload returned by the EmailEngine API.
///
/// EmailEngine reports failures as `{"error": "...", "code": "...", "details": ...}`.
/// When the body carries no message, the canonical reason phrase of the
/// status code is used instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiErrorBody {
    /// Human-readable message
    pub message: String,
    /// Machine-readable error code, e.g. `AccountNotFound`
    pub code: Option<String>,
    /// Additional details, typically per-field validation failures
    pub details: Option<Value>,
}

impl ApiErrorBody {
    /// Parse an error body, falling back to `fallback_message` for anything missing.
    pub fn parse(body: &[u8], fallback_message: &str) -> Self {
        let parsed = serde_json::from_slice::<Value>(body).ok();
        let object = parsed.as_ref().and_then(Value::as_object);

        let message = object
            .and_then(|o| o.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_message.to_string());
        let code = object
            .and_then(|o| o.get("code"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let details = object
            .and_then(|o| o.get("details"))
            .filter(|d| !d.is_null())
            .cloned();

        Self {
            message,
            code,
            details,
        }
    }
}

impl std::fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Errors during EmailEngine API operations.
///
/// HTTP failures are classified by status code so that callers can match on
/// the kind of failure rather than on raw numbers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request validation failed (400).
    #[error("Validation failed: {0}")]
    Validation(ApiErrorBody),

    /// The access token is missing, invalid or revoked (401).
    #[error("Authentication failed: {0}")]
    Authentication(ApiErrorBody),

    /// The access token lacks the required scope (403).
    #[error("Authorization failed: {0}")]
    Authorization(ApiErrorBody),

    /// The requested resource does not exist (404).
    #[error("Resource not found: {0}")]
    NotFound(ApiErrorBody),

    /// Too many requests (429). `retry_after` comes from the `Retry-After` header.
    #[error("Rate limit exceeded: {body}")]
    RateLimited {
        body: ApiErrorBody,
        retry_after: Option<Duration>,
    },

    /// EmailEngine failed to process the request (5xx).
    #[error("Server error {status}: {body}")]
    Server { status: u16, body: ApiErrorBody },

    /// Any other non-success response.
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: ApiErrorBody },

    /// The request did not complete within the configured timeout.
    #[error("Request timeout")]
    Timeout,

    /// The request could not be built from the supplied parameters.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Failed to serialize a request or parse a JSON response.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error (network, TLS, etc.).
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The client is not configured for this operation.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl ApiError {
    /// Classify a non-success HTTP response.
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `body` - Raw response body
    /// * `retry_after` - Value of the `Retry-After` header, if present
    pub fn from_response(status: u16, body: &[u8], retry_after: Option<&str>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        let body = ApiErrorBody::parse(body, &reason);

        match status {
            400 => Self::Validation(body),
            401 => Self::Authentication(body),
            403 => Self::Authorization(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimited {
                body,
                retry_after: retry_after.and_then(parse_retry_after),
            },
            s if s >= 500 => Self::Server { status: s, body },
            s => Self::Http { status: s, body },
        }
    }

    /// HTTP status code of the failed response, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(400),
            Self::Authentication(_) => Some(401),
            Self::Authorization(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Server { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed error body of the failed response.
    pub fn body(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::Validation(body)
            | Self::Authentication(body)
            | Self::Authorization(body)
            | Self::NotFound(body) => Some(body),
            Self::RateLimited { body, .. }
            | Self::Server { body, .. }
            | Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// EmailEngine error code, e.g. `AccountNotFound`.
    pub fn error_code(&self) -> Option<&str> {
        self.body().and_then(|b| b.code.as_deref())
    }

    /// Additional error details reported by EmailEngine.
    pub fn details(&self) -> Option<&Value> {
        self.body().and_then(|b| b.details.as_ref())
    }

    /// Server-recommended delay before retrying, for rate limited requests.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Check if this error represents a transient condition that may succeed if retried.
    ///
    /// Transient conditions include:
    /// - Server errors (5xx)
    /// - Rate limiting (429)
    /// - Request timeouts
    /// - Network/transport errors
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Authentication(_) => false,
            Self::Authorization(_) => false,
            Self::NotFound(_) => false,
            Self::RateLimited { .. } => true,
            Self::Server { .. } => true,
            Self::Http { .. } => false,
            Self::Timeout => true,
            Self::InvalidRequest { .. } => false,
            Self::Json(_) => false,
            Self::Transport(_) => true,
            Self::Configuration(_) => false,
        }
    }
}

// Only the delta-seconds form is supported; HTTP dates are ignored.
fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
