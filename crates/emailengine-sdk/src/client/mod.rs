//! EmailEngine API client.
//!
//! This module provides the main [`EmailEngineClient`] for making
//! authenticated API calls to an EmailEngine instance, together with typed
//! accessors for each API resource.
//!
//! Every request carries `Authorization: Bearer <access token>` and expects a
//! JSON response. Non-success responses are classified into [`ApiError`]
//! variants by status code. Nothing is retried automatically; use
//! [`ApiError::is_transient`] and [`ApiError::retry_after`] to drive a retry
//! policy of your own.
//!
//! # Examples
//!
//! ```no_run
//! use emailengine_sdk::client::{ClientConfig, EmailEngineClient};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), emailengine_sdk::ApiError> {
//! let client = EmailEngineClient::builder(
//!     ClientConfig::new("access-token").with_base_url("https://ee.example.com"),
//! )
//! .build()?;
//!
//! let accounts = client.accounts().list(&json!({"page": 0, "pageSize": 20})).await?;
//! println!("{}", accounts["total"]);
//! # Ok(())
//! # }
//! ```

mod accounts;
mod blocklists;
mod gateways;
mod mailboxes;
mod messages;
mod oauth2;
mod outbox;
mod settings;
mod stats;
mod templates;
mod tokens;
mod webhooks;

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE,
    RETRY_AFTER,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ApiError, ConfigurationError};
use crate::signing::{build_auth_url, AuthPayload, ServiceSecret};
use crate::webhook::WebhookVerifier;

pub use accounts::Accounts;
pub use blocklists::Blocklists;
pub use gateways::Gateways;
pub use mailboxes::Mailboxes;
pub use messages::{Messages, SubmitOptions};
pub use oauth2::OAuth2;
pub use outbox::Outbox;
pub use settings::{NotifyText, Settings, UpdateWebhookSettings, WebhookSettings};
pub use stats::Stats;
pub use templates::Templates;
pub use tokens::Tokens;
pub use webhooks::Webhooks;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration for EmailEngine API client behavior.
///
/// # Examples
///
/// ```
/// use emailengine_sdk::client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("access-token")
///     .with_base_url("https://ee.example.com/")
///     .with_service_secret("s3cr3t")
///     .with_default_redirect_url("https://app.example.com/callback")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// EmailEngine base URL, without the `/v1` prefix
    pub base_url: String,
    /// API access token
    pub access_token: String,
    /// Secret for signing hosted authentication URLs and verifying webhooks
    pub service_secret: Option<ServiceSecret>,
    /// Redirect URL used when an authentication payload has none
    pub default_redirect_url: Option<String>,
    /// Request timeout duration
    pub timeout: Duration,
    /// User agent string for API requests
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            service_secret: None,
            default_redirect_url: None,
            timeout: Duration::from_secs(30),
            user_agent: concat!("emailengine-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given access token and defaults elsewhere.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Set the EmailEngine base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API access token.
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = access_token.into();
        self
    }

    /// Set the service secret.
    pub fn with_service_secret(mut self, secret: impl Into<ServiceSecret>) -> Self {
        self.service_secret = Some(secret.into());
        self
    }

    /// Set the default redirect URL for hosted authentication.
    pub fn with_default_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.default_redirect_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// Security: Don't expose credentials in debug output
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<REDACTED>")
            .field("service_secret", &self.service_secret)
            .field("default_redirect_url", &self.default_redirect_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Query parameters, JSON body and extra headers for a single request.
///
/// # Examples
///
/// ```
/// use emailengine_sdk::client::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .query(&json!({"page": 0, "pageSize": 20, "state": null}))?
///     .json(&json!({"path": "INBOX"}))?
///     .header("Idempotency-Key", "order-1234");
/// # Ok::<(), emailengine_sdk::ApiError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Create empty request options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add query parameters from any value that serializes to a JSON object.
    ///
    /// Null values are skipped, strings are used as-is and every other value
    /// is sent as its JSON text (`true`, `20`, ...).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if `params` does not serialize to an
    /// object or null.
    pub fn query(mut self, params: &impl Serialize) -> Result<Self, ApiError> {
        match serde_json::to_value(params)? {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        other => self.query.push((key, other.to_string())),
                    }
                }
            }
            other => {
                return Err(ApiError::InvalidRequest {
                    message: format!("Query parameters must be an object, got: {}", other),
                })
            }
        }
        Ok(self)
    }

    /// Add a single query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the JSON request body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add a request header, replacing a default header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Raw response body of a download, such as an attachment or message source.
#[derive(Debug, Clone)]
pub struct Download {
    /// Value of the `Content-Type` response header
    pub content_type: Option<String>,
    /// Value of the `Content-Disposition` response header
    pub content_disposition: Option<String>,
    /// Response body
    pub content: Bytes,
}

/// EmailEngine API client for authenticated operations.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct EmailEngineClient {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl EmailEngineClient {
    /// Create a new builder for constructing a client.
    pub fn builder(config: ClientConfig) -> EmailEngineClientBuilder {
        EmailEngineClientBuilder::new(config)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Account management.
    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    /// Message operations.
    pub fn messages(&self) -> Messages<'_> {
        Messages::new(self)
    }

    /// Mailbox management.
    pub fn mailboxes(&self) -> Mailboxes<'_> {
        Mailboxes::new(self)
    }

    /// Outbox (delivery queue) management.
    pub fn outbox(&self) -> Outbox<'_> {
        Outbox::new(self)
    }

    /// System settings.
    pub fn settings(&self) -> Settings<'_> {
        Settings::new(self)
    }

    /// Access token management.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(self)
    }

    /// Email templates.
    pub fn templates(&self) -> Templates<'_> {
        Templates::new(self)
    }

    /// SMTP gateway management.
    pub fn gateways(&self) -> Gateways<'_> {
        Gateways::new(self)
    }

    /// OAuth2 application management.
    pub fn oauth2(&self) -> OAuth2<'_> {
        OAuth2::new(self)
    }

    /// Webhook route management.
    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }

    /// System statistics and license.
    pub fn stats(&self) -> Stats<'_> {
        Stats::new(self)
    }

    /// Blocklist management.
    pub fn blocklists(&self) -> Blocklists<'_> {
        Blocklists::new(self)
    }

    // ========================================================================
    // Hosted authentication and webhooks
    // ========================================================================

    /// Build a signed URL for EmailEngine's hosted authentication form.
    ///
    /// Uses the configured base URL, service secret and default redirect URL.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::MissingServiceSecret` if no service secret is configured
    /// - `ConfigurationError::MissingRedirectUrl` if neither the payload nor the
    ///   configuration supplies a redirect URL
    pub fn authentication_url(&self, payload: AuthPayload) -> Result<String, ConfigurationError> {
        build_auth_url(
            &self.config.base_url,
            self.config.service_secret.as_ref(),
            self.config.default_redirect_url.as_deref(),
            payload,
        )
    }

    /// Create a webhook verifier keyed with the configured service secret.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingServiceSecret` if no service secret is configured.
    pub fn webhook_verifier(&self) -> Result<WebhookVerifier, ConfigurationError> {
        let secret = self
            .config
            .service_secret
            .clone()
            .ok_or(ConfigurationError::MissingServiceSecret)?;
        WebhookVerifier::new(secret)
    }

    // ========================================================================
    // Raw requests
    // ========================================================================

    /// Make an authenticated API request and parse the JSON response.
    ///
    /// This is the generic method behind every resource operation and can be
    /// used for endpoints not covered by them. An empty response body yields
    /// an empty JSON object.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - API path (e.g. "/v1/accounts" or "v1/accounts")
    /// * `options` - Query parameters, JSON body and extra headers
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if:
    /// - No access token is configured
    /// - The request fails (network error, timeout, etc.)
    /// - The response status is not successful (classified by status code)
    /// - The response body is not valid JSON
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let response = self.send(method, path, options).await?;
        let body = response.bytes().await.map_err(transport_error)?;

        if body.is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch a raw response body, such as an attachment.
    ///
    /// # Errors
    ///
    /// Same as [`EmailEngineClient::request`], except that the body is not parsed.
    pub async fn download(&self, path: &str) -> Result<Download, ApiError> {
        let response = self
            .send(Method::GET, path, RequestOptions::new().header("Accept", "*/*"))
            .await?;

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);

        let content = response.bytes().await.map_err(transport_error)?;

        Ok(Download {
            content_type,
            content_disposition,
            content,
        })
    }

    pub(crate) async fn get(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        self.request(Method::GET, path, options).await
    }

    pub(crate) async fn post(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        self.request(Method::POST, path, options).await
    }

    pub(crate) async fn put(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, options).await
    }

    pub(crate) async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, options).await
    }

    /// Send a request and turn non-success statuses into classified errors.
    async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        if self.config.access_token.is_empty() {
            return Err(ConfigurationError::MissingAccessToken.into());
        }

        let headers = self.build_headers(&options.headers)?;
        let url = self.url(path);

        debug!(method = %method, path = %path, "Sending EmailEngine API request");

        let mut request = self.http_client.request(method.clone(), &url).headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), &body, retry_after.as_deref());

        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            error = %error,
            "EmailEngine API request failed"
        );

        Err(error)
    }

    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.access_token))
            .map_err(|_| ApiError::InvalidRequest {
                message: "Access token contains characters not allowed in a header".to_string(),
            })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in extra {
            let name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidRequest {
                    message: format!("Invalid header name '{}': {}", name, e),
                })?;
            let value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidRequest {
                message: format!("Invalid value for header '{}': {}", name, e),
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        // Normalize path - remove leading slash if present for consistent URL building
        let normalized_path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.config.base_url, normalized_path)
    }
}

impl std::fmt::Debug for EmailEngineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailEngineClient")
            .field("config", &self.config)
            .finish()
    }
}

fn transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(error)
    }
}

/// Builder for constructing `EmailEngineClient` instances.
pub struct EmailEngineClientBuilder {
    config: ClientConfig,
    http_client: Option<reqwest::Client>,
}

impl EmailEngineClientBuilder {
    /// Create a new client builder.
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: None,
        }
    }

    /// Use a preconfigured HTTP client instead of building one.
    ///
    /// The configured timeout and user agent are not applied to it.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Build the EmailEngine client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the base URL is invalid or the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<EmailEngineClient, ApiError> {
        let mut config = self.config;

        config.base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&config.base_url).map_err(|e| ConfigurationError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(config.timeout)
                .user_agent(&config.user_agent)
                .build()
                .map_err(|e| ConfigurationError::HttpClient {
                    message: e.to_string(),
                })?,
        };

        Ok(EmailEngineClient {
            http_client,
            config,
        })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
