// Access token operations for the EmailEngine API

use serde::Serialize;
use serde_json::Value;

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// API access token management.
///
/// Requires a token with the `root` scope.
#[derive(Debug, Clone, Copy)]
pub struct Tokens<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List root-level access tokens.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.get("/v1/tokens", RequestOptions::new()).await
    }

    /// List access tokens bound to an account.
    pub async fn list_for_account(&self, account_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/tokens/account/{}", account_id),
                RequestOptions::new(),
            )
            .await
    }

    /// Provision a new access token.
    ///
    /// The response contains the token value, which cannot be retrieved again.
    pub async fn create(&self, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post("/v1/token", RequestOptions::new().json(data)?)
            .await
    }

    /// Revoke an access token.
    pub async fn delete(&self, token_id: &str) -> Result<Value, ApiError> {
        self.client
            .delete(&format!("/v1/token/{}", token_id), RequestOptions::new())
            .await
    }
}

#[cfg(test)]
#[path = "tokens_tests.rs"]
mod tests;
