// Server statistics and license operations for the EmailEngine API

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// Server statistics, license and configuration discovery.
#[derive(Debug, Clone, Copy)]
pub struct Stats<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Stats<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// Get server statistics: version, connection counts and queue sizes.
    pub async fn get(&self) -> Result<Value, ApiError> {
        self.client.get("/v1/stats", RequestOptions::new()).await
    }

    /// Discover IMAP and SMTP settings for an email address.
    pub async fn autoconfig(&self, email: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                "/v1/autoconfig",
                RequestOptions::new().query_param("email", email),
            )
            .await
    }

    /// Get license information.
    pub async fn license(&self) -> Result<Value, ApiError> {
        self.client.get("/v1/license", RequestOptions::new()).await
    }

    /// Register a license key.
    pub async fn set_license(&self, license: &str) -> Result<Value, ApiError> {
        self.client
            .post(
                "/v1/license",
                RequestOptions::new().json(&json!({ "license": license }))?,
            )
            .await
    }

    /// Remove the registered license.
    pub async fn delete_license(&self) -> Result<Value, ApiError> {
        self.client
            .delete("/v1/license", RequestOptions::new())
            .await
    }

    /// Get the change stream of account and message events.
    pub async fn changes(&self, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get("/v1/changes", RequestOptions::new().query(params)?)
            .await
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
