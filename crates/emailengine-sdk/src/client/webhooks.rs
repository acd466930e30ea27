// Webhook route operations for the EmailEngine API

use serde::Serialize;
use serde_json::Value;

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// Custom webhook routes.
///
/// Routes are managed in the EmailEngine web UI; the API only reads them.
/// Incoming webhook bodies are authenticated with [`crate::webhook::WebhookVerifier`].
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List webhook routes.
    pub async fn list_routes(&self, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get("/v1/webhookRoutes", RequestOptions::new().query(params)?)
            .await
    }

    /// Get a webhook route, including its filter and mapping functions.
    pub async fn route(&self, route_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/webhookRoutes/webhookRoute/{}", route_id),
                RequestOptions::new(),
            )
            .await
    }
}

#[cfg(test)]
#[path = "webhooks_tests.rs"]
mod tests;
