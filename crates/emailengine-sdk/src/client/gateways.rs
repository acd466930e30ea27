// SMTP gateway operations for the EmailEngine API

use serde::Serialize;
use serde_json::Value;

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// SMTP gateways used for outbound delivery.
#[derive(Debug, Clone, Copy)]
pub struct Gateways<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Gateways<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List gateways.
    pub async fn list(&self, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get("/v1/gateways", RequestOptions::new().query(params)?)
            .await
    }

    /// Get a gateway.
    pub async fn get(&self, gateway_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/v1/gateway/{}", gateway_id), RequestOptions::new())
            .await
    }

    /// Register a gateway.
    pub async fn create(&self, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post("/v1/gateway", RequestOptions::new().json(data)?)
            .await
    }

    /// Update a gateway.
    pub async fn update(&self, gateway_id: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/gateway/edit/{}", gateway_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Delete a gateway.
    pub async fn delete(&self, gateway_id: &str) -> Result<Value, ApiError> {
        self.client
            .delete(&format!("/v1/gateway/{}", gateway_id), RequestOptions::new())
            .await
    }
}

#[cfg(test)]
#[path = "gateways_tests.rs"]
mod tests;
