// Outbox (delivery queue) operations for the EmailEngine API

use serde::Serialize;
use serde_json::Value;

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// Messages queued for delivery.
#[derive(Debug, Clone, Copy)]
pub struct Outbox<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Outbox<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List queued messages.
    pub async fn list(&self, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get("/v1/outbox", RequestOptions::new().query(params)?)
            .await
    }

    /// Get a queued message.
    pub async fn get(&self, queue_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/v1/outbox/{}", queue_id), RequestOptions::new())
            .await
    }

    /// Remove a message from the delivery queue.
    pub async fn cancel(&self, queue_id: &str) -> Result<Value, ApiError> {
        self.client
            .delete(&format!("/v1/outbox/{}", queue_id), RequestOptions::new())
            .await
    }
}

#[cfg(test)]
#[path = "outbox_tests.rs"]
mod tests;
