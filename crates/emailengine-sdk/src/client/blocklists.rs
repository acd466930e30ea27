// Blocklist operations for the EmailEngine API

use serde::Serialize;
use serde_json::Value;

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// Address blocklists consulted before delivery.
#[derive(Debug, Clone, Copy)]
pub struct Blocklists<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Blocklists<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List blocklists.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client
            .get("/v1/blocklists", RequestOptions::new())
            .await
    }

    /// List the addresses of a blocklist.
    pub async fn get(&self, list_id: &str, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get(&blocklist_path(list_id), RequestOptions::new().query(params)?)
            .await
    }

    /// Add an address to a blocklist, creating the list if needed.
    pub async fn add(&self, list_id: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post(&blocklist_path(list_id), RequestOptions::new().json(data)?)
            .await
    }

    /// Remove an address from a blocklist.
    pub async fn remove(&self, list_id: &str, address: &str) -> Result<Value, ApiError> {
        self.client
            .delete(
                &blocklist_path(list_id),
                RequestOptions::new().query_param("address", address),
            )
            .await
    }
}

fn blocklist_path(list_id: &str) -> String {
    format!("/v1/blocklist/{}", list_id)
}

#[cfg(test)]
#[path = "blocklists_tests.rs"]
mod tests;
