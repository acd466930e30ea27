// OAuth2 application operations for the EmailEngine API

use serde::Serialize;
use serde_json::Value;

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// OAuth2 applications used to authenticate Gmail and Outlook accounts.
#[derive(Debug, Clone, Copy)]
pub struct OAuth2<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> OAuth2<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List OAuth2 applications.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.get("/v1/oauth2", RequestOptions::new()).await
    }

    /// Get an OAuth2 application.
    pub async fn get(&self, app_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/v1/oauth2/{}", app_id), RequestOptions::new())
            .await
    }

    /// Register an OAuth2 application.
    pub async fn create(&self, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post("/v1/oauth2", RequestOptions::new().json(data)?)
            .await
    }

    /// Update an OAuth2 application.
    pub async fn update(&self, app_id: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/oauth2/{}", app_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Delete an OAuth2 application.
    pub async fn delete(&self, app_id: &str) -> Result<Value, ApiError> {
        self.client
            .delete(&format!("/v1/oauth2/{}", app_id), RequestOptions::new())
            .await
    }
}

#[cfg(test)]
#[path = "oauth2_tests.rs"]
mod tests;
