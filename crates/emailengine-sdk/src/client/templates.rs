// Email template operations for the EmailEngine API

use serde::Serialize;
use serde_json::Value;

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// Stored email templates.
#[derive(Debug, Clone, Copy)]
pub struct Templates<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Templates<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List templates.
    pub async fn list(&self, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get("/v1/templates", RequestOptions::new().query(params)?)
            .await
    }

    /// Get a template.
    pub async fn get(&self, template_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(&template_path(template_id), RequestOptions::new())
            .await
    }

    /// Create a template, or replace it if the ID already exists.
    pub async fn create_or_update(
        &self,
        template_id: &str,
        data: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .post(&template_path(template_id), RequestOptions::new().json(data)?)
            .await
    }

    /// Update fields of an existing template.
    pub async fn update(&self, template_id: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .put(&template_path(template_id), RequestOptions::new().json(data)?)
            .await
    }

    /// Delete a template.
    pub async fn delete(&self, template_id: &str) -> Result<Value, ApiError> {
        self.client
            .delete(&template_path(template_id), RequestOptions::new())
            .await
    }

    /// List templates owned by an account.
    pub async fn list_for_account(
        &self,
        account_id: &str,
        params: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/templates/account/{}", account_id),
                RequestOptions::new().query(params)?,
            )
            .await
    }

    /// Delete every template owned by an account.
    pub async fn delete_for_account(&self, account_id: &str) -> Result<Value, ApiError> {
        self.client
            .delete(
                &format!("/v1/templates/account/{}", account_id),
                RequestOptions::new(),
            )
            .await
    }
}

fn template_path(template_id: &str) -> String {
    format!("/v1/templates/{}", template_id)
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
