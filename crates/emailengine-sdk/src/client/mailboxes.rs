// Mailbox management operations for the EmailEngine API

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// Mailbox (folder) management.
///
/// Mailboxes are addressed by their full path, e.g. `INBOX/Receipts`.
#[derive(Debug, Clone, Copy)]
pub struct Mailboxes<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Mailboxes<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List mailboxes of an account.
    ///
    /// Accepts the `counters` parameter to include message counts.
    pub async fn list(&self, account_id: &str, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/account/{}/mailboxes", account_id),
                RequestOptions::new().query(params)?,
            )
            .await
    }

    /// Create a mailbox.
    pub async fn create(&self, account_id: &str, path: &str) -> Result<Value, ApiError> {
        self.client
            .post(
                &mailbox_path(account_id),
                RequestOptions::new().json(&json!({ "path": path }))?,
            )
            .await
    }

    /// Rename a mailbox.
    pub async fn rename(
        &self,
        account_id: &str,
        path: &str,
        new_path: &str,
    ) -> Result<Value, ApiError> {
        self.client
            .put(
                &mailbox_path(account_id),
                RequestOptions::new().json(&json!({ "path": path, "newPath": new_path }))?,
            )
            .await
    }

    /// Delete a mailbox.
    pub async fn delete(&self, account_id: &str, path: &str) -> Result<Value, ApiError> {
        self.client
            .delete(
                &mailbox_path(account_id),
                RequestOptions::new().query_param("path", path),
            )
            .await
    }

    /// Subscribe to a mailbox.
    pub async fn subscribe(&self, account_id: &str, path: &str) -> Result<Value, ApiError> {
        self.set_subscribed(account_id, path, true).await
    }

    /// Unsubscribe from a mailbox.
    pub async fn unsubscribe(&self, account_id: &str, path: &str) -> Result<Value, ApiError> {
        self.set_subscribed(account_id, path, false).await
    }

    async fn set_subscribed(
        &self,
        account_id: &str,
        path: &str,
        subscribed: bool,
    ) -> Result<Value, ApiError> {
        self.client
            .put(
                &mailbox_path(account_id),
                RequestOptions::new().json(&json!({ "path": path, "subscribed": subscribed }))?,
            )
            .await
    }
}

fn mailbox_path(account_id: &str) -> String {
    format!("/v1/account/{}/mailbox", account_id)
}

#[cfg(test)]
#[path = "mailboxes_tests.rs"]
mod tests;
