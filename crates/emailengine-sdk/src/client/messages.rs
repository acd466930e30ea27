// Message operations for the EmailEngine API

use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{Download, EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// Delivery options for [`Messages::submit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Sent as `Idempotency-Key`; repeated submissions with the same key are
    /// only queued once.
    pub idempotency_key: Option<String>,
    /// Sent as `X-EE-Timeout` in milliseconds; how long EmailEngine waits for
    /// the message to be queued.
    pub timeout: Option<Duration>,
}

impl SubmitOptions {
    /// Create empty submit options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the idempotency key.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Set the queueing timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn apply(&self, mut options: RequestOptions) -> RequestOptions {
        if let Some(key) = &self.idempotency_key {
            options = options.header("Idempotency-Key", key.as_str());
        }
        if let Some(timeout) = self.timeout {
            options = options.header("X-EE-Timeout", timeout.as_millis().to_string());
        }
        options
    }
}

/// Message operations.
///
/// Obtained from [`EmailEngineClient::messages`].
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Messages<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// List messages in a mailbox.
    ///
    /// Accepts `path`, `cursor`, `page`, `pageSize` and `documentStore` parameters.
    pub async fn list(&self, account_id: &str, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/account/{}/messages", account_id),
                RequestOptions::new().query(params)?,
            )
            .await
    }

    /// Get message details.
    pub async fn get(
        &self,
        account_id: &str,
        message_id: &str,
        params: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/account/{}/message/{}", account_id, message_id),
                RequestOptions::new().query(params)?,
            )
            .await
    }

    /// Download the raw RFC 822 source of a message.
    pub async fn source(&self, account_id: &str, message_id: &str) -> Result<Download, ApiError> {
        self.client
            .download(&format!(
                "/v1/account/{}/message/{}/source",
                account_id, message_id
            ))
            .await
    }

    /// Get the text content of a message.
    pub async fn text(
        &self,
        account_id: &str,
        text_id: &str,
        params: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/account/{}/text/{}", account_id, text_id),
                RequestOptions::new().query(params)?,
            )
            .await
    }

    /// Update message flags and labels.
    pub async fn update(
        &self,
        account_id: &str,
        message_id: &str,
        data: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}/message/{}", account_id, message_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Move a message to another mailbox.
    pub async fn move_to(
        &self,
        account_id: &str,
        message_id: &str,
        path: &str,
    ) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}/message/{}/move", account_id, message_id),
                RequestOptions::new().json(&json!({ "path": path }))?,
            )
            .await
    }

    /// Delete a message.
    ///
    /// Without `force` the message is moved to Trash; with it the message is
    /// deleted immediately.
    pub async fn delete(
        &self,
        account_id: &str,
        message_id: &str,
        force: bool,
    ) -> Result<Value, ApiError> {
        self.client
            .delete(
                &format!("/v1/account/{}/message/{}", account_id, message_id),
                RequestOptions::new().query_param("force", force.to_string()),
            )
            .await
    }

    /// Update flags on every message matching a search.
    pub async fn bulk_update(
        &self,
        account_id: &str,
        data: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}/messages", account_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Move every message matching a search.
    pub async fn bulk_move(&self, account_id: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}/messages/move", account_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Delete every message matching a search.
    pub async fn bulk_delete(
        &self,
        account_id: &str,
        data: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}/messages/delete", account_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Search messages in one account.
    pub async fn search(&self, account_id: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post(
                &format!("/v1/account/{}/search", account_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Search messages across all accounts.
    ///
    /// Requires the document store to be enabled on the server.
    pub async fn unified_search(&self, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post("/v1/unified/search", RequestOptions::new().json(data)?)
            .await
    }

    /// Upload a message to a mailbox.
    pub async fn create(&self, account_id: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post(
                &format!("/v1/account/{}/message", account_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Queue a message for delivery.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use emailengine_sdk::client::{EmailEngineClient, SubmitOptions};
    /// # use serde_json::json;
    /// # async fn example(client: EmailEngineClient) -> Result<(), emailengine_sdk::ApiError> {
    /// let queued = client
    ///     .messages()
    ///     .submit(
    ///         "user-1",
    ///         &json!({
    ///             "from": {"address": "jane@example.com"},
    ///             "to": [{"address": "john@example.com"}],
    ///             "subject": "Hello",
    ///             "text": "Hi John",
    ///         }),
    ///         &SubmitOptions::new().with_idempotency_key("order-1234"),
    ///     )
    ///     .await?;
    /// println!("{}", queued["queueId"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit(
        &self,
        account_id: &str,
        data: &impl Serialize,
        options: &SubmitOptions,
    ) -> Result<Value, ApiError> {
        self.client
            .post(
                &format!("/v1/account/{}/submit", account_id),
                options.apply(RequestOptions::new().json(data)?),
            )
            .await
    }

    /// Download an attachment.
    pub async fn attachment(
        &self,
        account_id: &str,
        attachment_id: &str,
    ) -> Result<Download, ApiError> {
        self.client
            .download(&format!(
                "/v1/account/{}/attachment/{}",
                account_id, attachment_id
            ))
            .await
    }
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
