// Account management operations for the EmailEngine API

use serde::Serialize;
use serde_json::Value;

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

/// Account management.
///
/// Obtained from [`EmailEngineClient::accounts`]. Parameters and payloads are
/// any serializable value, typically a `serde_json::json!` object using the
/// camelCase field names of the EmailEngine API.
#[derive(Debug, Clone, Copy)]
pub struct Accounts<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Accounts<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// Register a new account.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use emailengine_sdk::client::{ClientConfig, EmailEngineClient};
    /// # use serde_json::json;
    /// # async fn example(client: EmailEngineClient) -> Result<(), emailengine_sdk::ApiError> {
    /// let created = client
    ///     .accounts()
    ///     .create(&json!({
    ///         "account": "user-1",
    ///         "name": "Jane Doe",
    ///         "email": "jane@example.com",
    ///         "imap": {"host": "imap.example.com", "port": 993, "secure": true},
    ///     }))
    ///     .await?;
    /// println!("{}", created["state"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post("/v1/account", RequestOptions::new().json(data)?)
            .await
    }

    /// Get account details.
    pub async fn get(&self, account_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/v1/account/{}", account_id), RequestOptions::new())
            .await
    }

    /// List accounts.
    ///
    /// Accepts `page`, `pageSize`, `state` and `query` parameters.
    pub async fn list(&self, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get("/v1/accounts", RequestOptions::new().query(params)?)
            .await
    }

    /// Update account settings.
    pub async fn update(&self, account_id: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}", account_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Delete an account.
    pub async fn delete(&self, account_id: &str) -> Result<Value, ApiError> {
        self.client
            .delete(&format!("/v1/account/{}", account_id), RequestOptions::new())
            .await
    }

    /// Request a reconnection of the account's mail connection.
    pub async fn reconnect(
        &self,
        account_id: &str,
        params: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}/reconnect", account_id),
                RequestOptions::new().json(params)?,
            )
            .await
    }

    /// Request a sync of the account's mailboxes.
    pub async fn sync(&self, account_id: &str) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}/sync", account_id),
                RequestOptions::new(),
            )
            .await
    }

    /// Flush cached account data.
    pub async fn flush(&self, account_id: &str, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/account/{}/flush", account_id),
                RequestOptions::new().json(params)?,
            )
            .await
    }

    /// Verify IMAP and SMTP settings without registering an account.
    pub async fn verify(&self, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post("/v1/verifyAccount", RequestOptions::new().json(data)?)
            .await
    }

    /// Get the connection log of an account.
    pub async fn logs(&self, account_id: &str, params: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/logs/{}", account_id),
                RequestOptions::new().query(params)?,
            )
            .await
    }

    /// Get the current OAuth2 access token of an account.
    pub async fn oauth_token(&self, account_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/account/{}/oauth-token", account_id),
                RequestOptions::new(),
            )
            .await
    }

    /// List the signatures configured on the account's mail server.
    pub async fn server_signatures(&self, account_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/account/{}/server-signatures", account_id),
                RequestOptions::new(),
            )
            .await
    }

    /// Start a delivery test for an account.
    pub async fn create_delivery_test(
        &self,
        account_id: &str,
        data: &impl Serialize,
    ) -> Result<Value, ApiError> {
        self.client
            .post(
                &format!("/v1/delivery-test/account/{}", account_id),
                RequestOptions::new().json(data)?,
            )
            .await
    }

    /// Check the result of a delivery test.
    pub async fn check_delivery_test(&self, delivery_test_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/delivery-test/check/{}", delivery_test_id),
                RequestOptions::new(),
            )
            .await
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
