// System settings operations for the EmailEngine API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{EmailEngineClient, RequestOptions};
use crate::error::ApiError;

const WEBHOOK_SETTING_KEYS: [&str; 6] = [
    "webhooksEnabled",
    "webhookEvents",
    "webhooks",
    "notifyHeaders",
    "notifyText",
    "notifyTextSize",
];

/// Current webhook configuration of the EmailEngine instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSettings {
    /// Whether webhooks are sent at all
    pub enabled: bool,
    /// Webhook destination URL, empty when unset
    pub url: String,
    /// Event types that trigger a webhook; `*` means all
    pub events: Vec<String>,
    /// Message headers included in `messageNew` webhooks
    pub headers: Vec<String>,
    /// Maximum size of included text content, `None` when text is not included
    pub text: Option<u64>,
}

impl WebhookSettings {
    fn from_settings(settings: &Value) -> Self {
        let strings = |key: &str| -> Vec<String> {
            settings
                .get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };

        let text = if is_truthy(settings.get("notifyText")) {
            Some(
                settings
                    .get("notifyTextSize")
                    .and_then(Value::as_u64)
                    .unwrap_or(0),
            )
        } else {
            None
        };

        Self {
            enabled: is_truthy(settings.get("webhooksEnabled")),
            url: settings
                .get("webhooks")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            events: strings("webhookEvents"),
            headers: strings("notifyHeaders"),
            text,
        }
    }
}

/// Whether webhooks include message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyText {
    /// Do not include text content.
    Disabled,
    /// Include text content with the server's size limit.
    Enabled,
    /// Include text content up to the given number of bytes. Zero disables text.
    Limit(u64),
}

/// Partial update of the webhook configuration. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateWebhookSettings {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub events: Option<Vec<String>>,
    pub headers: Option<Vec<String>>,
    pub text: Option<NotifyText>,
}

impl UpdateWebhookSettings {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable webhooks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the webhook destination URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the event types that trigger a webhook.
    pub fn events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = Some(events.into_iter().map(Into::into).collect());
        self
    }

    /// Set the message headers included in webhooks.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Configure text content in webhooks.
    pub fn text(mut self, text: NotifyText) -> Self {
        self.text = Some(text);
        self
    }

    /// Translate into the settings keys understood by EmailEngine.
    fn to_settings(&self) -> Map<String, Value> {
        let mut settings = Map::new();

        if let Some(enabled) = self.enabled {
            settings.insert("webhooksEnabled".to_string(), Value::Bool(enabled));
        }
        if let Some(url) = &self.url {
            settings.insert("webhooks".to_string(), Value::from(url.as_str()));
        }
        if let Some(events) = &self.events {
            settings.insert("webhookEvents".to_string(), Value::from(events.clone()));
        }
        if let Some(headers) = &self.headers {
            settings.insert("notifyHeaders".to_string(), Value::from(headers.clone()));
        }
        match self.text {
            None => {}
            Some(NotifyText::Disabled) | Some(NotifyText::Limit(0)) => {
                settings.insert("notifyText".to_string(), Value::Bool(false));
            }
            Some(NotifyText::Enabled) => {
                settings.insert("notifyText".to_string(), Value::Bool(true));
            }
            Some(NotifyText::Limit(size)) => {
                settings.insert("notifyText".to_string(), Value::Bool(true));
                settings.insert("notifyTextSize".to_string(), Value::from(size));
            }
        }

        settings
    }
}

/// System settings.
#[derive(Debug, Clone, Copy)]
pub struct Settings<'a> {
    client: &'a EmailEngineClient,
}

impl<'a> Settings<'a> {
    pub(crate) fn new(client: &'a EmailEngineClient) -> Self {
        Self { client }
    }

    /// Get system settings.
    ///
    /// Each key is requested as `key=true`.
    pub async fn get(&self, keys: &[&str]) -> Result<Value, ApiError> {
        let options = keys
            .iter()
            .fold(RequestOptions::new(), |options, key| {
                options.query_param(*key, "true")
            });
        self.client.get("/v1/settings", options).await
    }

    /// Update system settings.
    pub async fn update(&self, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .post("/v1/settings", RequestOptions::new().json(data)?)
            .await
    }

    /// Get the webhook configuration.
    pub async fn webhooks(&self) -> Result<WebhookSettings, ApiError> {
        let settings = self.get(&WEBHOOK_SETTING_KEYS).await?;
        Ok(WebhookSettings::from_settings(&settings))
    }

    /// Update the webhook configuration.
    ///
    /// Returns `true` when EmailEngine reports the settings as updated.
    pub async fn set_webhooks(&self, update: &UpdateWebhookSettings) -> Result<bool, ApiError> {
        let response = self.update(&update.to_settings()).await?;
        Ok(response.get("updated").is_some_and(|v| !v.is_null()))
    }

    /// Get the settings of a background queue (`submit`, `notify` or `documents`).
    pub async fn queue(&self, queue: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                &format!("/v1/settings/queue/{}", queue),
                RequestOptions::new(),
            )
            .await
    }

    /// Update the settings of a background queue.
    pub async fn set_queue(&self, queue: &str, data: &impl Serialize) -> Result<Value, ApiError> {
        self.client
            .put(
                &format!("/v1/settings/queue/{}", queue),
                RequestOptions::new().json(data)?,
            )
            .await
    }
}

/// Loose truthiness used by EmailEngine settings: null, false, zero, empty
/// strings, `"0"` and empty collections are all false.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty() && s != "0",
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
