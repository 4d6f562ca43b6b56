//! SMS gateway client backed by `reqwest`.
//!
//! Targets the Africa's Talking messaging API (form-encoded POST with an
//! `apiKey` header). Requests carry an explicit timeout.

use async_trait::async_trait;

use avara_settings::SmsSettings;

use crate::errors::{ProviderError, Result};
use crate::traits::SmsSender;

/// Path of the messaging endpoint, relative to the base URL.
const MESSAGING_PATH: &str = "/version1/messaging";

/// SMS gateway client.
pub struct HttpSmsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    username: String,
}

impl HttpSmsClient {
    /// Build a client from SMS settings.
    ///
    /// Returns [`ProviderError::Unconfigured`] if the API key or username
    /// is missing — callers treat that as "SMS disabled", not a failure.
    pub fn from_settings(settings: &SmsSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or(ProviderError::Unconfigured("missing SMS API key"))?;
        let username = settings
            .username
            .clone()
            .ok_or(ProviderError::Unconfigured("missing SMS username"))?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(settings.timeout_ms))
            .user_agent("avara-gateway/0.1")
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            username,
        })
    }
}

#[async_trait]
impl SmsSender for HttpSmsClient {
    async fn send(&self, to: &str, message: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}{MESSAGING_PATH}", self.base_url))
            .header("apiKey", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("username", self.username.as_str()),
                ("to", to),
                ("message", message),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
