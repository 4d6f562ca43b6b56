//! STK push client backed by `reqwest`.
//!
//! Targets the IntaSend collection API. Every request carries an explicit
//! timeout and a fresh `Idempotency-Key` (uuid v7), so a gateway-side retry
//! after a timeout cannot double-charge.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use avara_settings::PaymentSettings;

use crate::errors::{ProviderError, Result};
use crate::traits::{PaymentAck, PaymentInitiator, PaymentRequest};

/// Path of the M-Pesa STK push endpoint, relative to the base URL.
const STK_PUSH_PATH: &str = "/api/v1/payment/mpesa-stk-push/";

/// Wire payload for the STK push endpoint.
#[derive(Serialize)]
struct StkPushPayload<'a> {
    amount: u32,
    phone_number: &'a str,
    narrative: &'a str,
    api_ref: &'a str,
    currency: &'static str,
}

/// Mobile-money STK push client.
pub struct StkPushClient {
    http: reqwest::Client,
    base_url: String,
    public_key: String,
    secret_key: String,
}

impl StkPushClient {
    /// Build a client from payment settings.
    ///
    /// Returns [`ProviderError::Unconfigured`] if either API key is missing.
    pub fn from_settings(settings: &PaymentSettings) -> Result<Self> {
        let public_key = settings
            .public_key
            .clone()
            .ok_or(ProviderError::Unconfigured("missing payment public key"))?;
        let secret_key = settings
            .secret_key
            .clone()
            .ok_or(ProviderError::Unconfigured("missing payment secret key"))?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(settings.timeout_ms))
            .user_agent("avara-gateway/0.1")
            .build()?;

        Ok(Self {
            http,
            base_url: settings.effective_base_url().trim_end_matches('/').to_string(),
            public_key,
            secret_key,
        })
    }
}

#[async_trait]
impl PaymentInitiator for StkPushClient {
    async fn initiate(&self, request: &PaymentRequest<'_>) -> Result<PaymentAck> {
        let payload = StkPushPayload {
            amount: request.amount,
            phone_number: request.phone_number,
            narrative: request.transaction_desc,
            api_ref: request.account_ref,
            currency: "KES",
        };
        let idempotency_key = uuid::Uuid::now_v7().to_string();

        let response = self
            .http
            .post(format!("{}{STK_PUSH_PATH}", self.base_url))
            .bearer_auth(&self.secret_key)
            .header("X-IntaSend-Public-API-Key", &self.public_key)
            .header("Idempotency-Key", &idempotency_key)
            .json(&payload)
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

        let body: serde_json::Value = response.json().await?;
        let ack = PaymentAck {
            invoice_id: body
                .pointer("/invoice/invoice_id")
                .and_then(|v| v.as_str())
                .map(String::from),
            state: body
                .pointer("/invoice/state")
                .and_then(|v| v.as_str())
                .map(String::from),
        };
        debug!(
            invoice_id = ack.invoice_id.as_deref().unwrap_or("-"),
            state = ack.state.as_deref().unwrap_or("-"),
            "stk push acknowledged"
        );
        Ok(ack)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
