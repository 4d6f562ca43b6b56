//! Settings type definitions with compiled defaults.

use serde::{Deserialize, Serialize};

/// Default STK push API base URL for the sandbox environment.
const PAYMENT_SANDBOX_URL: &str = "https://sandbox.intasend.com";
/// Default STK push API base URL for the live environment.
const PAYMENT_LIVE_URL: &str = "https://payment.intasend.com";
/// Default SMS gateway base URL.
const SMS_DEFAULT_URL: &str = "https://api.africastalking.com";

/// Top-level gateway settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvaraSettings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Mobile-money payment provider settings.
    pub payment: PaymentSettings,
    /// SMS gateway settings.
    pub sms: SmsSettings,
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `3000`).
    pub port: u16,
    /// Path to the `SQLite` database. `None` means the per-user default
    /// (`~/.avara/tickets.db`), resolved by the binary.
    pub db_path: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            db_path: None,
        }
    }
}

/// Payment provider environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentEnv {
    /// Sandbox environment (default — live must be opted into).
    #[default]
    Sandbox,
    /// Live environment.
    Live,
}

/// Mobile-money payment provider settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentSettings {
    /// Publishable API key.
    pub public_key: Option<String>,
    /// Secret API key.
    pub secret_key: Option<String>,
    /// Which provider environment to target.
    pub env: PaymentEnv,
    /// Base URL override (takes precedence over the per-env default;
    /// used by tests to point at a local mock).
    pub base_url: Option<String>,
    /// Request timeout in milliseconds (default `30000`).
    pub timeout_ms: u64,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            public_key: None,
            secret_key: None,
            env: PaymentEnv::Sandbox,
            base_url: None,
            timeout_ms: 30_000,
        }
    }
}

impl PaymentSettings {
    /// The effective base URL: explicit override, else the per-env default.
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(match self.env {
            PaymentEnv::Sandbox => PAYMENT_SANDBOX_URL,
            PaymentEnv::Live => PAYMENT_LIVE_URL,
        })
    }

    /// Whether both API keys are present.
    pub fn is_configured(&self) -> bool {
        self.public_key.is_some() && self.secret_key.is_some()
    }
}

/// SMS gateway settings. Missing credentials disable SMS delivery.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsSettings {
    /// Gateway API key.
    pub api_key: Option<String>,
    /// Gateway account username.
    pub username: Option<String>,
    /// Base URL (default is the hosted gateway; overridable for tests).
    pub base_url: String,
    /// Request timeout in milliseconds (default `30000`).
    pub timeout_ms: u64,
}

impl Default for SmsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            username: None,
            base_url: SMS_DEFAULT_URL.into(),
            timeout_ms: 30_000,
        }
    }
}

impl SmsSettings {
    /// Whether SMS delivery is configured (both key and username present).
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.username.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
