//! Best-effort session-summary notification.
//!
//! Wraps an optional [`SmsSender`]. When the gateway is unconfigured this
//! is a silent no-op — the disabled state is logged once at startup, not
//! per call. Failures are caught and logged; they never reach the caller,
//! so the HTTP response already computed for the session is unaffected.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::traits::SmsSender;

/// Dispatches the final `END` message of a session via SMS.
pub struct SessionNotifier {
    sms: Option<Arc<dyn SmsSender>>,
}

impl SessionNotifier {
    /// Wrap a configured SMS sender.
    pub fn new(sms: Arc<dyn SmsSender>) -> Self {
        Self { sms: Some(sms) }
    }

    /// A notifier with SMS delivery disabled. Logs the disabled state once.
    pub fn disabled() -> Self {
        info!("session SMS disabled: no gateway credentials");
        Self { sms: None }
    }

    /// Whether SMS delivery is configured.
    pub fn is_enabled(&self) -> bool {
        self.sms.is_some()
    }

    /// Deliver `message` to `phone_number`, best-effort.
    ///
    /// Skips with a warning when the phone number is empty. Never fails.
    pub async fn notify(&self, phone_number: &str, message: &str) {
        let Some(sms) = &self.sms else {
            return;
        };
        if phone_number.is_empty() {
            warn!("skipping session SMS: missing phone number");
            return;
        }

        match sms.send(phone_number, message).await {
            Ok(()) => info!(to = phone_number, "sent session SMS"),
            Err(e) => error!(to = phone_number, error = %e, "failed to send session SMS"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
