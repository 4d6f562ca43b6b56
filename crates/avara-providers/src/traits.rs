//! Provider traits — the seams where tests substitute fakes.

use async_trait::async_trait;

use crate::errors::Result;

/// A payment initiation request.
#[derive(Clone, Debug)]
pub struct PaymentRequest<'a> {
    /// Payer's phone number.
    pub phone_number: &'a str,
    /// Amount to charge, in KES.
    pub amount: u32,
    /// Account reference shown on the provider dashboard (the event name).
    pub account_ref: &'a str,
    /// Human-readable narrative for the charge.
    pub transaction_desc: &'a str,
}

/// Provider acknowledgement of an initiated payment.
///
/// This acknowledges that the push was started — it is NOT a guarantee
/// that the payment will settle.
#[derive(Clone, Debug, Default)]
pub struct PaymentAck {
    /// Provider-side invoice/transaction identifier, when present.
    pub invoice_id: Option<String>,
    /// Provider-reported state (e.g. `PENDING`), when present.
    pub state: Option<String>,
}

/// Starts a mobile-money push payment.
#[async_trait]
pub trait PaymentInitiator: Send + Sync {
    /// Initiate an STK push. A successful return means the provider
    /// acknowledged the request, nothing more.
    async fn initiate(&self, request: &PaymentRequest<'_>) -> Result<PaymentAck>;
}

/// Delivers an SMS message.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send `message` to `to`.
    async fn send(&self, to: &str, message: &str) -> Result<()>;
}
