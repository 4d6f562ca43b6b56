//! Session dispatcher — turns an inbound step path into a [`Reply`].
//!
//! Within one request the ordering is fixed: payment initiation precedes
//! ticket issuance, and the reply is only built after both complete.
//! Across requests there is no coordination — two concurrent purchases
//! from the same phone both succeed with distinct codes.

use std::sync::Arc;

use tracing::{debug, error};

use avara_core::catalog::EventRecord;
use avara_core::Reply;
use avara_providers::{PaymentInitiator, PaymentRequest};
use avara_store::{ConnectionPool, TicketRepo};

use crate::errors::Result;
use crate::issue::issue_ticket;
use crate::menu::{self, MenuAction};

/// Terminal message for an unknown top-level code. No trailing period —
/// the gateway text differs from the deeper-level variant.
const MSG_INVALID_TOP: &str = "Invalid option";
/// Terminal message for an unknown code below the top level.
const MSG_INVALID_OPTION: &str = "Invalid option.";
/// Terminal message for an unknown region code.
const MSG_INVALID_REGION: &str = "Invalid region.";
/// Terminal message when payment initiation or ticket persistence fails.
const MSG_PAYMENT_FAILED: &str = "Payment failed. Try again.";
/// Terminal message for a request without a phone number.
const MSG_MISSING_PHONE: &str = "Missing phone number";

/// The USSD session dispatcher.
///
/// Collaborators are injected at construction and shared process-wide;
/// tests substitute a fake [`PaymentInitiator`].
pub struct Dispatcher {
    pool: ConnectionPool,
    payment: Arc<dyn PaymentInitiator>,
}

impl Dispatcher {
    /// Create a dispatcher over a ticket store pool and a payment client.
    pub fn new(pool: ConnectionPool, payment: Arc<dyn PaymentInitiator>) -> Self {
        Self { pool, payment }
    }

    /// Handle one gateway request.
    ///
    /// A missing phone number short-circuits before any menu logic.
    /// Returned errors are internal failures only; the server layer maps
    /// them to the generic terminal message.
    pub async fn handle(&self, phone_number: &str, text: &str) -> Result<Reply> {
        if phone_number.is_empty() {
            debug!("rejected request without phone number");
            return Ok(Reply::end(MSG_MISSING_PHONE));
        }

        let steps: Vec<&str> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('*').collect()
        };

        let reply = match menu::resolve(&steps) {
            MenuAction::RootMenu => Reply::con(menu::root_menu()),
            MenuAction::BuyMenu => Reply::con(menu::buy_menu()),
            MenuAction::ConfirmEvent(event) => Reply::con(menu::confirm_event(event)),
            MenuAction::Purchase(event) => self.purchase(phone_number, event).await?,
            MenuAction::MyTickets => self.list_tickets(phone_number)?,
            MenuAction::WalletMenu => Reply::con(menu::wallet_menu()),
            MenuAction::WalletBalance => Reply::end("Your balance is 0 KES"),
            MenuAction::WalletDeposit => {
                Reply::end("Send money to Paybill 412345\nAcc: Your Phone Number")
            }
            MenuAction::WalletWithdraw => Reply::end("Withdrawal sent to M-Pesa"),
            MenuAction::RegionMenu => Reply::con(menu::region_menu()),
            MenuAction::RegionEvents(region) => Reply::end(menu::region_events(region)),
            MenuAction::InvalidRegion => Reply::end(MSG_INVALID_REGION),
            MenuAction::SupportMenu => Reply::con(menu::support_menu()),
            MenuAction::SupportCallback => Reply::end("We will call you shortly."),
            MenuAction::SupportReport => Reply::end("Issue reported. Thank you."),
            MenuAction::Exit => Reply::end("Thank you for using AVARA"),
            MenuAction::Invalid => Reply::end(MSG_INVALID_TOP),
            MenuAction::InvalidOption => Reply::end(MSG_INVALID_OPTION),
        };
        Ok(reply)
    }

    /// Confirmation branch: initiate payment, then issue the ticket.
    ///
    /// Both a provider failure and a ticket-save failure collapse to the
    /// same user-visible message; the logs distinguish them.
    async fn purchase(&self, phone_number: &str, event: &'static EventRecord) -> Result<Reply> {
        let request = PaymentRequest {
            phone_number,
            amount: event.price,
            account_ref: event.name,
            transaction_desc: "Event Ticket",
        };

        match self.payment.initiate(&request).await {
            Ok(ack) => {
                debug!(
                    event_id = event.id,
                    invoice_id = ack.invoice_id.as_deref().unwrap_or("-"),
                    "payment initiated"
                );
            }
            Err(e) => {
                error!(event_id = event.id, error = %e, "payment initiation failed");
                return Ok(Reply::end(MSG_PAYMENT_FAILED));
            }
        }

        let issued = self
            .pool
            .get()
            .map_err(crate::errors::DispatchError::from)
            .and_then(|conn| issue_ticket(&conn, phone_number, event).map_err(Into::into));

        match issued {
            Ok(code) => Ok(Reply::end(format!(
                "Payment initiated.\nYour Ticket Code: {code}"
            ))),
            Err(e) => {
                error!(event_id = event.id, error = %e, "ticket persistence failed after payment initiation");
                Ok(Reply::end(MSG_PAYMENT_FAILED))
            }
        }
    }

    /// Read path: list the caller's tickets.
    fn list_tickets(&self, phone_number: &str) -> Result<Reply> {
        let conn = self.pool.get()?;
        let tickets = TicketRepo::list_by_phone(&conn, phone_number)?;

        if tickets.is_empty() {
            return Ok(Reply::end("You have no tickets."));
        }

        let list = tickets
            .iter()
            .map(|t| format!("{} - {}", t.event_name, t.ticket_code))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Reply::end(format!("Your Tickets:\n{list}")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
