//! Ticket issuance.
//!
//! Issuance is optimistic: a ticket is persisted as soon as the payment
//! provider acknowledges the initiation, regardless of whether the charge
//! ultimately settles. Settlement-gated issuance is an open product
//! question tracked in DESIGN.md.

use rusqlite::Connection;

use avara_core::catalog::EventRecord;
use avara_core::ticket_code;
use avara_store::{NewTicket, TicketRepo};

/// Generate a ticket code and persist the ticket record.
///
/// Returns the issued code.
pub fn issue_ticket(
    conn: &Connection,
    phone_number: &str,
    event: &EventRecord,
) -> avara_store::Result<String> {
    let code = ticket_code::generate();
    let _ = TicketRepo::create(
        conn,
        &NewTicket {
            phone_number,
            event_id: event.id,
            event_name: event.name,
            price: event.price,
            ticket_code: &code,
        },
    )?;
    Ok(code)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
