//! Ticket repository — stateless, every method takes `&Connection`.
//!
//! Duplicate tickets for the same phone+event are allowed by design, and
//! ticket codes carry no uniqueness constraint. Both are preserved from
//! the product's original behavior (see DESIGN.md).

use rusqlite::{params, Connection};

use crate::errors::Result;

/// Fields for inserting a new ticket.
pub struct NewTicket<'a> {
    /// Buyer's phone number (gateway-provided, E.164-ish).
    pub phone_number: &'a str,
    /// Stable event identifier.
    pub event_id: &'a str,
    /// Event display name.
    pub event_name: &'a str,
    /// Price paid, in KES.
    pub price: u32,
    /// The 5-digit ticket code.
    pub ticket_code: &'a str,
}

/// A persisted ticket record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketRow {
    /// Row id (insertion order).
    pub id: i64,
    /// Buyer's phone number.
    pub phone_number: String,
    /// Stable event identifier.
    pub event_id: String,
    /// Event display name.
    pub event_name: String,
    /// Price paid, in KES.
    pub price: u32,
    /// The 5-digit ticket code.
    pub ticket_code: String,
    /// Lifecycle status (`"active"` on creation).
    pub status: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Ticket repository.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket record with status `active`.
    pub fn create(conn: &Connection, ticket: &NewTicket<'_>) -> Result<TicketRow> {
        let now = chrono::Utc::now().to_rfc3339();
        let _ = conn.execute(
            "INSERT INTO tickets (phone_number, event_id, event_name, price, ticket_code, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6)",
            params![
                ticket.phone_number,
                ticket.event_id,
                ticket.event_name,
                ticket.price,
                ticket.ticket_code,
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(TicketRow {
            id,
            phone_number: ticket.phone_number.to_string(),
            event_id: ticket.event_id.to_string(),
            event_name: ticket.event_name.to_string(),
            price: ticket.price,
            ticket_code: ticket.ticket_code.to_string(),
            status: "active".to_string(),
            created_at: now,
        })
    }

    /// List all tickets for a phone number, in insertion order.
    pub fn list_by_phone(conn: &Connection, phone_number: &str) -> Result<Vec<TicketRow>> {
        let mut stmt = conn.prepare(
            "SELECT id, phone_number, event_id, event_name, price, ticket_code, status, created_at
             FROM tickets WHERE phone_number = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![phone_number], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Count tickets for a phone number.
    pub fn count_by_phone(conn: &Connection, phone_number: &str) -> Result<u64> {
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM tickets WHERE phone_number = ?1",
            params![phone_number],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TicketRow> {
        Ok(TicketRow {
            id: row.get("id")?,
            phone_number: row.get("phone_number")?,
            event_id: row.get("event_id")?,
            event_name: row.get("event_name")?,
            price: row.get("price")?,
            ticket_code: row.get("ticket_code")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_ticket<'a>(code: &'a str) -> NewTicket<'a> {
        NewTicket {
            phone_number: "+254700000001",
            event_id: "E1",
            event_name: "Nairobi Tech Fest",
            price: 250,
            ticket_code: code,
        }
    }

    #[test]
    fn create_ticket() {
        let conn = setup();
        let row = TicketRepo::create(&conn, &sample_ticket("12345")).unwrap();

        assert_eq!(row.event_id, "E1");
        assert_eq!(row.price, 250);
        assert_eq!(row.ticket_code, "12345");
        assert_eq!(row.status, "active");
        assert!(!row.created_at.is_empty());
    }

    #[test]
    fn list_by_phone_in_insertion_order() {
        let conn = setup();
        TicketRepo::create(&conn, &sample_ticket("11111")).unwrap();
        TicketRepo::create(&conn, &sample_ticket("22222")).unwrap();
        TicketRepo::create(&conn, &sample_ticket("33333")).unwrap();

        let rows = TicketRepo::list_by_phone(&conn, "+254700000001").unwrap();
        let codes: Vec<&str> = rows.iter().map(|r| r.ticket_code.as_str()).collect();
        assert_eq!(codes, vec!["11111", "22222", "33333"]);
    }

    #[test]
    fn list_by_phone_scoped_to_number() {
        let conn = setup();
        TicketRepo::create(&conn, &sample_ticket("11111")).unwrap();
        TicketRepo::create(
            &conn,
            &NewTicket {
                phone_number: "+254700000002",
                ..sample_ticket("22222")
            },
        )
        .unwrap();

        let rows = TicketRepo::list_by_phone(&conn, "+254700000001").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticket_code, "11111");
    }

    #[test]
    fn list_by_phone_empty() {
        let conn = setup();
        let rows = TicketRepo::list_by_phone(&conn, "+254799999999").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn duplicate_purchases_both_persist() {
        // Two tickets for the same phone+event are allowed by design.
        let conn = setup();
        TicketRepo::create(&conn, &sample_ticket("11111")).unwrap();
        TicketRepo::create(&conn, &sample_ticket("22222")).unwrap();

        let rows = TicketRepo::list_by_phone(&conn, "+254700000001").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event_id, rows[1].event_id);
        assert_ne!(rows[0].ticket_code, rows[1].ticket_code);
    }

    #[test]
    fn count_by_phone() {
        let conn = setup();
        assert_eq!(TicketRepo::count_by_phone(&conn, "+254700000001").unwrap(), 0);
        TicketRepo::create(&conn, &sample_ticket("11111")).unwrap();
        TicketRepo::create(&conn, &sample_ticket("22222")).unwrap();
        assert_eq!(TicketRepo::count_by_phone(&conn, "+254700000001").unwrap(), 2);
    }
}
