//! # avara-store
//!
//! `SQLite` persistence for ticket records.
//!
//! - `r2d2` connection pooling with WAL mode and pragmas set per connection
//! - Embedded versioned migrations (idempotent, transactional)
//! - [`TicketRepo`] — stateless repository, every method takes `&Connection`

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod ticket_repo;

pub use connection::{new_file, new_in_memory, ConnectionConfig, ConnectionPool};
pub use errors::{Result, StoreError};
pub use migrations::run_migrations;
pub use ticket_repo::{NewTicket, TicketRepo, TicketRow};
