//! # avara-server
//!
//! Axum HTTP surface for the USSD gateway.
//!
//! - `POST /ussd` — gateway callback; form fields `phoneNumber` and `text`,
//!   plain-text `CON`/`END` body, HTTP 200 always
//! - `GET /health` — liveness probe
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod health;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::{AppState, UssdServer};
pub use shutdown::ShutdownCoordinator;
