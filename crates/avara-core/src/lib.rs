//! # avara-core
//!
//! Core types shared across the AVARA USSD gateway:
//!
//! - [`Reply`] — the two-state session signal (`CON` continue / `END` terminate)
//! - [`catalog`] — the static event/region catalog, single source of truth for
//!   both the per-region and the flattened global numbering schemes
//! - [`ticket_code`] — 5-digit ticket code generation

#![deny(unsafe_code)]

pub mod catalog;
pub mod reply;
pub mod ticket_code;

pub use catalog::{EventRecord, Region};
pub use reply::Reply;
