//! # avara-ussd
//!
//! The USSD session-menu dispatcher.
//!
//! Sessions are stateless on the server: the gateway re-sends the full
//! `*`-delimited step path on every request, and [`menu::resolve`] walks
//! the declarative menu tree from the root each time. The dispatcher
//! executes terminal side effects (payment initiation, ticket issuance,
//! ticket listing) and returns a [`avara_core::Reply`].

#![deny(unsafe_code)]

pub mod dispatch;
pub mod errors;
pub mod issue;
pub mod menu;

pub use dispatch::Dispatcher;
pub use errors::{DispatchError, Result};
pub use menu::MenuAction;
