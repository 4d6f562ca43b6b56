//! # avara-providers
//!
//! External collaborator clients for the USSD gateway:
//!
//! - [`PaymentInitiator`] — mobile-money STK push initiation (acknowledgement,
//!   not a settlement guarantee)
//! - [`SmsSender`] — SMS gateway delivery
//! - [`SessionNotifier`] — best-effort session-summary SMS wrapper
//!
//! Clients are constructed once at process start and injected into the
//! request path as trait objects, so tests can substitute fakes.

#![deny(unsafe_code)]

pub mod errors;
pub mod notifier;
pub mod payment;
pub mod sms;
pub mod traits;

pub use errors::{ProviderError, Result};
pub use notifier::SessionNotifier;
pub use payment::StkPushClient;
pub use sms::HttpSmsClient;
pub use traits::{PaymentAck, PaymentInitiator, PaymentRequest, SmsSender};
