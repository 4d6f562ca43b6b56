//! # avara-settings
//!
//! Configuration for the AVARA USSD gateway.
//!
//! Loading flow:
//! 1. Start with compiled [`AvaraSettings::default()`]
//! 2. If `~/.avara/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Missing SMS credentials disable SMS delivery; they are not an error.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use types::{AvaraSettings, PaymentEnv, PaymentSettings, ServerSettings, SmsSettings};
