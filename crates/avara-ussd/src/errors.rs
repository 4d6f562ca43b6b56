//! Dispatcher error types.
//!
//! These never cross the HTTP boundary: the server layer converts any
//! [`DispatchError`] into the generic terminal message and logs the detail.

use thiserror::Error;

/// Internal dispatcher failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Ticket store failure.
    #[error("store error: {0}")]
    Store(#[from] avara_store::StoreError),

    /// Connection pool failure.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
