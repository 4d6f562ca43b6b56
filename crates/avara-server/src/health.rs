//! `/health` endpoint.

use serde::Serialize;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is running.
    pub status: &'static str,
}

/// Build the health response.
pub fn health_check() -> HealthResponse {
    HealthResponse { status: "ok" }
}
