//! Health check endpoint
//!
//! Reports whether the server is running and whether its store answers.
//!
//! # Endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! # Response
//!
//! ```json
//! {
//!   "success": true,
//!   "data": {
//!     "status": "healthy",
//!     "version": "0.1.0",
//!     "storage": "postgres",
//!     "database": "connected"
//!   }
//! }
//! ```

use crate::{app::AppState, response::ApiResponse};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// Storage backend name
    pub storage: String,

    /// `connected` or `disconnected`
    pub database: String,
}

/// Health check handler
///
/// Always answers 200; a store that fails its ping reports `degraded`.
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let store = state.service.store();

    let database_status = match store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health check ping failed");
            "disconnected"
        }
    };

    ApiResponse::ok(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: store.backend().to_string(),
        database: database_status.to_string(),
    })
}
