//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
///
/// Answers 503 when a database is configured but does not respond.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.db {
        Some(db) if db.ping().await => Some("up"),
        Some(_) => Some("down"),
        None => None,
    };
    let healthy = database != Some("down");

    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store: state.store.as_str(),
        database,
    };

    if healthy {
        HttpResponse::Ok().json(response)
    } else {
        tracing::warn!("Health check failed: database unreachable");
        HttpResponse::ServiceUnavailable().json(response)
    }
}
