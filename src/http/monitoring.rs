//! Health and Prometheus endpoints

use crate::service::{AppState, HealthCheck, HealthStatus};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;
use tracing::{debug, error};

/// Detailed health check; 503 only when the store is unreachable
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    debug!("Health check requested");

    let health = match tokio::task::spawn_blocking(move || HealthCheck::check(&state)).await {
        Ok(health) => health,
        Err(e) => {
            error!("Health check worker failed: {}", e);
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };
    let status = match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(health)).into_response()
}

/// Prometheus metrics in text exposition format
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let metric_families = state.metrics().registry().gather();
    let encoder = TextEncoder::new();

    match encoder.encode_to_string(&metric_families) {
        Ok(body) => {
            debug!("Serving {} metric families", metric_families.len());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, encoder.format_type().to_string())],
                body,
            )
        }
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain".to_string())],
                "Failed to encode metrics".to_string(),
            )
        }
    }
}
