//! HTTP API for the team ranking service
//!
//! JSON endpoints for teams, matches and the ranking table, plus `/health`
//! and Prometheus `/metrics`, served with Axum.

pub mod error;
pub mod matches;
pub mod monitoring;
pub mod rankings;
pub mod teams;

pub use error::ApiError;

use crate::service::AppState;
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

/// Build the router with every API route
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/teams", get(teams::list_teams).post(teams::create_team))
        .route("/api/teams/import", post(teams::import_teams))
        .route(
            "/api/teams/{id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route(
            "/api/matches",
            get(matches::list_matches).post(matches::create_match),
        )
        .route(
            "/api/matches/{id}",
            get(matches::get_match)
                .put(matches::update_match)
                .delete(matches::delete_match),
        )
        .route("/api/rankings", get(rankings::list_rankings))
        .route("/api/rankings/{team_id}", get(rankings::get_ranking))
        .route("/health", get(monitoring::health))
        .route("/metrics", get(monitoring::metrics))
        .with_state(state)
}

/// API server with an externally triggered graceful shutdown
pub struct ApiServer {
    state: Arc<AppState>,
    shutdown_tx: watch::Sender<bool>,
}

impl ApiServer {
    pub fn new(state: Arc<AppState>) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self { state, shutdown_tx }
    }

    /// Bind the configured address and serve until [`ApiServer::stop`]
    pub async fn start(&self) -> Result<()> {
        let addr = self.state.config().bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve_on(&self, listener: TcpListener) -> Result<()> {
        info!("HTTP server listening on http://{}", listener.local_addr()?);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, router(self.state.clone()))
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stopped| *stopped).await;
                info!("HTTP server shutdown signal received");
            })
            .await
            .context("HTTP server failed")?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Ask a running server to finish in-flight requests and exit
    pub fn stop(&self) {
        info!("Stopping HTTP server...");
        self.shutdown_tx.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::ServiceExt; // for oneshot

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(AppConfig::default()).expect("Failed to build state"))
    }

    #[tokio::test]
    async fn test_unknown_team_is_404_json() {
        let app = router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/teams/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Team not found: 42");
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let state = test_state();
        state.metrics().record_teams_created(1);
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("text/plain"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("team_ranking_teams_created_total"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_server_stops_on_signal() {
        let server = Arc::new(ApiServer::new(test_state()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let handle = tokio::spawn({
            let server = server.clone();
            async move { server.serve_on(listener).await }
        });
        server.stop();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
