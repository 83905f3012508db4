//! Mapping of league errors onto HTTP responses

use crate::error::{ErrorKind, LeagueError};
use crate::service::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, error};

/// Error returned by the API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    League(#[from] LeagueError),

    #[error("Request worker failed: {0}")]
    Worker(#[from] JoinError),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::League(e) => e.kind(),
            ApiError::Worker(_) => ErrorKind::StoreFailure,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorKind,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected ({}): {}", status, self);
        }

        (
            status,
            Json(ErrorBody {
                error: self.kind(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Run a store-backed operation on the blocking pool, recording its duration
/// and error kind. Store commits may write the snapshot file while holding
/// the write lock, so they stay off the async workers.
pub async fn run_blocking<T, F>(
    state: &Arc<AppState>,
    operation: &'static str,
    op: F,
) -> Result<T, ApiError>
where
    F: FnOnce(&AppState) -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let timer = state.metrics().start_timer();
    let worker_state = state.clone();
    let joined = tokio::task::spawn_blocking(move || op(&worker_state)).await;
    state.metrics().record_operation(operation, timer.stop());

    let result = match joined {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => Err(ApiError::from(e)),
    };
    if let Err(e) = &result {
        state.metrics().record_error(e.kind());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LeagueError::MatchNotFound { match_id: 9 }, StatusCode::NOT_FOUND),
            (
                LeagueError::DuplicateTeamName {
                    name: "Team A".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                LeagueError::InvalidTeamData {
                    reason: "no teams provided".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                LeagueError::Store(StoreError::LockPoisoned("write")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status(), expected);
        }
    }

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(crate::config::AppConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_run_blocking_records_error_kind() {
        let state = test_state();

        let err = run_blocking(&state, "get_team", |_| -> crate::error::Result<()> {
            Err(LeagueError::TeamNotFound { team_id: 3 })
        })
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            state
                .metrics()
                .api()
                .errors_total
                .with_label_values(&["not_found"])
                .get(),
            1
        );
    }

    #[tokio::test]
    async fn test_run_blocking_leaves_async_thread() {
        let state = test_state();
        let caller = std::thread::current().id();

        let worker = run_blocking(&state, "list_teams", |_| Ok(std::thread::current().id()))
            .await
            .unwrap();

        assert_ne!(worker, caller);
    }

    #[tokio::test]
    async fn test_panicking_worker_is_500() {
        let state = test_state();

        let err = run_blocking(&state, "create_team", |_| -> crate::error::Result<()> {
            panic!("worker exploded")
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Worker(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
