//! Match endpoints

use crate::error::LeagueError;
use crate::http::error::{run_blocking, ApiError};
use crate::service::AppState;
use crate::types::{Match, MatchId, MatchUpdate, NewMatch};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

pub async fn list_matches(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Match>>, ApiError> {
    let matches = run_blocking(&state, "list_matches", |app| app.matches().list_matches()).await?;
    Ok(Json(matches))
}

pub async fn get_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<MatchId>,
) -> Result<Json<Match>, ApiError> {
    let game = run_blocking(&state, "get_match", move |app| {
        app.matches()
            .get_match(match_id)?
            .ok_or(LeagueError::MatchNotFound { match_id })
    })
    .await?;
    Ok(Json(game))
}

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewMatch>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let game = run_blocking(&state, "create_match", move |app| {
        app.matches().create_match(request)
    })
    .await?;
    state.metrics().record_match_recorded(game.completed);
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn update_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<MatchId>,
    Json(update): Json<MatchUpdate>,
) -> Result<Json<Match>, ApiError> {
    let game = run_blocking(&state, "update_match", move |app| {
        app.matches()
            .update_match(match_id, update)?
            .ok_or(LeagueError::MatchNotFound { match_id })
    })
    .await?;

    // Only pending matches can be updated, so a completed result is new.
    if game.completed {
        state.metrics().record_result_applied();
    }
    Ok(Json(game))
}

pub async fn delete_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<MatchId>,
) -> Result<StatusCode, ApiError> {
    run_blocking(&state, "delete_match", move |app| {
        if app.matches().delete_match(match_id)? {
            Ok(())
        } else {
            Err(LeagueError::MatchNotFound { match_id })
        }
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
