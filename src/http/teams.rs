//! Team endpoints

use crate::error::LeagueError;
use crate::http::error::{run_blocking, ApiError};
use crate::service::AppState;
use crate::types::{TeamId, TeamPayload, TeamView};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Body of `POST /api/teams/import`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    pub path: PathBuf,
}

pub async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TeamView>>, ApiError> {
    let teams = run_blocking(&state, "list_teams", |app| app.teams().list_teams()).await?;
    Ok(Json(teams))
}

pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<TeamId>,
) -> Result<Json<TeamView>, ApiError> {
    let team = run_blocking(&state, "get_team", move |app| {
        app.teams()
            .get_team(team_id)?
            .ok_or(LeagueError::TeamNotFound { team_id })
    })
    .await?;
    Ok(Json(team))
}

pub async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TeamPayload>,
) -> Result<(StatusCode, Json<TeamView>), ApiError> {
    let team = run_blocking(&state, "create_team", move |app| {
        app.teams().create_team(&payload.name)
    })
    .await?;
    state.metrics().record_teams_created(1);
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn update_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<TeamId>,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<TeamView>, ApiError> {
    let team = run_blocking(&state, "update_team", move |app| {
        app.teams()
            .update_team(team_id, &payload.name)?
            .ok_or(LeagueError::TeamNotFound { team_id })
    })
    .await?;
    Ok(Json(team))
}

pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<TeamId>,
) -> Result<StatusCode, ApiError> {
    run_blocking(&state, "delete_team", move |app| {
        if app.teams().delete_team(team_id)? {
            Ok(())
        } else {
            Err(LeagueError::TeamNotFound { team_id })
        }
    })
    .await?;
    state.metrics().record_team_deleted();
    Ok(StatusCode::NO_CONTENT)
}

pub async fn import_teams(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImportRequest>,
) -> Result<(StatusCode, Json<Vec<TeamView>>), ApiError> {
    let created = run_blocking(&state, "import_teams", move |app| {
        app.teams().import_teams_from_file(&request.path)
    })
    .await?;
    state.metrics().record_teams_created(created.len());
    Ok((StatusCode::CREATED, Json(created)))
}
