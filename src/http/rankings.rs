//! Ranking table endpoints

use crate::error::LeagueError;
use crate::http::error::{run_blocking, ApiError};
use crate::service::AppState;
use crate::types::{RankingView, TeamId};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// Standings, highest points first
pub async fn list_rankings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RankingView>>, ApiError> {
    let rankings =
        run_blocking(&state, "list_rankings", |app| app.rankings().list_rankings()).await?;
    Ok(Json(rankings))
}

pub async fn get_ranking(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<TeamId>,
) -> Result<Json<RankingView>, ApiError> {
    let ranking = run_blocking(&state, "get_ranking", move |app| {
        app.rankings()
            .get_ranking(team_id)?
            .ok_or(LeagueError::RankingNotFound { team_id })
    })
    .await?;
    Ok(Json(ranking))
}
