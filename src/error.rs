//! Error types for the team ranking service
//!
//! Library operations return [`LeagueError`], a typed enum whose variants fall
//! into the four [`ErrorKind`]s the HTTP layer maps to status codes. Start-up
//! paths (configuration, binary) use anyhow instead.

use crate::types::{MatchId, Side, TeamId};
use serde::Serialize;
use std::path::PathBuf;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LeagueError>;

/// Coarse classification of a [`LeagueError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    StoreFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::StoreFailure => "store_failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures raised by the record store itself
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to acquire records {0} lock")]
    LockPoisoned(&'static str),

    #[error("Unique constraint violated on {table}.{column}: {value}")]
    UniqueViolation {
        table: &'static str,
        column: &'static str,
        value: String,
    },

    #[error("Snapshot I/O failed for {}: {source}", path.display())]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot encoding failed: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

/// Domain errors for team, match and ranking operations
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: TeamId },

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: MatchId },

    #[error("Ranking not found for team: {team_id}")]
    RankingNotFound { team_id: TeamId },

    #[error("The team name '{name}' already exists")]
    DuplicateTeamName { name: String },

    #[error("{side} team with ID {team_id} does not exist")]
    UnknownTeam { side: Side, team_id: TeamId },

    #[error("Match {match_id} is over and cannot be updated")]
    MatchConcluded { match_id: MatchId },

    #[error("Invalid team data: {reason}")]
    InvalidTeamData { reason: String },

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl LeagueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::TeamNotFound { .. }
            | LeagueError::MatchNotFound { .. }
            | LeagueError::RankingNotFound { .. } => ErrorKind::NotFound,
            LeagueError::DuplicateTeamName { .. }
            | LeagueError::UnknownTeam { .. }
            | LeagueError::MatchConcluded { .. } => ErrorKind::Conflict,
            LeagueError::InvalidTeamData { .. } => ErrorKind::InvalidInput,
            LeagueError::Store(_) => ErrorKind::StoreFailure,
        }
    }
}
