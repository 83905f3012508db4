//! Common types used throughout the ranking service

use serde::{Deserialize, Serialize};

/// Unique identifier for teams
pub type TeamId = i64;

/// Unique identifier for matches
pub type MatchId = i64;

/// Unique identifier for ranking rows
pub type RankingId = i64;

/// Which side of a match a team played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "Home"),
            Side::Away => write!(f, "Away"),
        }
    }
}

/// A team row. Deleted teams keep their row so match history stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub is_deleted: bool,
}

/// A match row between two teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: u32,
    pub away_score: u32,
    /// Final scores; the match can no longer be modified
    pub completed: bool,
}

/// Aggregate standings for one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub id: RankingId,
    pub team_id: TeamId,
    pub points: u32,
    pub played: u32,
    pub victories: u32,
    pub draws: u32,
    pub defeats: u32,
}

impl Ranking {
    /// Create a zeroed ranking row for a team
    pub fn new(id: RankingId, team_id: TeamId) -> Self {
        Self {
            id,
            team_id,
            points: 0,
            played: 0,
            victories: 0,
            draws: 0,
            defeats: 0,
        }
    }

    /// Whether every played game is accounted for as a win, draw or defeat
    pub fn is_consistent(&self) -> bool {
        self.played == self.victories + self.draws + self.defeats
    }
}

/// Public projection of a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamView {
    pub team_id: TeamId,
    pub name: String,
}

impl From<&Team> for TeamView {
    fn from(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
        }
    }
}

/// Ranking joined with its team's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingView {
    pub team_id: TeamId,
    pub team_name: String,
    pub points: u32,
    pub played: u32,
    pub victories: u32,
    pub draws: u32,
    pub defeats: u32,
}

impl RankingView {
    pub fn new(ranking: &Ranking, team_name: impl Into<String>) -> Self {
        Self {
            team_id: ranking.team_id,
            team_name: team_name.into(),
            points: ranking.points,
            played: ranking.played,
            victories: ranking.victories,
            draws: ranking.draws,
            defeats: ranking.defeats,
        }
    }
}

/// Team name payload, used for create, rename and bulk import entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPayload {
    pub name: String,
}

impl TeamPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request to record a new match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub completed: bool,
}

/// Score and status update for an existing match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchUpdate {
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub completed: bool,
}
