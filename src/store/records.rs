//! Table set for teams, matches and rankings
//!
//! `Records` is the unit a store transaction works on. Lookups and inserts
//! here are plain row operations; domain rules (name uniqueness among active
//! teams, match state) live in the managers.

use crate::error::StoreError;
use crate::types::{Match, MatchId, NewMatch, Ranking, RankingId, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All persisted rows plus the id sequences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    teams: BTreeMap<TeamId, Team>,
    matches: BTreeMap<MatchId, Match>,
    rankings: BTreeMap<RankingId, Ranking>,
    last_team_id: TeamId,
    last_match_id: MatchId,
    last_ranking_id: RankingId,
    /// team id -> ranking id, rebuilt by [`Records::reconcile`] after loading
    #[serde(skip)]
    ranking_by_team: BTreeMap<TeamId, RankingId>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repair derived state after deserializing: rebuild the ranking index
    /// and raise each id sequence to at least the largest key in its table.
    /// Returns true when a sequence had to be raised.
    pub fn reconcile(&mut self) -> Result<bool, StoreError> {
        let mut index = BTreeMap::new();
        for ranking in self.rankings.values() {
            if index.insert(ranking.team_id, ranking.id).is_some() {
                return Err(StoreError::UniqueViolation {
                    table: "rankings",
                    column: "team_id",
                    value: ranking.team_id.to_string(),
                });
            }
        }
        self.ranking_by_team = index;

        let mut raised = false;
        for (sequence, max_key) in [
            (&mut self.last_team_id, self.teams.keys().next_back()),
            (&mut self.last_match_id, self.matches.keys().next_back()),
            (&mut self.last_ranking_id, self.rankings.keys().next_back()),
        ] {
            if let Some(&max_key) = max_key {
                if *sequence < max_key {
                    *sequence = max_key;
                    raised = true;
                }
            }
        }
        Ok(raised)
    }

    // Teams

    /// All team rows, deleted ones included, in id order
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Non-deleted teams in id order
    pub fn active_teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values().filter(|team| !team.is_deleted)
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.get(&team_id)
    }

    pub fn team_mut(&mut self, team_id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(&team_id)
    }

    /// Team by id, ignoring soft-deleted rows
    pub fn active_team(&self, team_id: TeamId) -> Option<&Team> {
        self.team(team_id).filter(|team| !team.is_deleted)
    }

    /// Whether a non-deleted team other than `except` carries `name`
    pub fn active_name_taken(&self, name: &str, except: Option<TeamId>) -> bool {
        self.active_teams()
            .any(|team| team.name == name && Some(team.id) != except)
    }

    /// Whether any team row, deleted or not, carries `name`
    pub fn any_team_named(&self, name: &str) -> bool {
        self.teams.values().any(|team| team.name == name)
    }

    pub fn insert_team(&mut self, name: impl Into<String>) -> Team {
        self.last_team_id += 1;
        let team = Team {
            id: self.last_team_id,
            name: name.into(),
            is_deleted: false,
        };
        self.teams.insert(team.id, team.clone());
        team
    }

    // Matches

    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    pub fn game(&self, match_id: MatchId) -> Option<&Match> {
        self.matches.get(&match_id)
    }

    pub fn game_mut(&mut self, match_id: MatchId) -> Option<&mut Match> {
        self.matches.get_mut(&match_id)
    }

    pub fn insert_match(&mut self, request: &NewMatch) -> Match {
        self.last_match_id += 1;
        let game = Match {
            id: self.last_match_id,
            home_team_id: request.home_team_id,
            away_team_id: request.away_team_id,
            home_score: request.home_score,
            away_score: request.away_score,
            completed: request.completed,
        };
        self.matches.insert(game.id, game.clone());
        game
    }

    pub fn remove_match(&mut self, match_id: MatchId) -> Option<Match> {
        self.matches.remove(&match_id)
    }

    // Rankings

    /// Ranking rows in id order
    pub fn rankings(&self) -> impl Iterator<Item = &Ranking> {
        self.rankings.values()
    }

    pub fn ranking_for_team(&self, team_id: TeamId) -> Option<&Ranking> {
        self.ranking_by_team
            .get(&team_id)
            .and_then(|ranking_id| self.rankings.get(ranking_id))
    }

    /// Insert a zeroed ranking; one ranking per team is enforced here
    pub fn insert_ranking(&mut self, team_id: TeamId) -> Result<Ranking, StoreError> {
        if self.ranking_for_team(team_id).is_some() {
            return Err(StoreError::UniqueViolation {
                table: "rankings",
                column: "team_id",
                value: team_id.to_string(),
            });
        }

        self.last_ranking_id += 1;
        let ranking = Ranking::new(self.last_ranking_id, team_id);
        self.ranking_by_team.insert(team_id, ranking.id);
        self.rankings.insert(ranking.id, ranking.clone());
        Ok(ranking)
    }

    /// Overwrite the counters of an existing ranking row. The row keeps its
    /// team. Returns false if the row is gone.
    pub fn put_ranking(&mut self, ranking: Ranking) -> bool {
        match self.rankings.get_mut(&ranking.id) {
            Some(row) => {
                *row = Ranking {
                    team_id: row.team_id,
                    ..ranking
                };
                true
            }
            None => false,
        }
    }

    pub fn remove_ranking_for_team(&mut self, team_id: TeamId) -> Option<Ranking> {
        let ranking_id = self.ranking_by_team.remove(&team_id)?;
        self.rankings.remove(&ranking_id)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn ranking_count(&self) -> usize {
        self.rankings.len()
    }
}
