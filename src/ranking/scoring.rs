//! Points table and match outcome classification

use crate::types::Ranking;
use serde::{Deserialize, Serialize};

/// Points awarded per result. Defaults to the association football table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTable {
    pub win: u32,
    pub draw: u32,
    pub defeat: u32,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            defeat: 0,
        }
    }
}

/// Outcome of a match from the home team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl MatchOutcome {
    pub fn from_scores(home_score: u32, away_score: u32) -> Self {
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// Per-team results as (home, away)
    pub fn team_results(&self) -> (TeamResult, TeamResult) {
        match self {
            MatchOutcome::HomeWin => (TeamResult::Victory, TeamResult::Defeat),
            MatchOutcome::AwayWin => (TeamResult::Defeat, TeamResult::Victory),
            MatchOutcome::Draw => (TeamResult::Draw, TeamResult::Draw),
        }
    }
}

/// A single team's result in one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamResult {
    Victory,
    Draw,
    Defeat,
}

impl ScoringTable {
    pub fn points_for(&self, result: TeamResult) -> u32 {
        match result {
            TeamResult::Victory => self.win,
            TeamResult::Draw => self.draw,
            TeamResult::Defeat => self.defeat,
        }
    }

    /// Count one played game with `result` on `ranking`
    pub fn record(&self, ranking: &mut Ranking, result: TeamResult) {
        ranking.played += 1;
        ranking.points += self.points_for(result);
        match result {
            TeamResult::Victory => ranking.victories += 1,
            TeamResult::Draw => ranking.draws += 1,
            TeamResult::Defeat => ranking.defeats += 1,
        }
    }
}
