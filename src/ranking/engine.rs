//! Ranking engine: ranking row lifecycle and match result application
//!
//! Every operation comes in two forms. The plain form opens and commits its
//! own store transaction; the `_in` form works on a transaction owned by the
//! caller, which is how the team and match managers keep their multi-row
//! writes atomic.

use crate::error::Result;
use crate::ranking::scoring::{MatchOutcome, ScoringTable, TeamResult};
use crate::store::{InMemoryStore, Records};
use crate::types::{Match, Ranking, RankingView, TeamId};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct RankingEngine {
    store: Arc<InMemoryStore>,
    scoring: ScoringTable,
}

impl RankingEngine {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self::with_scoring(store, ScoringTable::default())
    }

    pub fn with_scoring(store: Arc<InMemoryStore>, scoring: ScoringTable) -> Self {
        Self { store, scoring }
    }

    pub fn scoring(&self) -> &ScoringTable {
        &self.scoring
    }

    /// Insert a zeroed ranking for `team_id`
    pub fn initialize_ranking(&self, team_id: TeamId) -> Result<Ranking> {
        let mut tx = self.store.begin()?;
        let ranking = self.initialize_ranking_in(&mut tx, team_id)?;
        tx.commit()?;
        Ok(ranking)
    }

    pub fn initialize_ranking_in(&self, records: &mut Records, team_id: TeamId) -> Result<Ranking> {
        let ranking = records.insert_ranking(team_id)?;
        debug!("Initialized ranking {} for team {}", ranking.id, team_id);
        Ok(ranking)
    }

    /// Remove the ranking for `team_id`. Returns false if there was none.
    pub fn delete_ranking(&self, team_id: TeamId) -> Result<bool> {
        let mut tx = self.store.begin()?;
        let removed = self.delete_ranking_in(&mut tx, team_id);
        if removed {
            tx.commit()?;
        }
        Ok(removed)
    }

    pub fn delete_ranking_in(&self, records: &mut Records, team_id: TeamId) -> bool {
        match records.remove_ranking_for_team(team_id) {
            Some(ranking) => {
                debug!("Deleted ranking {} for team {}", ranking.id, team_id);
                true
            }
            None => false,
        }
    }

    pub fn get_ranking(&self, team_id: TeamId) -> Result<Option<RankingView>> {
        let records = self.store.read()?;
        Ok(records
            .ranking_for_team(team_id)
            .and_then(|ranking| project(&records, ranking)))
    }

    /// Standings ordered by points, highest first. Equal points keep ranking
    /// row order.
    pub fn list_rankings(&self) -> Result<Vec<RankingView>> {
        let records = self.store.read()?;
        let mut table: Vec<RankingView> = records
            .rankings()
            .filter_map(|ranking| project(&records, ranking))
            .collect();

        table.sort_by(|a, b| b.points.cmp(&a.points));
        Ok(table)
    }

    /// Apply a match's final score to both teams' rankings. Returns false,
    /// changing nothing, when either team has no ranking row.
    ///
    /// This does not check whether the match was already applied; calling it
    /// twice counts the result twice.
    pub fn apply_match_result(&self, game: &Match) -> Result<bool> {
        let mut tx = self.store.begin()?;
        let applied = self.apply_match_result_in(&mut tx, game);
        if applied {
            tx.commit()?;
        }
        Ok(applied)
    }

    pub fn apply_match_result_in(&self, records: &mut Records, game: &Match) -> bool {
        if records.ranking_for_team(game.home_team_id).is_none()
            || records.ranking_for_team(game.away_team_id).is_none()
        {
            warn!(
                "Skipping result of match {} - missing ranking for team {} or {}",
                game.id, game.home_team_id, game.away_team_id
            );
            return false;
        }

        let outcome = MatchOutcome::from_scores(game.home_score, game.away_score);
        let (home_result, away_result) = outcome.team_results();

        // Home first, then away re-read, so a team listed on both sides
        // accumulates both results on its single row.
        self.record_result(records, game.home_team_id, home_result);
        self.record_result(records, game.away_team_id, away_result);

        info!(
            "Applied match {} result {}-{} ({:?}) to teams {} and {}",
            game.id, game.home_score, game.away_score, outcome, game.home_team_id, game.away_team_id
        );
        true
    }

    fn record_result(&self, records: &mut Records, team_id: TeamId, result: TeamResult) {
        if let Some(mut ranking) = records.ranking_for_team(team_id).cloned() {
            self.scoring.record(&mut ranking, result);
            records.put_ranking(ranking);
        }
    }
}

fn project(records: &Records, ranking: &Ranking) -> Option<RankingView> {
    records
        .team(ranking.team_id)
        .map(|team| RankingView::new(ranking, team.name.as_str()))
}
