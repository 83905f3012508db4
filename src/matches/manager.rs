//! Match lifecycle manager
//!
//! Validates match writes against team existence and match state, and hands
//! completed results to the ranking engine inside the same transaction as the
//! match write.

use crate::error::{LeagueError, Result};
use crate::ranking::RankingEngine;
use crate::store::{InMemoryStore, Records};
use crate::types::{Match, MatchId, MatchUpdate, NewMatch, Side, TeamId};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct MatchManager {
    store: Arc<InMemoryStore>,
    rankings: Arc<RankingEngine>,
}

impl MatchManager {
    pub fn new(store: Arc<InMemoryStore>, rankings: Arc<RankingEngine>) -> Self {
        Self { store, rankings }
    }

    pub fn list_matches(&self) -> Result<Vec<Match>> {
        let records = self.store.read()?;
        Ok(records.matches().cloned().collect())
    }

    pub fn get_match(&self, match_id: MatchId) -> Result<Option<Match>> {
        let records = self.store.read()?;
        Ok(records.game(match_id).cloned())
    }

    /// Record a match between two active teams. A match created as completed
    /// has its result applied immediately.
    pub fn create_match(&self, request: NewMatch) -> Result<Match> {
        info!(
            "Creating match - home: {}, away: {}, score: {}-{}, completed: {}",
            request.home_team_id,
            request.away_team_id,
            request.home_score,
            request.away_score,
            request.completed
        );

        let mut tx = self.store.begin()?;
        ensure_active_team(&tx, Side::Home, request.home_team_id)?;
        ensure_active_team(&tx, Side::Away, request.away_team_id)?;

        let game = tx.insert_match(&request);
        if game.completed {
            self.rankings.apply_match_result_in(&mut tx, &game);
        }
        tx.commit()?;

        info!("Created match {}", game.id);
        Ok(game)
    }

    /// Overwrite scores and completion of a pending match. `Ok(None)` means
    /// the match does not exist. Completing the match applies its result.
    pub fn update_match(&self, match_id: MatchId, update: MatchUpdate) -> Result<Option<Match>> {
        let mut tx = self.store.begin()?;

        let game = match tx.game_mut(match_id) {
            Some(game) => game,
            None => {
                debug!("Update of unknown match {}", match_id);
                return Ok(None);
            }
        };

        if game.completed {
            warn!("Rejected update of concluded match {}", match_id);
            return Err(LeagueError::MatchConcluded { match_id });
        }

        game.home_score = update.home_score;
        game.away_score = update.away_score;
        game.completed = update.completed;
        let game = game.clone();

        if game.completed {
            self.rankings.apply_match_result_in(&mut tx, &game);
        }
        tx.commit()?;

        info!(
            "Updated match {} - score: {}-{}, completed: {}",
            game.id, game.home_score, game.away_score, game.completed
        );
        Ok(Some(game))
    }

    /// Remove a match. Rankings already credited with its result keep it.
    pub fn delete_match(&self, match_id: MatchId) -> Result<bool> {
        let mut tx = self.store.begin()?;
        match tx.remove_match(match_id) {
            Some(game) => {
                tx.commit()?;
                info!("Deleted match {} (completed: {})", match_id, game.completed);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn ensure_active_team(records: &Records, side: Side, team_id: TeamId) -> Result<()> {
    if records.active_team(team_id).is_none() {
        warn!("Rejected match - {} team {} does not exist", side, team_id);
        return Err(LeagueError::UnknownTeam { side, team_id });
    }
    Ok(())
}
