//! Team lifecycle manager
//!
//! Enforces name uniqueness among active teams, soft-deletes teams and keeps
//! each team's ranking row in step with the team itself.

use crate::error::{LeagueError, Result};
use crate::ranking::RankingEngine;
use crate::store::InMemoryStore;
use crate::teams::import;
use crate::types::{TeamId, TeamPayload, TeamView};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct TeamManager {
    store: Arc<InMemoryStore>,
    rankings: Arc<RankingEngine>,
}

impl TeamManager {
    pub fn new(store: Arc<InMemoryStore>, rankings: Arc<RankingEngine>) -> Self {
        Self { store, rankings }
    }

    /// Active teams in id order
    pub fn list_teams(&self) -> Result<Vec<TeamView>> {
        let records = self.store.read()?;
        Ok(records.active_teams().map(TeamView::from).collect())
    }

    pub fn get_team(&self, team_id: TeamId) -> Result<Option<TeamView>> {
        let records = self.store.read()?;
        Ok(records.active_team(team_id).map(TeamView::from))
    }

    /// Create a team together with its zeroed ranking
    pub fn create_team(&self, name: &str) -> Result<TeamView> {
        let mut tx = self.store.begin()?;

        if tx.active_name_taken(name, None) {
            warn!("Rejected team creation - name '{}' already exists", name);
            return Err(LeagueError::DuplicateTeamName {
                name: name.to_string(),
            });
        }

        let team = tx.insert_team(name);
        self.rankings.initialize_ranking_in(&mut tx, team.id)?;
        tx.commit()?;

        info!("Created team {} '{}'", team.id, team.name);
        Ok(TeamView::from(&team))
    }

    /// Rename an active team. `Ok(None)` means the team does not exist.
    pub fn update_team(&self, team_id: TeamId, name: &str) -> Result<Option<TeamView>> {
        let mut tx = self.store.begin()?;

        if tx.active_team(team_id).is_none() {
            debug!("Update of unknown team {}", team_id);
            return Ok(None);
        }

        if tx.active_name_taken(name, Some(team_id)) {
            warn!(
                "Rejected rename of team {} - name '{}' already exists",
                team_id, name
            );
            return Err(LeagueError::DuplicateTeamName {
                name: name.to_string(),
            });
        }

        let view = match tx.team_mut(team_id) {
            Some(team) => {
                team.name = name.to_string();
                TeamView::from(&*team)
            }
            None => return Ok(None),
        };
        tx.commit()?;

        info!("Renamed team {} to '{}'", team_id, name);
        Ok(Some(view))
    }

    /// Soft-delete a team and drop its ranking. Returns false if there was no
    /// active team with that id.
    pub fn delete_team(&self, team_id: TeamId) -> Result<bool> {
        let mut tx = self.store.begin()?;

        if tx.active_team(team_id).is_none() {
            debug!("Delete of unknown team {}", team_id);
            return Ok(false);
        }

        self.rankings.delete_ranking_in(&mut tx, team_id);
        if let Some(team) = tx.team_mut(team_id) {
            team.is_deleted = true;
        }
        tx.commit()?;

        info!("Soft-deleted team {}", team_id);
        Ok(true)
    }

    /// Create every entry whose name no team row (deleted or not) already
    /// carries, each with a ranking. Returns the created teams.
    pub fn bulk_create_teams(&self, entries: Vec<TeamPayload>) -> Result<Vec<TeamView>> {
        if entries.is_empty() {
            return Err(LeagueError::InvalidTeamData {
                reason: "no teams provided".to_string(),
            });
        }

        let mut tx = self.store.begin()?;
        let mut seen = HashSet::new();
        let mut created = Vec::new();

        for entry in entries {
            if tx.any_team_named(&entry.name) || !seen.insert(entry.name.clone()) {
                debug!("Skipping existing team '{}' in bulk import", entry.name);
                continue;
            }

            let team = tx.insert_team(entry.name);
            self.rankings.initialize_ranking_in(&mut tx, team.id)?;
            created.push(TeamView::from(&team));
        }
        tx.commit()?;

        info!("Bulk import created {} teams", created.len());
        Ok(created)
    }

    /// Bulk-create teams from a JSON import file
    pub fn import_teams_from_file(&self, path: &Path) -> Result<Vec<TeamView>> {
        info!("Importing teams from {}", path.display());
        let entries = import::read_team_file(path)?;
        self.bulk_create_teams(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn setup() -> (Arc<InMemoryStore>, Arc<RankingEngine>, TeamManager) {
        let store = Arc::new(InMemoryStore::new());
        let rankings = Arc::new(RankingEngine::new(store.clone()));
        let teams = TeamManager::new(store.clone(), rankings.clone());
        (store, rankings, teams)
    }

    #[test]
    fn test_create_team_initializes_ranking() {
        let (_store, rankings, teams) = setup();
        let team = teams.create_team("Team A").unwrap();

        assert_eq!(team.name, "Team A");
        let ranking = rankings.get_ranking(team.team_id).unwrap().unwrap();
        assert_eq!(ranking.team_name, "Team A");
        assert_eq!(ranking.points, 0);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (store, _rankings, teams) = setup();
        teams.create_team("Team A").unwrap();

        let err = teams.create_team("Team A").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let records = store.read().unwrap();
        assert_eq!(records.teams().filter(|t| t.name == "Team A").count(), 1);
        assert_eq!(records.ranking_count(), 1);
    }

    #[test]
    fn test_name_reusable_after_delete() {
        let (_store, _rankings, teams) = setup();
        let first = teams.create_team("Team A").unwrap();
        teams.delete_team(first.team_id).unwrap();

        let second = teams.create_team("Team A").unwrap();
        assert_ne!(first.team_id, second.team_id);
    }

    #[test]
    fn test_update_team() {
        let (_store, rankings, teams) = setup();
        let a = teams.create_team("Team A").unwrap();
        teams.create_team("Team B").unwrap();

        let err = teams.update_team(a.team_id, "Team B").unwrap_err();
        assert!(matches!(err, LeagueError::DuplicateTeamName { .. }));

        // Renaming to its own name is not a conflict
        assert!(teams.update_team(a.team_id, "Team A").unwrap().is_some());

        let renamed = teams.update_team(a.team_id, "Team C").unwrap().unwrap();
        assert_eq!(renamed.name, "Team C");
        assert_eq!(
            rankings.get_ranking(a.team_id).unwrap().unwrap().team_name,
            "Team C"
        );
    }

    #[test]
    fn test_update_missing_or_deleted_team() {
        let (_store, _rankings, teams) = setup();
        assert!(teams.update_team(7, "Team X").unwrap().is_none());

        let a = teams.create_team("Team A").unwrap();
        teams.delete_team(a.team_id).unwrap();
        assert!(teams.update_team(a.team_id, "Team X").unwrap().is_none());
    }

    #[test]
    fn test_delete_team_soft_deletes_and_drops_ranking() {
        let (store, rankings, teams) = setup();
        let a = teams.create_team("Team A").unwrap();

        assert!(teams.delete_team(a.team_id).unwrap());
        assert!(teams.get_team(a.team_id).unwrap().is_none());
        assert!(rankings.get_ranking(a.team_id).unwrap().is_none());
        assert!(teams.list_teams().unwrap().is_empty());

        let records = store.read().unwrap();
        assert!(records.team(a.team_id).unwrap().is_deleted);
    }

    #[test]
    fn test_delete_missing_team_is_noop() {
        let (_store, _rankings, teams) = setup();
        assert!(!teams.delete_team(3).unwrap());
    }

    #[test]
    fn test_bulk_create_skips_existing_names() {
        let (_store, rankings, teams) = setup();
        teams.create_team("Team A").unwrap();
        let deleted = teams.create_team("Team Old").unwrap();
        teams.delete_team(deleted.team_id).unwrap();

        let created = teams
            .bulk_create_teams(vec![
                TeamPayload::new("Team A"),
                TeamPayload::new("Team B"),
                TeamPayload::new("Team Old"),
                TeamPayload::new("Team C"),
                TeamPayload::new("Team B"),
            ])
            .unwrap();

        let names: Vec<_> = created.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Team B", "Team C"]);
        for team in &created {
            assert!(rankings.get_ranking(team.team_id).unwrap().is_some());
        }
        assert_eq!(teams.list_teams().unwrap().len(), 3);
    }

    #[test]
    fn test_bulk_create_empty_rejected() {
        let (_store, _rankings, teams) = setup();
        let err = teams.bulk_create_teams(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
