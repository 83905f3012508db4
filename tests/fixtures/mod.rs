//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use team_ranking::types::{NewMatch, TeamId, TeamView};
use team_ranking::{InMemoryStore, MatchManager, RankingEngine, TeamManager};

/// A complete league wired to one store
pub struct TestLeague {
    pub store: Arc<InMemoryStore>,
    pub rankings: Arc<RankingEngine>,
    pub teams: TeamManager,
    pub matches: MatchManager,
}

impl TestLeague {
    pub fn new() -> Self {
        Self::with_store(InMemoryStore::new())
    }

    pub fn with_store(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        let rankings = Arc::new(RankingEngine::new(store.clone()));
        Self {
            teams: TeamManager::new(store.clone(), rankings.clone()),
            matches: MatchManager::new(store.clone(), rankings.clone()),
            store,
            rankings,
        }
    }

    /// Create one team per name, panicking on failure
    pub fn create_teams(&self, names: &[&str]) -> Vec<TeamView> {
        names
            .iter()
            .map(|name| self.teams.create_team(name).expect("team creation failed"))
            .collect()
    }
}

pub fn completed_match(home: TeamId, away: TeamId, home_score: u32, away_score: u32) -> NewMatch {
    NewMatch {
        home_team_id: home,
        away_team_id: away,
        home_score,
        away_score,
        completed: true,
    }
}

pub fn pending_match(home: TeamId, away: TeamId) -> NewMatch {
    NewMatch {
        home_team_id: home,
        away_team_id: away,
        home_score: 0,
        away_score: 0,
        completed: false,
    }
}

/// File path under the system temp dir, removed on drop
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn new(label: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let unique = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "team-ranking-{}-{}-{}.json",
            label,
            std::process::id(),
            unique
        ));
        let _ = std::fs::remove_file(&path);
        Self { path }
    }

    /// Create the file with the given contents
    pub fn with_contents(label: &str, contents: &str) -> Self {
        let file = Self::new(label);
        std::fs::write(&file.path, contents).expect("failed to write scratch file");
        file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
