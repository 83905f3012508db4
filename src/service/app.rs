//! Main application state and service coordination
//!
//! `AppState` builds the record store from configuration and wires the
//! ranking engine and both lifecycle managers to the same store handle.

use crate::config::AppConfig;
use crate::matches::MatchManager;
use crate::metrics::MetricsCollector;
use crate::ranking::RankingEngine;
use crate::store::InMemoryStore;
use crate::teams::TeamManager;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    Storage { message: String },

    #[error("Metrics initialization error: {message}")]
    Metrics { message: String },
}

/// Main application state containing all service components
pub struct AppState {
    config: AppConfig,
    store: Arc<InMemoryStore>,
    rankings: Arc<RankingEngine>,
    teams: Arc<TeamManager>,
    matches: Arc<MatchManager>,
    metrics: Arc<MetricsCollector>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Initialize the application with all dependencies
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        crate::config::validate_config(&config).map_err(|e| ServiceError::Configuration {
            message: e.to_string(),
        })?;

        info!("Initializing team ranking service '{}'", config.service.name);

        let store = match &config.storage.snapshot_path {
            Some(path) => {
                InMemoryStore::with_snapshot(path).map_err(|e| ServiceError::Storage {
                    message: e.to_string(),
                })?
            }
            None => {
                info!("No snapshot path configured, records are kept in memory only");
                InMemoryStore::new()
            }
        };

        Self::with_store(config, Arc::new(store))
    }

    /// Build the state around an existing store
    pub fn with_store(config: AppConfig, store: Arc<InMemoryStore>) -> Result<Self, ServiceError> {
        let metrics = MetricsCollector::new().map_err(|e| ServiceError::Metrics {
            message: e.to_string(),
        })?;

        let rankings = Arc::new(RankingEngine::with_scoring(store.clone(), config.scoring));
        let teams = Arc::new(TeamManager::new(store.clone(), rankings.clone()));
        let matches = Arc::new(MatchManager::new(store.clone(), rankings.clone()));

        let active_teams = store
            .read()
            .map_err(|e| ServiceError::Storage {
                message: e.to_string(),
            })?
            .active_teams()
            .count();
        metrics.set_active_teams(active_teams);

        info!(
            "Scoring table - win: {}, draw: {}, defeat: {}",
            config.scoring.win, config.scoring.draw, config.scoring.defeat
        );

        Ok(Self {
            config,
            store,
            rankings,
            teams,
            matches,
            metrics: Arc::new(metrics),
            started_at: Utc::now(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }

    pub fn rankings(&self) -> &RankingEngine {
        &self.rankings
    }

    pub fn teams(&self) -> &TeamManager {
        &self.teams
    }

    pub fn matches(&self) -> &MatchManager {
        &self.matches
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
