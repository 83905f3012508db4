//! Health checks for the team ranking service
//!
//! Reports store reachability and ranking table consistency, plus league
//! statistics for the `/health` endpoint and the `--health-check` flag.

use crate::service::app::AppState;
use crate::store::Records;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// Gauge encoding used by the metrics collector
    pub fn as_gauge(&self) -> u8 {
        match self {
            HealthStatus::Unhealthy => 0,
            HealthStatus::Degraded => 1,
            HealthStatus::Healthy => 2,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: i64,
    /// Detailed component checks
    pub checks: Vec<ComponentCheck>,
    pub stats: LeagueStats,
}

/// Individual component health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCheck {
    pub name: String,
    pub status: HealthStatus,
    /// Optional detail when not healthy
    pub message: Option<String>,
}

/// Row counts reported by the health check
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LeagueStats {
    pub active_teams: usize,
    pub deleted_teams: usize,
    pub matches: usize,
    pub completed_matches: usize,
    pub rankings: usize,
}

impl LeagueStats {
    pub fn from_records(records: &Records) -> Self {
        let active_teams = records.active_teams().count();
        Self {
            active_teams,
            deleted_teams: records.team_count() - active_teams,
            matches: records.match_count(),
            completed_matches: records.matches().filter(|game| game.completed).count(),
            rankings: records.ranking_count(),
        }
    }
}

impl HealthCheck {
    /// Perform a health check of the service
    pub fn check(app_state: &AppState) -> Self {
        let (store_check, stats, consistency_check) = match app_state.store().read() {
            Ok(records) => (
                ComponentCheck {
                    name: "record_store".to_string(),
                    status: HealthStatus::Healthy,
                    message: None,
                },
                LeagueStats::from_records(&records),
                Self::check_rankings(&records),
            ),
            Err(e) => {
                warn!("Health check could not read the store: {}", e);
                (
                    ComponentCheck {
                        name: "record_store".to_string(),
                        status: HealthStatus::Unhealthy,
                        message: Some(e.to_string()),
                    },
                    LeagueStats::default(),
                    ComponentCheck {
                        name: "ranking_table".to_string(),
                        status: HealthStatus::Unhealthy,
                        message: Some("store unavailable".to_string()),
                    },
                )
            }
        };

        let checks = vec![store_check, consistency_check];
        let status = if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        debug!("Health check completed - status: {}", status);
        app_state.metrics().update_health_status(status.as_gauge());

        let now = chrono::Utc::now();
        HealthCheck {
            status,
            service: app_state.config().service.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: now,
            uptime_seconds: (now - app_state.started_at()).num_seconds(),
            checks,
            stats,
        }
    }

    /// Every active team has a ranking and every ranking adds up
    fn check_rankings(records: &Records) -> ComponentCheck {
        let unranked: Vec<_> = records
            .active_teams()
            .filter(|team| records.ranking_for_team(team.id).is_none())
            .map(|team| team.id)
            .collect();
        let inconsistent: Vec<_> = records
            .rankings()
            .filter(|ranking| !ranking.is_consistent())
            .map(|ranking| ranking.team_id)
            .collect();

        let (status, message) = if unranked.is_empty() && inconsistent.is_empty() {
            (HealthStatus::Healthy, None)
        } else {
            (
                HealthStatus::Degraded,
                Some(format!(
                    "teams without ranking: {:?}, inconsistent rankings: {:?}",
                    unranked, inconsistent
                )),
            )
        };

        ComponentCheck {
            name: "ranking_table".to_string(),
            status,
            message,
        }
    }
}
