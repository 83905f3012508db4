//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the team ranking service:
//! league activity counters and API error/latency tracking.

use crate::error::ErrorKind;
use anyhow::Result;
use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the ranking service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Team, match and ranking activity
    league_metrics: LeagueMetrics,

    /// API request metrics
    api_metrics: ApiMetrics,
}

/// League activity metrics
#[derive(Clone)]
pub struct LeagueMetrics {
    /// Total teams created (single and bulk)
    pub teams_created_total: IntCounter,

    /// Total teams soft-deleted
    pub teams_deleted_total: IntCounter,

    /// Current number of active teams
    pub active_teams: IntGauge,

    /// Total matches recorded, by initial status
    pub matches_recorded_total: IntCounterVec,

    /// Total match results applied to the ranking table
    pub results_applied_total: IntCounter,
}

/// API-level metrics
#[derive(Clone)]
pub struct ApiMetrics {
    /// Failed operations by error kind
    pub errors_total: IntCounterVec,

    /// Operation durations
    pub operation_duration: HistogramVec,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,
}

impl MetricsCollector {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let league_metrics = LeagueMetrics::new(&registry)?;
        let api_metrics = ApiMetrics::new(&registry)?;

        Ok(Self {
            registry,
            league_metrics,
            api_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn league(&self) -> &LeagueMetrics {
        &self.league_metrics
    }

    pub fn api(&self) -> &ApiMetrics {
        &self.api_metrics
    }

    pub fn record_teams_created(&self, count: usize) {
        self.league_metrics.teams_created_total.inc_by(count as u64);
        self.league_metrics.active_teams.add(count as i64);
    }

    pub fn record_team_deleted(&self) {
        self.league_metrics.teams_deleted_total.inc();
        self.league_metrics.active_teams.dec();
    }

    pub fn set_active_teams(&self, count: usize) {
        self.league_metrics.active_teams.set(count as i64);
    }

    /// Record a new match; completed matches also count as an applied result
    pub fn record_match_recorded(&self, completed: bool) {
        let status = if completed { "completed" } else { "pending" };
        self.league_metrics
            .matches_recorded_total
            .with_label_values(&[status])
            .inc();

        if completed {
            self.record_result_applied();
        }
    }

    pub fn record_result_applied(&self) {
        self.league_metrics.results_applied_total.inc();
    }

    pub fn record_error(&self, kind: ErrorKind) {
        self.api_metrics
            .errors_total
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    /// Record how long an operation took
    pub fn record_operation(&self, operation: &str, duration: Duration) {
        self.api_metrics
            .operation_duration
            .with_label_values(&[operation])
            .observe(duration.as_secs_f64());
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.api_metrics.health_status.set(status as i64);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl LeagueMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let teams_created_total =
            IntCounter::new("team_ranking_teams_created_total", "Total teams created")?;
        registry.register(Box::new(teams_created_total.clone()))?;

        let teams_deleted_total =
            IntCounter::new("team_ranking_teams_deleted_total", "Total teams deleted")?;
        registry.register(Box::new(teams_deleted_total.clone()))?;

        let active_teams = IntGauge::new("team_ranking_active_teams", "Number of active teams")?;
        registry.register(Box::new(active_teams.clone()))?;

        let matches_recorded_total = IntCounterVec::new(
            Opts::new(
                "team_ranking_matches_recorded_total",
                "Total matches recorded",
            ),
            &["status"],
        )?;
        registry.register(Box::new(matches_recorded_total.clone()))?;

        let results_applied_total = IntCounter::new(
            "team_ranking_results_applied_total",
            "Total match results applied to rankings",
        )?;
        registry.register(Box::new(results_applied_total.clone()))?;

        Ok(Self {
            teams_created_total,
            teams_deleted_total,
            active_teams,
            matches_recorded_total,
            results_applied_total,
        })
    }
}

impl ApiMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let errors_total = IntCounterVec::new(
            Opts::new("team_ranking_errors_total", "Total failed operations"),
            &["kind"],
        )?;
        registry.register(Box::new(errors_total.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "team_ranking_operation_duration_seconds",
                "Operation duration in seconds",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        let health_status = IntGauge::new(
            "team_ranking_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        Ok(Self {
            errors_total,
            operation_duration,
            health_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_counters() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");

        collector.record_teams_created(3);
        collector.record_team_deleted();

        assert_eq!(collector.league().teams_created_total.get(), 3);
        assert_eq!(collector.league().teams_deleted_total.get(), 1);
        assert_eq!(collector.league().active_teams.get(), 2);
    }

    #[test]
    fn test_completed_match_counts_result() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");

        collector.record_match_recorded(false);
        collector.record_match_recorded(true);

        let matches = &collector.league().matches_recorded_total;
        assert_eq!(matches.with_label_values(&["pending"]).get(), 1);
        assert_eq!(matches.with_label_values(&["completed"]).get(), 1);
        assert_eq!(collector.league().results_applied_total.get(), 1);
    }

    #[test]
    fn test_error_recording() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");

        collector.record_error(ErrorKind::Conflict);
        collector.record_error(ErrorKind::Conflict);

        assert_eq!(
            collector
                .api()
                .errors_total
                .with_label_values(&["conflict"])
                .get(),
            2
        );
    }

    #[test]
    fn test_registry_gathers_families() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        collector.record_operation("create_team", Duration::from_millis(1));
        collector.update_health_status(2);

        let families = collector.registry().gather();
        assert!(families
            .iter()
            .any(|family| family.get_name() == "team_ranking_operation_duration_seconds"));
    }

    #[test]
    fn test_metrics_timer() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        let timer = collector.start_timer();

        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));
        assert!(timer.stop() >= Duration::from_millis(10));
    }
}
