//! Metrics and monitoring for the team ranking service
//!
//! The collector is exposed in Prometheus text format by the HTTP layer's
//! `/metrics` endpoint.

pub mod collector;

pub use collector::{ApiMetrics, LeagueMetrics, MetricsCollector, MetricsTimer};
