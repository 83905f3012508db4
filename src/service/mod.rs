//! Service layer for the team ranking service
//!
//! This module contains the application state that wires the store, engine
//! and managers together, and the health checks reported over HTTP.

pub mod app;
pub mod health;

pub use app::{AppState, ServiceError};
pub use health::{HealthCheck, HealthStatus, LeagueStats};
