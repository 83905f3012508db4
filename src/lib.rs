//! Team Ranking - league standings service
//!
//! This crate tracks teams, the matches played between them and a ranking
//! table scored 3/1/0, with soft-deleted teams and transactional updates
//! over an in-memory record store.

pub mod config;
pub mod error;
pub mod http;
pub mod matches;
pub mod metrics;
pub mod ranking;
pub mod service;
pub mod store;
pub mod teams;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorKind, LeagueError, Result, StoreError};
pub use types::*;

// Re-export key components
pub use matches::MatchManager;
pub use ranking::{RankingEngine, ScoringTable};
pub use store::InMemoryStore;
pub use teams::TeamManager;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
