//! League ranking: scoring rules and the engine that maintains ranking rows
//!
//! Rankings are updated incrementally as matches complete; they are never
//! recomputed from the match log.

pub mod engine;
pub mod scoring;

// Re-export commonly used types
pub use engine::RankingEngine;
pub use scoring::{MatchOutcome, ScoringTable, TeamResult};
