//! Match recording and lifecycle

pub mod manager;

pub use manager::MatchManager;
