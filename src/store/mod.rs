//! Record store for teams, matches and rankings
//!
//! A transactional table set kept in memory, optionally persisted to a JSON
//! snapshot after every commit.

pub mod memory;
pub mod records;
pub mod snapshot;

pub use memory::{InMemoryStore, StoreTransaction};
pub use records::Records;
