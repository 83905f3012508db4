//! Team management and bulk import

pub mod import;
pub mod manager;

pub use manager::TeamManager;
