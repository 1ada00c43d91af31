//! Stowage Engine library.
//!
//! Delayed container-transfer interactions: wrapping items into parcels,
//! breaking open frangible containers, spawning receptacles around targets,
//! and quick pickup into storages.
//!
//! ## Structure
//!
//! - `entities/` - Container binding and prototype spawning
//! - `use_cases/` - Transfer orchestration and per-policy trigger handling
//! - `stores/` - Policy components attached to live entities
//! - `infrastructure/` - Port traits, in-memory adapters, configuration
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Test fixtures module for scenario testing.
#[cfg(test)]
pub mod test_fixtures;


pub use app::App;
