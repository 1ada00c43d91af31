//! In-memory state storage modules.
//!
//! Stores manage runtime state the hosting world does not own:
//! - `ComponentStore` - Policy components attached to live entities

pub mod components;

// Re-export store types
pub use components::ComponentStore;
