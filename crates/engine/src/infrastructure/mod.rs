//! Infrastructure implementations.
//!
//! Contains port trait implementations for the hosting world and side-effect
//! services, plus engine configuration.

pub mod charges;
pub mod clock;
pub mod config;
pub mod do_after;
pub mod events;
pub mod feedback;
pub mod in_memory;
pub mod ports;
pub mod use_delay;
pub mod world;
