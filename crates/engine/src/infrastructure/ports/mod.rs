//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The hosting world (entities, containers, items, appearance, predicates)
//! - Side-effect services (charges, audio, popups, projectiles, events)
//! - Timing (timed actions, cooldowns, clock)

mod bundle;
mod error;
mod services;
mod testing;
pub mod types;
mod world;

pub use bundle::EnginePorts;
pub use error::PortError;
pub use types::AudioTarget;

// =============================================================================
// World Ports
// =============================================================================
pub use world::{AppearancePort, ContainerPort, EntityPort, ItemPort, WhitelistPort};

// =============================================================================
// Service Ports
// =============================================================================
pub use services::{
    AudioPort, ChargesPort, DoAfterPort, EventSinkPort, PopupPort, ProjectilePort, UseDelayPort,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use world::{
    MockAppearancePort, MockContainerPort, MockEntityPort, MockItemPort, MockWhitelistPort,
};

#[cfg(test)]
pub use services::{
    MockAudioPort, MockChargesPort, MockDoAfterPort, MockEventSinkPort, MockPopupPort,
    MockProjectilePort, MockUseDelayPort,
};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;
