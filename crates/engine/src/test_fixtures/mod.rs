//! Test fixtures loader for JSON fixture files and common test helpers.
//!
//! This module provides utilities for loading test data from the `test_data/` directory
//! and an in-memory harness that wires a full [`App`] to recording adapters.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{fixture_catalog, InMemoryHarness};
//!
//! #[test]
//! fn test_wrap_widget() {
//!     let harness = InMemoryHarness::new(fixture_catalog());
//!     let widget = harness.spawn("Widget", Coordinates::ORIGIN);
//!     // ... test logic
//! }
//! ```

use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use stowage_domain::{Coordinates, EntityId, PrototypeCatalog, PrototypeDef, PrototypeId};

use crate::app::App;
use crate::infrastructure::{
    clock::FixedClock, config::EngineConfig, in_memory::InMemoryAdapters, ports::EnginePorts,
};

// =============================================================================
// Fixture Loading
// =============================================================================

/// Load a JSON fixture from test_data/ directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

// =============================================================================
// Catalog Fixtures
// =============================================================================

/// Prototype catalog shared by the engine tests.
///
/// - `Widget`: small item tagged `Gadget`
/// - `Crate`: not an item; stands in for users and shelves
/// - `Rod`: normal item with a shape override
/// - `ParcelWrap` / `SlowWrap`: wrappers, instant and 1 s
/// - `SurpriseEgg`: frangible, starts with a `Widget`, opens in hand after 1.5 s
/// - `Satchel`: quick-pickup storage with a 500 ms cooldown
/// - `GiftWrapper`: spawns a `GiftBox` around gadgets, 3 charges, 2 s
pub fn fixture_catalog() -> Arc<PrototypeCatalog> {
    let defs: Vec<PrototypeDef> = load_fixture("catalog.json");
    Arc::new(PrototypeCatalog::from_defs(defs).expect("fixture catalog has unique ids"))
}

pub fn proto(id: &str) -> PrototypeId {
    PrototypeId::new(id).expect("valid prototype id")
}

// =============================================================================
// In-Memory Harness
// =============================================================================

/// A composed [`App`] plus handles to every in-memory adapter behind it.
///
/// Derefs to [`InMemoryAdapters`], so `harness.world`, `harness.clock`, and
/// the rest are available directly.
pub struct InMemoryHarness {
    pub app: App,
    adapters: InMemoryAdapters,
}

impl InMemoryHarness {
    pub fn new(catalog: Arc<PrototypeCatalog>) -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .expect("valid start time");
        let adapters = InMemoryAdapters::new(catalog.clone(), Arc::new(FixedClock::new(start)));
        let app = App::new(adapters.ports(), catalog, EngineConfig::default());
        Self { app, adapters }
    }

    /// Spawn a prototype through the engine so its components initialize.
    pub fn spawn(&self, prototype: &str, at: Coordinates) -> EntityId {
        self.app
            .spawner
            .spawn(&proto(prototype), at)
            .unwrap_or_else(|e| panic!("Failed to spawn '{prototype}': {e}"))
    }

    /// The port bundle the app was built with, for swapping single ports.
    pub fn ports(&self) -> EnginePorts {
        self.app.ports.clone()
    }
}

impl Deref for InMemoryHarness {
    type Target = InMemoryAdapters;

    fn deref(&self) -> &Self::Target {
        &self.adapters
    }
}
