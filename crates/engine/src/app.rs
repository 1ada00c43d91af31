//! Application state and composition.

use std::sync::Arc;

use stowage_domain::PrototypeCatalog;

use crate::entities::Spawner;
use crate::infrastructure::{config::EngineConfig, ports::EnginePorts};
use crate::stores::ComponentStore;
use crate::use_cases::{
    DelayedActionBridge, FrangibleContainers, InteractionDispatcher, ParcelWrapping, QuickPickup,
    SpawnAndInsert, StorageQuickPickup, TransferOrchestrator,
};

/// Main application state.
///
/// Holds the shared stores and every policy system. Hosts feed triggers in
/// through `dispatcher`; the systems are exposed for direct calls as well.
pub struct App {
    pub config: EngineConfig,
    pub catalog: Arc<PrototypeCatalog>,
    pub ports: EnginePorts,
    pub components: Arc<ComponentStore>,
    pub spawner: Arc<Spawner>,
    pub orchestrator: Arc<TransferOrchestrator>,
    pub bridge: Arc<DelayedActionBridge>,
    pub parcel_wrap: Arc<ParcelWrapping>,
    pub frangible: Arc<FrangibleContainers>,
    pub spawn_insert: Arc<SpawnAndInsert>,
    pub quick_pickup: Arc<QuickPickup>,
    pub dispatcher: InteractionDispatcher,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(ports: EnginePorts, catalog: Arc<PrototypeCatalog>, config: EngineConfig) -> Self {
        let components = Arc::new(ComponentStore::new());

        // Spawning runs component init, so every system spawns through this one
        let spawner = Arc::new(Spawner::new(
            ports.clone(),
            components.clone(),
            catalog.clone(),
            config.quick_pickup_cooldown,
        ));
        let orchestrator = Arc::new(TransferOrchestrator::new(ports.clone(), spawner.clone()));
        let bridge = Arc::new(DelayedActionBridge::new(ports.do_after.clone()));

        let parcel_wrap = Arc::new(ParcelWrapping::new(
            ports.clone(),
            components.clone(),
            catalog.clone(),
            orchestrator.clone(),
            bridge.clone(),
        ));
        let frangible = Arc::new(FrangibleContainers::new(
            components.clone(),
            orchestrator.clone(),
            bridge.clone(),
        ));
        let spawn_insert = Arc::new(SpawnAndInsert::new(
            &ports,
            components.clone(),
            orchestrator.clone(),
            bridge.clone(),
        ));
        let quick_pickup = Arc::new(
            QuickPickup::new(ports.clone(), components.clone()).with_listener(Arc::new(
                StorageQuickPickup::new(ports.containers.clone(), components.clone()),
            )),
        );

        let dispatcher = InteractionDispatcher::new(
            config.authority,
            parcel_wrap.clone(),
            frangible.clone(),
            spawn_insert.clone(),
            quick_pickup.clone(),
        );

        tracing::debug!(
            prototypes = catalog.len(),
            authority = %config.authority,
            "Engine composed"
        );

        Self {
            config,
            catalog,
            ports,
            components,
            spawner,
            orchestrator,
            bridge,
            parcel_wrap,
            frangible,
            spawn_insert,
            quick_pickup,
            dispatcher,
        }
    }
}
