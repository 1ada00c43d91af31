//! Policy components attached to live entities.

use dashmap::DashMap;
use stowage_domain::{
    ComponentSet, EntityId, FrangibleContainerComponent, ParcelWrapComponent, PolicyKind,
    QuickPickupComponent, SpawnAndInsertComponent, WrappedParcelComponent,
};

/// Which policy components each entity carries.
///
/// Accessors return clones so no shard lock is held while a transfer runs.
#[derive(Default)]
pub struct ComponentStore {
    entities: DashMap<EntityId, ComponentSet>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach components; ones already present on the entity are replaced.
    pub fn attach(&self, entity: EntityId, components: ComponentSet) {
        self.entities.entry(entity).or_default().merge(components);
    }

    pub fn get(&self, entity: EntityId) -> Option<ComponentSet> {
        self.entities.get(&entity).map(|set| set.clone())
    }

    pub fn has(&self, entity: EntityId, kind: PolicyKind) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|set| set.has(kind))
    }

    pub fn remove(&self, entity: EntityId) -> Option<ComponentSet> {
        self.entities.remove(&entity).map(|(_, set)| set)
    }

    pub fn parcel_wrap(&self, entity: EntityId) -> Option<ParcelWrapComponent> {
        self.entities.get(&entity)?.parcel_wrap.clone()
    }

    pub fn wrapped_parcel(&self, entity: EntityId) -> Option<WrappedParcelComponent> {
        self.entities.get(&entity)?.wrapped_parcel.clone()
    }

    pub fn frangible(&self, entity: EntityId) -> Option<FrangibleContainerComponent> {
        self.entities.get(&entity)?.frangible.clone()
    }

    pub fn spawn_and_insert(&self, entity: EntityId) -> Option<SpawnAndInsertComponent> {
        self.entities.get(&entity)?.spawn_and_insert.clone()
    }

    pub fn quick_pickup(&self, entity: EntityId) -> Option<QuickPickupComponent> {
        self.entities.get(&entity)?.quick_pickup.clone()
    }
}
