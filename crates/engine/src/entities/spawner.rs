//! Spawning and despawning policy-carrying entities.
//!
//! The world port only creates bare entities. The spawner layers the
//! prototype's charges and policy components on top and runs each
//! component's init hook, so a freshly spawned holder already owns its slot
//! (and its starting occupant, for frangible containers).

use std::sync::Arc;

use stowage_domain::{
    ComponentSet, ContainerKind, ContainerRef, Coordinates, Delay, EntityId, PrototypeCatalog,
    PrototypeId, QuickPickupComponent,
};

use super::ContainerBinding;
use crate::infrastructure::ports::{EnginePorts, PortError};
use crate::stores::ComponentStore;

/// Starting items may themselves have starting items; stop a cyclic catalog here.
const MAX_SPAWN_DEPTH: usize = 8;

pub struct Spawner {
    ports: EnginePorts,
    components: Arc<ComponentStore>,
    catalog: Arc<PrototypeCatalog>,
    binding: ContainerBinding,
    default_cooldown: Delay,
}

impl Spawner {
    pub fn new(
        ports: EnginePorts,
        components: Arc<ComponentStore>,
        catalog: Arc<PrototypeCatalog>,
        default_cooldown: Delay,
    ) -> Self {
        let binding = ContainerBinding::new(ports.containers.clone());
        Self {
            ports,
            components,
            catalog,
            binding,
            default_cooldown,
        }
    }

    pub fn binding(&self) -> &ContainerBinding {
        &self.binding
    }

    /// Spawn an entity of `prototype` with its charges and policy components.
    pub fn spawn(&self, prototype: &PrototypeId, at: Coordinates) -> Result<EntityId, PortError> {
        self.spawn_at_depth(prototype, at, 0)
    }

    /// Attach policy components to an existing entity and run their init hooks.
    pub fn attach(&self, entity: EntityId, components: ComponentSet) {
        self.attach_at_depth(entity, components, 0);
    }

    /// Delete an entity and everything inside it, dropping their engine-side state.
    pub fn despawn(&self, entity: EntityId) -> Vec<EntityId> {
        let deleted = self.ports.entities.delete(entity);
        for id in &deleted {
            self.components.remove(*id);
            self.ports.charges.forget(*id);
            self.ports.use_delay.forget(*id);
        }
        tracing::trace!(entity = %entity, deleted = deleted.len(), "Despawned entity");
        deleted
    }

    fn spawn_at_depth(
        &self,
        prototype: &PrototypeId,
        at: Coordinates,
        depth: usize,
    ) -> Result<EntityId, PortError> {
        let def = self
            .catalog
            .get(prototype)
            .ok_or_else(|| PortError::UnknownPrototype(prototype.clone()))?;

        let entity = self.ports.entities.spawn(prototype, at)?;
        if let Some(charges) = def.charges {
            self.ports.charges.set_charges(entity, charges);
        }
        if !def.components.is_empty() {
            self.attach_at_depth(entity, def.components.clone(), depth);
        }
        Ok(entity)
    }

    fn attach_at_depth(&self, entity: EntityId, components: ComponentSet, depth: usize) {
        self.components.attach(entity, components.clone());

        if let Some(parcel) = &components.wrapped_parcel {
            self.binding.ensure(entity, &parcel.container_id);
        }

        if let Some(frangible) = &components.frangible {
            let slot = self.binding.ensure(entity, &frangible.container_id);
            if let Some(starting) = &frangible.starting_item {
                let occupied = !self.ports.containers.contained(&slot).is_empty();
                if !occupied {
                    self.fill_starting_item(entity, starting, &slot, depth);
                }
            }
        }

        if let Some(pickup) = &components.quick_pickup {
            self.ports.containers.ensure_container(
                entity,
                &pickup.storage_container,
                ContainerKind::Storage {
                    capacity: pickup.storage_capacity,
                },
            );
            self.ports.use_delay.set_length(
                entity,
                QuickPickupComponent::DELAY_ID,
                pickup.cooldown.unwrap_or(self.default_cooldown),
            );
        }
    }

    fn fill_starting_item(
        &self,
        holder: EntityId,
        starting: &PrototypeId,
        slot: &ContainerRef,
        depth: usize,
    ) {
        if depth >= MAX_SPAWN_DEPTH {
            tracing::warn!(
                holder = %holder,
                prototype = %starting,
                "Starting item nesting too deep, leaving container empty"
            );
            return;
        }

        let at = self
            .ports
            .entities
            .coordinates(holder)
            .unwrap_or(Coordinates::ORIGIN);
        let item = match self.spawn_at_depth(starting, at, depth + 1) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(holder = %holder, error = %e, "Failed to spawn starting item");
                return;
            }
        };

        if !self.ports.containers.insert(item, slot, true) {
            tracing::error!(
                holder = %holder,
                item = %item,
                "Starting item was refused by its container"
            );
            self.despawn(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{ChargesPort, ContainerPort};
    use crate::test_fixtures::{fixture_catalog, proto, InMemoryHarness};
    use stowage_domain::{ContainerId, FrangibleContainerComponent, LimitedCharges, LocKey};

    #[test]
    fn spawn_applies_charges_and_components() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let wrap = harness
            .app
            .spawner
            .spawn(&proto("ParcelWrap"), Coordinates::ORIGIN)
            .expect("spawned");

        assert!(harness.app.components.parcel_wrap(wrap).is_some());
        assert_eq!(
            harness.charges.charges(wrap),
            Some(LimitedCharges::full(30))
        );
    }

    #[test]
    fn unknown_prototype_is_reported() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let err = harness
            .app
            .spawner
            .spawn(&proto("Nothing"), Coordinates::ORIGIN)
            .expect_err("unknown");
        assert!(matches!(err, PortError::UnknownPrototype(_)));
    }

    #[test]
    fn frangible_init_inserts_starting_item_once() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let egg = harness
            .app
            .spawner
            .spawn(&proto("SurpriseEgg"), Coordinates::new(3.0, 1.0))
            .expect("spawned");
        let slot_id = ContainerId::new("frangible_container_contents").expect("valid");
        let first = harness
            .app
            .spawner
            .binding()
            .current_occupant(egg, &slot_id)
            .expect("starting item inserted");

        // Re-attaching must not spawn a second starting item.
        let mut again = FrangibleContainerComponent::new(LocKey::new("open").expect("valid"));
        again.starting_item = Some(proto("Widget"));
        harness.app.spawner.attach(
            egg,
            ComponentSet {
                frangible: Some(again),
                ..ComponentSet::default()
            },
        );

        let slot = harness
            .app
            .spawner
            .binding()
            .find(egg, &slot_id)
            .expect("slot exists");
        assert_eq!(harness.world.contained(&slot), vec![first]);
    }

    #[test]
    fn despawn_forgets_contained_entities() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let egg = harness
            .app
            .spawner
            .spawn(&proto("SurpriseEgg"), Coordinates::ORIGIN)
            .expect("spawned");

        let deleted = harness.app.spawner.despawn(egg);

        assert_eq!(deleted.len(), 2);
        assert!(harness.app.components.get(egg).is_none());
        assert_eq!(harness.world.entity_count(), 0);
    }

    #[test]
    fn quick_pickup_registers_cooldown_and_storage() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let bag = harness
            .app
            .spawner
            .spawn(&proto("Satchel"), Coordinates::ORIGIN)
            .expect("spawned");

        assert_eq!(
            harness.use_delay.length(bag, QuickPickupComponent::DELAY_ID),
            Some(Delay::from_millis(500))
        );
        let storage = ContainerId::new("storagebase").expect("valid");
        assert!(harness.world.get_container(bag, &storage).is_some());
    }

    #[test]
    fn despawn_drops_quick_pickup_cooldown() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let bag = harness
            .app
            .spawner
            .spawn(&proto("Satchel"), Coordinates::ORIGIN)
            .expect("spawned");

        harness.app.spawner.despawn(bag);

        assert_eq!(
            harness.use_delay.length(bag, QuickPickupComponent::DELAY_ID),
            None
        );
    }
}
