//! Quick pickup: storages that scoop up the item they are used on.
//!
//! The system only gates the interaction and raises a [`QuickPickupEvent`].
//! Registered listeners do the actual pickup through
//! [`QuickPickup::try_do_quick_pickup`], which takes care of projectile
//! cleanup and the insertion animation.

use std::sync::Arc;

use stowage_domain::{
    AfterInteractEvent, AnimateInsertingEntities, EngineEvent, EntityId, PolicyKind,
    QuickPickupComponent, QuickPickupEvent,
};

use crate::infrastructure::ports::{ContainerPort, EnginePorts};
use crate::stores::ComponentStore;

/// Attempts the pickup once the gate has passed.
pub trait QuickPickupListener: Send + Sync {
    /// Set `event.handled` when the pickup went through.
    fn on_quick_pickup(&self, system: &QuickPickup, event: &mut QuickPickupEvent);
}

pub struct QuickPickup {
    ports: EnginePorts,
    components: Arc<ComponentStore>,
    listeners: Vec<Arc<dyn QuickPickupListener>>,
}

impl QuickPickup {
    pub fn new(ports: EnginePorts, components: Arc<ComponentStore>) -> Self {
        Self {
            ports,
            components,
            listeners: Vec::new(),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn QuickPickupListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn after_interact(&self, event: &mut AfterInteractEvent) {
        if event.handled || !self.components.has(event.used, PolicyKind::QuickPickup) {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        if target == event.user || !self.ports.entities.exists(target) || !event.can_reach {
            return;
        }
        if !self.ports.use_delay.try_reset_delay(
            event.used,
            QuickPickupComponent::DELAY_ID,
            true,
        ) {
            tracing::debug!(source = %event.used, "Quick pickup on cooldown");
            return;
        }
        if self.ports.containers.containing(target).is_some()
            || self.ports.items.item(target).is_none()
        {
            return;
        }

        let mut pickup = QuickPickupEvent::new(event.used, target, event.user);
        for listener in &self.listeners {
            listener.on_quick_pickup(self, &mut pickup);
            if pickup.handled {
                break;
            }
        }
        event.handled = pickup.handled;
    }

    /// Run `try_pickup` and announce the motion when it succeeds.
    pub fn try_do_quick_pickup<F>(&self, event: &QuickPickupEvent, try_pickup: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        let source = event.pickup_source;
        let picked_up = event.picked_up;
        if !self.components.has(source, PolicyKind::QuickPickup) {
            return false;
        }
        let (Some(rotation), Some(_)) = (
            self.ports.entities.rotation(source),
            self.ports.entities.coordinates(source),
        ) else {
            return false;
        };
        if self.ports.entities.coordinates(picked_up).is_none() {
            return false;
        }

        self.ports.projectiles.embed_detach(picked_up, Some(event.user));

        // Read after detaching, which may move the entity.
        let Some(from) = self.ports.entities.coordinates(picked_up) else {
            return false;
        };
        if !try_pickup() {
            return false;
        }

        tracing::debug!(source = %source, picked_up = %picked_up, "Quick pickup");
        self.ports
            .events
            .publish(EngineEvent::AnimateInserting(AnimateInsertingEntities::single(
                source, picked_up, from, rotation,
            )));
        true
    }
}

/// Inserts the picked-up entity into the source's storage container.
pub struct StorageQuickPickup {
    containers: Arc<dyn ContainerPort>,
    components: Arc<ComponentStore>,
}

impl StorageQuickPickup {
    pub fn new(containers: Arc<dyn ContainerPort>, components: Arc<ComponentStore>) -> Self {
        Self {
            containers,
            components,
        }
    }

    fn insert(&self, source: EntityId, picked_up: EntityId) -> bool {
        let Some(component) = self.components.quick_pickup(source) else {
            return false;
        };
        self.containers
            .get_container(source, &component.storage_container)
            .is_some_and(|storage| self.containers.insert(picked_up, &storage, false))
    }
}

impl QuickPickupListener for StorageQuickPickup {
    fn on_quick_pickup(&self, system: &QuickPickup, event: &mut QuickPickupEvent) {
        let source = event.pickup_source;
        let picked_up = event.picked_up;
        event.handled = system.try_do_quick_pickup(event, || self.insert(source, picked_up));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockContainerPort, MockEntityPort, MockEventSinkPort, MockProjectilePort,
    };
    use crate::test_fixtures::{fixture_catalog, InMemoryHarness};
    use stowage_domain::{Angle, ContainerId, ContainerKind, Coordinates, Delay};

    fn storage(harness: &InMemoryHarness, satchel: EntityId) -> Vec<EntityId> {
        let container = harness
            .world
            .get_container(satchel, &ContainerId::new("storagebase").expect("valid"))
            .expect("storage ensured at spawn");
        harness.world.contained(&container)
    }

    #[test]
    fn picks_up_item_and_animates() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let mut rx = harness.events.subscribe();
        let user = harness.spawn("Crate", Coordinates::ORIGIN);
        let satchel = harness.spawn("Satchel", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::new(1.0, 2.0));
        assert!(harness
            .world
            .set_rotation(satchel, Angle::from_degrees(90.0)));

        let mut event = AfterInteractEvent::new(user, satchel, Some(widget), true);
        harness.app.quick_pickup.after_interact(&mut event);

        assert!(event.handled);
        assert_eq!(storage(&harness, satchel), vec![widget]);
        match rx.try_recv().expect("animation published") {
            EngineEvent::AnimateInserting(animation) => {
                assert_eq!(animation.storage, satchel);
                assert_eq!(animation.entities, vec![widget]);
                assert_eq!(animation.positions, vec![Coordinates::new(1.0, 2.0)]);
                assert_eq!(animation.angles, vec![Angle::from_degrees(90.0)]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn cooldown_blocks_second_pickup() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let user = harness.spawn("Crate", Coordinates::ORIGIN);
        let satchel = harness.spawn("Satchel", Coordinates::ORIGIN);
        let first = harness.spawn("Widget", Coordinates::ORIGIN);
        let second = harness.spawn("Widget", Coordinates::ORIGIN);

        let mut event = AfterInteractEvent::new(user, satchel, Some(first), true);
        harness.app.quick_pickup.after_interact(&mut event);
        assert!(event.handled);

        let mut event = AfterInteractEvent::new(user, satchel, Some(second), true);
        harness.app.quick_pickup.after_interact(&mut event);
        assert!(!event.handled);

        harness.clock.advance(Delay::from_millis(500));
        let mut event = AfterInteractEvent::new(user, satchel, Some(second), true);
        harness.app.quick_pickup.after_interact(&mut event);
        assert!(event.handled);
        assert_eq!(storage(&harness, satchel).len(), 2);
    }

    #[test]
    fn contained_and_non_item_targets_are_skipped() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let user = harness.spawn("Crate", Coordinates::ORIGIN);
        let satchel = harness.spawn("Satchel", Coordinates::ORIGIN);
        let crate_entity = harness.spawn("Crate", Coordinates::ORIGIN);
        let shelf = harness.world.ensure_container(
            crate_entity,
            &ContainerId::new("shelf").expect("valid"),
            ContainerKind::Storage { capacity: None },
        );
        let shelved = harness.spawn("Widget", Coordinates::ORIGIN);
        assert!(harness.world.insert(shelved, &shelf, false));

        let mut event = AfterInteractEvent::new(user, satchel, Some(shelved), true);
        harness.app.quick_pickup.after_interact(&mut event);
        assert!(!event.handled);

        harness.clock.advance(Delay::from_millis(500));
        let mut event = AfterInteractEvent::new(user, satchel, Some(crate_entity), true);
        harness.app.quick_pickup.after_interact(&mut event);
        assert!(!event.handled);
        assert!(storage(&harness, satchel).is_empty());
    }

    #[test]
    fn self_target_and_unreachable_are_ignored() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let user = harness.spawn("Widget", Coordinates::ORIGIN);
        let satchel = harness.spawn("Satchel", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);

        let mut event = AfterInteractEvent::new(user, satchel, Some(user), true);
        harness.app.quick_pickup.after_interact(&mut event);
        assert!(!event.handled);

        let mut event = AfterInteractEvent::new(user, satchel, Some(widget), false);
        harness.app.quick_pickup.after_interact(&mut event);
        assert!(!event.handled);
        assert!(storage(&harness, satchel).is_empty());
    }

    #[test]
    fn failed_pickup_emits_nothing() {
        let components = Arc::new(ComponentStore::new());
        let source = EntityId::new();
        let picked_up = EntityId::new();
        components.attach(
            source,
            stowage_domain::ComponentSet {
                quick_pickup: Some(QuickPickupComponent::default()),
                ..Default::default()
            },
        );

        let mut entities = MockEntityPort::new();
        entities.expect_rotation().returning(|_| Some(Angle::ZERO));
        entities
            .expect_coordinates()
            .returning(|_| Some(Coordinates::ORIGIN));
        let mut projectiles = MockProjectilePort::new();
        projectiles
            .expect_embed_detach()
            .times(1)
            .return_const(());
        let mut events = MockEventSinkPort::new();
        events.expect_publish().never();

        let harness = InMemoryHarness::new(fixture_catalog());
        let ports = EnginePorts {
            entities: Arc::new(entities),
            containers: Arc::new(MockContainerPort::new()),
            projectiles: Arc::new(projectiles),
            events: Arc::new(events),
            ..harness.ports()
        };
        let system = QuickPickup::new(ports, components);

        let event = QuickPickupEvent::new(source, picked_up, EntityId::new());
        assert!(!system.try_do_quick_pickup(&event, || false));
    }
}
