//! In-memory world: entities, transforms, containers, items, and appearance.
//!
//! Backs every world port for tests and the sandbox binary. Container
//! ownership is tracked in both directions (container contents and the
//! entity's parent) under one lock, so no caller ever observes an entity
//! owned by two containers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use stowage_domain::{
    Angle, ContainerId, ContainerKind, ContainerRef, Coordinates, EntityId, EntityWhitelist,
    ItemComponent, ItemShape, ItemSize, PrototypeCatalog, PrototypeId, Removal,
};

use crate::infrastructure::ports::{
    AppearancePort, ContainerPort, EntityPort, ItemPort, PortError, WhitelistPort,
};

/// Distance between an anchor and an entity dropped next to it.
const DROP_OFFSET: f32 = 0.5;

/// Guards parent walks against corrupted state.
const MAX_NESTING: usize = 64;

#[derive(Debug, Clone)]
struct EntityRecord {
    prototype: PrototypeId,
    tags: Vec<String>,
    coordinates: Coordinates,
    rotation: Angle,
    item: Option<ItemComponent>,
    appearance: HashMap<&'static str, String>,
    parent: Option<ContainerRef>,
}

#[derive(Debug, Clone)]
struct ContainerRecord {
    kind: ContainerKind,
    contents: Vec<EntityId>,
}

#[derive(Debug, Default)]
struct WorldState {
    entities: HashMap<EntityId, EntityRecord>,
    containers: HashMap<ContainerRef, ContainerRecord>,
}

impl WorldState {
    fn world_coordinates(&self, entity: EntityId) -> Option<Coordinates> {
        let mut current = self.entities.get(&entity)?;
        for _ in 0..MAX_NESTING {
            match &current.parent {
                Some(parent) => match self.entities.get(&parent.owner) {
                    Some(owner) => current = owner,
                    None => break,
                },
                None => break,
            }
        }
        Some(current.coordinates)
    }

    /// Whether `ancestor` is `entity` or contains it at any depth.
    fn is_ancestor(&self, ancestor: EntityId, entity: EntityId) -> bool {
        let mut current = entity;
        for _ in 0..MAX_NESTING {
            if current == ancestor {
                return true;
            }
            match self.entities.get(&current).and_then(|e| e.parent.as_ref()) {
                Some(parent) => current = parent.owner,
                None => return false,
            }
        }
        false
    }

    fn can_insert(&self, entity: EntityId, container: &ContainerRef, force: bool) -> bool {
        let Some(record) = self.entities.get(&entity) else {
            return false;
        };
        if record.parent.is_some() {
            return false;
        }
        let Some(target) = self.containers.get(container) else {
            return false;
        };
        if self.is_ancestor(entity, container.owner) {
            return false;
        }
        match target.kind {
            ContainerKind::Slot => target.contents.is_empty(),
            ContainerKind::Storage { capacity } => {
                force || capacity.is_none_or(|cap| (target.contents.len() as u32) < cap)
            }
        }
    }

    fn insert(&mut self, entity: EntityId, container: &ContainerRef, force: bool) -> bool {
        if !self.can_insert(entity, container, force) {
            return false;
        }
        let owner_position = self.world_coordinates(container.owner);
        if let Some(target) = self.containers.get_mut(container) {
            target.contents.push(entity);
        }
        if let Some(record) = self.entities.get_mut(&entity) {
            record.parent = Some(container.clone());
            if let Some(position) = owner_position {
                record.coordinates = position;
            }
        }
        true
    }

    fn remove(&mut self, entity: EntityId, container: &ContainerRef, removal: Removal) -> bool {
        let owner_position = self.world_coordinates(container.owner);
        let Some(source) = self.containers.get_mut(container) else {
            return false;
        };
        let Some(index) = source.contents.iter().position(|e| *e == entity) else {
            return false;
        };
        source.contents.remove(index);

        if let Some(record) = self.entities.get_mut(&entity) {
            record.parent = None;
            let landing = if removal.reparent {
                removal.destination.or(owner_position)
            } else {
                owner_position
            };
            if let Some(position) = landing {
                record.coordinates = position;
            }
        }
        true
    }

    fn delete(&mut self, entity: EntityId, deleted: &mut Vec<EntityId>) {
        let Some(record) = self.entities.get(&entity) else {
            return;
        };
        if let Some(parent) = record.parent.clone() {
            if let Some(container) = self.containers.get_mut(&parent) {
                container.contents.retain(|e| *e != entity);
            }
        }

        let owned: Vec<ContainerRef> = self
            .containers
            .keys()
            .filter(|c| c.owner == entity)
            .cloned()
            .collect();
        for container in owned {
            if let Some(record) = self.containers.remove(&container) {
                for child in record.contents {
                    // Detach first so the recursive call does not touch the removed container.
                    if let Some(child_record) = self.entities.get_mut(&child) {
                        child_record.parent = None;
                    }
                    self.delete(child, deleted);
                }
            }
        }

        self.entities.remove(&entity);
        deleted.push(entity);
    }
}

/// In-memory world backing every world port.
pub struct InMemoryWorld {
    catalog: Arc<PrototypeCatalog>,
    state: Mutex<WorldState>,
}

impl InMemoryWorld {
    pub fn new(catalog: Arc<PrototypeCatalog>) -> Self {
        Self {
            catalog,
            state: Mutex::new(WorldState::default()),
        }
    }

    pub fn catalog(&self) -> &Arc<PrototypeCatalog> {
        &self.catalog
    }

    fn state(&self) -> MutexGuard<'_, WorldState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Move a free entity. Contained entities follow their owner and are left alone.
    pub fn set_coordinates(&self, entity: EntityId, at: Coordinates) -> bool {
        let mut state = self.state();
        match state.entities.get_mut(&entity) {
            Some(record) if record.parent.is_none() => {
                record.coordinates = at;
                true
            }
            _ => false,
        }
    }

    pub fn set_rotation(&self, entity: EntityId, rotation: Angle) -> bool {
        let mut state = self.state();
        match state.entities.get_mut(&entity) {
            Some(record) => {
                record.rotation = rotation;
                true
            }
            None => false,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.state().entities.len()
    }

    /// Entities of the given prototype, in no particular order.
    pub fn entities_of(&self, prototype: &PrototypeId) -> Vec<EntityId> {
        self.state()
            .entities
            .iter()
            .filter(|(_, record)| &record.prototype == prototype)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl EntityPort for InMemoryWorld {
    fn exists(&self, entity: EntityId) -> bool {
        self.state().entities.contains_key(&entity)
    }

    fn prototype_of(&self, entity: EntityId) -> Option<PrototypeId> {
        self.state()
            .entities
            .get(&entity)
            .map(|record| record.prototype.clone())
    }

    fn coordinates(&self, entity: EntityId) -> Option<Coordinates> {
        self.state().world_coordinates(entity)
    }

    fn rotation(&self, entity: EntityId) -> Option<Angle> {
        self.state().entities.get(&entity).map(|record| record.rotation)
    }

    fn spawn(&self, prototype: &PrototypeId, at: Coordinates) -> Result<EntityId, PortError> {
        let def = self
            .catalog
            .get(prototype)
            .ok_or_else(|| PortError::UnknownPrototype(prototype.clone()))?;

        let id = EntityId::new();
        let record = EntityRecord {
            prototype: def.id.clone(),
            tags: def.tags.clone(),
            coordinates: at,
            rotation: Angle::ZERO,
            item: def.item.clone(),
            appearance: HashMap::new(),
            parent: None,
        };
        self.state().entities.insert(id, record);
        tracing::trace!(entity = %id, prototype = %prototype, "Spawned entity");
        Ok(id)
    }

    fn delete(&self, entity: EntityId) -> Vec<EntityId> {
        let mut deleted = Vec::new();
        self.state().delete(entity, &mut deleted);
        deleted
    }
}

impl ContainerPort for InMemoryWorld {
    fn ensure_container(
        &self,
        owner: EntityId,
        id: &ContainerId,
        kind: ContainerKind,
    ) -> ContainerRef {
        let handle = ContainerRef::new(owner, id.clone());
        self.state()
            .containers
            .entry(handle.clone())
            .or_insert_with(|| ContainerRecord {
                kind,
                contents: Vec::new(),
            });
        handle
    }

    fn get_container(&self, owner: EntityId, id: &ContainerId) -> Option<ContainerRef> {
        let handle = ContainerRef::new(owner, id.clone());
        self.state()
            .containers
            .contains_key(&handle)
            .then_some(handle)
    }

    fn contained(&self, container: &ContainerRef) -> Vec<EntityId> {
        self.state()
            .containers
            .get(container)
            .map(|record| record.contents.clone())
            .unwrap_or_default()
    }

    fn containing(&self, entity: EntityId) -> Option<ContainerRef> {
        self.state()
            .entities
            .get(&entity)
            .and_then(|record| record.parent.clone())
    }

    fn can_insert(&self, entity: EntityId, container: &ContainerRef) -> bool {
        self.state().can_insert(entity, container, false)
    }

    fn insert(&self, entity: EntityId, container: &ContainerRef, force: bool) -> bool {
        self.state().insert(entity, container, force)
    }

    fn remove(&self, entity: EntityId, container: &ContainerRef, removal: Removal) -> bool {
        self.state().remove(entity, container, removal)
    }

    fn insert_or_drop(&self, entity: EntityId, container: &ContainerRef) -> bool {
        let mut state = self.state();
        if state.insert(entity, container, false) {
            return true;
        }
        let owner_position = state.world_coordinates(container.owner);
        if let (Some(record), Some(position)) = (state.entities.get_mut(&entity), owner_position) {
            if record.parent.is_none() {
                record.coordinates = position;
            }
        }
        false
    }

    fn drop_next_to(&self, entity: EntityId, anchor: EntityId) {
        let mut state = self.state();
        let Some(anchor_position) = state.world_coordinates(anchor) else {
            return;
        };
        if let Some(record) = state.entities.get_mut(&entity) {
            if record.parent.is_none() {
                record.coordinates = anchor_position.offset(DROP_OFFSET, 0.0);
            }
        }
    }
}

impl ItemPort for InMemoryWorld {
    fn item(&self, entity: EntityId) -> Option<ItemComponent> {
        self.state()
            .entities
            .get(&entity)
            .and_then(|record| record.item.clone())
    }

    fn set_size(&self, entity: EntityId, size: ItemSize) -> bool {
        let mut state = self.state();
        match state.entities.get_mut(&entity).and_then(|r| r.item.as_mut()) {
            Some(item) => {
                item.size = size;
                true
            }
            None => false,
        }
    }

    fn set_shape(&self, entity: EntityId, shape: ItemShape) -> bool {
        let mut state = self.state();
        match state.entities.get_mut(&entity).and_then(|r| r.item.as_mut()) {
            Some(item) => {
                item.shape = Some(shape);
                true
            }
            None => false,
        }
    }
}

impl AppearancePort for InMemoryWorld {
    fn set_data(&self, entity: EntityId, key: &'static str, value: String) {
        if let Some(record) = self.state().entities.get_mut(&entity) {
            record.appearance.insert(key, value);
        }
    }

    fn get_data(&self, entity: EntityId, key: &'static str) -> Option<String> {
        self.state()
            .entities
            .get(&entity)
            .and_then(|record| record.appearance.get(key).cloned())
    }
}

impl WhitelistPort for InMemoryWorld {
    fn is_valid(&self, list: &EntityWhitelist, entity: EntityId) -> bool {
        let state = self.state();
        let Some(record) = state.entities.get(&entity) else {
            return false;
        };
        list.matches(Some(&record.prototype), &record.tags)
    }
}
