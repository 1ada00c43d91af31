//! World ports: entities, containers, items, appearance, and entity predicates.
//!
//! All operations are synchronous and immediately consistent.

use stowage_domain::{
    Angle, ContainerId, ContainerKind, ContainerRef, Coordinates, EntityId, EntityWhitelist,
    ItemComponent, ItemShape, ItemSize, PrototypeId, Removal,
};

use super::PortError;

#[cfg_attr(test, mockall::automock)]
pub trait EntityPort: Send + Sync {
    fn exists(&self, entity: EntityId) -> bool;
    fn prototype_of(&self, entity: EntityId) -> Option<PrototypeId>;
    /// World position; contained entities report their outermost owner's position.
    fn coordinates(&self, entity: EntityId) -> Option<Coordinates>;
    fn rotation(&self, entity: EntityId) -> Option<Angle>;
    /// Spawn a bare entity of `prototype`. Policy components are attached by the caller.
    fn spawn(&self, prototype: &PrototypeId, at: Coordinates) -> Result<EntityId, PortError>;
    /// Delete an entity and everything contained in it. Returns every deleted id.
    fn delete(&self, entity: EntityId) -> Vec<EntityId>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ContainerPort: Send + Sync {
    /// Get or create the named container on `owner`. Idempotent.
    fn ensure_container(
        &self,
        owner: EntityId,
        id: &ContainerId,
        kind: ContainerKind,
    ) -> ContainerRef;
    fn get_container(&self, owner: EntityId, id: &ContainerId) -> Option<ContainerRef>;
    fn contained(&self, container: &ContainerRef) -> Vec<EntityId>;
    /// Container directly holding `entity`, if any.
    fn containing(&self, entity: EntityId) -> Option<ContainerRef>;
    fn can_insert(&self, entity: EntityId, container: &ContainerRef) -> bool;
    /// Insert `entity`; `force` skips storage capacity but never double-fills a slot.
    fn insert(&self, entity: EntityId, container: &ContainerRef, force: bool) -> bool;
    fn remove(&self, entity: EntityId, container: &ContainerRef, removal: Removal) -> bool;
    /// Insert, or drop at the container owner's position if refused. True when inserted.
    fn insert_or_drop(&self, entity: EntityId, container: &ContainerRef) -> bool;
    /// Place a free entity beside `anchor` rather than exactly on it.
    fn drop_next_to(&self, entity: EntityId, anchor: EntityId);
}

#[cfg_attr(test, mockall::automock)]
pub trait ItemPort: Send + Sync {
    fn item(&self, entity: EntityId) -> Option<ItemComponent>;
    fn set_size(&self, entity: EntityId, size: ItemSize) -> bool;
    fn set_shape(&self, entity: EntityId, shape: ItemShape) -> bool;
}

#[cfg_attr(test, mockall::automock)]
pub trait AppearancePort: Send + Sync {
    fn set_data(&self, entity: EntityId, key: &'static str, value: String);
    fn get_data(&self, entity: EntityId, key: &'static str) -> Option<String>;
}

#[cfg_attr(test, mockall::automock)]
pub trait WhitelistPort: Send + Sync {
    /// Whether `entity` matches `list`.
    fn is_valid(&self, list: &EntityWhitelist, entity: EntityId) -> bool;
}
