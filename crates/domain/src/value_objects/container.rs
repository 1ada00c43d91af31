//! Container handles and removal options

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::value_objects::{ContainerId, Coordinates};

/// Handle to one named container on an owning entity.
///
/// Two handles compare equal exactly when they address the same underlying container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerRef {
    pub owner: EntityId,
    pub id: ContainerId,
}

impl ContainerRef {
    pub fn new(owner: EntityId, id: ContainerId) -> Self {
        Self { owner, id }
    }
}

/// What a container can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerKind {
    /// Exactly one entity or nothing
    Slot,
    /// Any number of entities up to `capacity`
    Storage { capacity: Option<u32> },
}

impl ContainerKind {
    pub fn capacity(self) -> Option<u32> {
        match self {
            Self::Slot => Some(1),
            Self::Storage { capacity } => capacity,
        }
    }
}

/// How an entity leaves a container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Removal {
    /// Ignore container refusals
    pub force: bool,
    /// Reattach the entity to the world instead of leaving it detached
    pub reparent: bool,
    /// Where a reparented entity lands; its current position if unset
    pub destination: Option<Coordinates>,
}

impl Removal {
    /// Plain removal that respects the container's rules
    pub fn standard() -> Self {
        Self {
            force: false,
            reparent: true,
            destination: None,
        }
    }

    /// Removal that the container cannot refuse
    pub fn forced() -> Self {
        Self {
            force: true,
            reparent: true,
            destination: None,
        }
    }

    /// Forced removal that places the entity at `destination`
    pub fn released_at(destination: Coordinates) -> Self {
        Self {
            force: true,
            reparent: true,
            destination: Some(destination),
        }
    }
}
