//! Events the engine produces for presentation layers and observers.
//!
//! None of these carry authoritative state.

use serde::{Deserialize, Serialize};

use crate::components::PolicyKind;
use crate::ids::EntityId;
use crate::value_objects::{Angle, AmbientTrigger, Coordinates};

/// Entities were pulled into a storage; clients may animate the motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimateInsertingEntities {
    pub storage: EntityId,
    pub entities: Vec<EntityId>,
    pub positions: Vec<Coordinates>,
    pub angles: Vec<Angle>,
}

impl AnimateInsertingEntities {
    pub fn single(storage: EntityId, entity: EntityId, from: Coordinates, angle: Angle) -> Self {
        Self {
            storage,
            entities: vec![entity],
            positions: vec![from],
            angles: vec![angle],
        }
    }
}

/// Raised on a pickup source so listeners can attempt the actual pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickPickupEvent {
    pub pickup_source: EntityId,
    pub picked_up: EntityId,
    pub user: EntityId,
    pub handled: bool,
}

impl QuickPickupEvent {
    pub fn new(pickup_source: EntityId, picked_up: EntityId, user: EntityId) -> Self {
        Self {
            pickup_source,
            picked_up,
            user,
            handled: false,
        }
    }
}

/// Engine-level notifications fanned out to subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineEvent {
    /// A target was sealed inside a freshly spawned holder.
    Sealed {
        policy: PolicyKind,
        holder: EntityId,
        target: EntityId,
    },
    /// A holder released its contents and was deleted.
    Released {
        policy: PolicyKind,
        holder: EntityId,
        occupant: Option<EntityId>,
        trigger: Option<AmbientTrigger>,
    },
    AnimateInserting(AnimateInsertingEntities),
}
