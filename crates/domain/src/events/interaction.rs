//! Trigger events delivered by the host's interaction layer.
//!
//! Each event carries a `handled` flag. A handler that acts on the event sets
//! it; a handler that finds the event already handled leaves it alone.

use serde::{Deserialize, Serialize};

use super::verbs::Verb;
use crate::ids::EntityId;
use crate::value_objects::AmbientTrigger;

/// Closed set of trigger kinds the engine routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    /// A held entity was used on a target.
    AfterInteract,
    /// A held entity was activated in hand.
    UseInHand,
    /// A target was interacted with using an empty hand.
    InteractHand,
    /// The verb menu for a target is being assembled.
    GetVerbs,
    /// A timed action finished or was cancelled.
    DoAfterCompleted,
    /// The world damaged, recycled, or deleted a holder.
    Ambient(AmbientTrigger),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AfterInteractEvent {
    pub user: EntityId,
    pub used: EntityId,
    pub target: Option<EntityId>,
    pub can_reach: bool,
    pub handled: bool,
}

impl AfterInteractEvent {
    pub fn new(user: EntityId, used: EntityId, target: Option<EntityId>, can_reach: bool) -> Self {
        Self {
            user,
            used,
            target,
            can_reach,
            handled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseInHandEvent {
    pub user: EntityId,
    pub used: EntityId,
    pub handled: bool,
}

impl UseInHandEvent {
    pub fn new(user: EntityId, used: EntityId) -> Self {
        Self {
            user,
            used,
            handled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractHandEvent {
    pub user: EntityId,
    pub target: EntityId,
    pub handled: bool,
}

impl InteractHandEvent {
    pub fn new(user: EntityId, target: EntityId) -> Self {
        Self {
            user,
            target,
            handled: false,
        }
    }
}

/// Verb-menu request; handlers append to `verbs`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetVerbsEvent {
    pub user: EntityId,
    pub target: EntityId,
    /// Entity held in the active hand, if any.
    pub using: Option<EntityId>,
    pub can_access: bool,
    pub can_interact: bool,
    pub has_hands: bool,
    pub verbs: Vec<Verb>,
}

impl GetVerbsEvent {
    pub fn new(user: EntityId, target: EntityId, using: Option<EntityId>) -> Self {
        Self {
            user,
            target,
            using,
            can_access: true,
            can_interact: true,
            has_hands: true,
            verbs: Vec::new(),
        }
    }

    pub fn with_access(mut self, can_access: bool, can_interact: bool, has_hands: bool) -> Self {
        self.can_access = can_access;
        self.can_interact = can_interact;
        self.has_hands = has_hands;
        self
    }
}
