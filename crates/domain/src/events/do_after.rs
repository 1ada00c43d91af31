//! Timed-action requests and their completions.

use serde::{Deserialize, Serialize};

use crate::ids::{DoAfterId, EntityId};
use crate::value_objects::Delay;

/// Which transfer a timed action will commit when it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoAfterKind {
    ParcelWrap,
    SpawnAndInsert,
    FrangibleOpen,
}

/// Everything the scheduler needs to run one interruptible wait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoAfterRequest {
    pub kind: DoAfterKind,
    pub user: EntityId,
    /// Entity carrying the policy component: the tool, or the holder itself.
    pub holder: EntityId,
    pub target: Option<EntityId>,
    pub duration: Delay,
    pub need_hand: bool,
    pub break_on_move: bool,
    pub break_on_damage: bool,
}

impl DoAfterRequest {
    pub fn new(kind: DoAfterKind, user: EntityId, holder: EntityId, duration: Delay) -> Self {
        Self {
            kind,
            user,
            holder,
            target: None,
            duration,
            need_hand: false,
            break_on_move: false,
            break_on_damage: false,
        }
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn need_hand(mut self) -> Self {
        self.need_hand = true;
        self
    }

    pub fn break_on_move(mut self) -> Self {
        self.break_on_move = true;
        self
    }

    pub fn break_on_damage(mut self) -> Self {
        self.break_on_damage = true;
        self
    }
}

/// Delivered by the scheduler once a timed action ends, successfully or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoAfterCompleted {
    pub id: DoAfterId,
    pub kind: DoAfterKind,
    pub user: EntityId,
    pub holder: EntityId,
    pub target: Option<EntityId>,
    pub handled: bool,
    pub cancelled: bool,
}

impl DoAfterCompleted {
    /// Completion for a request that ran to the end.
    pub fn finished(id: DoAfterId, request: &DoAfterRequest) -> Self {
        Self {
            id,
            kind: request.kind,
            user: request.user,
            holder: request.holder,
            target: request.target,
            handled: false,
            cancelled: false,
        }
    }

    pub fn cancelled(id: DoAfterId, request: &DoAfterRequest) -> Self {
        Self {
            cancelled: true,
            ..Self::finished(id, request)
        }
    }
}
