//! Discoverable verbs offered in context menus.
//!
//! Verbs carry a localization key rather than rendered text, and a tagged
//! action the host hands back to the engine when the verb is picked.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::value_objects::LocKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerbCategory {
    /// Offered when the user holds a tool and inspects a target.
    Utility,
    /// Offered on the target itself, hand contents irrelevant.
    Interaction,
}

/// What executing a verb does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerbAction {
    Wrap {
        user: EntityId,
        wrapper: EntityId,
        target: EntityId,
    },
    Unwrap {
        user: EntityId,
        parcel: EntityId,
    },
    OpenFrangible {
        user: EntityId,
        holder: EntityId,
    },
    SpawnAndInsert {
        user: EntityId,
        tool: EntityId,
        target: EntityId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verb {
    pub category: VerbCategory,
    pub text: LocKey,
    /// Entity whose sprite is shown next to the label.
    pub icon: Option<EntityId>,
    pub action: VerbAction,
}

impl Verb {
    pub fn utility(text: LocKey, action: VerbAction) -> Self {
        Self {
            category: VerbCategory::Utility,
            text,
            icon: None,
            action,
        }
    }

    pub fn interaction(text: LocKey, action: VerbAction) -> Self {
        Self {
            category: VerbCategory::Interaction,
            text,
            icon: None,
            action,
        }
    }

    pub fn with_icon(mut self, icon: EntityId) -> Self {
        self.icon = Some(icon);
        self
    }
}
