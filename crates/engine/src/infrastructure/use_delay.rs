//! In-memory named cooldowns.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use stowage_domain::{Delay, EntityId};

use crate::infrastructure::clock::add_delay;
use crate::infrastructure::ports::{ClockPort, UseDelayPort};

struct DelaySlot {
    length: Delay,
    ends_at: Option<DateTime<Utc>>,
}

/// Cooldowns keyed by entity and delay id.
pub struct InMemoryUseDelay {
    clock: Arc<dyn ClockPort>,
    slots: DashMap<(EntityId, String), DelaySlot>,
}

impl InMemoryUseDelay {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            slots: DashMap::new(),
        }
    }

    pub fn length(&self, entity: EntityId, id: &str) -> Option<Delay> {
        self.slots
            .get(&(entity, id.to_string()))
            .map(|slot| slot.length)
    }
}

impl UseDelayPort for InMemoryUseDelay {
    fn set_length(&self, entity: EntityId, id: &str, length: Delay) {
        self.slots
            .entry((entity, id.to_string()))
            .and_modify(|slot| slot.length = length)
            .or_insert(DelaySlot {
                length,
                ends_at: None,
            });
    }

    fn is_delayed(&self, entity: EntityId, id: &str) -> bool {
        let now = self.clock.now();
        self.slots
            .get(&(entity, id.to_string()))
            .and_then(|slot| slot.ends_at)
            .is_some_and(|end| now < end)
    }

    fn try_reset_delay(&self, entity: EntityId, id: &str, check_delayed: bool) -> bool {
        let now = self.clock.now();
        let Some(mut slot) = self.slots.get_mut(&(entity, id.to_string())) else {
            return false;
        };
        if check_delayed && slot.ends_at.is_some_and(|end| now < end) {
            return false;
        }
        slot.ends_at = Some(add_delay(now, slot.length));
        true
    }

    fn forget(&self, entity: EntityId) {
        self.slots.retain(|(owner, _), _| *owner != entity);
    }
}
