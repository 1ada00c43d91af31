//! In-memory charge counters.

use dashmap::DashMap;
use stowage_domain::{ChargeSpend, EntityId, LimitedCharges};

use crate::infrastructure::ports::ChargesPort;

/// Per-entity charge counters. Each counter lives behind its map shard's
/// lock, so check-and-decrement never interleaves with another spend.
#[derive(Default)]
pub struct InMemoryCharges {
    counters: DashMap<EntityId, LimitedCharges>,
}

impl InMemoryCharges {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChargesPort for InMemoryCharges {
    fn set_charges(&self, entity: EntityId, charges: LimitedCharges) {
        self.counters.insert(entity, charges);
    }

    fn charges(&self, entity: EntityId) -> Option<LimitedCharges> {
        self.counters.get(&entity).map(|c| *c)
    }

    fn has_insufficient_charges(&self, entity: EntityId, amount: u32) -> bool {
        self.counters
            .get(&entity)
            .is_some_and(|c| c.has_insufficient(amount))
    }

    fn try_use_charges(&self, entity: EntityId, amount: u32) -> ChargeSpend {
        match self.counters.get_mut(&entity) {
            Some(mut counter) => counter.try_spend(amount),
            None => ChargeSpend::Untracked,
        }
    }

    fn restore_charges(&self, entity: EntityId, amount: u32) {
        if let Some(mut counter) = self.counters.get_mut(&entity) {
            counter.restore(amount);
        }
    }

    fn forget(&self, entity: EntityId) {
        self.counters.remove(&entity);
    }
}
