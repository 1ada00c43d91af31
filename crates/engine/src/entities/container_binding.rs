//! Container binding: the single-slot container a holder owns.

use std::sync::Arc;

use stowage_domain::{ContainerId, ContainerKind, ContainerRef, EntityId};

use crate::infrastructure::ports::ContainerPort;

/// Binds holders to their single-slot container.
#[derive(Clone)]
pub struct ContainerBinding {
    containers: Arc<dyn ContainerPort>,
}

impl ContainerBinding {
    pub fn new(containers: Arc<dyn ContainerPort>) -> Self {
        Self { containers }
    }

    /// Get or create the holder's slot. Safe to call any number of times.
    pub fn ensure(&self, holder: EntityId, id: &ContainerId) -> ContainerRef {
        self.containers
            .ensure_container(holder, id, ContainerKind::Slot)
    }

    /// The holder's slot, if it was ever created.
    pub fn find(&self, holder: EntityId, id: &ContainerId) -> Option<ContainerRef> {
        self.containers.get_container(holder, id)
    }

    pub fn current_occupant(&self, holder: EntityId, id: &ContainerId) -> Option<EntityId> {
        let slot = self.find(holder, id)?;
        self.containers.contained(&slot).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockContainerPort;
    use mockall::predicate::eq;

    fn contents() -> ContainerId {
        ContainerId::new("contents").expect("valid container id")
    }

    #[test]
    fn ensure_always_requests_a_slot() {
        let holder = EntityId::new();
        let mut containers = MockContainerPort::new();
        containers
            .expect_ensure_container()
            .with(eq(holder), eq(contents()), eq(ContainerKind::Slot))
            .times(2)
            .returning(|owner, id, _| ContainerRef::new(owner, id.clone()));

        let binding = ContainerBinding::new(Arc::new(containers));
        let first = binding.ensure(holder, &contents());
        let second = binding.ensure(holder, &contents());

        assert_eq!(first, second);
    }

    #[test]
    fn occupant_is_none_without_a_slot() {
        let holder = EntityId::new();
        let mut containers = MockContainerPort::new();
        containers.expect_get_container().returning(|_, _| None);
        containers.expect_contained().never();

        let binding = ContainerBinding::new(Arc::new(containers));
        assert_eq!(binding.current_occupant(holder, &contents()), None);
    }

    #[test]
    fn occupant_is_first_contained_entity() {
        let holder = EntityId::new();
        let occupant = EntityId::new();
        let mut containers = MockContainerPort::new();
        containers
            .expect_get_container()
            .returning(|owner, id| Some(ContainerRef::new(owner, id.clone())));
        containers
            .expect_contained()
            .returning(move |_| vec![occupant]);

        let binding = ContainerBinding::new(Arc::new(containers));
        assert_eq!(binding.current_occupant(holder, &contents()), Some(occupant));
    }
}
