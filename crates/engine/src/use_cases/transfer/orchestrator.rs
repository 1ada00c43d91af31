//! Transfer orchestrator: the commit step shared by every variant.
//!
//! `seal` spawns a holder around a target (parcel wrap, spawn-and-insert).
//! `release` empties a holder and deletes it (unwrap, frangible open, ambient
//! release). Both keep the holder in whatever container the target or holder
//! used to sit in, degrading to a drop at the container's location when that
//! container refuses.
//!
//! In a predicted context neither operation touches the world: predicted-mode
//! cues still play and charges are still spent, everything else is left to
//! the authority.

use std::sync::Arc;

use stowage_domain::{
    AmbientTrigger, AuthorityContext, ChargeSpend, ContainerId, EngineEvent, EntityId, ItemSize,
    PolicyKind, PrototypeId, ReleaseOutcome, Removal, SealOutcome, WrappedParcelVisuals,
};

use super::cue::{Cue, CueSite};
use super::error::TransferError;
use crate::entities::Spawner;
use crate::infrastructure::ports::EnginePorts;

/// How a freshly spawned holder takes its size from the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolderSizing {
    pub maintain_size: bool,
    pub maintain_shape: bool,
    pub fallback: ItemSize,
}

/// Everything needed to seal `target` inside a new holder.
#[derive(Debug, Clone, PartialEq)]
pub struct SealPlan {
    pub policy: PolicyKind,
    pub user: Option<EntityId>,
    /// Entity carrying the policy; charges are drawn from it.
    pub source: EntityId,
    pub target: EntityId,
    pub holder_prototype: PrototypeId,
    /// Slot on the spawned holder that receives the target.
    pub container_id: ContainerId,
    pub sizing: Option<HolderSizing>,
    pub cue: Option<Cue>,
    pub charges: Option<u32>,
}

/// Everything needed to empty and delete a holder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub policy: PolicyKind,
    pub user: Option<EntityId>,
    pub holder: EntityId,
    pub container_id: ContainerId,
    pub trash: Option<PrototypeId>,
    pub cue: Option<Cue>,
    /// Set when the world, not a user, forced the release.
    pub trigger: Option<AmbientTrigger>,
}

pub struct TransferOrchestrator {
    ports: EnginePorts,
    spawner: Arc<Spawner>,
}

impl TransferOrchestrator {
    pub fn new(ports: EnginePorts, spawner: Arc<Spawner>) -> Self {
        Self { ports, spawner }
    }

    /// Seal the plan's target inside a new holder.
    ///
    /// Returns `Ok(None)` in a predicted context. On failure nothing is left
    /// behind: the holder is deleted, the target goes back where it was, and
    /// spent charges are refunded.
    pub fn seal(
        &self,
        plan: &SealPlan,
        authority: AuthorityContext,
    ) -> Result<Option<SealOutcome>, TransferError> {
        let spent = self.spend_charges(plan)?;

        if !authority.is_authoritative() {
            if let Some(cue) = &plan.cue {
                let origin = self
                    .ports
                    .entities
                    .coordinates(plan.target)
                    .unwrap_or_default();
                let site = CueSite {
                    holder: plan.source,
                    target: Some(plan.target),
                    origin,
                };
                cue.play(self.ports.audio.as_ref(), authority, site, plan.user);
            }
            tracing::debug!(
                policy = %plan.policy,
                target = %plan.target,
                "Predicted seal, leaving world changes to the authority"
            );
            return Ok(None);
        }

        let outcome = match self.seal_authoritative(plan) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.refund(plan.source, spent);
                return Err(e);
            }
        };

        if let Some(cue) = &plan.cue {
            let origin = self
                .ports
                .entities
                .coordinates(outcome.holder)
                .unwrap_or_default();
            let site = CueSite {
                holder: outcome.holder,
                target: Some(outcome.target),
                origin,
            };
            cue.play(self.ports.audio.as_ref(), authority, site, plan.user);
        }

        self.ports.events.publish(EngineEvent::Sealed {
            policy: plan.policy,
            holder: outcome.holder,
            target: outcome.target,
        });
        tracing::info!(
            policy = %plan.policy,
            holder = %outcome.holder,
            target = %outcome.target,
            "Sealed target in holder"
        );

        Ok(Some(outcome))
    }

    /// Release the holder's occupant (if any) and delete the holder.
    pub fn release(
        &self,
        plan: &ReleasePlan,
        authority: AuthorityContext,
    ) -> Result<ReleaseOutcome, TransferError> {
        let holder = plan.holder;
        let position = self
            .ports
            .entities
            .coordinates(holder)
            .ok_or(TransferError::EntityMissing(holder))?;
        let binding = self.spawner.binding();
        let slot = binding.find(holder, &plan.container_id);
        let occupant = binding.current_occupant(holder, &plan.container_id);
        let site = CueSite {
            holder,
            target: occupant,
            origin: position,
        };

        if !authority.is_authoritative() {
            if let Some(cue) = &plan.cue {
                cue.play(self.ports.audio.as_ref(), authority, site, plan.user);
            }
            tracing::debug!(
                policy = %plan.policy,
                holder = %holder,
                "Predicted release, leaving world changes to the authority"
            );
            return Ok(ReleaseOutcome::predicted(holder, occupant, position));
        }

        let containers = &self.ports.containers;
        if let (Some(occupant), Some(slot)) = (occupant, &slot) {
            containers.remove(occupant, slot, Removal::released_at(position));
        }

        let enclosing = containers.containing(holder);
        let mut occupant_dropped = false;
        if let Some(outer) = &enclosing {
            containers.remove(holder, outer, Removal::forced());
            if let Some(occupant) = occupant {
                occupant_dropped = !containers.insert_or_drop(occupant, outer);
                if occupant_dropped {
                    tracing::warn!(
                        holder = %holder,
                        occupant = %occupant,
                        container = %outer.id,
                        "Enclosing container refused released occupant, dropped it instead"
                    );
                }
            }
        }

        let trash = plan
            .trash
            .as_ref()
            .and_then(|prototype| match self.spawner.spawn(prototype, position) {
                Ok(trash) => {
                    containers.drop_next_to(trash, holder);
                    Some(trash)
                }
                Err(e) => {
                    tracing::warn!(holder = %holder, error = %e, "Failed to spawn release trash");
                    None
                }
            });

        if let Some(cue) = &plan.cue {
            cue.play(self.ports.audio.as_ref(), authority, site, plan.user);
        }

        self.spawner.despawn(holder);

        self.ports.events.publish(EngineEvent::Released {
            policy: plan.policy,
            holder,
            occupant,
            trigger: plan.trigger,
        });
        tracing::info!(
            policy = %plan.policy,
            holder = %holder,
            occupant = ?occupant,
            trigger = ?plan.trigger,
            "Released holder contents"
        );

        Ok(ReleaseOutcome {
            holder,
            occupant,
            position,
            enclosing,
            occupant_dropped,
            trash,
            authority,
        })
    }

    fn seal_authoritative(&self, plan: &SealPlan) -> Result<SealOutcome, TransferError> {
        let target = plan.target;
        let origin = self
            .ports
            .entities
            .coordinates(target)
            .ok_or(TransferError::EntityMissing(target))?;

        let holder = self.spawner.spawn(&plan.holder_prototype, origin)?;
        if let Some(sizing) = plan.sizing {
            self.apply_sizing(holder, target, sizing);
        }

        let containers = &self.ports.containers;
        let enclosing = containers.containing(target);
        let mut holder_dropped = false;
        if let Some(outer) = &enclosing {
            containers.remove(target, outer, Removal::forced());
            holder_dropped = !containers.insert_or_drop(holder, outer);
            if holder_dropped {
                tracing::warn!(
                    holder = %holder,
                    container = %outer.id,
                    "Enclosing container refused new holder, dropped it instead"
                );
            }
        }

        let inserted = self
            .spawner
            .binding()
            .find(holder, &plan.container_id)
            .is_some_and(|slot| containers.insert(target, &slot, false));
        if !inserted {
            tracing::error!(
                policy = %plan.policy,
                holder = %holder,
                target = %target,
                container = %plan.container_id,
                "Holder refused target, deleting holder"
            );
            self.spawner.despawn(holder);
            if let Some(outer) = &enclosing {
                containers.insert_or_drop(target, outer);
            }
            return Err(TransferError::InsertRejected { holder, target });
        }

        Ok(SealOutcome {
            holder,
            target,
            enclosing,
            holder_dropped,
        })
    }

    fn apply_sizing(&self, holder: EntityId, target: EntityId, sizing: HolderSizing) {
        let item = self.ports.items.item(target);
        let size = match &item {
            Some(item) if sizing.maintain_size => item.size,
            _ => sizing.fallback,
        };
        self.ports.items.set_size(holder, size);
        self.ports
            .appearance
            .set_data(holder, WrappedParcelVisuals::SIZE, size.id().to_string());

        if sizing.maintain_shape {
            if let Some(shape) = item.and_then(|item| item.shape) {
                self.ports.items.set_shape(holder, shape);
            }
        }
    }

    /// Spend the plan's charges in one atomic step. Returns what was actually taken.
    fn spend_charges(&self, plan: &SealPlan) -> Result<u32, TransferError> {
        let Some(amount) = plan.charges else {
            return Ok(0);
        };
        match self.ports.charges.try_use_charges(plan.source, amount) {
            ChargeSpend::Spent { remaining } => {
                tracing::debug!(source = %plan.source, spent = amount, remaining, "Spent charges");
                Ok(amount)
            }
            ChargeSpend::Untracked => Ok(0),
            ChargeSpend::Insufficient {
                available,
                requested,
            } => Err(TransferError::InsufficientCharges {
                available,
                requested,
            }),
        }
    }

    fn refund(&self, source: EntityId, amount: u32) {
        if amount > 0 {
            self.ports.charges.restore_charges(source, amount);
            tracing::debug!(source = %source, refunded = amount, "Refunded charges");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{ChargesPort, ContainerPort, EntityPort, ItemPort};
    use crate::test_fixtures::{fixture_catalog, proto, InMemoryHarness};
    use stowage_domain::{ContainerKind, Coordinates, ItemComponent, LimitedCharges};

    fn contents() -> ContainerId {
        ContainerId::new("contents").expect("valid")
    }

    fn parcel_plan(source: EntityId, target: EntityId) -> SealPlan {
        SealPlan {
            policy: PolicyKind::ParcelWrap,
            user: None,
            source,
            target,
            holder_prototype: proto("WrappedParcel"),
            container_id: contents(),
            sizing: Some(HolderSizing {
                maintain_size: true,
                maintain_shape: false,
                fallback: ItemSize::Ginormous,
            }),
            cue: None,
            charges: None,
        }
    }

    fn release_plan(holder: EntityId) -> ReleasePlan {
        ReleasePlan {
            policy: PolicyKind::WrappedParcel,
            user: None,
            holder,
            container_id: contents(),
            trash: None,
            cue: None,
            trigger: None,
        }
    }

    #[test]
    fn seal_takes_target_size() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let wrap = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::new(2.0, 2.0));

        let outcome = harness
            .app
            .orchestrator
            .seal(&parcel_plan(wrap, widget), AuthorityContext::Authoritative)
            .expect("sealed")
            .expect("authoritative outcome");

        assert_eq!(
            harness.world.item(outcome.holder).map(|item| item.size),
            Some(ItemSize::Small)
        );
        assert_eq!(
            harness.world.coordinates(outcome.holder),
            Some(Coordinates::new(2.0, 2.0))
        );
        assert_eq!(
            harness.world.containing(widget),
            Some(stowage_domain::ContainerRef::new(outcome.holder, contents()))
        );
    }

    #[test]
    fn seal_falls_back_when_size_not_kept() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let wrap = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);
        let mut plan = parcel_plan(wrap, widget);
        plan.sizing = Some(HolderSizing {
            maintain_size: false,
            maintain_shape: false,
            fallback: ItemSize::Huge,
        });

        let outcome = harness
            .app
            .orchestrator
            .seal(&plan, AuthorityContext::Authoritative)
            .expect("sealed")
            .expect("authoritative outcome");

        assert_eq!(
            harness.world.item(outcome.holder).map(|item| item.size),
            Some(ItemSize::Huge)
        );
    }

    #[test]
    fn seal_rejection_leaves_no_holder_and_refunds() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let tool = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);
        let mut plan = parcel_plan(tool, widget);
        plan.container_id = ContainerId::new("missing_slot").expect("valid");
        plan.charges = Some(5);

        let err = harness
            .app
            .orchestrator
            .seal(&plan, AuthorityContext::Authoritative)
            .expect_err("rejected");

        assert!(matches!(err, TransferError::InsertRejected { target, .. } if target == widget));
        assert!(harness.world.entities_of(&proto("WrappedParcel")).is_empty());
        assert_eq!(harness.world.containing(widget), None);
        assert_eq!(
            harness.charges.charges(tool),
            Some(LimitedCharges::full(30))
        );
    }

    #[test]
    fn seal_refuses_when_charges_ran_out() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let tool = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        harness.charges.set_charges(tool, LimitedCharges::new(1, 30));
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);
        let mut plan = parcel_plan(tool, widget);
        plan.charges = Some(2);

        let err = harness
            .app
            .orchestrator
            .seal(&plan, AuthorityContext::Authoritative)
            .expect_err("insufficient");

        assert_eq!(
            err,
            TransferError::InsufficientCharges {
                available: 1,
                requested: 2
            }
        );
        assert_eq!(harness.world.containing(widget), None);
    }

    #[test]
    fn seal_keeps_holder_in_enclosing_container() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let wrap = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        let crate_entity = harness.spawn("Crate", Coordinates::new(5.0, 5.0));
        let shelf = ContainerId::new("shelf").expect("valid");
        let outer = harness.world.ensure_container(
            crate_entity,
            &shelf,
            ContainerKind::Storage { capacity: None },
        );
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);
        assert!(harness.world.insert(widget, &outer, false));

        let outcome = harness
            .app
            .orchestrator
            .seal(&parcel_plan(wrap, widget), AuthorityContext::Authoritative)
            .expect("sealed")
            .expect("authoritative outcome");

        assert_eq!(outcome.enclosing.as_ref(), Some(&outer));
        assert!(!outcome.holder_dropped);
        assert_eq!(harness.world.containing(outcome.holder), Some(outer.clone()));
        assert_eq!(harness.world.contained(&outer), vec![outcome.holder]);
    }

    #[test]
    fn predicted_seal_changes_nothing() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let wrap = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);
        let before = harness.world.entity_count();

        let outcome = harness
            .app
            .orchestrator
            .seal(&parcel_plan(wrap, widget), AuthorityContext::Predicted)
            .expect("predicted seal");

        assert!(outcome.is_none());
        assert_eq!(harness.world.entity_count(), before);
        assert_eq!(harness.world.containing(widget), None);
    }

    #[test]
    fn release_of_empty_holder_still_deletes_it() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let parcel = harness.spawn("WrappedParcel", Coordinates::new(1.0, 1.0));
        let mut plan = release_plan(parcel);
        plan.trash = Some(proto("ParcelWrapTrash"));

        let outcome = harness
            .app
            .orchestrator
            .release(&plan, AuthorityContext::Authoritative)
            .expect("released");

        assert_eq!(outcome.occupant, None);
        assert!(outcome.trash.is_some());
        assert!(!harness.world.exists(parcel));
    }

    #[test]
    fn release_of_missing_holder_is_an_error() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let ghost = EntityId::new();
        let err = harness
            .app
            .orchestrator
            .release(&release_plan(ghost), AuthorityContext::Authoritative)
            .expect_err("missing");
        assert_eq!(err, TransferError::EntityMissing(ghost));
    }

    #[test]
    fn predicted_release_reports_occupant_without_moving_it() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let parcel = harness.spawn("WrappedParcel", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);
        let slot = harness
            .world
            .get_container(parcel, &contents())
            .expect("slot ensured at spawn");
        assert!(harness.world.insert(widget, &slot, false));

        let outcome = harness
            .app
            .orchestrator
            .release(&release_plan(parcel), AuthorityContext::Predicted)
            .expect("predicted release");

        assert_eq!(outcome.occupant, Some(widget));
        assert_eq!(outcome.authority, AuthorityContext::Predicted);
        assert!(harness.world.exists(parcel));
        assert_eq!(harness.world.containing(widget), Some(slot));
    }

    #[test]
    fn maintained_shape_is_copied() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let wrap = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        let rod = harness.spawn("Rod", Coordinates::ORIGIN);
        let mut plan = parcel_plan(wrap, rod);
        plan.sizing = Some(HolderSizing {
            maintain_size: true,
            maintain_shape: true,
            fallback: ItemSize::Ginormous,
        });

        let outcome = harness
            .app
            .orchestrator
            .seal(&plan, AuthorityContext::Authoritative)
            .expect("sealed")
            .expect("authoritative outcome");

        let rod_item: Option<ItemComponent> = harness.world.item(rod);
        assert_eq!(
            harness.world.item(outcome.holder).and_then(|item| item.shape),
            rod_item.and_then(|item| item.shape)
        );
    }
}
