//! Parcel wrapping and unwrapping.
//!
//! A parcel wrap tool used on an item seals it inside a freshly spawned
//! parcel, immediately or after its wrap delay. Using a parcel in hand (or
//! picking its unwrap verb) opens it again, leaving trash behind. Destroying
//! or reclaiming a parcel releases whatever is inside.

use std::sync::Arc;

use stowage_domain::{
    AfterInteractEvent, AmbientToggles, AmbientTrigger, AuthorityContext, ContainerId,
    DoAfterCompleted, DoAfterKind, DoAfterRequest, EntityId, GetVerbsEvent, ParcelWrapComponent,
    PolicyKind, PrototypeCatalog, ReleaseOutcome, SealOutcome, UseInHandEvent, Verb, VerbAction,
    WrappedParcelComponent,
};

use super::ambient::AmbientReleaser;
use super::delayed::DelayedActionBridge;
use super::transfer::{
    Applicability, Cue, CueAnchor, CueMode, HolderSizing, Inapplicable, ReleasePlan, SealPlan,
    TransferError, TransferOrchestrator, TransferRule,
};
use crate::infrastructure::ports::EnginePorts;
use crate::stores::ComponentStore;

pub struct ParcelWrapping {
    ports: EnginePorts,
    components: Arc<ComponentStore>,
    catalog: Arc<PrototypeCatalog>,
    applicability: Applicability,
    orchestrator: Arc<TransferOrchestrator>,
    bridge: Arc<DelayedActionBridge>,
}

impl ParcelWrapping {
    pub fn new(
        ports: EnginePorts,
        components: Arc<ComponentStore>,
        catalog: Arc<PrototypeCatalog>,
        orchestrator: Arc<TransferOrchestrator>,
        bridge: Arc<DelayedActionBridge>,
    ) -> Self {
        let applicability = Applicability::new(
            ports.items.clone(),
            ports.whitelist.clone(),
            ports.charges.clone(),
        );
        Self {
            ports,
            components,
            catalog,
            applicability,
            orchestrator,
            bridge,
        }
    }

    /// Whether `wrapper` can wrap `target` right now.
    pub fn is_wrappable(&self, wrapper: EntityId, target: EntityId) -> bool {
        self.components
            .parcel_wrap(wrapper)
            .is_some_and(|wrap| self.check(wrapper, target, &wrap).is_ok())
    }

    pub fn after_interact(&self, event: &mut AfterInteractEvent, authority: AuthorityContext) {
        if event.handled || !event.can_reach {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        event.handled = self.try_start_wrap(event.user, event.used, target, authority);
    }

    /// Check applicability, then wrap now or once the wrap delay elapses.
    pub fn try_start_wrap(
        &self,
        user: EntityId,
        wrapper: EntityId,
        target: EntityId,
        authority: AuthorityContext,
    ) -> bool {
        let Some(wrap) = self.components.parcel_wrap(wrapper) else {
            return false;
        };
        if let Err(reason) = self.check(wrapper, target, &wrap) {
            tracing::debug!(
                wrapper = %wrapper,
                target = %target,
                reason = %reason,
                "Target cannot be wrapped"
            );
            return false;
        }

        let request =
            DoAfterRequest::new(DoAfterKind::ParcelWrap, user, wrapper, wrap.wrap_delay)
                .with_target(target)
                .need_hand()
                .break_on_move()
                .break_on_damage();
        self.bridge
            .start_or_commit(request, || {
                self.commit_wrap(Some(user), wrapper, target, authority)
            })
            .handled()
    }

    pub fn on_do_after(
        &self,
        completed: &mut DoAfterCompleted,
        authority: AuthorityContext,
    ) -> bool {
        self.bridge.complete(completed, |done| match done.target {
            Some(target) => self.commit_wrap(Some(done.user), done.holder, target, authority),
            None => false,
        })
    }

    /// Seal `target` in a new parcel. Applicability is the caller's job.
    pub fn wrap(
        &self,
        user: Option<EntityId>,
        wrapper: EntityId,
        target: EntityId,
        authority: AuthorityContext,
    ) -> Result<Option<SealOutcome>, TransferError> {
        let wrap = self
            .components
            .parcel_wrap(wrapper)
            .ok_or(TransferError::MissingPolicy {
                entity: wrapper,
                policy: PolicyKind::ParcelWrap,
            })?;

        let plan = SealPlan {
            policy: PolicyKind::ParcelWrap,
            user,
            source: wrapper,
            target,
            container_id: self.parcel_container(&wrap),
            holder_prototype: wrap.parcel_prototype,
            sizing: Some(HolderSizing {
                maintain_size: wrap.wrapped_items_maintain_size,
                maintain_shape: wrap.wrapped_items_maintain_shape,
                fallback: wrap.fallback_item_size,
            }),
            cue: Cue::optional(wrap.wrap_sound.as_ref(), CueMode::Broadcast, CueAnchor::Holder),
            charges: wrap.charges_consumed,
        };
        self.orchestrator.seal(&plan, authority)
    }

    pub fn use_in_hand(&self, event: &mut UseInHandEvent, authority: AuthorityContext) {
        if event.handled || !self.components.has(event.used, PolicyKind::WrappedParcel) {
            return;
        }
        event.handled = true;
        if let Err(e) = self.unwrap(Some(event.user), event.used, authority) {
            e.report(PolicyKind::WrappedParcel);
        }
    }

    /// Wrap verb on the held wrapper, unwrap verb on a parcel.
    pub fn add_verbs(&self, event: &mut GetVerbsEvent) {
        if !event.can_access {
            return;
        }

        if let Some(wrapper) = event.using {
            if self.is_wrappable(wrapper, event.target) {
                event.verbs.push(Verb::utility(
                    ParcelWrapComponent::wrap_verb(),
                    VerbAction::Wrap {
                        user: event.user,
                        wrapper,
                        target: event.target,
                    },
                ));
            }
        }

        if self.components.has(event.target, PolicyKind::WrappedParcel) {
            event.verbs.push(Verb::interaction(
                WrappedParcelComponent::unwrap_verb(),
                VerbAction::Unwrap {
                    user: event.user,
                    parcel: event.target,
                },
            ));
        }
    }

    pub fn unwrap(
        &self,
        user: Option<EntityId>,
        parcel: EntityId,
        authority: AuthorityContext,
    ) -> Result<ReleaseOutcome, TransferError> {
        self.release(user, parcel, None, authority)
    }

    fn release(
        &self,
        user: Option<EntityId>,
        parcel: EntityId,
        trigger: Option<AmbientTrigger>,
        authority: AuthorityContext,
    ) -> Result<ReleaseOutcome, TransferError> {
        let wrapped = self
            .components
            .wrapped_parcel(parcel)
            .ok_or(TransferError::MissingPolicy {
                entity: parcel,
                policy: PolicyKind::WrappedParcel,
            })?;

        let plan = ReleasePlan {
            policy: PolicyKind::WrappedParcel,
            user,
            holder: parcel,
            cue: Cue::optional(
                wrapped.unwrap_sound.as_ref(),
                CueMode::Broadcast,
                CueAnchor::Origin,
            ),
            container_id: wrapped.container_id,
            trash: wrapped.unwrap_trash,
            trigger,
        };
        self.orchestrator.release(&plan, authority)
    }

    fn check(
        &self,
        wrapper: EntityId,
        target: EntityId,
        wrap: &ParcelWrapComponent,
    ) -> Result<(), Inapplicable> {
        self.applicability.check(&TransferRule {
            source: wrapper,
            target,
            require_item: true,
            whitelist: wrap.whitelist.as_ref(),
            blacklist: wrap.blacklist.as_ref(),
            charges: wrap.charges_consumed,
        })
    }

    fn commit_wrap(
        &self,
        user: Option<EntityId>,
        wrapper: EntityId,
        target: EntityId,
        authority: AuthorityContext,
    ) -> bool {
        match self.wrap(user, wrapper, target, authority) {
            Ok(_) => true,
            Err(e) => {
                e.report(PolicyKind::ParcelWrap);
                false
            }
        }
    }

    /// Slot the parcel prototype declares for its contents.
    fn parcel_container(&self, wrap: &ParcelWrapComponent) -> ContainerId {
        self.catalog
            .get(&wrap.parcel_prototype)
            .and_then(|def| def.components.wrapped_parcel.as_ref())
            .map(|parcel| parcel.container_id.clone())
            .unwrap_or_else(|| WrappedParcelComponent::default().container_id)
    }
}

impl AmbientReleaser for ParcelWrapping {
    fn policy(&self) -> PolicyKind {
        PolicyKind::WrappedParcel
    }

    fn toggles(&self, holder: EntityId) -> Option<AmbientToggles> {
        self.components
            .wrapped_parcel(holder)
            .map(|_| WrappedParcelComponent::release_triggers())
    }

    fn release_ambient(
        &self,
        holder: EntityId,
        trigger: AmbientTrigger,
        authority: AuthorityContext,
    ) -> Result<ReleaseOutcome, TransferError> {
        let outcome = self.release(None, holder, Some(trigger), authority)?;
        if let Some(contents) = outcome.occupant {
            self.ports.popups.popup_predicted(
                &WrappedParcelComponent::destroyed_popup(),
                contents,
                None,
            );
        }
        Ok(outcome)
    }
}
