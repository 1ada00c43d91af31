//! Frangible containers: holders that break open to release one occupant.

use std::sync::Arc;

use stowage_domain::{
    AmbientToggles, AmbientTrigger, AuthorityContext, DoAfterCompleted, DoAfterKind,
    DoAfterRequest, EntityId, GetVerbsEvent, InteractHandEvent, PolicyKind, ReleaseOutcome,
    UseInHandEvent, Verb, VerbAction,
};

use super::ambient::AmbientReleaser;
use super::delayed::DelayedActionBridge;
use super::transfer::{Cue, CueAnchor, CueMode, ReleasePlan, TransferError, TransferOrchestrator};
use crate::stores::ComponentStore;

pub struct FrangibleContainers {
    components: Arc<ComponentStore>,
    orchestrator: Arc<TransferOrchestrator>,
    bridge: Arc<DelayedActionBridge>,
}

impl FrangibleContainers {
    pub fn new(
        components: Arc<ComponentStore>,
        orchestrator: Arc<TransferOrchestrator>,
        bridge: Arc<DelayedActionBridge>,
    ) -> Self {
        Self {
            components,
            orchestrator,
            bridge,
        }
    }

    pub fn use_in_hand(&self, event: &mut UseInHandEvent, authority: AuthorityContext) {
        if event.handled {
            return;
        }
        let opens = self
            .components
            .frangible(event.used)
            .is_some_and(|frangible| frangible.open_on_use);
        if opens {
            event.handled = self.try_start_open(event.user, event.used, authority);
        }
    }

    pub fn interact_hand(&self, event: &mut InteractHandEvent, authority: AuthorityContext) {
        if event.handled {
            return;
        }
        let opens = self
            .components
            .frangible(event.target)
            .is_some_and(|frangible| frangible.open_on_interact);
        if opens {
            event.handled = self.try_start_open(event.user, event.target, authority);
        }
    }

    /// Open verb, offered only to users who can reach, interact, and hold things.
    pub fn add_verbs(&self, event: &mut GetVerbsEvent) {
        if !event.can_access || !event.can_interact || !event.has_hands {
            return;
        }
        if let Some(frangible) = self.components.frangible(event.target) {
            event.verbs.push(Verb::interaction(
                frangible.open_verb,
                VerbAction::OpenFrangible {
                    user: event.user,
                    holder: event.target,
                },
            ));
        }
    }

    /// Open now, or once the container's delay elapses.
    pub fn try_start_open(
        &self,
        user: EntityId,
        holder: EntityId,
        authority: AuthorityContext,
    ) -> bool {
        let Some(frangible) = self.components.frangible(holder) else {
            return false;
        };
        let request =
            DoAfterRequest::new(DoAfterKind::FrangibleOpen, user, holder, frangible.delay)
                .with_target(holder)
                .need_hand();
        self.bridge
            .start_or_commit(request, || {
                self.commit_open(Some(user), holder, authority)
            })
            .handled()
    }

    pub fn on_do_after(
        &self,
        completed: &mut DoAfterCompleted,
        authority: AuthorityContext,
    ) -> bool {
        self.bridge.complete(completed, |done| {
            self.commit_open(Some(done.user), done.holder, authority)
        })
    }

    /// Break the container open and release its occupant.
    pub fn release(
        &self,
        user: Option<EntityId>,
        holder: EntityId,
        trigger: Option<AmbientTrigger>,
        authority: AuthorityContext,
    ) -> Result<ReleaseOutcome, TransferError> {
        let frangible = self
            .components
            .frangible(holder)
            .ok_or(TransferError::MissingPolicy {
                entity: holder,
                policy: PolicyKind::FrangibleContainer,
            })?;

        let plan = ReleasePlan {
            policy: PolicyKind::FrangibleContainer,
            user,
            holder,
            cue: Cue::optional(frangible.sound.as_ref(), CueMode::Predicted, CueAnchor::Holder),
            container_id: frangible.container_id,
            trash: frangible.trash_prototype,
            trigger,
        };
        self.orchestrator.release(&plan, authority)
    }

    fn commit_open(
        &self,
        user: Option<EntityId>,
        holder: EntityId,
        authority: AuthorityContext,
    ) -> bool {
        match self.release(user, holder, None, authority) {
            Ok(_) => true,
            Err(e) => {
                e.report(PolicyKind::FrangibleContainer);
                false
            }
        }
    }
}

impl AmbientReleaser for FrangibleContainers {
    fn policy(&self) -> PolicyKind {
        PolicyKind::FrangibleContainer
    }

    fn toggles(&self, holder: EntityId) -> Option<AmbientToggles> {
        self.components
            .frangible(holder)
            .map(|frangible| frangible.release_on)
    }

    fn release_ambient(
        &self,
        holder: EntityId,
        trigger: AmbientTrigger,
        authority: AuthorityContext,
    ) -> Result<ReleaseOutcome, TransferError> {
        self.release(None, holder, Some(trigger), authority)
    }
}
