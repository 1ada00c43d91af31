//! Spawn-and-insert: a tool that spawns a receptacle around its target.

use std::sync::Arc;

use stowage_domain::{
    AfterInteractEvent, AuthorityContext, DoAfterCompleted, DoAfterKind, DoAfterRequest,
    EntityId, GetVerbsEvent, PolicyKind, SealOutcome, SpawnAndInsertComponent, Verb, VerbAction,
};

use super::delayed::DelayedActionBridge;
use super::transfer::{
    Applicability, Cue, CueAnchor, CueMode, Inapplicable, SealPlan, TransferError,
    TransferOrchestrator, TransferRule,
};
use crate::infrastructure::ports::EnginePorts;
use crate::stores::ComponentStore;

pub struct SpawnAndInsert {
    components: Arc<ComponentStore>,
    applicability: Applicability,
    orchestrator: Arc<TransferOrchestrator>,
    bridge: Arc<DelayedActionBridge>,
}

impl SpawnAndInsert {
    pub fn new(
        ports: &EnginePorts,
        components: Arc<ComponentStore>,
        orchestrator: Arc<TransferOrchestrator>,
        bridge: Arc<DelayedActionBridge>,
    ) -> Self {
        Self {
            components,
            applicability: Applicability::new(
                ports.items.clone(),
                ports.whitelist.clone(),
                ports.charges.clone(),
            ),
            orchestrator,
            bridge,
        }
    }

    pub fn is_applicable(&self, tool: EntityId, target: EntityId) -> bool {
        self.components
            .spawn_and_insert(tool)
            .is_some_and(|policy| self.check(tool, target, &policy).is_ok())
    }

    pub fn after_interact(&self, event: &mut AfterInteractEvent, authority: AuthorityContext) {
        if event.handled || !event.can_reach {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        event.handled = self.try_start(event.user, event.used, target, authority);
    }

    /// Utility verb on the held tool, shown with the tool as its icon.
    pub fn add_verbs(&self, event: &mut GetVerbsEvent) {
        if !event.can_access || !event.can_interact {
            return;
        }
        let Some(tool) = event.using else {
            return;
        };
        let Some(policy) = self.components.spawn_and_insert(tool) else {
            return;
        };
        if self.check(tool, event.target, &policy).is_err() {
            return;
        }
        event.verbs.push(
            Verb::utility(
                policy.interact_verb,
                VerbAction::SpawnAndInsert {
                    user: event.user,
                    tool,
                    target: event.target,
                },
            )
            .with_icon(tool),
        );
    }

    /// Check applicability, then spawn now or once the tool's delay elapses.
    pub fn try_start(
        &self,
        user: EntityId,
        tool: EntityId,
        target: EntityId,
        authority: AuthorityContext,
    ) -> bool {
        let Some(policy) = self.components.spawn_and_insert(tool) else {
            return false;
        };
        if let Err(reason) = self.check(tool, target, &policy) {
            tracing::debug!(
                tool = %tool,
                target = %target,
                reason = %reason,
                "Spawn-and-insert not applicable"
            );
            return false;
        }

        let request = DoAfterRequest::new(DoAfterKind::SpawnAndInsert, user, tool, policy.delay)
            .with_target(target)
            .need_hand()
            .break_on_move()
            .break_on_damage();
        self.bridge
            .start_or_commit(request, || {
                match self.commit(Some(user), tool, target, authority) {
                    Ok(_) => true,
                    Err(e) => {
                        e.report(PolicyKind::SpawnAndInsert);
                        false
                    }
                }
            })
            .handled()
    }

    /// Handled whenever the completion names a target, even if the commit fails.
    pub fn on_do_after(
        &self,
        completed: &mut DoAfterCompleted,
        authority: AuthorityContext,
    ) -> bool {
        self.bridge.complete(completed, |done| {
            let Some(target) = done.target else {
                return false;
            };
            if let Err(e) = self.commit(Some(done.user), done.holder, target, authority) {
                e.report(PolicyKind::SpawnAndInsert);
            }
            true
        })
    }

    /// Spawn the receptacle and insert the target. Applicability is the caller's job.
    pub fn commit(
        &self,
        user: Option<EntityId>,
        tool: EntityId,
        target: EntityId,
        authority: AuthorityContext,
    ) -> Result<Option<SealOutcome>, TransferError> {
        let policy = self
            .components
            .spawn_and_insert(tool)
            .ok_or(TransferError::MissingPolicy {
                entity: tool,
                policy: PolicyKind::SpawnAndInsert,
            })?;

        let plan = SealPlan {
            policy: PolicyKind::SpawnAndInsert,
            user,
            source: tool,
            target,
            cue: Cue::optional(policy.sound.as_ref(), CueMode::Predicted, CueAnchor::Target),
            holder_prototype: policy.to_spawn,
            container_id: policy.container_id,
            sizing: None,
            charges: policy.charges_consumed,
        };
        self.orchestrator.seal(&plan, authority)
    }

    fn check(
        &self,
        tool: EntityId,
        target: EntityId,
        policy: &SpawnAndInsertComponent,
    ) -> Result<(), Inapplicable> {
        self.applicability.check(&TransferRule {
            source: tool,
            target,
            require_item: false,
            whitelist: policy.whitelist.as_ref(),
            blacklist: policy.blacklist.as_ref(),
            charges: policy.charges_consumed,
        })
    }
}
