//! Trigger routing.
//!
//! Every trigger kind maps to a fixed list of policy handlers. Handlers run
//! in table order and stop as soon as one marks the trigger handled.

use std::sync::Arc;

use stowage_domain::{
    AfterInteractEvent, AmbientTrigger, AuthorityContext, DoAfterCompleted, DoAfterKind,
    EntityId, GetVerbsEvent, InteractHandEvent, PolicyKind, ReleaseOutcome, TriggerKind,
    UseInHandEvent, VerbAction,
};

use super::ambient::{AmbientReleaser, AmbientTriggerAdapter};
use super::frangible::FrangibleContainers;
use super::parcel_wrap::ParcelWrapping;
use super::quick_pickup::QuickPickup;
use super::spawn_insert::SpawnAndInsert;
use super::transfer::TransferError;

/// (trigger, policy) pairs in the order handlers are tried.
pub static ROUTES: &[(TriggerKind, PolicyKind)] = &[
    (TriggerKind::AfterInteract, PolicyKind::ParcelWrap),
    (TriggerKind::AfterInteract, PolicyKind::SpawnAndInsert),
    (TriggerKind::AfterInteract, PolicyKind::QuickPickup),
    (TriggerKind::UseInHand, PolicyKind::WrappedParcel),
    (TriggerKind::UseInHand, PolicyKind::FrangibleContainer),
    (TriggerKind::InteractHand, PolicyKind::FrangibleContainer),
    (TriggerKind::GetVerbs, PolicyKind::ParcelWrap),
    (TriggerKind::GetVerbs, PolicyKind::WrappedParcel),
    (TriggerKind::GetVerbs, PolicyKind::FrangibleContainer),
    (TriggerKind::GetVerbs, PolicyKind::SpawnAndInsert),
    (TriggerKind::DoAfterCompleted, PolicyKind::ParcelWrap),
    (TriggerKind::DoAfterCompleted, PolicyKind::FrangibleContainer),
    (TriggerKind::DoAfterCompleted, PolicyKind::SpawnAndInsert),
    (TriggerKind::Ambient(AmbientTrigger::Destroyed), PolicyKind::WrappedParcel),
    (TriggerKind::Ambient(AmbientTrigger::Destroyed), PolicyKind::FrangibleContainer),
    (TriggerKind::Ambient(AmbientTrigger::Reclaimed), PolicyKind::WrappedParcel),
    (TriggerKind::Ambient(AmbientTrigger::Reclaimed), PolicyKind::FrangibleContainer),
    (TriggerKind::Ambient(AmbientTrigger::Broken), PolicyKind::WrappedParcel),
    (TriggerKind::Ambient(AmbientTrigger::Broken), PolicyKind::FrangibleContainer),
];

/// Policies routed for `trigger`, in handler order.
pub fn routes(trigger: TriggerKind) -> impl Iterator<Item = PolicyKind> {
    ROUTES
        .iter()
        .filter(move |(kind, _)| *kind == trigger)
        .map(|(_, policy)| *policy)
}

/// Policy that scheduled a timed action of `kind`.
fn policy_for(kind: DoAfterKind) -> PolicyKind {
    match kind {
        DoAfterKind::ParcelWrap => PolicyKind::ParcelWrap,
        DoAfterKind::SpawnAndInsert => PolicyKind::SpawnAndInsert,
        DoAfterKind::FrangibleOpen => PolicyKind::FrangibleContainer,
    }
}

pub struct InteractionDispatcher {
    authority: AuthorityContext,
    parcel_wrap: Arc<ParcelWrapping>,
    frangible: Arc<FrangibleContainers>,
    spawn_insert: Arc<SpawnAndInsert>,
    quick_pickup: Arc<QuickPickup>,
    ambient: AmbientTriggerAdapter,
}

impl InteractionDispatcher {
    pub fn new(
        authority: AuthorityContext,
        parcel_wrap: Arc<ParcelWrapping>,
        frangible: Arc<FrangibleContainers>,
        spawn_insert: Arc<SpawnAndInsert>,
        quick_pickup: Arc<QuickPickup>,
    ) -> Self {
        Self {
            authority,
            parcel_wrap,
            frangible,
            spawn_insert,
            quick_pickup,
            ambient: AmbientTriggerAdapter::new(),
        }
    }

    pub fn authority(&self) -> AuthorityContext {
        self.authority
    }

    pub fn after_interact(&self, event: &mut AfterInteractEvent) {
        for policy in routes(TriggerKind::AfterInteract) {
            if event.handled {
                return;
            }
            match policy {
                PolicyKind::ParcelWrap => self.parcel_wrap.after_interact(event, self.authority),
                PolicyKind::SpawnAndInsert => {
                    self.spawn_insert.after_interact(event, self.authority)
                }
                PolicyKind::QuickPickup => self.quick_pickup.after_interact(event),
                _ => {}
            }
        }
    }

    pub fn use_in_hand(&self, event: &mut UseInHandEvent) {
        for policy in routes(TriggerKind::UseInHand) {
            if event.handled {
                return;
            }
            match policy {
                PolicyKind::WrappedParcel => self.parcel_wrap.use_in_hand(event, self.authority),
                PolicyKind::FrangibleContainer => {
                    self.frangible.use_in_hand(event, self.authority)
                }
                _ => {}
            }
        }
    }

    pub fn interact_hand(&self, event: &mut InteractHandEvent) {
        for policy in routes(TriggerKind::InteractHand) {
            if event.handled {
                return;
            }
            if policy == PolicyKind::FrangibleContainer {
                self.frangible.interact_hand(event, self.authority);
            }
        }
    }

    /// Collect verbs from every policy; verb gathering is never short-circuited.
    pub fn get_verbs(&self, event: &mut GetVerbsEvent) {
        for policy in routes(TriggerKind::GetVerbs) {
            match policy {
                // One call covers both the wrapper's and the parcel's verbs.
                PolicyKind::ParcelWrap => self.parcel_wrap.add_verbs(event),
                PolicyKind::FrangibleContainer => self.frangible.add_verbs(event),
                PolicyKind::SpawnAndInsert => self.spawn_insert.add_verbs(event),
                _ => {}
            }
        }
    }

    /// Hand a finished timed action back to the policy that started it.
    pub fn do_after_completed(&self, completed: &mut DoAfterCompleted) -> bool {
        let owner = policy_for(completed.kind);
        if !routes(TriggerKind::DoAfterCompleted).any(|policy| policy == owner) {
            return false;
        }
        match owner {
            PolicyKind::ParcelWrap => self.parcel_wrap.on_do_after(completed, self.authority),
            PolicyKind::FrangibleContainer => {
                self.frangible.on_do_after(completed, self.authority)
            }
            PolicyKind::SpawnAndInsert => self.spawn_insert.on_do_after(completed, self.authority),
            _ => false,
        }
    }

    /// Release `holder` if its policy opens on `trigger`. `None` when nothing listened.
    pub fn ambient(
        &self,
        holder: EntityId,
        trigger: AmbientTrigger,
    ) -> Option<Result<ReleaseOutcome, TransferError>> {
        routes(TriggerKind::Ambient(trigger)).find_map(|policy| {
            let releaser: &dyn AmbientReleaser = match policy {
                PolicyKind::WrappedParcel => self.parcel_wrap.as_ref(),
                PolicyKind::FrangibleContainer => self.frangible.as_ref(),
                _ => return None,
            };
            self.ambient
                .on_ambient(releaser, holder, trigger, self.authority)
        })
    }

    /// Run a verb the user picked from a menu.
    pub fn execute_verb(&self, action: VerbAction) -> bool {
        match action {
            VerbAction::Wrap {
                user,
                wrapper,
                target,
            } => self
                .parcel_wrap
                .try_start_wrap(user, wrapper, target, self.authority),
            VerbAction::Unwrap { user, parcel } => {
                match self.parcel_wrap.unwrap(Some(user), parcel, self.authority) {
                    Ok(_) => true,
                    Err(e) => {
                        e.report(PolicyKind::WrappedParcel);
                        false
                    }
                }
            }
            VerbAction::OpenFrangible { user, holder } => {
                self.frangible.try_start_open(user, holder, self.authority)
            }
            VerbAction::SpawnAndInsert { user, tool, target } => {
                self.spawn_insert
                    .try_start(user, tool, target, self.authority)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{ContainerPort, EntityPort};
    use crate::test_fixtures::{fixture_catalog, proto, InMemoryHarness};
    use stowage_domain::{Coordinates, Delay};

    #[test]
    fn every_ambient_trigger_reaches_both_holders() {
        for trigger in AmbientTrigger::ALL {
            let policies: Vec<_> = routes(TriggerKind::Ambient(trigger)).collect();
            assert_eq!(
                policies,
                vec![PolicyKind::WrappedParcel, PolicyKind::FrangibleContainer]
            );
        }
    }

    #[test]
    fn every_timed_action_has_a_route() {
        for kind in [
            DoAfterKind::ParcelWrap,
            DoAfterKind::SpawnAndInsert,
            DoAfterKind::FrangibleOpen,
        ] {
            assert!(routes(TriggerKind::DoAfterCompleted).any(|p| p == policy_for(kind)));
        }
    }

    #[test]
    fn after_interact_stops_at_first_handler() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let user = harness.spawn("Crate", Coordinates::ORIGIN);
        let wrapper = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);

        let mut event = AfterInteractEvent::new(user, wrapper, Some(widget), true);
        harness.app.dispatcher.after_interact(&mut event);

        assert!(event.handled);
        assert!(harness.world.containing(widget).is_some());
        assert_eq!(harness.world.entities_of(&proto("WrappedParcel")).len(), 1);
    }

    #[test]
    fn verbs_are_gathered_and_executed() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let user = harness.spawn("Crate", Coordinates::ORIGIN);
        let egg = harness.spawn("SurpriseEgg", Coordinates::ORIGIN);

        let mut event = GetVerbsEvent::new(user, egg, None);
        harness.app.dispatcher.get_verbs(&mut event);
        assert_eq!(event.verbs.len(), 1);

        assert!(harness.app.dispatcher.execute_verb(event.verbs[0].action));
        harness.clock.advance(Delay::from_millis(1500));
        for mut completed in harness.scheduler.tick() {
            assert!(harness.app.dispatcher.do_after_completed(&mut completed));
        }
        assert!(!harness.world.exists(egg));
    }

    #[test]
    fn ambient_respects_policy_toggles() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let user = harness.spawn("Crate", Coordinates::ORIGIN);
        let wrapper = harness.spawn("ParcelWrap", Coordinates::ORIGIN);
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);
        let parcel = harness
            .app
            .parcel_wrap
            .wrap(Some(user), wrapper, widget, AuthorityContext::Authoritative)
            .expect("wrapped")
            .expect("authoritative")
            .holder;

        assert!(harness
            .app
            .dispatcher
            .ambient(parcel, AmbientTrigger::Broken)
            .is_none());
        assert!(harness.world.exists(parcel));

        let outcome = harness
            .app
            .dispatcher
            .ambient(parcel, AmbientTrigger::Destroyed)
            .expect("parcel listens for destruction")
            .expect("released");
        assert_eq!(outcome.occupant, Some(widget));
        assert!(!harness.world.exists(parcel));
    }

    #[test]
    fn unrelated_holder_ignores_ambient() {
        let harness = InMemoryHarness::new(fixture_catalog());
        let widget = harness.spawn("Widget", Coordinates::ORIGIN);
        for trigger in AmbientTrigger::ALL {
            assert!(harness.app.dispatcher.ambient(widget, trigger).is_none());
        }
    }
}
