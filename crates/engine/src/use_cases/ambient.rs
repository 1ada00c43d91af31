//! Ambient-trigger adapter.
//!
//! Maps world events (breakage, reclamation, destruction) onto an
//! unconditional release, for whichever holder policy has that trigger
//! switched on.

use stowage_domain::{
    AmbientToggles, AmbientTrigger, AuthorityContext, EntityId, PolicyKind, ReleaseOutcome,
};

use super::transfer::TransferError;

/// A holder policy that can be forced open by the world.
pub trait AmbientReleaser: Send + Sync {
    fn policy(&self) -> PolicyKind;

    /// The holder's trigger switches, or `None` when it lacks this policy.
    fn toggles(&self, holder: EntityId) -> Option<AmbientToggles>;

    fn release_ambient(
        &self,
        holder: EntityId,
        trigger: AmbientTrigger,
        authority: AuthorityContext,
    ) -> Result<ReleaseOutcome, TransferError>;
}

/// Stateless mapper from ambient triggers to releases.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientTriggerAdapter;

impl AmbientTriggerAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Release `holder` through `releaser` if its policy enables `trigger`.
    ///
    /// `None` means the trigger was ignored.
    pub fn on_ambient(
        &self,
        releaser: &dyn AmbientReleaser,
        holder: EntityId,
        trigger: AmbientTrigger,
        authority: AuthorityContext,
    ) -> Option<Result<ReleaseOutcome, TransferError>> {
        let toggles = releaser.toggles(holder)?;
        if !toggles.enables(trigger) {
            tracing::debug!(
                policy = %releaser.policy(),
                holder = %holder,
                trigger = %trigger,
                "Ambient trigger disabled for holder"
            );
            return None;
        }
        Some(releaser.release_ambient(holder, trigger, authority))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use stowage_domain::Coordinates;

    struct FakeReleaser {
        toggles: Option<AmbientToggles>,
        released: Mutex<Vec<AmbientTrigger>>,
    }

    impl AmbientReleaser for FakeReleaser {
        fn policy(&self) -> PolicyKind {
            PolicyKind::FrangibleContainer
        }

        fn toggles(&self, _holder: EntityId) -> Option<AmbientToggles> {
            self.toggles
        }

        fn release_ambient(
            &self,
            holder: EntityId,
            trigger: AmbientTrigger,
            _authority: AuthorityContext,
        ) -> Result<ReleaseOutcome, TransferError> {
            self.released
                .lock()
                .expect("lock")
                .push(trigger);
            Ok(ReleaseOutcome::predicted(holder, None, Coordinates::ORIGIN))
        }
    }

    fn releaser(toggles: Option<AmbientToggles>) -> FakeReleaser {
        FakeReleaser {
            toggles,
            released: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn enabled_trigger_releases() {
        let fake = releaser(Some(AmbientToggles {
            open_on_break: true,
            ..AmbientToggles::default()
        }));
        let result = AmbientTriggerAdapter::new().on_ambient(
            &fake,
            EntityId::new(),
            AmbientTrigger::Broken,
            AuthorityContext::Authoritative,
        );

        assert!(matches!(result, Some(Ok(_))));
        assert_eq!(
            *fake.released.lock().expect("lock"),
            vec![AmbientTrigger::Broken]
        );
    }

    #[test]
    fn disabled_trigger_is_ignored() {
        let fake = releaser(Some(AmbientToggles::destruction_only()));
        let result = AmbientTriggerAdapter::new().on_ambient(
            &fake,
            EntityId::new(),
            AmbientTrigger::Broken,
            AuthorityContext::Authoritative,
        );

        assert!(result.is_none());
        assert!(fake.released.lock().expect("lock").is_empty());
    }

    #[test]
    fn holder_without_policy_is_ignored() {
        let fake = releaser(None);
        for trigger in AmbientTrigger::ALL {
            let result = AmbientTriggerAdapter::new().on_ambient(
                &fake,
                EntityId::new(),
                trigger,
                AuthorityContext::Authoritative,
            );
            assert!(result.is_none());
        }
    }
}
