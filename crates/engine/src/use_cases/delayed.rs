//! Delayed-action bridge.
//!
//! Puts a commit step behind the timed-action scheduler. A zero delay commits
//! on the spot; anything longer hands a request to the scheduler and commits
//! later, when the completion comes back neither cancelled nor handled.
//!
//! The bridge keeps no state between start and completion. Two triggers for
//! the same holder may each start a cycle; the scheduler decides whether the
//! second one is allowed.

use std::sync::Arc;

use stowage_domain::{DoAfterCompleted, DoAfterId, DoAfterRequest};

use crate::infrastructure::ports::DoAfterPort;

/// What a trigger led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayedOutcome {
    /// Committed synchronously.
    Committed,
    /// Waiting on the scheduler.
    Awaiting(DoAfterId),
    /// The commit or the scheduler turned it down.
    Refused,
}

impl DelayedOutcome {
    /// Whether the originating trigger counts as handled.
    pub fn handled(self) -> bool {
        !matches!(self, Self::Refused)
    }
}

pub struct DelayedActionBridge {
    do_after: Arc<dyn DoAfterPort>,
}

impl DelayedActionBridge {
    pub fn new(do_after: Arc<dyn DoAfterPort>) -> Self {
        Self { do_after }
    }

    /// Commit now when the request has no duration, otherwise schedule it.
    ///
    /// `commit` returns whether it acted.
    pub fn start_or_commit<F>(&self, request: DoAfterRequest, commit: F) -> DelayedOutcome
    where
        F: FnOnce() -> bool,
    {
        if request.duration.is_zero() {
            return if commit() {
                DelayedOutcome::Committed
            } else {
                DelayedOutcome::Refused
            };
        }

        let kind = request.kind;
        let holder = request.holder;
        match self.do_after.start(request) {
            Some(id) => {
                tracing::debug!(
                    kind = ?kind,
                    holder = %holder,
                    do_after = %id,
                    "Scheduled timed action"
                );
                DelayedOutcome::Awaiting(id)
            }
            None => {
                tracing::debug!(kind = ?kind, holder = %holder, "Scheduler refused timed action");
                DelayedOutcome::Refused
            }
        }
    }

    /// Run `commit` for a finished timed action and mark the completion handled.
    ///
    /// Completions that were cancelled or already handled are left alone.
    pub fn complete<F>(&self, completed: &mut DoAfterCompleted, commit: F) -> bool
    where
        F: FnOnce(&DoAfterCompleted) -> bool,
    {
        if completed.cancelled || completed.handled {
            tracing::debug!(
                do_after = %completed.id,
                cancelled = completed.cancelled,
                handled = completed.handled,
                "Skipping timed action completion"
            );
            return false;
        }
        completed.handled = commit(completed);
        completed.handled
    }
}
