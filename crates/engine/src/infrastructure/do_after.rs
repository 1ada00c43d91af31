//! In-memory timed-action scheduler.
//!
//! Actions end when the clock passes their deadline or when they are
//! interrupted. Completions are collected with [`InMemoryDoAfterScheduler::tick`]
//! and handed back to the engine by the host loop.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use stowage_domain::{DoAfterCompleted, DoAfterId, DoAfterRequest, EntityId};

use crate::infrastructure::clock::add_delay;
use crate::infrastructure::ports::{ClockPort, DoAfterPort};

/// Why a user's pending actions are being interrupted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    Moved,
    Damaged,
    /// The user let go of whatever was in hand.
    HandEmptied,
}

struct PendingDoAfter {
    request: DoAfterRequest,
    ends_at: DateTime<Utc>,
    cancelled: bool,
}

impl PendingDoAfter {
    fn breaks_on(&self, interruption: Interruption) -> bool {
        match interruption {
            Interruption::Moved => self.request.break_on_move,
            Interruption::Damaged => self.request.break_on_damage,
            Interruption::HandEmptied => self.request.need_hand,
        }
    }

    fn duplicates(&self, request: &DoAfterRequest) -> bool {
        !self.cancelled
            && self.request.kind == request.kind
            && self.request.user == request.user
            && self.request.holder == request.holder
            && self.request.target == request.target
    }
}

pub struct InMemoryDoAfterScheduler {
    clock: Arc<dyn ClockPort>,
    pending: DashMap<DoAfterId, PendingDoAfter>,
}

impl InMemoryDoAfterScheduler {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            pending: DashMap::new(),
        }
    }

    /// Drain every action that finished or was cancelled, oldest deadline first.
    pub fn tick(&self) -> Vec<DoAfterCompleted> {
        let now = self.clock.now();
        let mut due: Vec<(DateTime<Utc>, DoAfterId)> = self
            .pending
            .iter()
            .filter(|entry| entry.cancelled || entry.ends_at <= now)
            .map(|entry| (entry.ends_at, *entry.key()))
            .collect();
        due.sort();

        due.into_iter()
            .filter_map(|(_, id)| self.pending.remove(&id))
            .map(|(id, pending)| {
                if pending.cancelled {
                    DoAfterCompleted::cancelled(id, &pending.request)
                } else {
                    DoAfterCompleted::finished(id, &pending.request)
                }
            })
            .collect()
    }

    pub fn cancel(&self, id: DoAfterId) -> bool {
        match self.pending.get_mut(&id) {
            Some(mut pending) => {
                pending.cancelled = true;
                tracing::debug!(do_after = %id, "Timed action cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every action of `user` that breaks on `interruption`. Returns how many.
    pub fn interrupt(&self, user: EntityId, interruption: Interruption) -> usize {
        let mut cancelled = 0;
        for mut pending in self.pending.iter_mut() {
            if pending.request.user == user && !pending.cancelled && pending.breaks_on(interruption)
            {
                pending.cancelled = true;
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            tracing::debug!(user = %user, ?interruption, cancelled, "Timed actions interrupted");
        }
        cancelled
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl DoAfterPort for InMemoryDoAfterScheduler {
    fn start(&self, request: DoAfterRequest) -> Option<DoAfterId> {
        if self.pending.iter().any(|entry| entry.duplicates(&request)) {
            tracing::debug!(
                user = %request.user,
                holder = %request.holder,
                "Identical timed action already running"
            );
            return None;
        }

        let id = DoAfterId::new();
        let ends_at = add_delay(self.clock.now(), request.duration);
        self.pending.insert(
            id,
            PendingDoAfter {
                request,
                ends_at,
                cancelled: false,
            },
        );
        Some(id)
    }
}
