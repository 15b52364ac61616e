use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

const MILLIS_PER_SEC: u64 = 1_000;

/// Outcome of a cooldown check for one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownDecision {
    Allowed,
    /// `remaining_secs` is rounded up, so it is never 0 while denied.
    Denied { remaining_secs: u64 },
}

impl CooldownDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// In-memory record of each user's last allowed invocation, in unix
/// milliseconds.
///
/// Cheap to clone; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct CooldownTracker {
    last_used: Arc<DashMap<u64, u64>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `user_id` may run at `now_ms` and, if so, record it as
    /// their last invocation.
    ///
    /// The check and the write happen under the entry's shard lock, so
    /// concurrent calls for the same user cannot both be allowed inside one
    /// window.
    pub fn check_and_consume(
        &self,
        user_id: u64,
        cooldown_secs: u64,
        now_ms: u64,
    ) -> CooldownDecision {
        let window_ms = cooldown_secs.saturating_mul(MILLIS_PER_SEC);

        match self.last_used.entry(user_id) {
            Entry::Vacant(slot) => {
                slot.insert(now_ms);
                CooldownDecision::Allowed
            }
            Entry::Occupied(mut slot) => {
                let elapsed_ms = now_ms.saturating_sub(*slot.get());
                if elapsed_ms >= window_ms {
                    slot.insert(now_ms);
                    CooldownDecision::Allowed
                } else {
                    CooldownDecision::Denied {
                        remaining_secs: (window_ms - elapsed_ms).div_ceil(MILLIS_PER_SEC),
                    }
                }
            }
        }
    }

    /// Last recorded invocation for `user_id` in unix milliseconds, if any.
    pub fn last_used(&self, user_id: u64) -> Option<u64> {
        self.last_used.get(&user_id).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.last_used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_used.is_empty()
    }

    /// Drop entries at least `max_window_secs` old. Such entries can no longer
    /// deny any invocation, so removing them does not change any decision.
    pub fn purge_expired(&self, now_ms: u64, max_window_secs: u64) -> usize {
        let window_ms = max_window_secs.saturating_mul(MILLIS_PER_SEC);
        let before = self.last_used.len();
        self.last_used
            .retain(|_, last| now_ms.saturating_sub(*last) < window_ms);
        let removed = before.saturating_sub(self.last_used.len());

        if removed > 0 {
            debug!(removed, remaining = self.last_used.len(), "purged expired cooldowns");
        }

        removed
    }
}
