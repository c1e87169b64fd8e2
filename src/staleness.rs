//! Staleness policy for planned credential attributes.
//!
//! The resource cannot read token state upstream, so every plan decides from the cached
//! expiry alone whether the computed attributes can be reused. One decision is taken per
//! plan and applied to every attribute, so the attributes never disagree about freshness.

use crate::resource::AttributeValue;

/// Description attached to every attribute the policy governs.
pub const STALENESS_DESCRIPTION: &str = "Allow refresh before token expires.";

/// `true` once `now` has passed `expires_at` (both Unix seconds).
pub fn is_stale(expires_at: i64, now: i64) -> bool {
    expires_at < now
}

/// Freshness decision shared by the attributes of one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessDecision {
    stale: bool,
}

impl StalenessDecision {
    /// Decide from the planned `expires` value. A null or unknown expiry counts as epoch 0,
    /// so imported records rotate on their first plan.
    pub fn evaluate(planned_expires: &AttributeValue<i64>, now: i64) -> Self {
        let expires_at = planned_expires.as_known().copied().unwrap_or(0);
        Self {
            stale: is_stale(expires_at, now),
        }
    }

    pub fn fresh() -> Self {
        Self { stale: false }
    }

    pub fn stale() -> Self {
        Self { stale: true }
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Mark `planned` unknown when stale, unless configuration set the value explicitly.
    pub fn apply<T>(&self, config: &AttributeValue<T>, planned: &mut AttributeValue<T>) {
        if self.stale && config.is_null() {
            *planned = AttributeValue::Unknown;
        }
    }
}
