//! Subscription state module - the caller's current entitlement snapshot

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::feature::FeatureId;
use crate::tier::Tier;

/// A caller's current entitlement snapshot
///
/// Constructed from the subscription backend's response and replaced wholesale
/// on every refresh. Treat each snapshot as immutable once obtained; concurrent
/// readers of the same snapshot need no locking.
///
/// Invariant: when `is_active` is false the subscription has lapsed and only
/// free-level access applies, regardless of the stored `tier`. All evaluation
/// goes through [`SubscriptionState::effective_tier`] to enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionState {
    /// Current subscription tier
    pub tier: Tier,

    /// Whether the subscription is in good standing
    pub is_active: bool,

    /// Features explicitly unlocked independent of tier
    #[serde(default)]
    pub granted_features: HashSet<FeatureId>,

    /// Subscription expiry (Unix epoch seconds); informational only
    #[serde(default)]
    pub expires_at: Option<u64>,

    /// Trial end (Unix epoch seconds); informational only
    #[serde(default)]
    pub trial_ends_at: Option<u64>,

    /// Cancellation time (Unix epoch seconds); informational only
    #[serde(default)]
    pub cancelled_at: Option<u64>,
}

impl SubscriptionState {
    /// Create an active snapshot at the given tier with no grants
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            is_active: true,
            granted_features: HashSet::new(),
            expires_at: None,
            trial_ends_at: None,
            cancelled_at: None,
        }
    }

    /// The fail-closed default: free, inactive, no grants
    ///
    /// Used on logout, before the first status fetch completes, and when a
    /// fetch fails.
    pub fn free() -> Self {
        Self {
            tier: Tier::Free,
            is_active: false,
            granted_features: HashSet::new(),
            expires_at: None,
            trial_ends_at: None,
            cancelled_at: None,
        }
    }

    /// Add an explicit feature grant (builder style)
    pub fn with_grant(mut self, feature: impl Into<FeatureId>) -> Self {
        self.granted_features.insert(feature.into());
        self
    }

    /// The tier all access checks see
    ///
    /// Returns `tier` while the subscription is active, `Tier::Free` once it
    /// has lapsed. This is the single chokepoint for the lapsed-degrades-to-free
    /// invariant; other components must not read `tier` directly.
    pub fn effective_tier(&self) -> Tier {
        if self.is_active {
            self.tier
        } else {
            Tier::Free
        }
    }

    /// Whether the feature was explicitly granted
    ///
    /// Grants are honored even for lapsed subscriptions.
    pub fn has_granted_feature(&self, feature: &FeatureId) -> bool {
        self.granted_features.contains(feature)
    }
}

impl Default for SubscriptionState {
    fn default() -> Self {
        Self::free()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_tier_active() {
        let state = SubscriptionState::new(Tier::Premium);
        assert_eq!(state.effective_tier(), Tier::Premium);
    }

    #[test]
    fn test_effective_tier_lapsed_degrades_to_free() {
        let mut state = SubscriptionState::new(Tier::Pro);
        state.is_active = false;
        assert_eq!(state.effective_tier(), Tier::Free);
    }

    #[test]
    fn test_grants_survive_lapse() {
        let mut state = SubscriptionState::new(Tier::Premium).with_grant("beta_x");
        state.is_active = false;
        assert!(state.has_granted_feature(&FeatureId::new("beta_x")));
        assert!(!state.has_granted_feature(&FeatureId::new("beta_y")));
    }

    #[test]
    fn test_free_default_is_fail_closed() {
        let state = SubscriptionState::default();
        assert_eq!(state.tier, Tier::Free);
        assert!(!state.is_active);
        assert!(state.granted_features.is_empty());
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let state: SubscriptionState =
            serde_json::from_str(r#"{"tier":"premium","is_active":true}"#).unwrap();
        assert_eq!(state.tier, Tier::Premium);
        assert!(state.granted_features.is_empty());
        assert_eq!(state.expires_at, None);
    }
}
