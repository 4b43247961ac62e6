//! Access evaluation logic

use turnstile_domain::{FeatureId, ProtectionRule, SubscriptionState, Tier};

use crate::EntitlementCatalog;

/// The single source of truth for "can this caller do X"
///
/// All checks are pure and synchronous given an immutable state snapshot, and
/// always resolve to a boolean. Denial is a normal outcome, never an error.
pub struct AccessEvaluator {
    catalog: EntitlementCatalog,
}

impl AccessEvaluator {
    /// Create an evaluator over the given catalog
    pub fn new(catalog: EntitlementCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this evaluator checks against
    pub fn catalog(&self) -> &EntitlementCatalog {
        &self.catalog
    }

    /// Whether the caller's effective tier meets `required`
    ///
    /// Goes through `effective_tier`, so lapsed subscriptions are compared at
    /// free level regardless of their stored tier.
    pub fn can_access_tier(&self, state: &SubscriptionState, required: Tier) -> bool {
        self.catalog.is_at_least(state.effective_tier(), required)
    }

    /// Whether the caller can use the feature
    ///
    /// True if the feature was explicitly granted OR the caller's tier meets
    /// the catalog default for it. A grant always overrides tier-based denial
    /// but never narrows tier-based access. Features the catalog does not know
    /// are grant-only.
    pub fn can_access_feature(&self, state: &SubscriptionState, feature: &FeatureId) -> bool {
        if state.has_granted_feature(feature) {
            return true;
        }
        match self.catalog.min_tier_for(feature) {
            Some(min_tier) => self.can_access_tier(state, min_tier),
            None => false,
        }
    }

    /// Evaluate a full protection rule
    ///
    /// Unprotected rules always pass. When a rule carries both a tier and a
    /// feature requirement, both must pass; a rule author would otherwise have
    /// no way to require both.
    pub fn evaluate(&self, state: &SubscriptionState, rule: &ProtectionRule) -> bool {
        if rule.is_unprotected() {
            return true;
        }

        if let Some(required) = rule.required_tier {
            if !self.can_access_tier(state, required) {
                return false;
            }
        }

        if let Some(feature) = &rule.required_feature {
            if !self.can_access_feature(state, feature) {
                return false;
            }
        }

        true
    }
}
