//! Entitlement catalog - canonical tier ordering and feature defaults
//!
//! This module is the single source of truth for which tier unlocks which
//! feature by default. Explicit per-subscription grants live on
//! `SubscriptionState` and are layered on top by the evaluator.

use std::collections::HashMap;

use turnstile_domain::{FeatureId, Tier};

use crate::GateError;

/// Canonical tier ordering plus feature→minimum-tier defaults
///
/// A feature id maps to at most one minimum tier. Features absent from the
/// catalog are grant-only: no tier unlocks them by default.
#[derive(Debug, Clone, Default)]
pub struct EntitlementCatalog {
    feature_defaults: HashMap<FeatureId, Tier>,
}

impl EntitlementCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a feature's minimum tier (builder style)
    ///
    /// Re-registering a feature replaces its previous default.
    pub fn with_feature(mut self, feature: impl Into<FeatureId>, min_tier: Tier) -> Self {
        self.feature_defaults.insert(feature.into(), min_tier);
        self
    }

    /// Get a tier's integer rank
    ///
    /// Pure; strictly increasing by the declared tier order.
    pub fn rank_of(&self, tier: Tier) -> u8 {
        tier.rank()
    }

    /// Whether `candidate` ranks at least as high as `required`
    pub fn is_at_least(&self, candidate: Tier, required: Tier) -> bool {
        self.rank_of(candidate) >= self.rank_of(required)
    }

    /// The minimum tier that unlocks a feature by default, if any
    pub fn min_tier_for(&self, feature: &FeatureId) -> Option<Tier> {
        self.feature_defaults.get(feature).copied()
    }

    /// Whether the catalog knows this feature
    pub fn contains_feature(&self, feature: &FeatureId) -> bool {
        self.feature_defaults.contains_key(feature)
    }

    /// Parse a tier name, failing fast on anything outside the enumerated set
    ///
    /// Unknown tiers are a caller programming error, never silently defaulted.
    pub fn parse_tier(&self, name: &str) -> Result<Tier, GateError> {
        Tier::parse(name).ok_or_else(|| GateError::InvalidTier(name.to_string()))
    }

    /// Iterate over the registered features and their minimum tiers
    pub fn features(&self) -> impl Iterator<Item = (&FeatureId, Tier)> {
        self.feature_defaults.iter().map(|(id, tier)| (id, *tier))
    }
}

impl FromIterator<(FeatureId, Tier)> for EntitlementCatalog {
    fn from_iter<I: IntoIterator<Item = (FeatureId, Tier)>>(iter: I) -> Self {
        Self {
            feature_defaults: iter.into_iter().collect(),
        }
    }
}
