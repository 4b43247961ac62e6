//! Route protection table - static registry of resource name → rule

use std::collections::HashMap;

use turnstile_domain::{ProtectionRule, Tier};
use turnstile_gate::{EntitlementCatalog, GateError};

/// Registry mapping resource names to their protection rules
///
/// A resource absent from the table is unprotected; this is distinct from an
/// explicit rule with no constraints, though both resolve to allow.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: HashMap<String, ProtectionRule>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule for a resource
    ///
    /// Registering the same resource twice replaces the earlier rule.
    pub fn insert(&mut self, resource: impl Into<String>, rule: ProtectionRule) {
        self.rules.insert(resource.into(), rule);
    }

    /// Look up the rule for a resource, if any
    pub fn lookup(&self, resource: &str) -> Option<&ProtectionRule> {
        self.rules.get(resource)
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over all resource names and rules
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProtectionRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Resources that become reachable at exactly this tier
    ///
    /// Yields resources whose required tier is reachable at `tier` but not at
    /// the tier immediately below it, for "what do I unlock by upgrading"
    /// enumeration. Lazy and restartable; recomputed by filtering the table
    /// each call.
    pub fn resources_unlocked_at(&self, tier: Tier) -> impl Iterator<Item = &str> {
        let floor = tier.previous().map(|t| t.rank());
        self.rules.iter().filter_map(move |(name, rule)| {
            let required = rule.required_tier?;
            let reachable = required.rank() <= tier.rank();
            let above_floor = floor.map_or(true, |f| required.rank() > f);
            (reachable && above_floor).then_some(name.as_str())
        })
    }

    /// Validate every rule against the catalog
    ///
    /// A rule referencing a feature the catalog does not know is a
    /// configuration bug; surfacing it here, at load time, beats surfacing it
    /// at first user hit. Tier requirements are already typed and need no
    /// check.
    pub fn validate(&self, catalog: &EntitlementCatalog) -> Result<(), GateError> {
        for rule in self.rules.values() {
            if let Some(feature) = &rule.required_feature {
                if !catalog.contains_feature(feature) {
                    return Err(GateError::InvalidFeature(feature.to_string()));
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, ProtectionRule)> for RouteTable {
    fn from_iter<I: IntoIterator<Item = (String, ProtectionRule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RouteTable {
        let mut table = RouteTable::new();
        table.insert("Heatmap", ProtectionRule::require_tier(Tier::Premium));
        table.insert("Optimization", ProtectionRule::require_tier(Tier::Pro));
        table.insert("Earnings", ProtectionRule::require_tier(Tier::Free));
        table.insert("Beta", ProtectionRule::require_feature("beta_x"));
        table
    }

    #[test]
    fn test_lookup() {
        let table = sample_table();
        assert!(table.lookup("Heatmap").is_some());
        assert!(table.lookup("Dashboard").is_none());
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_insert_replaces_duplicate() {
        let mut table = sample_table();
        table.insert("Heatmap", ProtectionRule::require_tier(Tier::Pro));
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.lookup("Heatmap").unwrap().required_tier,
            Some(Tier::Pro)
        );
    }

    #[test]
    fn test_resources_unlocked_at_each_tier() {
        let table = sample_table();

        let mut at_free: Vec<_> = table.resources_unlocked_at(Tier::Free).collect();
        at_free.sort_unstable();
        assert_eq!(at_free, vec!["Earnings"]);

        let mut at_premium: Vec<_> = table.resources_unlocked_at(Tier::Premium).collect();
        at_premium.sort_unstable();
        assert_eq!(at_premium, vec!["Heatmap"]);

        let mut at_pro: Vec<_> = table.resources_unlocked_at(Tier::Pro).collect();
        at_pro.sort_unstable();
        assert_eq!(at_pro, vec!["Optimization"]);
    }

    #[test]
    fn test_feature_only_rules_not_enumerated_by_tier() {
        let table = sample_table();
        for tier in [Tier::Free, Tier::Premium, Tier::Pro] {
            assert!(!table.resources_unlocked_at(tier).any(|r| r == "Beta"));
        }
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let table = sample_table();
        let first: Vec<_> = table.resources_unlocked_at(Tier::Premium).collect();
        let second: Vec<_> = table.resources_unlocked_at(Tier::Premium).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_accepts_known_features() {
        let catalog = EntitlementCatalog::new().with_feature("beta_x", Tier::Pro);
        assert!(sample_table().validate(&catalog).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_feature() {
        let catalog = EntitlementCatalog::new();
        let result = sample_table().validate(&catalog);
        assert!(matches!(result, Err(GateError::InvalidFeature(f)) if f == "beta_x"));
    }
}
