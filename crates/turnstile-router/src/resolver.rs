//! Navigation decision resolution

use turnstile_domain::{NavigationDecision, SubscriptionState, UpsellContext};
use turnstile_gate::{AccessEvaluator, EntitlementCatalog, GateError};

use crate::table::RouteTable;

/// Telemetry hook invoked with every `(resource, decision)` pair
///
/// Fire-and-forget: it cannot alter the decision and must not block.
pub type DecisionHook = Box<dyn Fn(&str, &NavigationDecision) + Send + Sync>;

/// Resolves access requests into navigation decisions
///
/// Construction validates the whole table against the catalog, so
/// [`NavResolver::resolve`] itself is infallible: a missing or unprotected
/// resource resolves to allow, and denial is a normal outcome, never an
/// error.
pub struct NavResolver {
    evaluator: AccessEvaluator,
    table: RouteTable,
    hook: Option<DecisionHook>,
}

impl NavResolver {
    /// Create a resolver over the given catalog and table
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidFeature` if any rule references a feature
    /// the catalog does not know. This is a configuration bug; failing here
    /// surfaces it at startup instead of at first user hit.
    pub fn new(catalog: EntitlementCatalog, table: RouteTable) -> Result<Self, GateError> {
        table.validate(&catalog)?;
        Ok(Self {
            evaluator: AccessEvaluator::new(catalog),
            table,
            hook: None,
        })
    }

    /// Attach a telemetry hook (builder style)
    pub fn with_hook(
        mut self,
        hook: impl Fn(&str, &NavigationDecision) + Send + Sync + 'static,
    ) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// The evaluator, for inline `can_access_*` checks
    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    /// The route table, for unlock enumeration
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve one access request
    ///
    /// Pure with respect to its inputs: the same `(resource, state)` pair
    /// always yields the same decision.
    pub fn resolve(&self, resource: &str, state: &SubscriptionState) -> NavigationDecision {
        let decision = self.decide(resource, state);

        tracing::debug!(
            resource,
            allowed = decision.allowed,
            upsell = decision.should_show_upsell,
            "access request resolved"
        );
        if let Some(hook) = &self.hook {
            hook(resource, &decision);
        }

        decision
    }

    fn decide(&self, resource: &str, state: &SubscriptionState) -> NavigationDecision {
        let Some(rule) = self.table.lookup(resource) else {
            return NavigationDecision::allow();
        };

        if self.evaluator.evaluate(state, rule) {
            return NavigationDecision::allow();
        }

        // Only the constraints that actually failed go into the context.
        let failed_tier = rule
            .required_tier
            .filter(|required| !self.evaluator.can_access_tier(state, *required));
        let failed_feature = rule
            .required_feature
            .clone()
            .filter(|feature| !self.evaluator.can_access_feature(state, feature));

        match (&rule.fallback, &rule.prompt) {
            (Some(fallback), prompt) => {
                let upsell = prompt
                    .as_ref()
                    .map(|p| UpsellContext::new(Some(p), failed_tier, failed_feature));
                NavigationDecision::deny_redirect(fallback.clone(), upsell)
            }
            (None, Some(prompt)) => NavigationDecision::deny_upsell(UpsellContext::new(
                Some(prompt),
                failed_tier,
                failed_feature,
            )),
            (None, None) => NavigationDecision::deny_silent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use turnstile_domain::{ProtectionRule, Tier, UpsellPrompt};

    fn sample_resolver() -> NavResolver {
        let catalog = EntitlementCatalog::new().with_feature("beta_x", Tier::Pro);

        let mut table = RouteTable::new();
        table.insert("Heatmap", ProtectionRule::require_tier(Tier::Premium));
        table.insert(
            "Optimization",
            ProtectionRule::require_tier(Tier::Pro).with_fallback("Heatmap"),
        );
        table.insert(
            "Coaching",
            ProtectionRule::require_tier(Tier::Premium).with_prompt(UpsellPrompt {
                title: "Go Premium".to_string(),
                message: "Coaching is a Premium feature".to_string(),
                source_tag: Some("coaching_gate".to_string()),
            }),
        );

        NavResolver::new(catalog, table).unwrap()
    }

    #[test]
    fn test_unknown_resource_allows_any_state() {
        let resolver = sample_resolver();
        for state in [
            SubscriptionState::free(),
            SubscriptionState::new(Tier::Pro),
        ] {
            let decision = resolver.resolve("Dashboard", &state);
            assert!(decision.allowed);
            assert!(!decision.should_show_upsell);
        }
    }

    #[test]
    fn test_satisfied_rule_allows() {
        let resolver = sample_resolver();
        let decision = resolver.resolve("Heatmap", &SubscriptionState::new(Tier::Premium));
        assert_eq!(decision, NavigationDecision::allow());
    }

    #[test]
    fn test_denial_with_fallback_redirects() {
        let resolver = sample_resolver();
        let decision = resolver.resolve("Optimization", &SubscriptionState::new(Tier::Premium));

        assert!(!decision.allowed);
        assert_eq!(decision.fallback_resource.as_deref(), Some("Heatmap"));
        // No prompt on this rule, so no upsell.
        assert!(!decision.should_show_upsell);
    }

    #[test]
    fn test_denial_with_prompt_upsells_with_failing_constraint() {
        let resolver = sample_resolver();
        let decision = resolver.resolve("Coaching", &SubscriptionState::free());

        assert!(!decision.allowed);
        assert!(decision.should_show_upsell);
        let ctx = decision.upsell_context.unwrap();
        assert_eq!(ctx.title.as_deref(), Some("Go Premium"));
        assert_eq!(ctx.required_tier, Some(Tier::Premium));
        assert_eq!(ctx.required_feature, None);
    }

    #[test]
    fn test_denial_without_fallback_or_prompt_is_silent() {
        let resolver = sample_resolver();
        let decision = resolver.resolve("Heatmap", &SubscriptionState::free());

        assert!(!decision.allowed);
        assert!(!decision.should_show_upsell);
        assert!(decision.fallback_resource.is_none());
        assert!(decision.upsell_context.is_none());
    }

    #[test]
    fn test_resolver_rejects_unvalidatable_table() {
        let mut table = RouteTable::new();
        table.insert("Beta", ProtectionRule::require_feature("not_in_catalog"));

        let result = NavResolver::new(EntitlementCatalog::new(), table);
        assert!(matches!(result, Err(GateError::InvalidFeature(_))));
    }

    #[test]
    fn test_hook_sees_every_resolution() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();

        let resolver = sample_resolver().with_hook(move |resource, decision| {
            assert!(!resource.is_empty());
            assert_eq!(decision.allowed, resource == "Dashboard");
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let state = SubscriptionState::free();
        resolver.resolve("Dashboard", &state);
        resolver.resolve("Heatmap", &state);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = sample_resolver();
        let state = SubscriptionState::new(Tier::Premium).with_grant("beta_x");

        for resource in ["Dashboard", "Heatmap", "Optimization", "Coaching"] {
            let first = resolver.resolve(resource, &state);
            let second = resolver.resolve(resource, &state);
            assert_eq!(first, second);
        }
    }
}
