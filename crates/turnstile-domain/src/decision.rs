//! Navigation decision module - the outcome of one access resolution

use serde::{Deserialize, Serialize};

use crate::feature::FeatureId;
use crate::rule::UpsellPrompt;
use crate::tier::Tier;

/// Context for rendering an upsell prompt after a denial
///
/// Combines the rule's display metadata with the specific constraint that
/// failed, so the UI can phrase the correct call-to-action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellContext {
    /// Prompt title from the rule, if any
    #[serde(default)]
    pub title: Option<String>,

    /// Prompt body from the rule, if any
    #[serde(default)]
    pub message: Option<String>,

    /// Analytics attribution tag from the rule, if any
    #[serde(default)]
    pub source_tag: Option<String>,

    /// The tier requirement that failed, if the tier check failed
    #[serde(default)]
    pub required_tier: Option<Tier>,

    /// The feature requirement that failed, if the feature check failed
    #[serde(default)]
    pub required_feature: Option<FeatureId>,
}

impl UpsellContext {
    /// Build a context from a rule's prompt and the failing constraint(s)
    ///
    /// `required_tier` / `required_feature` carry only the constraints that
    /// actually failed, not everything the rule declares.
    pub fn new(
        prompt: Option<&UpsellPrompt>,
        required_tier: Option<Tier>,
        required_feature: Option<FeatureId>,
    ) -> Self {
        Self {
            title: prompt.map(|p| p.title.clone()),
            message: prompt.map(|p| p.message.clone()),
            source_tag: prompt.and_then(|p| p.source_tag.clone()),
            required_tier,
            required_feature,
        }
    }
}

/// The outcome of resolving one access request
///
/// Invariant: `allowed == true` implies `should_show_upsell == false` and
/// `fallback_resource == None`. The constructors below are the only way this
/// crate builds decisions, which keeps the invariant by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationDecision {
    /// Whether access is granted
    pub allowed: bool,

    /// Whether the caller should show an upgrade prompt
    pub should_show_upsell: bool,

    /// Resource to redirect to instead, on denial
    #[serde(default)]
    pub fallback_resource: Option<String>,

    /// Upsell rendering context, on denial with prompt metadata
    #[serde(default)]
    pub upsell_context: Option<UpsellContext>,
}

impl NavigationDecision {
    /// Access granted
    pub fn allow() -> Self {
        Self {
            allowed: true,
            should_show_upsell: false,
            fallback_resource: None,
            upsell_context: None,
        }
    }

    /// Denied with no fallback and no prompt
    ///
    /// A valid terminal state: the caller defines its own behavior.
    pub fn deny_silent() -> Self {
        Self {
            allowed: false,
            should_show_upsell: false,
            fallback_resource: None,
            upsell_context: None,
        }
    }

    /// Denied with a redirect target
    ///
    /// The upsell flag follows whether the rule carried prompt metadata.
    pub fn deny_redirect(fallback: impl Into<String>, upsell: Option<UpsellContext>) -> Self {
        Self {
            allowed: false,
            should_show_upsell: upsell.is_some(),
            fallback_resource: Some(fallback.into()),
            upsell_context: upsell,
        }
    }

    /// Denied with an upsell prompt and no redirect
    pub fn deny_upsell(upsell: UpsellContext) -> Self {
        Self {
            allowed: false,
            should_show_upsell: true,
            fallback_resource: None,
            upsell_context: Some(upsell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_carries_no_denial_data() {
        let decision = NavigationDecision::allow();
        assert!(decision.allowed);
        assert!(!decision.should_show_upsell);
        assert!(decision.fallback_resource.is_none());
        assert!(decision.upsell_context.is_none());
    }

    #[test]
    fn test_deny_redirect_upsell_follows_prompt() {
        let bare = NavigationDecision::deny_redirect("Home", None);
        assert!(!bare.allowed);
        assert!(!bare.should_show_upsell);
        assert_eq!(bare.fallback_resource.as_deref(), Some("Home"));

        let ctx = UpsellContext::new(None, Some(Tier::Pro), None);
        let with_prompt = NavigationDecision::deny_redirect("Home", Some(ctx));
        assert!(with_prompt.should_show_upsell);
    }

    #[test]
    fn test_upsell_context_records_failing_constraint() {
        let prompt = UpsellPrompt {
            title: "Go Pro".to_string(),
            message: "Unlock surge heatmaps".to_string(),
            source_tag: Some("heatmap_gate".to_string()),
        };
        let ctx = UpsellContext::new(Some(&prompt), Some(Tier::Pro), None);
        assert_eq!(ctx.title.as_deref(), Some("Go Pro"));
        assert_eq!(ctx.required_tier, Some(Tier::Pro));
        assert_eq!(ctx.required_feature, None);
    }

    #[test]
    fn test_decision_serializes_for_telemetry() {
        let decision = NavigationDecision::deny_silent();
        let json = serde_json::to_string(&decision).unwrap();
        let back: NavigationDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decision);
    }
}
