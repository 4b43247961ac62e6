//! Protection rule module - the requirement attached to a named resource

use serde::{Deserialize, Serialize};

use crate::feature::FeatureId;
use crate::tier::Tier;

/// Upsell prompt metadata attached to a rule
///
/// Display-only: evaluation never reads it. It is carried through to the
/// decision so the UI layer can phrase the upgrade call-to-action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellPrompt {
    /// Prompt title
    pub title: String,

    /// Prompt body
    pub message: String,

    /// Where the prompt was triggered from (for analytics attribution)
    #[serde(default)]
    pub source_tag: Option<String>,
}

/// Protection requirement for a named resource
///
/// A rule with neither a tier nor a feature requirement is unprotected and
/// always resolves to allow. When both are present they are conjunctive: the
/// caller must satisfy the tier requirement AND the feature requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionRule {
    /// Minimum tier required, if any
    #[serde(default)]
    pub required_tier: Option<Tier>,

    /// Feature required, if any
    #[serde(default)]
    pub required_feature: Option<FeatureId>,

    /// Resource to redirect to on denial
    #[serde(default)]
    pub fallback: Option<String>,

    /// Upsell prompt to show on denial
    #[serde(default)]
    pub prompt: Option<UpsellPrompt>,
}

impl ProtectionRule {
    /// Create a rule requiring a minimum tier
    pub fn require_tier(tier: Tier) -> Self {
        Self {
            required_tier: Some(tier),
            ..Self::default()
        }
    }

    /// Create a rule requiring a feature
    pub fn require_feature(feature: impl Into<FeatureId>) -> Self {
        Self {
            required_feature: Some(feature.into()),
            ..Self::default()
        }
    }

    /// Add a feature requirement (builder style)
    pub fn and_feature(mut self, feature: impl Into<FeatureId>) -> Self {
        self.required_feature = Some(feature.into());
        self
    }

    /// Add a fallback resource (builder style)
    pub fn with_fallback(mut self, resource: impl Into<String>) -> Self {
        self.fallback = Some(resource.into());
        self
    }

    /// Add an upsell prompt (builder style)
    pub fn with_prompt(mut self, prompt: UpsellPrompt) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Whether this rule imposes no constraints
    pub fn is_unprotected(&self) -> bool {
        self.required_tier.is_none() && self.required_feature.is_none()
    }
}
