//! Feature id module - opaque identifiers for gateable capabilities

use serde::{Deserialize, Serialize};

/// Opaque identifier for a gateable capability
///
/// Feature ids are independent of tier: the catalog may map one to a minimum
/// tier, and a subscription may grant one explicitly (promotional or legacy
/// grants). The type itself enforces no uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    /// Create a new feature id
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the feature id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_id_creation() {
        let id = FeatureId::new("surge_heatmap");
        assert_eq!(id.as_str(), "surge_heatmap");
        assert_eq!(id, FeatureId::from("surge_heatmap"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = FeatureId::new("beta_x");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"beta_x\"");
        let parsed: FeatureId = serde_json::from_str("\"beta_x\"").unwrap();
        assert_eq!(parsed, id);
    }
}
