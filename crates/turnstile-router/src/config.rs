//! Configuration file parsing for the entitlement core
//!
//! Loads the feature catalog and route protection table from a single TOML
//! file and validates both eagerly, so configuration bugs fail at load time:
//!
//! ```toml
//! [features]
//! surge_heatmap = "premium"
//!
//! [[routes]]
//! name = "Optimization"
//! required_tier = "pro"
//! fallback = "Heatmap"
//!
//! [routes.prompt]
//! title = "Go Pro"
//! message = "Optimization requires a Pro subscription"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use turnstile_domain::{FeatureId, ProtectionRule, UpsellPrompt};
use turnstile_gate::{EntitlementCatalog, GateError};

use crate::resolver::NavResolver;
use crate::table::RouteTable;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Config references a tier or feature the catalog does not know
    #[error("Invalid entitlement configuration: {0}")]
    Validation(#[from] GateError),
}

/// Entitlement configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TurnstileConfig {
    /// Feature id → minimum tier name
    #[serde(default)]
    pub features: BTreeMap<String, String>,

    /// Protected routes
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One protected route
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// Resource name (e.g. "Optimization")
    pub name: String,

    /// Minimum tier name, if tier-gated
    #[serde(default)]
    pub required_tier: Option<String>,

    /// Required feature id, if feature-gated
    #[serde(default)]
    pub required_feature: Option<String>,

    /// Resource to redirect to on denial
    #[serde(default)]
    pub fallback: Option<String>,

    /// Upsell prompt to show on denial
    #[serde(default)]
    pub prompt: Option<UpsellPrompt>,
}

impl TurnstileConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Build the entitlement catalog from the `[features]` section
    ///
    /// # Errors
    ///
    /// Fails fast on tier names outside the enumerated set.
    pub fn build_catalog(&self) -> Result<EntitlementCatalog, ConfigError> {
        let mut catalog = EntitlementCatalog::new();
        for (feature, tier_name) in &self.features {
            let tier = catalog.parse_tier(tier_name)?;
            catalog = catalog.with_feature(feature.as_str(), tier);
        }
        Ok(catalog)
    }

    /// Build the route protection table from the `[[routes]]` entries
    ///
    /// Tier names are parsed here; feature references are checked against the
    /// catalog by [`TurnstileConfig::build_resolver`] or
    /// [`RouteTable::validate`].
    pub fn build_table(&self, catalog: &EntitlementCatalog) -> Result<RouteTable, ConfigError> {
        let mut table = RouteTable::new();
        for route in &self.routes {
            let required_tier = route
                .required_tier
                .as_deref()
                .map(|name| catalog.parse_tier(name))
                .transpose()?;

            table.insert(
                route.name.clone(),
                ProtectionRule {
                    required_tier,
                    required_feature: route.required_feature.as_deref().map(FeatureId::from),
                    fallback: route.fallback.clone(),
                    prompt: route.prompt.clone(),
                },
            );
        }
        Ok(table)
    }

    /// Build a fully validated resolver from this configuration
    pub fn build_resolver(&self) -> Result<NavResolver, ConfigError> {
        let catalog = self.build_catalog()?;
        let table = self.build_table(&catalog)?;
        Ok(NavResolver::new(catalog, table)?)
    }
}
