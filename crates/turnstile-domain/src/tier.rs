//! Tier module - ranked subscription levels

use serde::{Deserialize, Serialize};

/// Subscription tier
///
/// Tiers form a fixed, total order used for all access comparisons:
/// - Free: baseline access, also the fail-closed default
/// - Premium: paid tier
/// - Pro: top tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Baseline tier; every caller has at least this
    Free,

    /// Paid mid tier
    Premium,

    /// Top tier
    Pro,
}

impl Tier {
    /// Get the tier's integer rank (strictly increasing by declared order)
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Premium => 1,
            Tier::Pro => 2,
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
            Tier::Pro => "pro",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(Tier::Free),
            "premium" => Some(Tier::Premium),
            "pro" => Some(Tier::Pro),
            _ => None,
        }
    }

    /// Get the next tier up (for upgrade prompts)
    pub fn next(&self) -> Option<Self> {
        match self {
            Tier::Free => Some(Tier::Premium),
            Tier::Premium => Some(Tier::Pro),
            Tier::Pro => None, // Already at top
        }
    }

    /// Get the tier immediately below this one
    pub fn previous(&self) -> Option<Self> {
        match self {
            Tier::Free => None, // Already at bottom
            Tier::Premium => Some(Tier::Free),
            Tier::Pro => Some(Tier::Premium),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}
