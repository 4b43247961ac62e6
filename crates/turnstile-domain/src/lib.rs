//! Turnstile Domain Layer
//!
//! This crate contains the core value types for Turnstile's entitlement model.
//! It defines the fundamental concepts that all other layers depend upon and
//! carries no evaluation logic of its own.
//!
//! ## Key Concepts
//!
//! - **Tier**: ranked subscription level (free < premium < pro)
//! - **Feature id**: opaque string naming a gateable capability
//! - **Subscription state**: an immutable entitlement snapshot
//! - **Protection rule**: the requirement attached to a named resource
//! - **Navigation decision**: the allow/redirect/upsell outcome of a check
//!
//! ## Architecture
//!
//! - Value objects only; evaluation lives in `turnstile-gate`
//! - Snapshots are replaced wholesale, never patched in place
//! - Serde derives on every type that crosses the backend or UI boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decision;
pub mod feature;
pub mod rule;
pub mod state;
pub mod tier;

// Re-exports for convenience
pub use decision::{NavigationDecision, UpsellContext};
pub use feature::FeatureId;
pub use rule::{ProtectionRule, UpsellPrompt};
pub use state::SubscriptionState;
pub use tier::Tier;
