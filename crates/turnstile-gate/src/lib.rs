//! Turnstile Gate
//!
//! Evaluates entitlement checks against the catalog.
//!
//! The Gate provides:
//! - The entitlement catalog (tier ranking, feature→tier defaults)
//! - Tier access checks (`can_access_tier`)
//! - Feature access checks with explicit-grant override (`can_access_feature`)
//! - Rule evaluation (`evaluate`), conjunctive when a rule carries both a
//!   tier and a feature requirement
//!
//! # Examples
//!
//! ```
//! use turnstile_domain::{SubscriptionState, Tier};
//! use turnstile_gate::{AccessEvaluator, EntitlementCatalog};
//!
//! let catalog = EntitlementCatalog::new().with_feature("surge_heatmap", Tier::Premium);
//! let evaluator = AccessEvaluator::new(catalog);
//!
//! let state = SubscriptionState::new(Tier::Premium);
//! assert!(evaluator.can_access_tier(&state, Tier::Premium));
//! ```

#![warn(missing_docs)]

mod catalog;
mod error;
mod evaluator;

pub use catalog::EntitlementCatalog;
pub use error::GateError;
pub use evaluator::AccessEvaluator;
