//! Turnstile Router
//!
//! Resolves access requests into navigation decisions.
//!
//! This crate owns the route protection table (resource name → rule), its TOML
//! configuration loading with eager validation, the navigation decision
//! resolver, and the shared subscription-state snapshot handle.
//!
//! The two entry points the rest of an application should call are
//! [`NavResolver::resolve`] for route-level decisions and the evaluator's
//! `can_access_tier` / `can_access_feature` (re-exported from
//! `turnstile-gate`) for inline conditional rendering.

pub mod config;
pub mod resolver;
pub mod snapshot;
pub mod status;
pub mod table;

pub use config::{ConfigError, RouteConfig, TurnstileConfig};
pub use turnstile_gate::{AccessEvaluator, EntitlementCatalog, GateError};
pub use resolver::NavResolver;
pub use snapshot::StateHandle;
pub use status::{StatusPayload, StatusSource};
pub use table::RouteTable;
