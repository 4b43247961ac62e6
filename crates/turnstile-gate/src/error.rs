//! Gate error types

use thiserror::Error;

/// Errors that can occur during catalog and table validation
///
/// Both variants indicate configuration bugs: something references a tier or
/// feature the catalog does not know. They are fatal, never retried, and are
/// surfaced eagerly at load time rather than at first user hit. Denial itself
/// is never an error.
#[derive(Error, Debug)]
pub enum GateError {
    /// A tier name outside the enumerated set
    #[error("Invalid tier: {0}")]
    InvalidTier(String),

    /// A feature id not present in the catalog
    #[error("Invalid feature: {0}")]
    InvalidFeature(String),
}
