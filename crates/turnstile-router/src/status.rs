//! Subscription backend payload contract and snapshot refresh
//!
//! The backend client is out of scope; this module fixes the shape it must
//! produce and the fail-closed mapping into a `SubscriptionState`. Every
//! default here degrades toward free/inactive, never toward a paid tier.

use serde::Deserialize;

use turnstile_domain::{FeatureId, SubscriptionState, Tier};

use crate::snapshot::StateHandle;

fn default_tier_name() -> String {
    "free".to_string()
}

/// Raw subscription status as the backend reports it
///
/// All fields default fail-closed: a missing `tier` reads as `"free"`, a
/// missing `is_active` as `false`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    /// Tier name as reported by the backend
    #[serde(default = "default_tier_name")]
    pub tier: String,

    /// Whether the subscription is in good standing
    #[serde(default)]
    pub is_active: bool,

    /// Explicitly granted feature ids
    #[serde(default)]
    pub granted_features: Vec<String>,

    /// Subscription expiry (Unix epoch seconds)
    #[serde(default)]
    pub expires_at: Option<u64>,

    /// Trial end (Unix epoch seconds)
    #[serde(default)]
    pub trial_ends_at: Option<u64>,

    /// Cancellation time (Unix epoch seconds)
    #[serde(default)]
    pub cancelled_at: Option<u64>,
}

impl StatusPayload {
    /// Map the raw payload into an immutable snapshot
    ///
    /// Tier names outside the enumerated set degrade to free with a warning;
    /// the payload boundary is untrusted input and must not grant access on
    /// bad data.
    pub fn into_state(self) -> SubscriptionState {
        let tier = match Tier::parse(&self.tier) {
            Some(tier) => tier,
            None => {
                tracing::warn!("Unknown tier '{}' in status payload, treating as free", self.tier);
                Tier::Free
            }
        };

        SubscriptionState {
            tier,
            is_active: self.is_active,
            granted_features: self
                .granted_features
                .into_iter()
                .map(FeatureId::from)
                .collect(),
            expires_at: self.expires_at,
            trial_ends_at: self.trial_ends_at,
            cancelled_at: self.cancelled_at,
        }
    }
}

/// Source of subscription status payloads
///
/// Implemented by the (out-of-scope) backend client. Fetches may be refreshed
/// periodically or on demand; cancellation and retry policy belong to the
/// caller.
pub trait StatusSource {
    /// Error type for fetch operations
    type Error;

    /// Fetch the caller's current subscription status
    fn fetch_status(&self) -> impl std::future::Future<Output = Result<StatusPayload, Self::Error>> + Send;
}

impl StateHandle {
    /// Fetch a fresh status and swap it in
    ///
    /// On success the snapshot is replaced wholesale. On failure the handle
    /// reverts to the free default (fail-closed) and the error is returned
    /// for the caller's retry policy. Readers holding the previous snapshot
    /// are unaffected either way.
    pub async fn refresh_from<S: StatusSource>(&self, source: &S) -> Result<(), S::Error>
    where
        S::Error: std::fmt::Display,
    {
        match source.fetch_status().await {
            Ok(payload) => {
                self.replace(payload.into_state());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Status fetch failed, reverting to free tier: {}", e);
                self.clear();
                Err(e)
            }
        }
    }
}
