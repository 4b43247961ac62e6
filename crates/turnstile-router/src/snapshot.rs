//! Shared subscription-state snapshot handle
//!
//! The snapshot is produced by an external asynchronous status fetch and
//! swapped in atomically. Readers always see either the previous snapshot or
//! the new one, never a partially updated state; refresh is "replace
//! snapshot", never "patch snapshot".

use std::sync::{Arc, RwLock};

use turnstile_domain::SubscriptionState;

/// Handle to the current subscription-state snapshot
///
/// Cloning the handle shares the same underlying slot. Until the first
/// refresh lands, readers see the fail-closed free/inactive default, the same
/// treatment as a fetch failure.
#[derive(Debug, Clone)]
pub struct StateHandle {
    inner: Arc<RwLock<Arc<SubscriptionState>>>,
}

impl StateHandle {
    /// Create a handle holding the fail-closed default
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(SubscriptionState::free()))),
        }
    }

    /// Create a handle seeded with a known snapshot
    pub fn with_state(state: SubscriptionState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(state))),
        }
    }

    /// Get the current snapshot
    ///
    /// The returned `Arc` stays valid across later replacements; evaluate
    /// against it without further locking.
    pub fn current(&self) -> Arc<SubscriptionState> {
        self.inner.read().unwrap().clone()
    }

    /// Swap in a new snapshot wholesale
    pub fn replace(&self, state: SubscriptionState) {
        *self.inner.write().unwrap() = Arc::new(state);
    }

    /// Reset to the fail-closed free default (logout, fetch failure)
    pub fn clear(&self) {
        self.replace(SubscriptionState::free());
    }
}

impl Default for StateHandle {
    fn default() -> Self {
        Self::new()
    }
}
