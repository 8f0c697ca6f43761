//! Session-changed listener registry shared by backend implementations.
//!
//! DESIGN
//! ======
//! Listeners are keyed by a monotonically increasing id so a [`Subscription`]
//! can remove exactly its own entry on drop. Emission snapshots the listener
//! list and invokes callbacks outside the lock, so a listener may subscribe or
//! unsubscribe re-entrantly without deadlocking.

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::identity::Identity;

/// Callback invoked with the current identity (or `None` when signed out).
pub type SessionListener = Box<dyn Fn(Option<Identity>) + Send + Sync>;

type SharedListener = Arc<dyn Fn(Option<Identity>) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, SharedListener>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry of session listeners.
#[derive(Clone, Default)]
pub struct ListenerSet {
    inner: Arc<Mutex<Registry>>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` and immediately deliver `current` to it.
    pub fn subscribe(&self, listener: SessionListener, current: Option<Identity>) -> Subscription {
        let listener: SharedListener = Arc::from(listener);
        let id = {
            let mut registry = lock(&self.inner);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.insert(id, Arc::clone(&listener));
            id
        };
        listener(current);

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).listeners.remove(&id);
            }
        })
    }

    /// Deliver `identity` to every registered listener in subscription order.
    pub fn emit(&self, identity: Option<Identity>) {
        let listeners: Vec<SharedListener> = lock(&self.inner).listeners.values().cloned().collect();
        for listener in listeners {
            listener(identity.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet").field("listeners", &self.len()).finish()
    }
}

/// Handle returned by a subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Release the subscription now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
