//! Session state store.
//!
//! DESIGN
//! ======
//! A single `watch` channel holds the latest [`SessionSnapshot`]. The store
//! is the only writer and its mutators are crate-private, so everything
//! outside the manager observes through a read-only [`SessionReader`].
//!
//! `is_loading` is derived from an in-flight counter maintained by
//! [`LoadingGuard`]s: overlapping operations keep it true until the last one
//! settles, and the guard's `Drop` releases it on every exit path.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use crate::identity::Session;

/// Derived status flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStatus {
    /// At least one backend operation is in flight.
    pub is_loading: bool,
    /// The first session snapshot has been received. Never reverts.
    pub is_initialized: bool,
}

/// Everything a consumer needs to render auth-dependent UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub status: SessionStatus,
    /// Incremented on every write.
    pub revision: u64,
}

struct StoreInner {
    tx: watch::Sender<SessionSnapshot>,
    in_flight: AtomicUsize,
}

/// Process-wide session state, written only by the auth manager.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                tx: watch::Sender::new(SessionSnapshot::default()),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    /// Read-only handle for consumers.
    #[must_use]
    pub fn reader(&self) -> SessionReader {
        SessionReader { rx: self.inner.tx.subscribe() }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.tx.borrow().clone()
    }

    /// Replace the session wholesale and mark the store initialized.
    pub(crate) fn replace_session(&self, session: Option<Session>) {
        self.inner.tx.send_modify(move |snapshot| {
            snapshot.session = session;
            snapshot.status.is_initialized = true;
            snapshot.revision += 1;
        });
    }

    /// Mark initialized without touching the session. No-op once initialized.
    pub(crate) fn mark_initialized(&self) {
        self.inner.tx.send_if_modified(|snapshot| {
            if snapshot.status.is_initialized {
                return false;
            }
            snapshot.status.is_initialized = true;
            snapshot.revision += 1;
            true
        });
    }

    /// Start an operation; `is_loading` stays true until the guard drops.
    pub(crate) fn begin_operation(&self) -> LoadingGuard {
        self.adjust_in_flight(true);
        LoadingGuard { store: self.clone() }
    }

    fn adjust_in_flight(&self, starting: bool) {
        let in_flight = &self.inner.in_flight;
        self.inner.tx.send_if_modified(|snapshot| {
            let count = if starting {
                in_flight.fetch_add(1, Ordering::SeqCst) + 1
            } else {
                in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1)
            };
            let loading = count > 0;
            if snapshot.status.is_loading == loading {
                return false;
            }
            snapshot.status.is_loading = loading;
            snapshot.revision += 1;
            true
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped `is_loading` hold returned by [`SessionStore::begin_operation`].
#[must_use = "dropping the guard ends the operation"]
pub struct LoadingGuard {
    store: SessionStore,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.store.adjust_in_flight(false);
    }
}

/// Read-only view of the session store.
#[derive(Clone, Debug)]
pub struct SessionReader {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionReader {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.rx.borrow().session.clone()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.rx.borrow().status
    }

    /// Wait for the next write and return the latest snapshot, or `None`
    /// once the store is gone. Intermediate writes may be coalesced.
    pub async fn changed(&mut self) -> Option<SessionSnapshot> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}
