//! In-memory identity backend.
//!
//! Deterministic stand-in for the hosted identity service: accounts live in
//! a map, session events are emitted synchronously, and failures can be
//! injected per operation. Used by the test suites and by the client when no
//! Firebase config is compiled in and `GOVX_AUTH_BACKEND=memory` is set.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::backend::IdentityBackend;
use crate::error::{BackendError, codes};
use crate::identity::Identity;
use crate::listeners::{ListenerSet, SessionListener, Subscription};

/// Minimum password length the hosted service enforces.
pub const HOSTED_MIN_PASSWORD_LEN: usize = 6;

const EPOCH_BASE_MS: i64 = 1_700_000_000_000;

/// Backend operation selector for failure injection and call counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendOp {
    CreateAccount,
    Authenticate,
    AuthenticateInteractive,
    SendReset,
    Invalidate,
}

struct Account {
    password: String,
    identity: Identity,
}

#[derive(Default)]
struct MemoryState {
    accounts: HashMap<String, Account>,
    current: Option<Identity>,
    federated: Option<Identity>,
    failures: HashMap<BackendOp, BackendError>,
    calls: HashMap<BackendOp, usize>,
    sent_resets: Vec<String>,
    next_id: u64,
    min_password_len: usize,
}

impl MemoryState {
    /// Count the call and return any injected failure for it.
    fn enter(&mut self, op: BackendOp) -> Result<(), BackendError> {
        *self.calls.entry(op).or_default() += 1;
        match self.failures.remove(&op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn mint_identity(&mut self, email: &str) -> Identity {
        self.next_id += 1;
        let mut identity = Identity::with_password(format!("mem-{}", self.next_id), email);
        identity.created_at_ms = Some(EPOCH_BASE_MS + i64::try_from(self.next_id).unwrap_or(i64::MAX));
        identity
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    listeners: ListenerSet,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an email + password account.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str) -> Self {
        {
            let mut state = self.lock();
            let identity = state.mint_identity(email);
            state
                .accounts
                .insert(email.to_owned(), Account { password: password.to_owned(), identity });
        }
        self
    }

    /// Identity returned by the interactive flow. Without one the flow
    /// behaves as if the user closed the popup.
    #[must_use]
    pub fn with_federated_identity(self, identity: Identity) -> Self {
        self.lock().federated = Some(identity);
        self
    }

    /// Reject new passwords shorter than `len` characters, the way the
    /// hosted service does with [`HOSTED_MIN_PASSWORD_LEN`]. Off by default.
    #[must_use]
    pub fn with_min_password_len(self, len: usize) -> Self {
        self.lock().min_password_len = len;
        self
    }

    /// Make the next call to `op` fail with `error`.
    pub fn fail_next(&self, op: BackendOp, error: BackendError) {
        self.lock().failures.insert(op, error);
    }

    #[must_use]
    pub fn calls(&self, op: BackendOp) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Addresses password-reset emails were dispatched to.
    #[must_use]
    pub fn sent_resets(&self) -> Vec<String> {
        self.lock().sent_resets.clone()
    }

    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.lock().current.clone()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Push a raw session event, as if another tab signed in or out.
    pub fn emit(&self, identity: Option<Identity>) {
        self.lock().current.clone_from(&identity);
        self.listeners.emit(identity);
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `identity` as current and notify listeners outside the lock.
    fn establish(&self, identity: Identity) -> Identity {
        self.emit(Some(identity.clone()));
        identity
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityBackend for MemoryBackend {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let identity = {
            let mut state = self.lock();
            state.enter(BackendOp::CreateAccount)?;
            if state.accounts.contains_key(email) {
                return Err(BackendError::new(
                    codes::EMAIL_ALREADY_IN_USE,
                    "The email address is already in use by another account.",
                ));
            }
            if password.chars().count() < state.min_password_len {
                return Err(BackendError::new(
                    codes::WEAK_PASSWORD,
                    format!("Password should be at least {} characters", state.min_password_len),
                ));
            }
            let identity = state.mint_identity(email);
            state
                .accounts
                .insert(email.to_owned(), Account { password: password.to_owned(), identity: identity.clone() });
            identity
        };
        Ok(self.establish(identity))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let identity = {
            let mut state = self.lock();
            state.enter(BackendOp::Authenticate)?;
            let Some(account) = state.accounts.get(email) else {
                return Err(BackendError::new(codes::USER_NOT_FOUND, "There is no user record for this email."));
            };
            if account.password != password {
                return Err(BackendError::new(codes::WRONG_PASSWORD, "The password is invalid."));
            }
            account.identity.clone()
        };
        Ok(self.establish(identity))
    }

    async fn authenticate_interactive(&self) -> Result<Identity, BackendError> {
        let identity = {
            let mut state = self.lock();
            state.enter(BackendOp::AuthenticateInteractive)?;
            state.federated.clone().ok_or_else(|| {
                BackendError::new(codes::POPUP_CLOSED_BY_USER, "The popup has been closed by the user.")
            })?
        };
        Ok(self.establish(identity))
    }

    async fn send_reset(&self, email: &str) -> Result<(), BackendError> {
        let mut state = self.lock();
        state.enter(BackendOp::SendReset)?;
        state.sent_resets.push(email.to_owned());
        Ok(())
    }

    async fn invalidate(&self) -> Result<(), BackendError> {
        self.lock().enter(BackendOp::Invalidate)?;
        self.emit(None);
        Ok(())
    }

    fn on_session_changed(&self, listener: SessionListener) -> Subscription {
        let current = self.current();
        self.listeners.subscribe(listener, current)
    }
}
