//! Identity backend seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The manager never talks to a vendor SDK directly; it is handed an
//! `IdentityBackend`. Production uses [`crate::firebase::FirebaseBackend`],
//! tests and local development use [`crate::memory::MemoryBackend`].
//!
//! Futures are `?Send`: the client runs on the browser's single-threaded
//! event loop and `reqwest` futures are not `Send` on `wasm32`.

use crate::error::BackendError;
use crate::identity::Identity;
use crate::listeners::{SessionListener, Subscription};

#[async_trait::async_trait(?Send)]
pub trait IdentityBackend: Send + Sync {
    /// Register a new email + password account and sign it in.
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, BackendError>;

    /// Sign in with email + password.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, BackendError>;

    /// Run the interactive federated (OAuth) flow.
    async fn authenticate_interactive(&self) -> Result<Identity, BackendError>;

    /// Ask the backend to dispatch a password-reset email.
    async fn send_reset(&self, email: &str) -> Result<(), BackendError>;

    /// Invalidate the current session.
    async fn invalidate(&self) -> Result<(), BackendError>;

    /// Subscribe to session changes. The listener receives the current state
    /// right away and every later change until the subscription is dropped.
    fn on_session_changed(&self, listener: SessionListener) -> Subscription;
}
