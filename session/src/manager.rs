//! Auth session manager.
//!
//! SYSTEM CONTEXT
//! ==============
//! The single writer of the [`SessionStore`]. UI code calls the five
//! operations below; each one validates input, calls the injected
//! [`IdentityBackend`], reports exactly one outcome to the
//! [`NotificationSink`], and hands the result back so the caller decides
//! what to do next (navigate, keep a form open, ...).
//!
//! DESIGN
//! ======
//! - Session changes flow only through the backend's change stream; a
//!   successful sign-in updates the store because the backend emits, not
//!   because the manager writes.
//! - Backend failures are logged, notified, then returned; never swallowed.
//! - A missing backend is not an error: operations notify and resolve to
//!   [`Outcome::Unavailable`], and activation still marks the store
//!   initialized so the UI never waits forever.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::IdentityBackend;
use crate::config::DEFAULT_FEDERATED_LABEL;
use crate::error::{AuthError, InputError, RejectionKind};
use crate::identity::{Identity, Session};
use crate::listeners::Subscription;
use crate::notify::NotificationSink;
use crate::store::{SessionReader, SessionSnapshot, SessionStore};
use crate::validate::{validate_credentials, validate_email};

pub const UNAVAILABLE_MESSAGE: &str = "Authentication service not available";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
const NETWORK_MESSAGE: &str = "Network error. Check your connection and try again.";
const WEAK_PASSWORD_MESSAGE: &str = "Password should be at least 6 characters";

/// Identity operations exposed to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Register,
    SignIn,
    FederatedSignIn,
    PasswordReset,
    SignOut,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::SignIn => "sign-in",
            Self::FederatedSignIn => "federated sign-in",
            Self::PasswordReset => "password reset",
            Self::SignOut => "sign-out",
        }
    }
}

/// Result of an operation that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The backend completed the operation.
    Completed(T),
    /// No backend is configured; nothing was attempted.
    Unavailable,
}

impl<T> Outcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

pub struct AuthSessionManager {
    backend: Option<Arc<dyn IdentityBackend>>,
    sink: Arc<dyn NotificationSink>,
    store: SessionStore,
    subscription: Mutex<Option<Subscription>>,
    provider_label: String,
}

impl AuthSessionManager {
    #[must_use]
    pub fn new(backend: Arc<dyn IdentityBackend>, sink: Arc<dyn NotificationSink>) -> Self {
        Self::build(Some(backend), sink)
    }

    /// Manager for an environment where no backend could be configured.
    #[must_use]
    pub fn unavailable(sink: Arc<dyn NotificationSink>) -> Self {
        Self::build(None, sink)
    }

    fn build(backend: Option<Arc<dyn IdentityBackend>>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            backend,
            sink,
            store: SessionStore::new(),
            subscription: Mutex::new(None),
            provider_label: DEFAULT_FEDERATED_LABEL.to_owned(),
        }
    }

    /// Name of the federated provider used in user-facing messages.
    #[must_use]
    pub fn with_provider_label(mut self, label: impl Into<String>) -> Self {
        self.provider_label = label.into();
        self
    }

    #[must_use]
    pub fn provider_label(&self) -> &str {
        &self.provider_label
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    #[must_use]
    pub fn reader(&self) -> SessionReader {
        self.store.reader()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Subscribe to the backend's session stream. Idempotent.
    pub fn activate(&self) {
        let mut slot = self.lock_subscription();
        if slot.is_some() {
            return;
        }
        let Some(backend) = &self.backend else {
            log::warn!("identity backend unavailable; session starts signed out");
            self.store.mark_initialized();
            return;
        };
        let store = self.store.clone();
        *slot = Some(backend.on_session_changed(Box::new(move |identity: Option<Identity>| {
            log::debug!("session changed: signed_in={}", identity.is_some());
            store.replace_session(identity.as_ref().map(Session::from_identity));
        })));
    }

    /// Release the backend subscription. Also happens on drop.
    pub fn deactivate(&self) {
        let released = self.lock_subscription().take();
        drop(released);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock_subscription().is_some()
    }

    fn lock_subscription(&self) -> MutexGuard<'_, Option<Subscription>> {
        self.subscription.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Create an email + password account.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend failure after notifying it.
    pub async fn register_with_password(&self, email: &str, password: &str) -> Result<Outcome<Identity>, AuthError> {
        self.run(Operation::Register, |backend| async move {
            let (email, password) = validate_credentials(email, password)?;
            Ok::<_, AuthError>(backend.create_account(&email, &password).await?)
        })
        .await
    }

    /// Sign in with email + password.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend failure after notifying it. Unknown
    /// accounts and wrong passwords are notified with the same message.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Outcome<Identity>, AuthError> {
        self.run(Operation::SignIn, |backend| async move {
            let (email, password) = validate_credentials(email, password)?;
            Ok::<_, AuthError>(backend.authenticate(&email, &password).await?)
        })
        .await
    }

    /// Run the federated provider's interactive sign-in.
    ///
    /// # Errors
    ///
    /// Returns the backend failure (popup closed, blocked, ...) after notifying it.
    pub async fn sign_in_with_federated_provider(&self) -> Result<Outcome<Identity>, AuthError> {
        self.run(Operation::FederatedSignIn, |backend| async move {
            Ok::<_, AuthError>(backend.authenticate_interactive().await?)
        })
        .await
    }

    /// Request a password-reset email. An unknown address is reported as
    /// success so the response never reveals whether an account exists.
    ///
    /// # Errors
    ///
    /// Returns validation and transport failures after notifying them.
    pub async fn send_password_reset(&self, email: &str) -> Result<Outcome<()>, AuthError> {
        self.run(Operation::PasswordReset, |backend| async move {
            let email = validate_email(email)?;
            match backend.send_reset(&email).await {
                Err(err) if err.kind() == RejectionKind::AccountNotFound => {
                    log::debug!("password reset requested for unknown account");
                }
                other => other?,
            }
            Ok::<_, AuthError>(())
        })
        .await
    }

    /// End the current session. On failure the session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the backend failure after notifying it.
    pub async fn end_session(&self) -> Result<Outcome<()>, AuthError> {
        self.run(Operation::SignOut, |backend| async move {
            Ok::<_, AuthError>(backend.invalidate().await?)
        })
        .await
    }

    async fn run<T, F, Fut>(&self, operation: Operation, call: F) -> Result<Outcome<T>, AuthError>
    where
        F: FnOnce(Arc<dyn IdentityBackend>) -> Fut,
        Fut: Future<Output = Result<T, AuthError>>,
    {
        let Some(backend) = self.backend.clone() else {
            log::warn!("{} skipped: identity backend unavailable", operation.label());
            self.sink.notify_failure(UNAVAILABLE_MESSAGE);
            return Ok(Outcome::Unavailable);
        };

        let _loading = self.store.begin_operation();
        match call(backend).await {
            Ok(value) => {
                self.sink.notify_success(&self.success_message(operation));
                Ok(Outcome::Completed(value))
            }
            Err(err) => {
                log::error!("{} failed: {err}", operation.label());
                self.sink.notify_failure(&self.failure_message(operation, &err));
                Err(err)
            }
        }
    }

    // =========================================================================
    // MESSAGES
    // =========================================================================

    #[must_use]
    pub fn success_message(&self, operation: Operation) -> String {
        match operation {
            Operation::Register => "Account created successfully!".to_owned(),
            Operation::SignIn => "Signed in successfully!".to_owned(),
            Operation::FederatedSignIn => format!("Signed in with {} successfully!", self.provider_label),
            Operation::PasswordReset => "Password reset email sent!".to_owned(),
            Operation::SignOut => "Signed out successfully!".to_owned(),
        }
    }

    /// User-facing text for a failed operation; the same text is notified.
    #[must_use]
    pub fn failure_message(&self, operation: Operation, err: &AuthError) -> String {
        if operation == Operation::SignOut {
            return "Failed to sign out".to_owned();
        }
        let backend = match err {
            AuthError::Validation(input) => return input.to_string(),
            AuthError::Transport(_) => return NETWORK_MESSAGE.to_owned(),
            AuthError::Rejected(backend) => backend,
        };
        let specific = match (operation, backend.kind()) {
            (Operation::SignIn, RejectionKind::InvalidCredentials | RejectionKind::AccountNotFound) => {
                Some(INVALID_CREDENTIALS_MESSAGE.to_owned())
            }
            (_, RejectionKind::AccountDisabled) => Some("This account has been disabled".to_owned()),
            (_, RejectionKind::TooManyRequests) => Some("Too many attempts. Try again later.".to_owned()),
            (Operation::Register, RejectionKind::DuplicateAccount) => {
                Some("An account with this email already exists".to_owned())
            }
            (Operation::Register, RejectionKind::WeakPassword) => Some(if backend.message.trim().is_empty() {
                WEAK_PASSWORD_MESSAGE.to_owned()
            } else {
                backend.message.trim().to_owned()
            }),
            (_, RejectionKind::InvalidEmail) => Some(InputError::InvalidEmail.to_string()),
            (Operation::FederatedSignIn, RejectionKind::PopupClosed) => {
                Some("Sign-in popup was closed before completing".to_owned())
            }
            (Operation::FederatedSignIn, RejectionKind::PopupBlocked) => {
                Some("Sign-in popup was blocked by the browser".to_owned())
            }
            _ => None,
        };
        specific.unwrap_or_else(|| match operation {
            Operation::Register => "Failed to create account".to_owned(),
            Operation::SignIn => "Failed to sign in".to_owned(),
            Operation::FederatedSignIn => format!("Failed to sign in with {}", self.provider_label),
            Operation::PasswordReset => "Failed to send password reset email".to_owned(),
            Operation::SignOut => "Failed to sign out".to_owned(),
        })
    }
}
