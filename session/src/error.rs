//! Error taxonomy for identity operations.
//!
//! DESIGN
//! ======
//! Backends report failures as a [`BackendError`] carrying a canonical
//! machine code (see [`codes`]) and a human message. The manager lifts those
//! into [`AuthError`], splitting transport failures from backend rejections so
//! callers can branch without string matching. Input problems caught before a
//! backend call are [`InputError`]s.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Canonical backend error codes. Backends translate their native codes into
/// these before returning.
pub mod codes {
    pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const USER_DISABLED: &str = "auth/user-disabled";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const POPUP_CLOSED_BY_USER: &str = "auth/popup-closed-by-user";
    pub const POPUP_BLOCKED: &str = "auth/popup-blocked";
    pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
    pub const OPERATION_NOT_SUPPORTED: &str = "auth/operation-not-supported";
    pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
    pub const INTERNAL_ERROR: &str = "auth/internal-error";
}

/// Coarse classification of a backend error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionKind {
    InvalidCredentials,
    AccountNotFound,
    DuplicateAccount,
    WeakPassword,
    InvalidEmail,
    AccountDisabled,
    TooManyRequests,
    PopupClosed,
    PopupBlocked,
    Network,
    Unsupported,
    Other,
}

/// Failure reported by an identity backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({code})")]
pub struct BackendError {
    /// Canonical machine code, e.g. `auth/wrong-password`.
    pub code: String,
    /// Human-readable message from the backend.
    pub message: String,
}

impl BackendError {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }

    /// Transport-level failure (request never got a backend verdict).
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(codes::NETWORK_REQUEST_FAILED, message)
    }

    #[must_use]
    pub fn kind(&self) -> RejectionKind {
        match self.code.as_str() {
            codes::INVALID_CREDENTIAL | codes::WRONG_PASSWORD => RejectionKind::InvalidCredentials,
            codes::USER_NOT_FOUND => RejectionKind::AccountNotFound,
            codes::EMAIL_ALREADY_IN_USE => RejectionKind::DuplicateAccount,
            codes::WEAK_PASSWORD => RejectionKind::WeakPassword,
            codes::INVALID_EMAIL => RejectionKind::InvalidEmail,
            codes::USER_DISABLED => RejectionKind::AccountDisabled,
            codes::TOO_MANY_REQUESTS => RejectionKind::TooManyRequests,
            codes::POPUP_CLOSED_BY_USER => RejectionKind::PopupClosed,
            codes::POPUP_BLOCKED => RejectionKind::PopupBlocked,
            codes::NETWORK_REQUEST_FAILED => RejectionKind::Network,
            codes::OPERATION_NOT_SUPPORTED | codes::OPERATION_NOT_ALLOWED => RejectionKind::Unsupported,
            _ => RejectionKind::Other,
        }
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.kind() == RejectionKind::Network
    }
}

/// Input rejected before reaching the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Enter your password")]
    EmptyPassword,
}

/// Error returned by [`crate::AuthSessionManager`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Input failed local validation; the backend was not called.
    #[error(transparent)]
    Validation(#[from] InputError),

    /// The backend answered and refused the request.
    #[error("rejected by identity backend: {0}")]
    Rejected(BackendError),

    /// The backend could not be reached.
    #[error("identity backend unreachable: {0}")]
    Transport(BackendError),
}

impl AuthError {
    /// Underlying backend error, if the failure came from the backend.
    #[must_use]
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            Self::Validation(_) => None,
            Self::Rejected(err) | Self::Transport(err) => Some(err),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<RejectionKind> {
        self.backend().map(BackendError::kind)
    }
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        if err.is_transport() { Self::Transport(err) } else { Self::Rejected(err) }
    }
}
