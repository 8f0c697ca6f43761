//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signal-friendly mirror of the session store. Route guards and
//! user-aware components read it from context; only the app root writes it,
//! by copying each store snapshot.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::{Session, SessionSnapshot};

/// Authentication state tracking the current session and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// An identity operation is in flight.
    pub loading: bool,
    /// The first session event has arrived.
    pub initialized: bool,
}

impl AuthState {
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            session: snapshot.session.clone(),
            loading: snapshot.status.is_loading,
            initialized: snapshot.status.is_initialized,
        }
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Still waiting for the first session event; render a spinner.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.initialized
    }

    /// Label for the signed-in user: display name, email, then id.
    #[must_use]
    pub fn user_label(&self) -> Option<&str> {
        self.session.as_ref().map(Session::label)
    }

    /// Uppercased first character of the user's email, for avatars.
    #[must_use]
    pub fn avatar_initial(&self) -> Option<char> {
        let email = self.session.as_ref()?.email_address.as_deref()?;
        email.chars().next().map(|c| c.to_ascii_uppercase())
    }
}
