//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::manager::UNAVAILABLE_MESSAGE;
use session::{AuthError, AuthSessionManager, Operation, Outcome};

use crate::state::auth::AuthState;

/// Sign-in route unauthenticated users are sent to.
pub const AUTH_ROUTE: &str = "/auth";

/// Where users land after a successful sign-in.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Redirect only once the first session event has arrived and no operation is
/// mid-flight; otherwise a reload would bounce a signed-in user.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    state.initialized && !state.loading && state.session.is_none()
}

/// Redirect to [`AUTH_ROUTE`] whenever auth has loaded and no user is present.
/// While `leaving` is set the page is signing out on purpose and handles its
/// own navigation.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, leaving: RwSignal<bool>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if !leaving.get() && should_redirect_unauth(&auth.get()) {
            navigate(AUTH_ROUTE, NavigateOptions::default());
        }
    });
}

/// Inline message for a finished operation: `None` when it completed,
/// otherwise the same text the toast showed.
pub fn inline_feedback<T>(
    manager: &AuthSessionManager,
    operation: Operation,
    result: &Result<Outcome<T>, AuthError>,
) -> Option<String> {
    match result {
        Ok(Outcome::Completed(_)) => None,
        Ok(Outcome::Unavailable) => Some(UNAVAILABLE_MESSAGE.to_owned()),
        Err(err) => Some(manager.failure_message(operation, err)),
    }
}
