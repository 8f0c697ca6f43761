use super::*;
use session::{Session, identity::Identity};

fn signed_in() -> Option<Session> {
    Some(Session::from_identity(&Identity::with_password("u1", "a@b.com")))
}

#[test]
fn should_redirect_unauth_when_initialized_and_user_missing() {
    let state = AuthState { session: None, loading: false, initialized: true };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_before_first_event() {
    let state = AuthState { session: None, loading: false, initialized: false };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { session: None, loading: true, initialized: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState { session: signed_in(), loading: false, initialized: true };
    assert!(!should_redirect_unauth(&state));
}

// =============================================================
// inline_feedback
// =============================================================

fn manager() -> AuthSessionManager {
    AuthSessionManager::unavailable(std::sync::Arc::new(session::LogSink))
}

#[test]
fn inline_feedback_is_empty_on_completion() {
    let result: Result<Outcome<()>, AuthError> = Ok(Outcome::Completed(()));
    assert_eq!(inline_feedback(&manager(), Operation::SignIn, &result), None);
}

#[test]
fn inline_feedback_reports_unavailable_backend() {
    let result: Result<Outcome<()>, AuthError> = Ok(Outcome::Unavailable);
    assert_eq!(
        inline_feedback(&manager(), Operation::SignOut, &result).as_deref(),
        Some(UNAVAILABLE_MESSAGE)
    );
}

#[test]
fn inline_feedback_matches_toast_text() {
    let err = AuthError::from(session::BackendError::new(session::error::codes::WRONG_PASSWORD, "bad"));
    let result: Result<Outcome<()>, AuthError> = Err(err);
    assert_eq!(
        inline_feedback(&manager(), Operation::SignIn, &result).as_deref(),
        Some("Invalid email or password")
    );
}
