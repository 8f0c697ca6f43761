use super::*;
use session::{SessionStatus, identity::Identity};

fn session(email: &str) -> Session {
    Session::from_identity(&Identity::with_password("u1", email))
}

#[test]
fn default_is_pending_and_signed_out() {
    let state = AuthState::default();
    assert!(state.is_pending());
    assert!(!state.is_signed_in());
    assert_eq!(state.user_label(), None);
}

#[test]
fn from_snapshot_copies_session_and_flags() {
    let snapshot = SessionSnapshot {
        session: Some(session("a@b.com")),
        status: SessionStatus { is_loading: true, is_initialized: true },
        revision: 3,
    };
    let state = AuthState::from_snapshot(&snapshot);
    assert!(state.loading);
    assert!(!state.is_pending());
    assert!(state.is_signed_in());
    assert_eq!(state.user_label(), Some("a@b.com"));
}

#[test]
fn avatar_initial_uppercases_email() {
    let state = AuthState { session: Some(session("zed@b.com")), loading: false, initialized: true };
    assert_eq!(state.avatar_initial(), Some('Z'));
}

#[test]
fn avatar_initial_absent_without_email() {
    let mut identity = Identity::with_password("u1", "x@y.com");
    identity.email = None;
    let state = AuthState {
        session: Some(Session::from_identity(&identity)),
        loading: false,
        initialized: true,
    };
    assert_eq!(state.avatar_initial(), None);
    assert_eq!(state.user_label(), Some("u1"));
}
