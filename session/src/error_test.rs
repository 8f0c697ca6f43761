use super::*;

#[test]
fn wrong_password_and_invalid_credential_share_a_kind() {
    assert_eq!(
        BackendError::new(codes::WRONG_PASSWORD, "nope").kind(),
        RejectionKind::InvalidCredentials
    );
    assert_eq!(
        BackendError::new(codes::INVALID_CREDENTIAL, "nope").kind(),
        RejectionKind::InvalidCredentials
    );
}

#[test]
fn unknown_code_is_other() {
    assert_eq!(BackendError::new("auth/quota-exceeded", "x").kind(), RejectionKind::Other);
}

#[test]
fn network_errors_become_transport() {
    let err = AuthError::from(BackendError::network("connection reset"));
    assert!(matches!(err, AuthError::Transport(_)));
    assert_eq!(err.kind(), Some(RejectionKind::Network));
}

#[test]
fn backend_refusals_become_rejected() {
    let err = AuthError::from(BackendError::new(codes::EMAIL_ALREADY_IN_USE, "taken"));
    assert!(matches!(err, AuthError::Rejected(_)));
    assert_eq!(err.backend().map(|e| e.code.as_str()), Some(codes::EMAIL_ALREADY_IN_USE));
}

#[test]
fn validation_errors_have_no_backend_error() {
    let err = AuthError::from(InputError::EmptyPassword);
    assert!(err.backend().is_none());
    assert_eq!(err.to_string(), "Enter your password");
}

#[test]
fn backend_error_display_includes_code() {
    let err = BackendError::new(codes::WEAK_PASSWORD, "too short");
    assert_eq!(err.to_string(), "too short (auth/weak-password)");
}
