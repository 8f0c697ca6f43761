use super::*;

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  USER@Example.com "), Some("user@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("user"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
    assert_eq!(normalize_email("a b@c.com"), None);
}

#[test]
fn validate_credentials_requires_password() {
    assert_eq!(validate_credentials("a@b.com", ""), Err(InputError::EmptyPassword));
}

#[test]
fn validate_credentials_checks_email_first() {
    assert_eq!(validate_credentials("nope", ""), Err(InputError::InvalidEmail));
}

#[test]
fn validate_credentials_keeps_password_whitespace() {
    assert_eq!(
        validate_credentials(" A@B.com ", " pw1 "),
        Ok(("a@b.com".to_owned(), " pw1 ".to_owned()))
    );
}
