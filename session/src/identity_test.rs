use super::*;

#[test]
fn session_copies_identity_fields() {
    let mut identity = Identity::with_password("uid-1", "a@b.com");
    identity.created_at_ms = Some(1_700_000_000_000);

    let session = Session::from_identity(&identity);
    assert_eq!(session.identity_id, "uid-1");
    assert_eq!(session.email_address.as_deref(), Some("a@b.com"));
    assert_eq!(session.created_at_ms, Some(1_700_000_000_000));
}

#[test]
fn label_prefers_display_name_then_email_then_id() {
    let mut session = Session::from_identity(&Identity::with_password("uid-1", "a@b.com"));
    assert_eq!(session.label(), "a@b.com");

    session.display_name = Some("Asha".to_owned());
    assert_eq!(session.label(), "Asha");

    session.display_name = Some("   ".to_owned());
    session.email_address = None;
    assert_eq!(session.label(), "uid-1");
}

#[test]
fn identity_deserializes_without_optional_fields() {
    let json = r#"{"id":"u1","email":null,"provider_id":"google.com"}"#;
    let identity: Identity = serde_json::from_str(json).unwrap();
    assert_eq!(identity.provider_id, "google.com");
    assert!(identity.display_name.is_none());
    assert!(identity.created_at_ms.is_none());
}
