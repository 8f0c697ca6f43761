use super::*;

#[test]
fn check_reset_email_trims_input() {
    assert_eq!(check_reset_email("  a@b.com "), Ok("a@b.com".to_owned()));
}

#[test]
fn check_reset_email_rejects_blank() {
    assert_eq!(check_reset_email("   "), Err(EMPTY_EMAIL_MESSAGE));
}

#[test]
fn sent_message_names_address() {
    assert_eq!(sent_message("a@b.com"), "We've sent a password reset link to a@b.com");
}
