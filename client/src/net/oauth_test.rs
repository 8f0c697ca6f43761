use super::*;

#[test]
fn authorization_url_encodes_parameters() {
    let url = authorization_url("client-1", "http://localhost:3000/auth", "n0nce").unwrap();
    let parsed = Url::parse(&url).unwrap();
    assert_eq!(parsed.host_str(), Some("accounts.google.com"));

    let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
    assert_eq!(get("client_id"), Some("client-1"));
    assert_eq!(get("redirect_uri"), Some("http://localhost:3000/auth"));
    assert_eq!(get("response_type"), Some("id_token"));
    assert_eq!(get("nonce"), Some("n0nce"));
    assert_eq!(get("prompt"), Some("select_account"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth"));
}

#[test]
fn empty_fragment_is_pending() {
    assert!(parse_fragment("", GOOGLE_PROVIDER_ID).unwrap().is_none());
    assert!(parse_fragment("#", GOOGLE_PROVIDER_ID).unwrap().is_none());
    assert!(parse_fragment("#state=abc", GOOGLE_PROVIDER_ID).unwrap().is_none());
}

#[test]
fn fragment_with_token_yields_credential() {
    let cred = parse_fragment("#state=x&id_token=eyJ.a%2Bb.c&authuser=0", GOOGLE_PROVIDER_ID)
        .unwrap()
        .unwrap();
    assert_eq!(cred.provider_id, "google.com");
    assert_eq!(cred.id_token.as_deref(), Some("eyJ.a+b.c"));
    assert!(cred.access_token.is_none());
}

#[test]
fn access_denied_reads_as_closed_popup() {
    let err = parse_fragment("#error=access_denied", GOOGLE_PROVIDER_ID).unwrap_err();
    assert_eq!(err.code, codes::POPUP_CLOSED_BY_USER);
}

#[test]
fn other_provider_errors_are_named() {
    let err = parse_fragment("#error=invalid_client", GOOGLE_PROVIDER_ID).unwrap_err();
    assert_eq!(err.code, codes::INTERNAL_ERROR);
    assert!(err.message.contains("invalid_client"));
}

#[tokio::test]
async fn unknown_provider_is_unsupported() {
    let flow = PopupFlow::new("client-1");
    let err = flow.obtain_credential("github.com").await.unwrap_err();
    assert_eq!(err.code, codes::OPERATION_NOT_SUPPORTED);
}
