//! Google sign-in popup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Supplies the interactive half of federated sign-in for the Firebase
//! backend: open the provider's consent page in a popup, wait for it to
//! redirect back to our origin, and lift the `id_token` out of the URL
//! fragment. The backend exchanges that token for a session.
//!
//! The popup is cross-origin until the provider redirects, so reading its
//! location fails until then; those reads are treated as "not yet".

#[cfg(test)]
#[path = "oauth_test.rs"]
mod oauth_test;

use session::error::codes;
use session::firebase::{FederatedFlow, IdpCredential};
use session::BackendError;
use url::Url;

/// Compile-time OAuth web client id enabling the popup.
pub const ENV_OAUTH_CLIENT_ID: &str = "GOVX_OAUTH_CLIENT_ID";
pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

#[cfg(feature = "hydrate")]
const POLL_INTERVAL_MS: u64 = 250;
#[cfg(feature = "hydrate")]
const POPUP_FEATURES: &str = "width=500,height=640";

/// Consent-page URL for an implicit `id_token` grant.
///
/// # Errors
///
/// Fails only if the authorize endpoint constant is not a valid URL.
pub fn authorization_url(client_id: &str, redirect_uri: &str, nonce: &str) -> Result<String, BackendError> {
    let mut url = Url::parse(GOOGLE_AUTHORIZE_URL)
        .map_err(|e| BackendError::new(codes::INTERNAL_ERROR, format!("bad authorize url: {e}")))?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "id_token")
        .append_pair("scope", "openid email profile")
        .append_pair("nonce", nonce)
        .append_pair("prompt", "select_account");
    Ok(url.into())
}

/// Read the provider's answer from a redirect fragment.
///
/// `Ok(None)` means the fragment carries no result yet.
///
/// # Errors
///
/// `access_denied` maps to a closed popup; any other provider error is
/// reported as an internal error naming it.
pub fn parse_fragment(fragment: &str, provider_id: &str) -> Result<Option<IdpCredential>, BackendError> {
    let trimmed = fragment.trim_start_matches('#');
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut id_token = None;
    let mut error = None;
    for (key, value) in url::form_urlencoded::parse(trimmed.as_bytes()) {
        match key.as_ref() {
            "id_token" => id_token = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    match (id_token, error) {
        (Some(token), _) => Ok(Some(IdpCredential {
            provider_id: provider_id.to_owned(),
            id_token: Some(token),
            access_token: None,
        })),
        (None, Some(e)) if e == "access_denied" => Err(BackendError::new(
            codes::POPUP_CLOSED_BY_USER,
            "The user declined the consent screen.",
        )),
        (None, Some(e)) => Err(BackendError::new(codes::INTERNAL_ERROR, format!("provider returned {e}"))),
        (None, None) => Ok(None),
    }
}

/// Popup flow for Google accounts.
pub struct PopupFlow {
    client_id: String,
}

impl PopupFlow {
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self { client_id: client_id.into() }
    }
}

#[async_trait::async_trait(?Send)]
impl FederatedFlow for PopupFlow {
    async fn obtain_credential(&self, provider_id: &str) -> Result<IdpCredential, BackendError> {
        if provider_id != GOOGLE_PROVIDER_ID {
            return Err(BackendError::new(
                codes::OPERATION_NOT_SUPPORTED,
                format!("no popup flow for provider {provider_id}"),
            ));
        }
        #[cfg(feature = "hydrate")]
        {
            run_popup(&self.client_id, provider_id).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::debug!("popup sign-in for client {} requested outside the browser", self.client_id);
            Err(BackendError::new(
                codes::OPERATION_NOT_SUPPORTED,
                "Popup sign-in is only available in the browser.",
            ))
        }
    }
}

#[cfg(feature = "hydrate")]
async fn run_popup(client_id: &str, provider_id: &str) -> Result<IdpCredential, BackendError> {
    use std::time::Duration;

    let unsupported = || BackendError::new(codes::OPERATION_NOT_SUPPORTED, "No browser window available.");
    let window = web_sys::window().ok_or_else(unsupported)?;
    let origin = window.location().origin().map_err(|_| unsupported())?;
    let redirect_uri = format!("{origin}{}", crate::util::auth::AUTH_ROUTE);
    let nonce = format!("{:016x}", js_sys::Math::random().to_bits());
    let url = authorization_url(client_id, &redirect_uri, &nonce)?;

    let popup = window
        .open_with_url_and_target_and_features(&url, "govx-oauth", POPUP_FEATURES)
        .map_err(|_| popup_blocked())?
        .ok_or_else(popup_blocked)?;

    loop {
        gloo_timers::future::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        if popup.closed().unwrap_or(true) {
            return Err(BackendError::new(
                codes::POPUP_CLOSED_BY_USER,
                "The popup has been closed by the user.",
            ));
        }
        let Ok(hash) = popup.location().hash() else {
            continue;
        };
        let result = parse_fragment(&hash, provider_id).transpose();
        let Some(result) = result else {
            continue;
        };
        if popup.close().is_err() {
            log::debug!("oauth popup did not close");
        }
        return result;
    }
}

#[cfg(feature = "hydrate")]
fn popup_blocked() -> BackendError {
    BackendError::new(codes::POPUP_BLOCKED, "The popup was blocked by the browser.")
}
