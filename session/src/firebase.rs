//! Firebase Identity Toolkit REST backend.
//!
//! ARCHITECTURE
//! ============
//! Each operation is one JSON `POST` to `{endpoint}/accounts:{method}?key=..`.
//! Successful sign-ins are followed by an `accounts:lookup` to learn the
//! account creation time, then recorded locally and broadcast to listeners.
//! There is no server-side sign-out in the REST API; invalidating a session
//! drops the local credentials.
//!
//! ERROR HANDLING
//! ==============
//! REST error messages (`EMAIL_EXISTS`, `WEAK_PASSWORD : ...`) are mapped to
//! the canonical codes in [`crate::error::codes`]; anything that fails before
//! a response arrives is `auth/network-request-failed`.
//!
//! TRADE-OFFS
//! ==========
//! Refresh tokens are persisted but never exchanged: the client only needs
//! the identity, not authorized calls against Google APIs.

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::backend::IdentityBackend;
use crate::config::{ConfigError, IdentityConfig};
use crate::error::{BackendError, codes};
use crate::identity::{Identity, PASSWORD_PROVIDER};
use crate::listeners::{ListenerSet, SessionListener, Subscription};

// =============================================================================
// INJECTED SEAMS
// =============================================================================

/// Credential obtained from a federated provider's OAuth flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdpCredential {
    pub provider_id: String,
    pub id_token: Option<String>,
    pub access_token: Option<String>,
}

/// Runs the provider popup/redirect and hands back its credential.
#[async_trait::async_trait(?Send)]
pub trait FederatedFlow: Send + Sync {
    async fn obtain_credential(&self, provider_id: &str) -> Result<IdpCredential, BackendError>;
}

/// What survives a page reload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub identity: Identity,
    pub refresh_token: String,
}

/// Storage for the signed-in session (e.g. browser `localStorage`).
pub trait SessionPersistence: Send + Sync {
    fn load(&self) -> Option<PersistedSession>;
    fn save(&self, session: &PersistedSession);
    fn clear(&self);
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobRequest<'a> {
    request_type: &'static str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest {
    post_body: String,
    request_uri: String,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    provider_id: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// =============================================================================
// BACKEND
// =============================================================================

pub struct FirebaseBackend {
    http: reqwest::Client,
    config: IdentityConfig,
    flow: Option<Arc<dyn FederatedFlow>>,
    persistence: Option<Arc<dyn SessionPersistence>>,
    current: Mutex<Option<PersistedSession>>,
    listeners: ListenerSet,
}

impl FirebaseBackend {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: IdentityConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            config,
            flow: None,
            persistence: None,
            current: Mutex::new(None),
            listeners: ListenerSet::new(),
        })
    }

    #[must_use]
    pub fn with_federated_flow(mut self, flow: Arc<dyn FederatedFlow>) -> Self {
        self.flow = Some(flow);
        self
    }

    /// Attach persistence and restore any previously saved session.
    #[must_use]
    pub fn with_persistence(mut self, persistence: Arc<dyn SessionPersistence>) -> Self {
        let restored = persistence.load();
        if let Some(session) = &restored {
            log::debug!("restored persisted session for {}", session.identity.id);
        }
        *self.current.get_mut().unwrap_or_else(PoisonError::into_inner) = restored;
        self.persistence = Some(persistence);
        self
    }

    fn url(&self, method: &str) -> String {
        format!("{}/accounts:{method}?key={}", self.config.endpoint, self.config.api_key)
    }

    fn lock(&self) -> MutexGuard<'_, Option<PersistedSession>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn post<B, R>(&self, method: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| BackendError::network(e.to_string()))?;
        if !status.is_success() {
            return Err(map_rest_error(status.as_u16(), &text));
        }
        serde_json::from_str(&text)
            .map_err(|e| BackendError::new(codes::INTERNAL_ERROR, format!("unexpected {method} response: {e}")))
    }

    async fn lookup_created_at(&self, id_token: &str) -> Option<i64> {
        let resp: LookupResponse = match self.post("lookup", &LookupRequest { id_token }).await {
            Ok(resp) => resp,
            Err(err) => {
                log::warn!("account lookup failed: {err}");
                return None;
            }
        };
        let raw = resp.users.into_iter().next()?.created_at?;
        match raw.trim().parse::<i64>() {
            Ok(ms) => Some(ms),
            Err(err) => {
                log::warn!("unparseable createdAt '{raw}': {err}");
                None
            }
        }
    }

    /// Record a fresh sign-in and broadcast it.
    async fn establish(&self, token: TokenResponse, provider_id: &str) -> Identity {
        let created_at_ms = self.lookup_created_at(&token.id_token).await;
        let identity = Identity {
            id: token.local_id,
            email: token.email,
            display_name: token.display_name.filter(|name| !name.trim().is_empty()),
            provider_id: token.provider_id.unwrap_or_else(|| provider_id.to_owned()),
            created_at_ms,
        };
        let persisted = PersistedSession { identity: identity.clone(), refresh_token: token.refresh_token };
        if let Some(persistence) = &self.persistence {
            persistence.save(&persisted);
        }
        *self.lock() = Some(persisted);
        self.listeners.emit(Some(identity.clone()));
        identity
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityBackend for FirebaseBackend {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let body = PasswordRequest { email, password, return_secure_token: true };
        let token: TokenResponse = self.post("signUp", &body).await?;
        Ok(self.establish(token, PASSWORD_PROVIDER).await)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let body = PasswordRequest { email, password, return_secure_token: true };
        let token: TokenResponse = self.post("signInWithPassword", &body).await?;
        Ok(self.establish(token, PASSWORD_PROVIDER).await)
    }

    async fn authenticate_interactive(&self) -> Result<Identity, BackendError> {
        let Some(flow) = &self.flow else {
            return Err(BackendError::new(
                codes::OPERATION_NOT_SUPPORTED,
                "Interactive sign-in is not available in this environment.",
            ));
        };
        let credential = flow.obtain_credential(&self.config.federated_provider).await?;
        let body = IdpRequest {
            post_body: idp_post_body(&credential)?,
            request_uri: self.config.request_uri(),
            return_secure_token: true,
            return_idp_credential: true,
        };
        let token: TokenResponse = self.post("signInWithIdp", &body).await?;
        Ok(self.establish(token, &credential.provider_id).await)
    }

    async fn send_reset(&self, email: &str) -> Result<(), BackendError> {
        let body = OobRequest { request_type: "PASSWORD_RESET", email };
        self.post::<_, IgnoredAny>("sendOobCode", &body).await?;
        Ok(())
    }

    async fn invalidate(&self) -> Result<(), BackendError> {
        let previous = self.lock().take();
        if let Some(persistence) = &self.persistence {
            persistence.clear();
        }
        if let Some(session) = previous {
            log::debug!("dropped local credentials for {}", session.identity.id);
        }
        self.listeners.emit(None);
        Ok(())
    }

    fn on_session_changed(&self, listener: SessionListener) -> Subscription {
        let current = self.lock().as_ref().map(|session| session.identity.clone());
        self.listeners.subscribe(listener, current)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Form-encode the IdP credential as the `postBody` of `accounts:signInWithIdp`.
fn idp_post_body(credential: &IdpCredential) -> Result<String, BackendError> {
    if credential.id_token.is_none() && credential.access_token.is_none() {
        return Err(BackendError::new(codes::INVALID_CREDENTIAL, "Federated credential carried no token."));
    }
    let mut url = reqwest::Url::parse("http://localhost/")
        .map_err(|e| BackendError::new(codes::INTERNAL_ERROR, e.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(token) = &credential.id_token {
            pairs.append_pair("id_token", token);
        }
        if let Some(token) = &credential.access_token {
            pairs.append_pair("access_token", token);
        }
        pairs.append_pair("providerId", &credential.provider_id);
    }
    Ok(url.query().unwrap_or_default().to_owned())
}

/// Translate an Identity Toolkit error body into a canonical [`BackendError`].
#[must_use]
pub fn map_rest_error(status: u16, body: &str) -> BackendError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        // Gateways and proxies answer 5xx with HTML; the backend never saw the request.
        Err(_) if status >= 500 => {
            return BackendError::network(format!("identity backend unreachable (status {status})"));
        }
        Err(_) => {
            return BackendError::new(codes::INTERNAL_ERROR, format!("identity backend returned status {status}"));
        }
    };
    let (key, detail) = match message.split_once(" : ") {
        Some((key, detail)) => (key.trim(), Some(detail.trim())),
        None => (message.trim(), None),
    };
    let (code, fallback) = match key {
        "EMAIL_EXISTS" => (codes::EMAIL_ALREADY_IN_USE, "The email address is already in use by another account."),
        "EMAIL_NOT_FOUND" => (codes::USER_NOT_FOUND, "There is no user record for this email."),
        "INVALID_PASSWORD" => (codes::WRONG_PASSWORD, "The password is invalid."),
        "INVALID_LOGIN_CREDENTIALS" => (codes::INVALID_CREDENTIAL, "The supplied credentials are invalid."),
        "USER_DISABLED" => (codes::USER_DISABLED, "The user account has been disabled."),
        "WEAK_PASSWORD" => (codes::WEAK_PASSWORD, "Password should be at least 6 characters"),
        "INVALID_EMAIL" | "MISSING_EMAIL" => (codes::INVALID_EMAIL, "The email address is badly formatted."),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => (codes::TOO_MANY_REQUESTS, "Too many attempts. Try again later."),
        "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => {
            (codes::OPERATION_NOT_ALLOWED, "This sign-in method is disabled.")
        }
        _ => (codes::INTERNAL_ERROR, key),
    };
    BackendError::new(code, detail.unwrap_or(fallback))
}
