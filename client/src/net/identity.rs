//! Identity backend selection.
//!
//! SYSTEM CONTEXT
//! ==============
//! Configuration is baked in at compile time (`option_env!`) because the WASM
//! bundle has no process environment. The same `GOVX_*` keys the native
//! tooling reads via `IdentityConfig::from_env` are looked up here.
//!
//! ERROR HANDLING
//! ==============
//! A missing or malformed config never fails the app: the manager is built
//! in its unavailable mode and every operation reports
//! "Authentication service not available".

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::Arc;

use session::config::{
    ENV_API_KEY, ENV_AUTH_DOMAIN, ENV_ENDPOINT, ENV_FEDERATED_LABEL, ENV_FEDERATED_PROVIDER, ENV_PROJECT_ID,
};
use session::firebase::FirebaseBackend;
use session::memory::MemoryBackend;
use session::{AuthSessionManager, ConfigError, IdentityBackend, IdentityConfig, NotificationSink};

use crate::net::oauth::{ENV_OAUTH_CLIENT_ID, GOOGLE_PROVIDER_ID, PopupFlow};

/// Compile-time switch selecting the backend: `firebase` (default) or `memory`.
pub const ENV_AUTH_BACKEND: &str = "GOVX_AUTH_BACKEND";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Firebase,
    Memory,
}

/// Parse the backend selector; unknown values fall back to Firebase.
pub fn parse_backend_kind(raw: Option<&str>) -> BackendKind {
    match raw.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("memory") => BackendKind::Memory,
        Some(v) if v.is_empty() || v.eq_ignore_ascii_case("firebase") => BackendKind::Firebase,
        None => BackendKind::Firebase,
        Some(other) => {
            log::warn!("unknown {ENV_AUTH_BACKEND} '{other}', using firebase");
            BackendKind::Firebase
        }
    }
}

/// Values compiled into the bundle.
fn compiled(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_KEY => option_env!("GOVX_FIREBASE_API_KEY"),
        ENV_AUTH_DOMAIN => option_env!("GOVX_FIREBASE_AUTH_DOMAIN"),
        ENV_PROJECT_ID => option_env!("GOVX_FIREBASE_PROJECT_ID"),
        ENV_ENDPOINT => option_env!("GOVX_IDENTITY_ENDPOINT"),
        ENV_FEDERATED_PROVIDER => option_env!("GOVX_FEDERATED_PROVIDER"),
        ENV_FEDERATED_LABEL => option_env!("GOVX_FEDERATED_LABEL"),
        ENV_AUTH_BACKEND => option_env!("GOVX_AUTH_BACKEND"),
        ENV_OAUTH_CLIENT_ID => option_env!("GOVX_OAUTH_CLIENT_ID"),
        _ => None,
    };
    value.map(str::to_owned)
}

/// Build the app's manager from compiled-in configuration.
pub fn build_manager(sink: Arc<dyn NotificationSink>) -> AuthSessionManager {
    build_manager_with(compiled, sink)
}

/// Build a manager from an arbitrary key lookup.
pub fn build_manager_with<F>(lookup: F, sink: Arc<dyn NotificationSink>) -> AuthSessionManager
where
    F: Fn(&str) -> Option<String>,
{
    match parse_backend_kind(lookup(ENV_AUTH_BACKEND).as_deref()) {
        BackendKind::Memory => {
            log::info!("using in-memory identity backend");
            AuthSessionManager::new(Arc::new(MemoryBackend::new()), sink)
        }
        BackendKind::Firebase => match firebase_backend(&lookup) {
            Ok((backend, label)) => AuthSessionManager::new(backend, sink).with_provider_label(label),
            Err(e) => {
                log::warn!("identity backend not configured: {e}");
                AuthSessionManager::unavailable(sink)
            }
        },
    }
}

fn firebase_backend<F>(lookup: &F) -> Result<(Arc<dyn IdentityBackend>, String), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = IdentityConfig::from_lookup(lookup)?;
    let label = config.federated_label.clone();
    let popup_client_id = (config.federated_provider == GOOGLE_PROVIDER_ID)
        .then(|| lookup(ENV_OAUTH_CLIENT_ID))
        .flatten()
        .filter(|id| !id.trim().is_empty());
    let backend = FirebaseBackend::new(config)?;
    let backend = match popup_client_id {
        Some(client_id) => backend.with_federated_flow(Arc::new(PopupFlow::new(client_id))),
        None => {
            log::info!("{ENV_OAUTH_CLIENT_ID} not set; federated sign-in disabled");
            backend
        }
    };
    #[cfg(feature = "hydrate")]
    let backend = backend.with_persistence(Arc::new(crate::util::storage::LocalStoragePersistence));
    let backend: Arc<dyn IdentityBackend> = Arc::new(backend);
    Ok((backend, label))
}
