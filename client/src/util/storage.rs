//! Browser `localStorage` persistence for the signed-in session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Firebase backend keeps its refresh token and identity here so a reload
//! restores the session without a round trip. Hydrate-only; on the server
//! every call is a no-op and nothing is ever restored.

use serde::Serialize;
use serde::de::DeserializeOwned;
use session::firebase::{PersistedSession, SessionPersistence};

/// Storage key for the persisted session.
pub const SESSION_STORAGE_KEY: &str = "govx_session";

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding unreadable {key} from localStorage: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        match serde_json::to_string(value) {
            Ok(raw) => {
                if storage.set_item(key, &raw).is_err() {
                    log::warn!("localStorage rejected {key}");
                }
            }
            Err(e) => log::warn!("failed to encode {key}: {e}"),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Remove `key` from `localStorage`.
pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

/// [`SessionPersistence`] over `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStoragePersistence;

impl SessionPersistence for LocalStoragePersistence {
    fn load(&self) -> Option<PersistedSession> {
        load_json(SESSION_STORAGE_KEY)
    }

    fn save(&self, session: &PersistedSession) {
        save_json(SESSION_STORAGE_KEY, session);
    }

    fn clear(&self) {
        remove(SESSION_STORAGE_KEY);
    }
}
