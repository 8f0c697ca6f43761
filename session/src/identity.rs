//! Identity payloads reported by the backend and the local session snapshot
//! derived from them.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::{Deserialize, Serialize};

/// Provider id for email + password accounts.
pub const PASSWORD_PROVIDER: &str = "password";

/// An authenticated account reference returned by the identity backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque account identifier, unique per account.
    pub id: String,
    /// Primary email address, if the provider exposes one.
    pub email: Option<String>,
    /// Display name from the federated provider, if any.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Sign-in provider (`"password"`, `"google.com"`, ...).
    pub provider_id: String,
    /// Account creation time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at_ms: Option<i64>,
}

impl Identity {
    /// Build an email + password identity.
    #[must_use]
    pub fn with_password(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
            display_name: None,
            provider_id: PASSWORD_PROVIDER.to_owned(),
            created_at_ms: None,
        }
    }
}

/// Locally held snapshot of the current identity.
///
/// Sessions are replaced wholesale on every backend change and never edited
/// in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub identity_id: String,
    pub email_address: Option<String>,
    pub display_name: Option<String>,
    pub created_at_ms: Option<i64>,
}

impl Session {
    #[must_use]
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            identity_id: identity.id.clone(),
            email_address: identity.email.clone(),
            display_name: identity.display_name.clone(),
            created_at_ms: identity.created_at_ms,
        }
    }

    /// Best human-facing label: display name, then email, then the raw id.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email_address.as_deref())
            .unwrap_or(&self.identity_id)
    }
}

impl From<&Identity> for Session {
    fn from(identity: &Identity) -> Self {
        Self::from_identity(identity)
    }
}
