//! Identity backend configuration parsed from environment-style lookups.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_FEDERATED_PROVIDER: &str = "google.com";
pub const DEFAULT_FEDERATED_LABEL: &str = "Google";

pub const ENV_API_KEY: &str = "GOVX_FIREBASE_API_KEY";
pub const ENV_AUTH_DOMAIN: &str = "GOVX_FIREBASE_AUTH_DOMAIN";
pub const ENV_PROJECT_ID: &str = "GOVX_FIREBASE_PROJECT_ID";
pub const ENV_ENDPOINT: &str = "GOVX_IDENTITY_ENDPOINT";
pub const ENV_FEDERATED_PROVIDER: &str = "GOVX_FEDERATED_PROVIDER";
pub const ENV_FEDERATED_LABEL: &str = "GOVX_FEDERATED_LABEL";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing config: env var {var} not set")]
    Missing { var: String },
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: String,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    /// Identity Toolkit base URL without a trailing slash.
    pub endpoint: String,
    /// Federated provider id used for interactive sign-in.
    pub federated_provider: String,
    /// Provider name shown to users ("Google").
    pub federated_label: String,
}

impl IdentityConfig {
    /// Build typed config from process environment variables.
    ///
    /// Required:
    /// - `GOVX_FIREBASE_API_KEY`
    ///
    /// Optional:
    /// - `GOVX_FIREBASE_AUTH_DOMAIN`, `GOVX_FIREBASE_PROJECT_ID`
    /// - `GOVX_IDENTITY_ENDPOINT`: default Identity Toolkit v1 URL
    /// - `GOVX_FEDERATED_PROVIDER`: default `google.com`
    /// - `GOVX_FEDERATED_LABEL`: default `Google`
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the endpoint is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                log::warn!("ignoring non-unicode value for {key}");
                None
            }
        })
    }

    /// Build typed config from an arbitrary key lookup (build-time constants
    /// in the browser, env vars natively).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the endpoint is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_key = non_empty(ENV_API_KEY).ok_or_else(|| ConfigError::Missing { var: ENV_API_KEY.into() })?;
        let endpoint = parse_endpoint(non_empty(ENV_ENDPOINT).as_deref())?;

        Ok(Self {
            api_key,
            auth_domain: non_empty(ENV_AUTH_DOMAIN),
            project_id: non_empty(ENV_PROJECT_ID),
            endpoint,
            federated_provider: non_empty(ENV_FEDERATED_PROVIDER)
                .unwrap_or_else(|| DEFAULT_FEDERATED_PROVIDER.to_owned()),
            federated_label: non_empty(ENV_FEDERATED_LABEL).unwrap_or_else(|| DEFAULT_FEDERATED_LABEL.to_owned()),
        })
    }

    /// Redirect URI sent with federated sign-in requests.
    #[must_use]
    pub fn request_uri(&self) -> String {
        match &self.auth_domain {
            Some(domain) => format!("https://{domain}/__/auth/handler"),
            None => "http://localhost".to_owned(),
        }
    }
}

fn parse_endpoint(raw: Option<&str>) -> Result<String, ConfigError> {
    let endpoint = raw.unwrap_or(DEFAULT_IDENTITY_ENDPOINT).trim_end_matches('/');
    if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
        return Err(ConfigError::Parse(format!(
            "{ENV_ENDPOINT} must be an http(s) URL, got '{endpoint}'"
        )));
    }
    Ok(endpoint.to_owned())
}
