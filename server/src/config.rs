//! Server configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_MESSAGE: &str = "Work in progress";

pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND_ADDR: &str = "GOVX_BIND_ADDR";
pub const ENV_API_MESSAGE: &str = "GOVX_API_MESSAGE";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Text returned by `GET /`.
    pub api_message: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            api_message: DEFAULT_API_MESSAGE.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `GOVX_BIND_ADDR`: default `0.0.0.0`
    /// - `GOVX_API_MESSAGE`: default "Work in progress"
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `GOVX_BIND_ADDR` is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        Ok(Self {
            bind_addr: env_parse(ENV_BIND_ADDR, get(ENV_BIND_ADDR), defaults.bind_addr)?,
            port: env_parse(ENV_PORT, get(ENV_PORT), defaults.port)?,
            api_message: get(ENV_API_MESSAGE).unwrap_or(defaults.api_message),
        })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn env_parse<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
