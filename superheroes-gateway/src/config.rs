//! Runtime configuration read from environment variables.

use std::net::SocketAddr;

use crate::policy::StatusPolicy;

const LISTEN_ADDR_VAR: &str = "SUPERHEROES_LISTEN_ADDR";
const DATABASE_URL_VAR: &str = "SUPERHEROES_DATABASE_URL";
const STATUS_POLICY_VAR: &str = "SUPERHEROES_STATUS_POLICY";
const SEED_VAR: &str = "SUPERHEROES_SEED";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5558";
const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";

/// Errors raised while reading [`GatewayConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid { key: &'static str, value: String, reason: &'static str },
}

/// Settings for the gateway binary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// sqlx connection string for the store.
    pub database_url: String,
    /// Status codes used for not-found and validation responses.
    pub status_policy: StatusPolicy,
    /// Insert demo data into an empty store on startup.
    pub seed: bool,
}

impl GatewayConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if any variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of a
    /// variable or `None` if unset.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if any variable is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr = raw_addr.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
            key: LISTEN_ADDR_VAR,
            value: raw_addr.clone(),
            reason: "expected host:port",
        })?;

        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let status_policy = match lookup(STATUS_POLICY_VAR) {
            None => StatusPolicy::default(),
            Some(raw) => StatusPolicy::parse(&raw).ok_or(ConfigError::Invalid {
                key: STATUS_POLICY_VAR,
                value: raw,
                reason: "expected 'compatible' or 'strict'",
            })?,
        };

        let seed = match lookup(SEED_VAR) {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                key: SEED_VAR,
                value: raw,
                reason: "expected a boolean",
            })?,
        };

        Ok(Self { listen_addr, database_url, status_policy, seed })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
