//! Configuration management for the Bitkub client.

use crate::signing::ApiCredentials;
use crate::{Error, Result};
use std::env;
use std::time::Duration;

/// Default Bitkub REST API host.
pub const DEFAULT_HOST: &str = "https://api.bitkub.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Client configuration.
#[derive(Clone)]
pub struct BitkubConfig {
    pub host: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl BitkubConfig {
    /// Configuration for the default host with the given credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// `BITKUB_API_KEY` and `BITKUB_API_SECRET` are required. `BITKUB_HOST`,
    /// `BITKUB_TIMEOUT_SECS` and `BITKUB_CONNECT_TIMEOUT_SECS` are optional,
    /// but a timeout that is set must parse as whole seconds.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_parts(
            env::var("BITKUB_HOST").ok(),
            env::var("BITKUB_API_KEY").ok(),
            env::var("BITKUB_API_SECRET").ok(),
            env::var("BITKUB_TIMEOUT_SECS").ok(),
            env::var("BITKUB_CONNECT_TIMEOUT_SECS").ok(),
        )
    }

    /// Load configuration from an optional file, overridden by `BITKUB_*`
    /// environment variables.
    ///
    /// The file format is picked from its extension (toml, yaml, json, ...).
    /// Validation matches [`BitkubConfig::from_env`].
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("BITKUB"))
            .build()?;

        Self::from_parts(
            optional_string(&settings, "host")?,
            optional_string(&settings, "api_key")?,
            optional_string(&settings, "api_secret")?,
            optional_string(&settings, "timeout_secs")?,
            optional_string(&settings, "connect_timeout_secs")?,
        )
    }

    #[allow(clippy::result_large_err)]
    fn from_parts(
        host: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
        timeout_secs: Option<String>,
        connect_timeout_secs: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            api_key: required(api_key, "BITKUB_API_KEY")?,
            api_secret: required(api_secret, "BITKUB_API_SECRET")?,
            timeout_secs: parse_secs(timeout_secs, "BITKUB_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            connect_timeout_secs: parse_secs(
                connect_timeout_secs,
                "BITKUB_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        })
    }

    /// Credentials carried by this configuration.
    pub fn credentials(&self) -> ApiCredentials {
        ApiCredentials::new(self.api_key.clone(), self.api_secret.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[allow(clippy::result_large_err)]
fn optional_string(settings: &config::Config, key: &str) -> Result<Option<String>> {
    match settings.get_string(key) {
        Ok(value) => Ok(Some(value)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[allow(clippy::result_large_err)]
fn required(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Config {
            message: format!("{} not set", name),
        }),
    }
}

#[allow(clippy::result_large_err)]
fn parse_secs(value: Option<String>, name: &str, default: u64) -> Result<u64> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| Error::Config {
            message: format!("{} must be a whole number of seconds, got {:?}", name, raw),
        }),
    }
}

impl std::fmt::Debug for BitkubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitkubConfig")
            .field("host", &self.host)
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}
