//! API connection settings.
//!
//! Layered lowest to highest: built-in defaults, an optional config file,
//! `PINGPING_*` environment variables, then explicit overrides (the CLI
//! flags).

use std::path::Path;
use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File};
use pingping_client::{ApiError, PingpingClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;

/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "PINGPING";

/// Default request timeout in seconds.
pub const DEFAULT_API_TIMEOUT: u64 = DEFAULT_TIMEOUT.as_secs();

/// Resolved connection settings.
#[derive(Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Bearer token for the web API.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_api_timeout")]
    pub api_timeout: u64,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("api_timeout", &self.api_timeout)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_token: None,
            api_timeout: DEFAULT_API_TIMEOUT,
            api_url: default_api_url(),
        }
    }
}

/// Values given explicitly, taking precedence over file and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_token: Option<String>,
    pub api_timeout: Option<u64>,
    pub api_url: Option<String>,
}

fn default_api_timeout() -> u64 {
    DEFAULT_API_TIMEOUT
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Settings {
    /// Load settings from `path` (if any), the process environment and
    /// `overrides`.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX), overrides)
    }

    /// Like [`Settings::load`] with an explicit environment source.
    pub fn load_from(
        path: Option<&Path>,
        env: Environment,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(env.try_parsing(true))
            .set_override_option("api_token", overrides.api_token)?
            .set_override_option("api_timeout", overrides.api_timeout)?
            .set_override_option("api_url", overrides.api_url)?
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout)
    }

    /// Build an API client; fails when no token is configured.
    pub fn client(&self) -> Result<PingpingClient, ApiError> {
        let mut builder = PingpingClient::builder()
            .api_url(&self.api_url)
            .timeout(self.timeout());
        if let Some(token) = &self.api_token {
            builder = builder.api_token(token);
        }
        builder.build()
    }
}
