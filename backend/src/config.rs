//! Content API connection settings loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

/// Request deadline applied when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Raw settings for reaching the content repository.
///
/// Values come from `CONTENT_API_*` environment variables or a config file;
/// [`ContentApiSettings::resolve`] validates them.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTENT_API")]
pub struct ContentApiSettings {
    /// Absolute `http`/`https` base URL of the repository, e.g. `https://cms.example.com`.
    pub base_url: Option<String>,
    /// Optional bearer credential for the repository API.
    pub api_token: Option<String>,
    /// Whole-request deadline in seconds.
    #[ortho_config(default = 10)]
    pub timeout_seconds: u64,
}

/// Errors raised while validating [`ContentApiSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No base URL was configured.
    #[error("CONTENT_API_BASE_URL must be set")]
    MissingBaseUrl,
    /// The base URL does not parse.
    #[error("content API base URL {value:?} is invalid: {reason}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// The base URL uses a scheme other than `http` or `https`.
    #[error("content API base URL must use http or https, not {scheme}")]
    UnsupportedScheme {
        /// Configured scheme.
        scheme: String,
    },
    /// The timeout is zero.
    #[error("content API timeout must be at least one second")]
    InvalidTimeout,
}

impl ContentApiSettings {
    /// Validate the raw settings.
    ///
    /// Blank tokens are treated as absent.
    pub fn resolve(&self) -> Result<ContentApiConfig, ConfigError> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(raw).map_err(|error| ConfigError::InvalidBaseUrl {
            value: raw.to_owned(),
            reason: error.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: base_url.scheme().to_owned(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let mut config =
            ContentApiConfig::new(base_url).with_timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(token) = self
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
        {
            config = config.with_token(token);
        }
        Ok(config)
    }
}

/// Validated connection settings for the content repository.
#[derive(Clone)]
pub struct ContentApiConfig {
    base_url: Url,
    api_token: Option<Zeroizing<String>>,
    timeout: Duration,
}

impl ContentApiConfig {
    /// Settings for `base_url` with no token and the default timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Attach a bearer credential.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Zeroizing::new(token.into()));
        self
    }

    /// Override the request deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Repository base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Bearer credential, when configured.
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_ref().map(|token| token.as_str())
    }

    /// Whole-request deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for ContentApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
