//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = match option_env!("MERCADO_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const APP_DIR_NAME: &str = "mercado";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL does not start with `http://` or `https://`.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// No session directory was given and the platform has no data directory.
    #[error("no platform data directory; set MERCADO_SESSION_DIR")]
    MissingDataDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute API base URL without a trailing slash.
    pub base_url: String,
    /// Directory holding the persisted session keys.
    pub session_dir: PathBuf,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config for `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no http(s) scheme.
    pub fn new(base_url: &str, session_dir: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, session_dir, timeouts: Timeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `MERCADO_API_BASE_URL`: defaults to [`DEFAULT_API_BASE_URL`]
    /// - `MERCADO_SESSION_DIR`: defaults to `<data dir>/mercado`
    /// - `MERCADO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `MERCADO_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed or no session directory
    /// can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None, None)
    }

    /// Like [`ClientConfig::from_env`], with explicit values taking precedence
    /// over the environment. An explicit session directory skips the platform
    /// data-dir lookup entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective base URL is malformed or no session
    /// directory can be determined.
    pub fn from_env_with(base_url: Option<&str>, session_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let base_url = match base_url {
            Some(url) => url.to_owned(),
            None => std::env::var("MERCADO_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned()),
        };
        let session_dir = match session_dir.or_else(|| std::env::var_os("MERCADO_SESSION_DIR").map(PathBuf::from)) {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => default_session_dir()?,
        };
        let timeouts = Timeouts {
            request_secs: env_parse_u64("MERCADO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("MERCADO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url: normalize_base_url(&base_url)?, session_dir, timeouts })
    }

    /// Replace the base URL, keeping the other settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no http(s) scheme.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_session_dir(mut self, session_dir: PathBuf) -> Self {
        self.session_dir = session_dir;
        self
    }
}

/// Returns true when `url` carries a scheme the augmenter treats as absolute.
#[must_use]
pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !is_absolute_url(trimmed) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn default_session_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::MissingDataDir)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
