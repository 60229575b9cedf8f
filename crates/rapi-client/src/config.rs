//! Client configuration, optionally loaded from environment variables.
//!
//! Every setting has a default except the credentials. The configuration is
//! fixed once a client is built from it.

use std::fmt;
use std::time::Duration;

use rapi_shared::constants::{API_PREFIX, DEFAULT_BASE_URL, DEFAULT_CHUNK_SIZE, DEFAULT_TIMEOUT_SECS};

use crate::transfer::UploadMode;

/// Client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Scheme and host of the API server.
    /// Env: `RAPI_BASE_URL`
    /// Default: `https://portal5.cbr.ru`
    pub base_url: String,

    /// Path prefix in front of every endpoint.
    /// Env: `RAPI_PREFIX`
    /// Default: `/back/rapi2`
    pub prefix: String,

    /// Optional version segment appended to the prefix (e.g. `v1`).
    /// Env: `RAPI_API_VERSION`
    /// Default: none
    pub api_version: Option<String>,

    /// Env: `RAPI_LOGIN`
    pub login: String,

    /// Env: `RAPI_PASSWORD`
    pub password: String,

    /// `User-Agent` override.
    /// Env: `RAPI_USER_AGENT`
    pub user_agent: Option<String>,

    /// Upper bound on every single exchange.
    /// Env: `RAPI_TIMEOUT_SECS`
    /// Default: 5 seconds
    pub timeout: Duration,

    /// Slice size for chunked uploads.
    /// Env: `RAPI_CHUNK_SIZE`
    /// Default: 65536
    pub chunk_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            prefix: API_PREFIX.to_string(),
            api_version: None,
            login: String::new(),
            password: String::new(),
            user_agent: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("RAPI_BASE_URL") {
            config.base_url = url;
        }

        if let Ok(prefix) = std::env::var("RAPI_PREFIX") {
            config.prefix = prefix;
        }

        if let Ok(version) = std::env::var("RAPI_API_VERSION") {
            if !version.is_empty() {
                config.api_version = Some(version);
            }
        }

        if let Ok(login) = std::env::var("RAPI_LOGIN") {
            config.login = login;
        }

        if let Ok(password) = std::env::var("RAPI_PASSWORD") {
            config.password = password;
        }

        if let Ok(agent) = std::env::var("RAPI_USER_AGENT") {
            if !agent.is_empty() {
                config.user_agent = Some(agent);
            }
        }

        if let Ok(val) = std::env::var("RAPI_TIMEOUT_SECS") {
            match val.parse::<f64>() {
                Ok(secs) if secs.is_finite() && secs > 0.0 => {
                    config.timeout = Duration::from_secs_f64(secs);
                }
                _ => tracing::warn!(value = %val, "Invalid RAPI_TIMEOUT_SECS, using default"),
            }
        }

        if let Ok(val) = std::env::var("RAPI_CHUNK_SIZE") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.chunk_size = n,
                _ => tracing::warn!(value = %val, "Invalid RAPI_CHUNK_SIZE, using default"),
            }
        }

        config
    }

    /// Prefix plus the optional version segment, without a trailing slash.
    pub fn api_root(&self) -> String {
        let prefix = self.prefix.trim_end_matches('/');
        match self.api_version.as_deref() {
            Some(version) => format!("{prefix}/{}", version.trim_matches('/')),
            None => prefix.to_string(),
        }
    }

    /// Chunked upload mode with the configured slice size.
    pub fn chunked_upload(&self) -> UploadMode {
        UploadMode::Chunked {
            chunk_size: self.chunk_size,
        }
    }

    pub(crate) fn has_credentials(&self) -> bool {
        !self.login.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("prefix", &self.prefix)
            .field("api_version", &self.api_version)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://portal5.cbr.ru");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.chunk_size, 65_536);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_api_root() {
        let config = ClientConfig::new("test", "123");
        assert_eq!(config.api_root(), "/back/rapi2");
        assert_eq!(config.with_api_version("v1").api_root(), "/back/rapi2/v1");
    }

    #[test]
    fn test_chunked_upload_follows_chunk_size() {
        let mut config = ClientConfig::new("test", "123");
        assert_eq!(config.chunked_upload(), UploadMode::chunked());
        config.chunk_size = 1024;
        assert_eq!(config.chunked_upload(), UploadMode::Chunked { chunk_size: 1024 });
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", ClientConfig::new("test", "s3cret"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("test"));
    }
}
