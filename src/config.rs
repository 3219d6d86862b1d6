use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::{AppError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub token_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token_path: default_token_path(),
        }
    }
}

impl ClientConfig {
    /// Reads `DOCSUM_API_URL`, `DOCSUM_TIMEOUT_SECS` and `DOCSUM_TOKEN_PATH`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("DOCSUM_API_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(raw) = env::var("DOCSUM_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("DOCSUM_TIMEOUT_SECS={:?}: {}", raw, e)))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Ok(path) = env::var("DOCSUM_TOKEN_PATH") {
            config = config.with_token_path(path);
        }

        tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "loaded client config");
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docsum")
        .join("token")
}
