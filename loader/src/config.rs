//! Where the catalog backend lives.

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

const BACKEND_URL_VAR: &str = "BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address of the backend, without a trailing slash.
    pub backend_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BACKEND_URL must start with http:// or https://, got {0:?}")]
    InvalidBackendUrl(String),
}

impl Config {
    /// Resolve the backend address.
    ///
    /// A `BACKEND_URL` set at build time wins, then the `BACKEND_URL`
    /// environment variable (optionally from a `.env` file), then
    /// [`DEFAULT_BACKEND_URL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        // Silently ignored if there is no .env file
        #[cfg(not(target_arch = "wasm32"))]
        let _ = dotenvy::dotenv();

        Self::from_sources(option_env!("BACKEND_URL"), |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolve the backend address from `lookup` instead of the process
    /// environment. Unset or blank values fall back to the default.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_sources(None, lookup)
    }

    fn from_sources(
        baked: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let backend_url = baked
            .map(|url| url.to_string())
            .or_else(|| lookup(BACKEND_URL_VAR))
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        Self::from_backend_url(backend_url)
    }

    pub fn from_backend_url(
        backend_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let backend_url = backend_url.into();
        let trimmed = backend_url.trim().trim_end_matches('/');

        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://"))
        {
            return Err(ConfigError::InvalidBackendUrl(backend_url));
        }

        Ok(Self {
            backend_url: trimmed.to_string(),
        })
    }
}
