use std::path::PathBuf;
use std::time::Duration;

use mortydex_catalog::DEFAULT_API_URL;

/// Default location of the favorites file, relative to the working directory.
pub const DEFAULT_FAVORITES_PATH: &str = "mortydex-favorites.json";

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for browsing the public catalog.
/// Command-line flags override individual fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog base URL (default: the public Rick and Morty API).
    pub api_url: String,
    /// File holding the persisted favorites.
    pub favorites_path: PathBuf,
    /// Per-request HTTP timeout in seconds; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                           |
    /// |------------------------|-----------------------------------|
    /// | `CATALOG_API_URL`      | `https://rickandmortyapi.com/api` |
    /// | `FAVORITES_PATH`       | `mortydex-favorites.json`         |
    /// | `REQUEST_TIMEOUT_SECS` | unset                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("CATALOG_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());

        let favorites_path = lookup("FAVORITES_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FAVORITES_PATH.into())
            .into();

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => Some(parse_secs("REQUEST_TIMEOUT_SECS", &raw)?),
            _ => None,
        };

        Ok(Self {
            api_url,
            favorites_path,
            request_timeout_secs,
        })
    }

    /// Replace fields for which a command-line value was given.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        favorites_path: Option<PathBuf>,
        request_timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(path) = favorites_path {
            self.favorites_path = path;
        }
        if let Some(secs) = request_timeout_secs {
            self.request_timeout_secs = Some(secs);
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: raw.to_string(),
        }),
    }
}
