//! Configuration management.
//!
//! Configuration is read from `~/.config/vidsieve/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::fetcher::http_fetcher::DEFAULT_ENDPOINT;
use crate::fetcher::{FetchSettings, MAX_PAGE_SIZE};
use crate::filter::MatchMode;

/// Environment variable that overrides `search.api_key`.
pub const API_KEY_ENV: &str = "VIDSIEVE_API_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// API key for the search endpoint
    pub api_key: Option<String>,

    /// Search endpoint URL
    pub endpoint: String,

    /// Results requested per page (1-50)
    pub page_size: u32,

    /// Region hint, e.g. "MA"
    pub region_code: Option<String>,

    /// Relevance language hint, e.g. "ar"
    pub relevance_language: Option<String>,

    /// How title terms are compared
    pub match_mode: MatchMode,

    /// Drop videos older than this many years (unset: no limit)
    pub max_age_years: Option<u32>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: MAX_PAGE_SIZE,
            region_code: Some("MA".to_string()),
            relevance_language: None,
            match_mode: MatchMode::CaseInsensitive,
            max_age_years: Some(3),
            timeout_secs: 10,
        }
    }
}

impl SearchConfig {
    /// The configured key, with the environment variable taking precedence.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_from(std::env::var(API_KEY_ENV).ok())
    }

    /// Picks `env_key` over the configured key. Blank values count as unset.
    pub fn resolve_api_key_from(&self, env_key: Option<String>) -> Result<String, ConfigError> {
        env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
            region_code: self.region_code.clone().filter(|r| !r.is_empty()),
            relevance_language: self.relevance_language.clone().filter(|l| !l.is_empty()),
            match_mode: self.match_mode,
            max_age_years: self.max_age_years,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for persisted terms, favorites and history
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            tracing::info!(path = %config_path.display(), "created default config");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/vidsieve/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("vidsieve").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# vidsieve configuration

[search]
# API key for the YouTube Data API. VIDSIEVE_API_KEY overrides this.
# api_key = "..."

endpoint = "https://www.googleapis.com/youtube/v3/search"

# Results per page (1-50)
page_size = 50

# Region and language hints; remove to search globally
region_code = "MA"
# relevance_language = "ar"

# "case-insensitive" or "case-sensitive"
match_mode = "case-insensitive"

# Drop videos older than this many years; remove for no limit
max_age_years = 3

# Request timeout in seconds
timeout_secs = 10

[storage]
# Where terms, favorites and history are kept (default: platform data dir)
# data_dir = "/path/to/dir"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("No API key configured; set search.api_key or {}", API_KEY_ENV)]
    MissingApiKey,

    #[error("Invalid endpoint URL {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.search.page_size, 50);
        assert_eq!(config.search.region_code.as_deref(), Some("MA"));
        assert_eq!(config.search.match_mode, MatchMode::CaseInsensitive);
        assert_eq!(config.search.max_age_years, Some(3));
        assert!(config.search.api_key.is_none());
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[search]
match_mode = "case-sensitive"
page_size = 500
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.search.match_mode, MatchMode::CaseSensitive);
        assert_eq!(config.search.fetch_settings().page_size, MAX_PAGE_SIZE);
        assert_eq!(config.search.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.search.timeout(), Duration::from_secs(10));
        assert!(config.search.endpoint_url().is_ok());
    }

    #[test]
    fn test_invalid_endpoint() {
        let config: Config = toml::from_str("[search]\nendpoint = \"not a url\"").unwrap();
        assert!(matches!(
            config.search.endpoint_url(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_blank_region_means_none() {
        let config: Config = toml::from_str("[search]\nregion_code = \"\"").unwrap();
        assert!(config.search.fetch_settings().region_code.is_none());
    }

    fn with_key(api_key: Option<&str>) -> SearchConfig {
        SearchConfig {
            api_key: api_key.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_env_key_overrides_config_key() {
        let search = with_key(Some("from-file"));
        let key = search.resolve_api_key_from(Some("from-env".into())).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_blank_env_key_falls_back_to_config() {
        let search = with_key(Some("from-file"));
        let key = search.resolve_api_key_from(Some("  ".into())).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_config_key_without_env() {
        let search = with_key(Some("from-file"));
        assert_eq!(search.resolve_api_key_from(None).unwrap(), "from-file");
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            with_key(Some("")).resolve_api_key_from(Some(" ".into())),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            with_key(None).resolve_api_key_from(None),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.search.page_size, 50);

        fs::write(&path, "[search]\npage_size = 10\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.search.page_size, 10);
    }
}
