use thiserror::Error;

use crate::config::ConfigError;

/// Message shown to the user whenever a search request fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load videos. Please try again later.";

#[derive(Error, Debug)]
pub enum VidsieveError {
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Favorite not found: {0}")]
    FavoriteNotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

impl VidsieveError {
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, VidsieveError::FetchFailed(_))
    }
}

// Every transport-level failure collapses into the single fetch error kind.
impl From<reqwest::Error> for VidsieveError {
    fn from(e: reqwest::Error) -> Self {
        VidsieveError::FetchFailed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VidsieveError>;
