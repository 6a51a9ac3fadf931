use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::Result;
use crate::app::state::AppState;
use crate::config::{Config, ConfigError};
use crate::fetcher::{PaginatedFetcher, SearchEndpoint, YouTubeEndpoint};
use crate::store::{JsonFileStore, MemoryStore, Store};

pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn Store + Send + Sync>,
    pub fetcher: PaginatedFetcher,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let store = Self::open_store(&config)?;
        let endpoint: Arc<dyn SearchEndpoint + Send + Sync> = Arc::new(YouTubeEndpoint::new(
            config.search.endpoint_url()?,
            config.search.resolve_api_key()?,
            config.search.timeout(),
        )?);

        Ok(Self::with_parts(config, store, endpoint))
    }

    /// Context that never touches disk or network configuration, wired to
    /// the given endpoint.
    pub fn in_memory(config: Config, endpoint: Arc<dyn SearchEndpoint + Send + Sync>) -> Self {
        Self::with_parts(config, Arc::new(MemoryStore::new()), endpoint)
    }

    pub fn with_parts(
        config: Config,
        store: Arc<dyn Store + Send + Sync>,
        endpoint: Arc<dyn SearchEndpoint + Send + Sync>,
    ) -> Self {
        let fetcher = PaginatedFetcher::new(endpoint, config.search.fetch_settings());
        Self {
            config,
            store,
            fetcher,
        }
    }

    /// Opens the on-disk store without touching the search endpoint, for
    /// commands that only read or edit local state.
    pub fn open_store(config: &Config) -> Result<Arc<dyn Store + Send + Sync>> {
        let data_dir = match &config.storage.data_dir {
            Some(dir) => dir.clone(),
            None => Self::default_data_dir()?,
        };
        tracing::debug!(data_dir = %data_dir.display(), "using data directory");
        Ok(Arc::new(JsonFileStore::new(&data_dir)?))
    }

    pub fn load_state(&self) -> Result<AppState> {
        AppState::load(self.store.clone())
    }

    fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        Ok(data_dir.join("vidsieve"))
    }
}
