//! # vidsieve
//!
//! A terminal front-end for video search with title filtering.
//!
//! ## Architecture
//!
//! ```text
//! query → PaginatedFetcher → SearchEndpoint → exclude filter → SearchSession
//! ```
//!
//! - [`fetcher`]: builds requests (include terms become an OR group in the
//!   query) and strips excluded titles from each page
//! - [`filter`]: substring matching of titles against term lists
//! - [`session`]: accumulated results and the load-more cursor
//! - [`store`]: JSON persistence of terms, favorites and history
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! export VIDSIEVE_API_KEY=...
//!
//! # Search, two pages deep
//! vidsieve search "wifi" --pages 2
//!
//! # Hide titles mentioning a term
//! vidsieve terms exclude add giveaway
//!
//! # Launch TUI
//! vidsieve tui
//! ```

/// Application context, persisted state and error types.
///
/// The [`AppContext`](app::AppContext) struct wires together config, store
/// and fetcher. [`AppState`](app::AppState) holds the persisted values and
/// writes them back on change.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/vidsieve/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`ResultItem`](domain::ResultItem): a single video
/// - [`TermSet`](domain::TermSet): trimmed, deduplicated term list
/// - [`SearchPage`](domain::SearchPage): items plus continuation token
/// - [`Favorites`](domain::Favorites) and [`History`](domain::History)
pub mod domain;

/// Search endpoint access.
///
/// - [`SearchEndpoint`](fetcher::SearchEndpoint): async trait for one request
/// - [`YouTubeEndpoint`](fetcher::YouTubeEndpoint): reqwest-based implementation
/// - [`PaginatedFetcher`](fetcher::PaginatedFetcher): query shaping and filtering
pub mod fetcher;

/// Include/exclude title matching.
pub mod filter;

/// Search session state machine.
pub mod session;

/// Flat key-value persistence.
///
/// - [`Store`](store::Store): trait over JSON documents
/// - [`JsonFileStore`](store::JsonFileStore): one file per key
/// - [`MemoryStore`](store::MemoryStore): in-process map
pub mod store;

/// Terminal user interface.
///
/// Search box on top, results on the left, include/exclude terms,
/// favorites and history stacked on the right.
pub mod tui;
