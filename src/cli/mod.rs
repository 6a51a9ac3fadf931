pub mod commands;

use clap::{Parser, Subcommand};

use crate::app::TermList;

#[derive(Parser)]
#[command(name = "vidsieve")]
#[command(about = "Search videos with include/exclude title filters", long_about = None)]
pub struct Cli {
    /// Path to an alternative config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a search and print the filtered results
    Search {
        /// Free-text query
        query: String,
        /// Number of pages to fetch
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage include/exclude title terms
    Terms {
        /// Which list to operate on
        #[arg(value_enum)]
        list: TermList,
        #[command(subcommand)]
        action: TermsAction,
    },
    /// Show or remove favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show or clear search history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Launch the TUI
    Tui,
}

#[derive(Subcommand)]
pub enum TermsAction {
    /// Add a term
    Add { term: String },
    /// Remove a term
    Remove { term: String },
    /// List terms
    List,
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favorites
    List,
    /// Remove a favorite by video id
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recent searches
    List,
    /// Forget all recent searches
    Clear,
}
