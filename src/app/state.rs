use std::sync::Arc;

use chrono::Utc;

use crate::app::{Result, VidsieveError};
use crate::domain::{Favorites, FilterSnapshot, History, ResultItem, TermSet};
use crate::store::{self, Store, StoreKey, DEFAULT_EXCLUDED_TERMS, DEFAULT_INCLUDED_TERMS};

/// Which of the two term lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TermList {
    Include,
    Exclude,
}

impl TermList {
    fn key(self) -> StoreKey {
        match self {
            TermList::Include => StoreKey::IncludedTerms,
            TermList::Exclude => StoreKey::ExcludedTerms,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TermList::Include => "include",
            TermList::Exclude => "exclude",
        }
    }
}

/// Persisted user state. Each mutator writes its key back through the store
/// only when the value actually changed.
pub struct AppState {
    store: Arc<dyn Store + Send + Sync>,
    included_terms: TermSet,
    excluded_terms: TermSet,
    favorites: Favorites,
    history: History,
}

impl AppState {
    /// Reads all four keys once, substituting defaults for absent ones.
    pub fn load(store: Arc<dyn Store + Send + Sync>) -> Result<Self> {
        let excluded_terms: TermSet = store::load_or(&*store, StoreKey::ExcludedTerms, || {
            DEFAULT_EXCLUDED_TERMS.iter().collect()
        })?;
        let included_terms: TermSet = store::load_or(&*store, StoreKey::IncludedTerms, || {
            DEFAULT_INCLUDED_TERMS.iter().collect()
        })?;
        let favorites = store::load_or(&*store, StoreKey::Favorites, Favorites::new)?;
        let history = store::load_or(&*store, StoreKey::History, History::new)?;

        tracing::debug!(
            included = included_terms.len(),
            excluded = excluded_terms.len(),
            favorites = favorites.len(),
            history = history.len(),
            "loaded state"
        );

        Ok(Self {
            store,
            included_terms,
            excluded_terms,
            favorites,
            history,
        })
    }

    pub fn included_terms(&self) -> &TermSet {
        &self.included_terms
    }

    pub fn excluded_terms(&self) -> &TermSet {
        &self.excluded_terms
    }

    pub fn terms(&self, list: TermList) -> &TermSet {
        match list {
            TermList::Include => &self.included_terms,
            TermList::Exclude => &self.excluded_terms,
        }
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn filter_snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            included_terms: self.included_terms.clone(),
            excluded_terms: self.excluded_terms.clone(),
        }
    }

    pub fn add_term(&mut self, list: TermList, term: &str) -> Result<bool> {
        let changed = match list {
            TermList::Include => self.included_terms.insert(term),
            TermList::Exclude => self.excluded_terms.insert(term),
        };
        if changed {
            self.persist_terms(list)?;
        }
        Ok(changed)
    }

    pub fn remove_term(&mut self, list: TermList, term: &str) -> Result<bool> {
        let changed = match list {
            TermList::Include => self.included_terms.remove(term),
            TermList::Exclude => self.excluded_terms.remove(term),
        };
        if changed {
            self.persist_terms(list)?;
        }
        Ok(changed)
    }

    /// Favorites `item` under the current filters, or un-favorites it.
    /// Returns whether the item is a favorite afterwards.
    pub fn toggle_favorite(&mut self, item: &ResultItem, search_term: &str) -> Result<bool> {
        let snapshot = self.filter_snapshot();
        let now_favorite = self.favorites.toggle(item, search_term, snapshot);
        store::save(&*self.store, StoreKey::Favorites, &self.favorites)?;
        Ok(now_favorite)
    }

    pub fn remove_favorite(&mut self, id: &str) -> Result<()> {
        self.favorites
            .remove(id)
            .ok_or_else(|| VidsieveError::FavoriteNotFound(id.to_string()))?;
        store::save(&*self.store, StoreKey::Favorites, &self.favorites)
    }

    pub fn record_search(&mut self, query: &str) -> Result<()> {
        if self.history.record(query, Utc::now()) {
            store::save(&*self.store, StoreKey::History, &self.history)?;
        }
        Ok(())
    }

    pub fn remove_history_entry(&mut self, query: &str) -> Result<bool> {
        let changed = self.history.remove(query);
        if changed {
            store::save(&*self.store, StoreKey::History, &self.history)?;
        }
        Ok(changed)
    }

    pub fn clear_history(&mut self) -> Result<()> {
        if self.history.clear() {
            store::save(&*self.store, StoreKey::History, &self.history)?;
        }
        Ok(())
    }

    fn persist_terms(&self, list: TermList) -> Result<()> {
        store::save(&*self.store, list.key(), self.terms(list))
    }
}
