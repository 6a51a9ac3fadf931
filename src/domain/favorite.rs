use serde::{Deserialize, Serialize};

use crate::domain::{ResultItem, TermSet};

/// Include/exclude term lists captured when a favorite is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub included_terms: TermSet,
    pub excluded_terms: TermSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub item: ResultItem,
    pub search_term: String,
    pub filters: FilterSnapshot,
}

impl FavoriteEntry {
    pub fn id(&self) -> &str {
        &self.item.id
    }
}

/// Saved results keyed by item id, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FavoriteEntry>", into = "Vec<FavoriteEntry>")]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Returns `false` if an entry with the same id already exists.
    pub fn add(&mut self, entry: FavoriteEntry) -> bool {
        if self.contains(entry.id()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<FavoriteEntry> {
        let pos = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(pos))
    }

    /// Adds the item if absent, removes it otherwise. Returns whether the
    /// item is a favorite afterwards.
    pub fn toggle(
        &mut self,
        item: &ResultItem,
        search_term: &str,
        filters: FilterSnapshot,
    ) -> bool {
        if self.remove(&item.id).is_some() {
            return false;
        }
        self.entries.push(FavoriteEntry {
            item: item.clone(),
            search_term: search_term.to_string(),
            filters,
        });
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<FavoriteEntry>> for Favorites {
    fn from(entries: Vec<FavoriteEntry>) -> Self {
        let mut favorites = Favorites::new();
        for entry in entries {
            favorites.add(entry);
        }
        favorites
    }
}

impl From<Favorites> for Vec<FavoriteEntry> {
    fn from(favorites: Favorites) -> Self {
        favorites.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> FilterSnapshot {
        FilterSnapshot {
            included_terms: ["method"].into_iter().collect(),
            excluded_terms: ["paypal.me"].into_iter().collect(),
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = Favorites::new();
        let item = ResultItem::new("v1", "Video one");

        assert!(favorites.toggle(&item, "rust", snapshot()));
        assert!(favorites.contains("v1"));
        assert_eq!(favorites.get("v1").unwrap().search_term, "rust");

        assert!(!favorites.toggle(&item, "rust", snapshot()));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        let mut favorites = Favorites::new();
        favorites.toggle(&ResultItem::new("a", "A"), "q", snapshot());
        favorites.toggle(&ResultItem::new("b", "B"), "q", snapshot());
        let before = favorites.clone();

        let item = ResultItem::new("c", "C");
        favorites.toggle(&item, "other", FilterSnapshot::default());
        favorites.toggle(&item, "other", FilterSnapshot::default());

        assert_eq!(favorites, before);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut favorites = Favorites::new();
        let entry = FavoriteEntry {
            item: ResultItem::new("v1", "Video"),
            search_term: "q".into(),
            filters: snapshot(),
        };
        assert!(favorites.add(entry.clone()));
        assert!(!favorites.add(entry));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_remove_missing() {
        let mut favorites = Favorites::new();
        assert!(favorites.remove("nope").is_none());
    }

    #[test]
    fn test_deserialize_drops_duplicate_ids() {
        let entry = FavoriteEntry {
            item: ResultItem::new("v1", "Video"),
            search_term: "q".into(),
            filters: snapshot(),
        };
        let json = serde_json::to_string(&vec![entry.clone(), entry]).unwrap();
        let favorites: Favorites = serde_json::from_str(&json).unwrap();
        assert_eq!(favorites.len(), 1);
    }
}
