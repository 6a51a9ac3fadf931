pub mod json;
pub mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::Result;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

pub const DEFAULT_EXCLUDED_TERMS: &[&str] = &["paypal.me"];
pub const DEFAULT_INCLUDED_TERMS: &[&str] = &["method", "مشكلة", "شرح"];

/// The four independently persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    ExcludedTerms,
    IncludedTerms,
    Favorites,
    History,
}

impl StoreKey {
    pub const ALL: [StoreKey; 4] = [
        StoreKey::ExcludedTerms,
        StoreKey::IncludedTerms,
        StoreKey::Favorites,
        StoreKey::History,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::ExcludedTerms => "excluded_terms",
            StoreKey::IncludedTerms => "included_terms",
            StoreKey::Favorites => "favorites",
            StoreKey::History => "history",
        }
    }
}

/// Flat key-value persistence of JSON documents.
pub trait Store {
    fn read(&self, key: StoreKey) -> Result<Option<String>>;
    fn write(&self, key: StoreKey, value: &str) -> Result<()>;
}

/// Reads `key`, falling back to `default` when it is absent or unreadable
/// as `T`.
pub fn load_or<T, S, F>(store: &S, key: StoreKey, default: F) -> Result<T>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
    F: FnOnce() -> T,
{
    let Some(raw) = store.read(key)? else {
        tracing::debug!(key = key.as_str(), "no stored value, using default");
        return Ok(default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "discarding unreadable stored value");
            Ok(default())
        }
    }
}

/// Rewrites `key` in full.
pub fn save<T, S>(store: &S, key: StoreKey, value: &T) -> Result<()>
where
    T: Serialize,
    S: Store + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.write(key, &raw)?;
    tracing::debug!(key = key.as_str(), bytes = raw.len(), "saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TermSet;

    #[test]
    fn test_load_or_default_when_absent() {
        let store = MemoryStore::new();
        let terms: TermSet = load_or(&store, StoreKey::ExcludedTerms, || {
            DEFAULT_EXCLUDED_TERMS.iter().collect()
        })
        .unwrap();
        assert_eq!(terms.as_slice(), &["paypal.me".to_string()]);
    }

    #[test]
    fn test_load_or_default_when_corrupt() {
        let store = MemoryStore::new();
        store.write(StoreKey::IncludedTerms, "{not json").unwrap();
        let terms: TermSet =
            load_or(&store, StoreKey::IncludedTerms, TermSet::new).unwrap();
        assert!(terms.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let terms: TermSet = ["a", "b"].into_iter().collect();
        save(&store, StoreKey::IncludedTerms, &terms).unwrap();

        assert_eq!(
            store.read(StoreKey::IncludedTerms).unwrap().as_deref(),
            Some(r#"["a","b"]"#)
        );
        let loaded: TermSet = load_or(&store, StoreKey::IncludedTerms, TermSet::new).unwrap();
        assert_eq!(loaded, terms);
    }

    #[test]
    fn test_keys_are_distinct() {
        let mut names: Vec<&str> = StoreKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
